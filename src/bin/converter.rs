//! Mojebanka Converter - CLI tool for converting Mojebanka text exports to QIF or a table.

use clap::{CommandFactory, Parser};
use mojebanka::{
    conversion::{convert_file, filter_input_files, ConversionOutcome, ConvertOptions},
    encoding::{self, DEFAULT_ENCODING},
    Format, Result,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mojebanka_converter")]
#[command(about = "Convert Mojebanka text statements to QIF or a tab-separated table", long_about = None)]
#[command(after_help = "Example: mojebanka_converter --format cvs *.txt")]
struct Cli {
    /// Output format (qif, cvs)
    #[arg(short, long, default_value = "qif")]
    format: String,

    /// Code page of the input files
    #[arg(short, long, default_value = DEFAULT_ENCODING)]
    encoding: String,

    /// Directory to write the output files to
    #[arg(short, long = "output-dir", default_value = ".")]
    output_dir: PathBuf,

    /// Statement files to convert; missing files are ignored
    files: Vec<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let options = ConvertOptions {
        format: cli.format.parse::<Format>()?,
        encoding: encoding::resolve(&cli.encoding)?,
        output_dir: cli.output_dir,
    };

    let files = filter_input_files(cli.files);
    if files.is_empty() {
        println!("No valid input files were given.");
        Cli::command().print_help()?;
        return Ok(());
    }

    for file in &files {
        println!("Converting file {}...", file.display());

        let now = chrono::Local::now().naive_local();
        match convert_file(file, &options, now)? {
            ConversionOutcome::Converted {
                output,
                transactions,
            } => println!("  {} transaction(s) written to {}", transactions, output.display()),
            ConversionOutcome::Empty => println!("  file is empty, skipped"),
        }
    }

    Ok(())
}
