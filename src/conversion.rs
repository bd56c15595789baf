//! Conversion of export files into output files.
//!
//! One input file is read, parsed and written in full before the caller
//! moves on to the next one. A failed write never leaves a partial output
//! file behind.

use crate::encoding;
use crate::error::Result;
use crate::mojebanka_format::MojebankaStatement;
use crate::qif_format::QifStatement;
use crate::tabular_format::TabularStatement;
use crate::types::Statement;
use crate::Format;
use chrono::NaiveDateTime;
use encoding_rs::Encoding;
use log::{error, info, warn};
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Prefix of every output file name.
pub const OUTPUT_PREFIX: &str = "mojebanka_export_";

/// Timestamp layout of output names. Day comes before month, as in the
/// names produced so far.
pub const TIMESTAMP_FORMAT: &str = "%Y-%d-%m-%H-%M-%S";

/// Settings shared by all files of one run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Output format.
    pub format: Format,

    /// Code page of the input files.
    pub encoding: &'static Encoding,

    /// Directory the output files are created in.
    pub output_dir: PathBuf,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            format: Format::Qif,
            encoding: encoding_rs::WINDOWS_1250,
            output_dir: PathBuf::from("."),
        }
    }
}

/// Result of converting one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// An output file was written.
    Converted {
        output: PathBuf,
        transactions: usize,
    },
    /// The input file had no content; nothing was written.
    Empty,
}

/// Output file name for a conversion started at `timestamp`.
///
/// `output_file_name(Format::Qif, 2010-10-21 08:05:09)` is
/// `mojebanka_export_2010-21-10-08-05-09.qif`.
pub fn output_file_name(format: Format, timestamp: NaiveDateTime) -> String {
    format!(
        "{}{}.{}",
        OUTPUT_PREFIX,
        timestamp.format(TIMESTAMP_FORMAT),
        format.extension()
    )
}

/// Keep only paths that exist, dropping repeats and keeping first-seen order.
pub fn filter_input_files<I, P>(paths: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let mut seen = HashSet::new();
    paths
        .into_iter()
        .map(Into::into)
        .filter(|path: &PathBuf| path.exists())
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

/// Write `statement` in the given format.
pub fn write_statement<W: Write>(writer: &mut W, statement: &Statement, format: Format) -> Result<()> {
    match format {
        Format::Qif => QifStatement::write_statement(writer, statement),
        Format::Cvs => TabularStatement::write_statement(writer, statement),
    }
}

/// Convert one export file into a new output file.
///
/// The output is named after `timestamp` and created in
/// `options.output_dir`. An empty input file yields
/// [`ConversionOutcome::Empty`] and no output.
pub fn convert_file(
    input: &Path,
    options: &ConvertOptions,
    timestamp: NaiveDateTime,
) -> Result<ConversionOutcome> {
    let bytes = fs::read(input)?;
    if bytes.is_empty() {
        warn!("{} is empty, nothing to convert", input.display());
        return Ok(ConversionOutcome::Empty);
    }

    let text = encoding::decode(&bytes, options.encoding)?;
    let parsed = MojebankaStatement::parse_str(&text)?;

    let name = output_file_name(options.format, timestamp);
    let (output, file) = PendingOutput::create(&options.output_dir, &name)?;

    // the file is closed at the end of this block, before any cleanup
    let written = {
        let mut writer = BufWriter::new(file);
        write_statement(&mut writer, &parsed.statement, options.format)
            .and_then(|()| writer.flush().map_err(Into::into))
    };
    if let Err(e) = written {
        error!("IO failed while writing {}: {}", output.path.display(), e);
        return Err(e);
    }

    let path = output.commit();
    info!(
        "Wrote {} transaction(s) from {} to {}",
        parsed.statement.len(),
        input.display(),
        path.display()
    );

    Ok(ConversionOutcome::Converted {
        output: path,
        transactions: parsed.statement.len(),
    })
}

/// Output path that is removed again unless committed.
struct PendingOutput {
    path: PathBuf,
    committed: bool,
}

impl PendingOutput {
    /// Create a new file named `name` in `dir`.
    ///
    /// Existing files are never overwritten: when `name` is taken, `-1`,
    /// `-2`, ... is inserted before the extension.
    fn create(dir: &Path, name: &str) -> Result<(Self, File)> {
        let (stem, extension) = name.rsplit_once('.').unwrap_or((name, ""));

        for attempt in 0u32.. {
            let candidate = match (attempt, extension) {
                (0, _) => name.to_string(),
                (n, "") => format!("{}-{}", stem, n),
                (n, ext) => format!("{}-{}.{}", stem, n, ext),
            };
            let path = dir.join(candidate);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    let pending = Self {
                        path,
                        committed: false,
                    };
                    return Ok((pending, file));
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    error!("IO failed creating {}: {}", path.display(), e);
                    return Err(e.into());
                }
            }
        }

        Err(io::Error::new(io::ErrorKind::AlreadyExists, name.to_string()).into())
    }

    fn commit(mut self) -> PathBuf {
        self.committed = true;
        self.path.clone()
    }
}

impl Drop for PendingOutput {
    fn drop(&mut self) {
        if !self.committed {
            if let Err(e) = fs::remove_file(&self.path) {
                warn!("Could not remove partial output {}: {}", self.path.display(), e);
            }
        }
    }
}
