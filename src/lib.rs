//! Mojebanka Converter Library
//!
//! Turns the fixed-layout text statements exported by the Mojebanka internet
//! banking into transaction records, and writes them out again.
//!
//! # Supported Formats
//!
//! - **Mojebanka text export** (input): whitespace-aligned statement dump in a
//!   Central European code page
//! - **QIF** (output): Quicken Interchange Format ledger
//! - **CVS** (output): tab-separated table
//!
//! # Examples
//!
//! ## Parsing an export
//!
//! ```no_run
//! use std::fs::File;
//! use mojebanka::mojebanka_format::MojebankaStatement;
//!
//! let mut file = File::open("vypis.txt")?;
//! let parsed = MojebankaStatement::from_read(&mut file, encoding_rs::WINDOWS_1250)?;
//! for tr in &parsed.statement.transactions {
//!     println!("{} {}", tr.account, tr.price);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Converting a file
//!
//! ```no_run
//! use std::path::Path;
//! use mojebanka::conversion::{convert_file, ConvertOptions};
//! use mojebanka::Format;
//!
//! let options = ConvertOptions {
//!     format: Format::Cvs,
//!     ..ConvertOptions::default()
//! };
//! let now = chrono::Local::now().naive_local();
//! convert_file(Path::new("vypis.txt"), &options, now)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod types;
pub mod encoding;
pub mod mojebanka_format;
pub mod qif_format;
pub mod tabular_format;
pub mod conversion;

use std::str::FromStr;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::{Statement, Transaction, TransactionType};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Quicken Interchange Format
    Qif,
    /// Tab-separated table
    Cvs,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "qif" => Ok(Format::Qif),
            "cvs" | "csv" => Ok(Format::Cvs),
            _ => Err(Error::InvalidFormat(s.to_string())),
        }
    }
}

impl Format {
    /// Get file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Qif => "qif",
            Format::Cvs => "cvs",
        }
    }
}
