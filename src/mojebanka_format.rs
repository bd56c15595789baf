//! Parser for the fixed-layout text export of the Mojebanka internet banking.
//!
//! The export is a whitespace-aligned dump. Entries are separated by lines of
//! underscores, and every transaction occupies six fixed lines followed by an
//! optional "message for recipient" block:
//!
//! ```text
//! 107399/5400                    232748902 -12,00 CZK                   10.10.2010
//! Inkaso                         308                                    21.10.2010
//! 120-20101010 1010 O01ICFD      0                                      21.10.2010
//! Popis příkazce                 SVOBODA JAN
//! Popis pro příjemce             VODAFONE CZECH REPUBLIC
//! Systémový popis                Úhrada do jiné banky
//! Zpráva pro příjemce            040500975602000
//! ```
//!
//! Banner blocks (account header, period, column captions) and anything else
//! that does not follow this layout produce no transaction.

use crate::encoding;
use crate::error::Result;
use crate::types::{Statement, Transaction};
use chrono::NaiveDate;
use encoding_rs::Encoding;
use log::debug;
use regex::{Captures, Regex};
use std::io::Read;

/// Separator between blocks. The exports draw 84 underscores; older ones 80.
const SEPARATOR_PATTERN: &str = r"_{80,}";

/// Phrases found only in header and footer blocks.
const SKIP_MARKERS: [&str; 5] = [
    "ČÍSLO ÚČTU : ",
    "Obrat na vrub",
    "Číslo protiúčtu                VS",
    "Transakční historie",
    "Za období      od",
];

/// Label of the free-text block that trails the fixed lines.
const MESSAGE_MARKER: &str = "Zpráva pro příjemce";

/// Six-line layout of one transaction entry.
///
/// Whitespace is insignificant in verbose mode, hence `\x20` for spaces.
/// The variable symbol and transaction id are lazy so that they never
/// swallow digits of the amount or of the sequence number.
const ENTRY_PATTERN: &str = r"(?x)
    # counter-account, variable symbol, amount, booking date
    (?P<account>[0-9]*/[0-9]{4}) \x20*
    (?P<var_sym>[0-9]*?) \x20*
    (?P<price>-?\+?[0-9]+,[0-9]{2}\x20CZK) \x20*
    (?P<date1>[0-9]{2}\.[0-9]{2}\.[0-9]{4}) \r?\n

    # type label (may be missing), constant symbol, date
    (?P<type>Úhrada|Inkaso)? \x20*
    (?P<const_sym>[0-9]+) \x20*
    (?P<date2>[0-9]{2}\.[0-9]{2}\.[0-9]{4}) \r?\n

    # transaction id, sequence number, date
    (?P<trans_id>[0-9][0-9A-Z\x20-]{14,31}?) \x20*
    [0-9]+ \x20*
    (?P<date3>[0-9]{2}\.[0-9]{2}\.[0-9]{4}) \r?\n

    Popis\x20příkazce \x20* (?P<desc1>.+) \r?\n
    Popis\x20pro\x20příjemce \x20* (?P<desc2>.+) \r?\n
    Systémový\x20popis \x20* (?P<desc3>.+)
";

/// Represents a parsed Mojebanka export.
#[derive(Debug, Clone, PartialEq)]
pub struct MojebankaStatement {
    /// The underlying statement data.
    pub statement: Statement,
}

/// Compiled patterns used to split and recognise entries.
#[derive(Debug, Clone)]
pub struct BlockParser {
    separator: Regex,
    entry: Regex,
}

impl BlockParser {
    /// Compile the separator and entry patterns.
    pub fn new() -> Result<Self> {
        Ok(Self {
            separator: Regex::new(SEPARATOR_PATTERN)?,
            entry: Regex::new(ENTRY_PATTERN)?,
        })
    }

    /// Split decoded export text into blocks, in source order.
    pub fn blocks<'p, 't>(&'p self, text: &'t str) -> regex::Split<'p, 't> {
        self.separator.split(text)
    }

    /// Turn one block into a transaction.
    ///
    /// Returns `None` for banner blocks and for blocks that do not follow the
    /// six-line layout. Never fails.
    pub fn parse_block(&self, block: &str) -> Option<Transaction> {
        if is_banner(block) {
            debug!("Skipping banner block");
            return None;
        }

        let Some(caps) = self.entry.captures(block) else {
            if !block.trim().is_empty() {
                debug!("Block does not match the entry layout: {:?}", first_line(block));
            }
            return None;
        };

        Some(Transaction {
            account: field(&caps, "account"),
            var_sym: field(&caps, "var_sym"),
            price: field(&caps, "price"),
            date1: parse_date(&field(&caps, "date1")),
            date2: parse_date(&field(&caps, "date2")),
            date3: parse_date(&field(&caps, "date3")),
            // the group only matches the two known labels
            transaction_type: field(&caps, "type").parse().unwrap_or_default(),
            const_sym: field(&caps, "const_sym"),
            trans_id: field(&caps, "trans_id"),
            desc1: field(&caps, "desc1"),
            desc2: field(&caps, "desc2"),
            desc3: field(&caps, "desc3"),
            desc4: message_for_recipient(block),
        })
    }
}

impl MojebankaStatement {
    /// Parse an export from any source implementing `Read`.
    ///
    /// The bytes are decoded with `encoding` first.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::fs::File;
    /// use mojebanka::mojebanka_format::MojebankaStatement;
    ///
    /// let mut file = File::open("vypis.txt")?;
    /// let parsed = MojebankaStatement::from_read(&mut file, encoding_rs::WINDOWS_1250)?;
    /// println!("{} transactions", parsed.statement.len());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_read<R: Read>(reader: &mut R, encoding: &'static Encoding) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let text = encoding::decode(&bytes, encoding)?;
        Self::parse_str(&text)
    }

    /// Parse already decoded export text.
    pub fn parse_str(text: &str) -> Result<Self> {
        let parser = BlockParser::new()?;
        let mut statement = Statement::new();

        for block in parser.blocks(text) {
            if let Some(transaction) = parser.parse_block(block) {
                statement.add_transaction(transaction);
            }
        }

        Ok(MojebankaStatement { statement })
    }
}

fn is_banner(block: &str) -> bool {
    SKIP_MARKERS.iter().any(|marker| block.contains(marker))
}

fn field(caps: &Captures<'_>, name: &str) -> String {
    caps.name(name)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

fn first_line(block: &str) -> &str {
    block
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
}

/// Text after the "message for recipient" label up to the end of the block.
///
/// Runs of line breaks and tabs become a single space.
fn message_for_recipient(block: &str) -> String {
    let Some(start) = block.find(MESSAGE_MARKER) else {
        return String::new();
    };

    let mut message = String::new();
    let mut in_break = false;
    for c in block[start + MESSAGE_MARKER.len()..].chars() {
        if matches!(c, '\r' | '\n' | '\t') {
            if !in_break {
                message.push(' ');
            }
            in_break = true;
        } else {
            message.push(c);
            in_break = false;
        }
    }

    message.trim().to_string()
}

/// Parse a `DD.MM.YYYY` date.
///
/// Anything that is not exactly ten characters, or not a real calendar date,
/// is treated as no date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    if raw.chars().count() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%d.%m.%Y").ok()
}
