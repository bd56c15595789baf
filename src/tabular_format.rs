//! Tab-separated table serializer.
//!
//! The table has a fixed header and one row per transaction. Fields are
//! written verbatim, without quoting.

use crate::error::Result;
use crate::types::{Statement, Transaction};
use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;
use std::io::Write;

/// Column names in output order.
pub const COLUMNS: [&str; 9] = [
    "date1", "type", "account", "price", "var_sym", "desc1", "desc2", "desc3", "desc4",
];

/// Represents a statement about to be written as a tab-separated table.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularStatement {
    /// The underlying statement data.
    pub statement: Statement,
}

/// Display copy of a transaction; the header is derived from the field names.
#[derive(Debug, Serialize)]
struct TabularRow<'a> {
    date1: String,
    #[serde(rename = "type")]
    transaction_type: &'static str,
    account: &'a str,
    price: &'a str,
    var_sym: &'a str,
    desc1: &'a str,
    desc2: &'a str,
    desc3: &'a str,
    desc4: &'a str,
}

impl<'a> From<&'a Transaction> for TabularRow<'a> {
    fn from(transaction: &'a Transaction) -> Self {
        TabularRow {
            date1: transaction
                .date1
                .map(|date| date.format("%d.%m.%Y").to_string())
                .unwrap_or_default(),
            transaction_type: transaction.transaction_type.label(),
            account: &transaction.account,
            price: &transaction.price,
            var_sym: &transaction.var_sym,
            desc1: &transaction.desc1,
            desc2: &transaction.desc2,
            desc3: &transaction.desc3,
            desc4: &transaction.desc4,
        }
    }
}

impl TabularStatement {
    /// Write the table to any destination implementing `Write`.
    ///
    /// The header row is written even when there are no transactions.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::fs::File;
    /// use mojebanka::tabular_format::TabularStatement;
    /// use mojebanka::types::Statement;
    ///
    /// let table = TabularStatement { statement: Statement::new() };
    /// let mut file = File::create("output.cvs")?;
    /// table.write_to(&mut file)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        Self::write_statement(writer, &self.statement)
    }

    /// Write a borrowed statement as a table.
    pub fn write_statement<W: Write>(writer: &mut W, statement: &Statement) -> Result<()> {
        let mut table = WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(QuoteStyle::Never)
            .has_headers(false)
            .from_writer(writer);

        table.write_record(COLUMNS)?;
        for transaction in &statement.transactions {
            table.serialize(TabularRow::from(transaction))?;
        }

        table.flush()?;
        Ok(())
    }
}
