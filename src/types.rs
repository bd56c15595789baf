//! Common types shared by the statement parser and the output formats.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One transaction entry of a statement export.
///
/// Text fields are stored trimmed. A missing value is an empty string, a
/// missing or malformed date is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Counter-account number with bank code (`digits/4digits`).
    pub account: String,

    /// Variable symbol.
    pub var_sym: String,

    /// Signed amount with currency, as printed (`-12,00 CZK`).
    pub price: String,

    /// Booking date.
    pub date1: Option<NaiveDate>,

    /// Date printed on the second line of the entry.
    pub date2: Option<NaiveDate>,

    /// Date printed on the third line of the entry.
    pub date3: Option<NaiveDate>,

    /// Transaction type label.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    /// Constant symbol.
    pub const_sym: String,

    /// Bank transaction identifier.
    pub trans_id: String,

    /// Payer description.
    pub desc1: String,

    /// Payee description.
    pub desc2: String,

    /// System description.
    pub desc3: String,

    /// Message for recipient.
    pub desc4: String,
}

/// Transaction type as labelled on the second line of an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    /// No label printed.
    #[default]
    #[serde(rename = "")]
    None,
    /// Payment (`Úhrada`).
    #[serde(rename = "Úhrada")]
    Payment,
    /// Collection (`Inkaso`).
    #[serde(rename = "Inkaso")]
    Collection,
}

impl TransactionType {
    /// Label as printed in the export.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::None => "",
            TransactionType::Payment => "Úhrada",
            TransactionType::Collection => "Inkaso",
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Ok(TransactionType::None),
            "Úhrada" => Ok(TransactionType::Payment),
            "Inkaso" => Ok(TransactionType::Collection),
            other => Err(format!("Invalid transaction type: {}", other)),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered list of transactions parsed from one export file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// Transactions in order of appearance.
    pub transactions: Vec<Transaction>,
}

impl Statement {
    /// Create an empty statement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transaction to the statement.
    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Number of transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the statement has no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
