//! QIF (Quicken Interchange Format) serializer.
//!
//! Every transaction becomes one record of single-letter fields terminated
//! by `^`:
//!
//! ```text
//! !Type:Bank
//! D10/10/2010
//! T-12.00
//! P107399/5400 232748902
//! MSVOBODA JAN VODAFONE CZECH REPUBLIC Úhrada do jiné banky 040500975602000
//! ^
//! ```

use crate::error::{Error, Result};
use crate::types::{Statement, Transaction};
use rust_decimal::{Decimal, RoundingStrategy};
use std::io::Write;
use std::str::FromStr;

/// Header line of a bank account QIF file.
pub const QIF_HEADER: &str = "!Type:Bank";

/// Account value that is displayed as the bank's own name.
///
/// This is the literal text `\0100`, which never occurs in a real account
/// number. Comparing against the `/0100` bank code would change payees.
pub const KB_ACCOUNT: &str = r"\0100";

/// Payee shown for [`KB_ACCOUNT`].
pub const KB_PAYEE: &str = "KB";

/// Represents a statement about to be written as QIF.
#[derive(Debug, Clone, PartialEq)]
pub struct QifStatement {
    /// The underlying statement data.
    pub statement: Statement,
}

/// One QIF record, with every field already rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QifRecord {
    /// Booking date as `DD/MM/YYYY`, empty when unknown.
    pub date: String,
    /// Signed amount with grouped thousands.
    pub amount: String,
    /// Counter-account and variable symbol.
    pub payee: String,
    /// The four descriptions joined by spaces.
    pub memo: String,
}

impl QifRecord {
    /// Build the display record for a transaction.
    pub fn from_transaction(transaction: &Transaction) -> Result<Self> {
        let amount = parse_amount(&transaction.price)?;

        Ok(QifRecord {
            date: transaction
                .date1
                .map(|date| date.format("%d/%m/%Y").to_string())
                .unwrap_or_default(),
            amount: format_amount(amount),
            payee: payee(transaction),
            memo: format!(
                "{} {} {} {}",
                transaction.desc1, transaction.desc2, transaction.desc3, transaction.desc4
            ),
        })
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "D{}", self.date)?;
        writeln!(writer, "T{}", self.amount)?;
        writeln!(writer, "P{}", self.payee)?;
        writeln!(writer, "M{}", self.memo)?;
        writeln!(writer, "^")?;
        Ok(())
    }
}

impl QifStatement {
    /// Write the statement as QIF to any destination implementing `Write`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::fs::File;
    /// use mojebanka::qif_format::QifStatement;
    /// use mojebanka::types::Statement;
    ///
    /// let qif = QifStatement { statement: Statement::new() };
    /// let mut file = File::create("output.qif")?;
    /// qif.write_to(&mut file)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        Self::write_statement(writer, &self.statement)
    }

    /// Write a borrowed statement as QIF.
    pub fn write_statement<W: Write>(writer: &mut W, statement: &Statement) -> Result<()> {
        writeln!(writer, "{}", QIF_HEADER)?;

        for transaction in &statement.transactions {
            QifRecord::from_transaction(transaction)?.write_to(writer)?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// Parse an amount as printed in the export (`-1234,50 CZK`, `+45,67 CZK`).
///
/// A leading `+` is dropped, a `-` is kept, no sign means positive.
///
/// Amounts are limited to what `Decimal` holds: 28 significant digits.
/// Anything longer is an [`Error::InvalidAmount`] and fails the whole file.
pub fn parse_amount(price: &str) -> Result<Decimal> {
    let number = price.trim();
    let number = number.strip_suffix("CZK").unwrap_or(number).trim_end();
    let cleaned = number.replace('+', "").replace(',', ".");

    Decimal::from_str(&cleaned).map_err(|_| Error::InvalidAmount(price.to_string()))
}

/// Format an amount with two decimals and comma-grouped thousands.
///
/// `-1234.5` becomes `-1,234.50`. The grouping does not depend on locale.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = format!("{:.2}", rounded.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}{}.{}", sign, grouped, fraction)
}

/// Payee line: counter-account followed by the variable symbol, if any.
pub fn payee(transaction: &Transaction) -> String {
    let mut payee = if transaction.account == KB_ACCOUNT {
        KB_PAYEE.to_string()
    } else {
        transaction.account.clone()
    };

    if !transaction.var_sym.is_empty() {
        payee.push(' ');
        payee.push_str(&transaction.var_sym);
    }

    payee
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn decimal(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_transaction() -> Transaction {
        Transaction {
            account: "107399/5400".into(),
            var_sym: "232748902".into(),
            price: "-12,00 CZK".into(),
            date1: NaiveDate::from_ymd_opt(2010, 10, 10),
            desc1: "SVOBODA JAN".into(),
            desc2: "VODAFONE CZECH REPUBLIC".into(),
            desc3: "Úhrada do jiné banky".into(),
            desc4: "040500975602000".into(),
            ..Transaction::default()
        }
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("-12,00 CZK").unwrap(), decimal("-12.0"));
        assert_eq!(parse_amount("+45,67 CZK").unwrap(), decimal("45.67"));
        assert_eq!(parse_amount("1500,00 CZK").unwrap(), decimal("1500"));
        assert!(matches!(parse_amount("abc CZK"), Err(Error::InvalidAmount(_))));
    }

    #[test]
    fn test_parse_amount_beyond_decimal_range() {
        assert_eq!(
            parse_amount("-12345678901234567890123456,00 CZK").unwrap(),
            decimal("-12345678901234567890123456")
        );
        assert!(matches!(
            parse_amount("-123456789012345678901234567890,00 CZK"),
            Err(Error::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
        assert_eq!(format_amount(decimal("-1234.5")), "-1,234.50");
        assert_eq!(format_amount(decimal("1000000")), "1,000,000.00");
        assert_eq!(format_amount(decimal("999.999")), "1,000.00");
        assert_eq!(format_amount(decimal("-12")), "-12.00");
        assert_eq!(format_amount(decimal("123456.78")), "123,456.78");
        assert_eq!(format_amount(decimal("-0.001")), "0.00");
    }

    #[test]
    fn test_payee() {
        let mut tr = sample_transaction();
        assert_eq!(payee(&tr), "107399/5400 232748902");

        tr.var_sym.clear();
        assert_eq!(payee(&tr), "107399/5400");

        tr.account = KB_ACCOUNT.into();
        assert_eq!(payee(&tr), "KB");

        // the bank code alone does not trigger the KB payee
        tr.account = "0100".into();
        assert_eq!(payee(&tr), "0100");
    }

    #[test]
    fn test_write_qif() {
        let mut statement = Statement::new();
        statement.add_transaction(sample_transaction());
        statement.add_transaction(Transaction {
            account: "2000145399/0800".into(),
            price: "+1500,00 CZK".into(),
            desc1: "NOVAK PETR".into(),
            ..Transaction::default()
        });

        let mut out = Vec::new();
        QifStatement { statement }.write_to(&mut out).unwrap();

        let expected = "!Type:Bank\n\
D10/10/2010\n\
T-12.00\n\
P107399/5400 232748902\n\
MSVOBODA JAN VODAFONE CZECH REPUBLIC Úhrada do jiné banky 040500975602000\n\
^\n\
D\n\
T1,500.00\n\
P2000145399/0800\n\
MNOVAK PETR   \n\
^\n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_record_does_not_touch_transaction() {
        let tr = sample_transaction();
        let first = QifRecord::from_transaction(&tr).unwrap();
        let second = QifRecord::from_transaction(&tr).unwrap();

        assert_eq!(first, second);
        assert_eq!(tr.date1, NaiveDate::from_ymd_opt(2010, 10, 10));
    }
}
