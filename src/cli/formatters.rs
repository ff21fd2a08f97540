//! Display formatting for amounts and dates. Only the shell formats values;
//! the store works with raw numbers.

use chrono::NaiveDate;
use finance_config::Config;
use finance_domain::Transaction;

const MAX_DECIMALS: usize = 6;

/// Formats money using the configured currency symbol and precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliFormatters {
    currency_symbol: String,
    decimals: usize,
}

impl CliFormatters {
    pub fn new(currency_symbol: impl Into<String>, decimals: usize) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
            decimals: decimals.min(MAX_DECIMALS),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.currency_symbol.clone(), config.decimal_places as usize)
    }

    /// `¥1200.50`, or `-¥12.00` for negative values.
    pub fn amount(&self, value: f64) -> String {
        let sign = if value < 0.0 { "-" } else { "" };
        format!(
            "{sign}{symbol}{value:.prec$}",
            symbol = self.currency_symbol,
            value = value.abs(),
            prec = self.decimals
        )
    }

    /// Amount prefixed with `+` for income and `-` for expense.
    pub fn signed(&self, txn: &Transaction) -> String {
        let value = txn.signed_amount();
        if value < 0.0 {
            self.amount(value)
        } else {
            format!("+{}", self.amount(value))
        }
    }

    pub fn date(&self, date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finance_domain::{EntryKind, TransactionInput};
    use uuid::Uuid;

    #[test]
    fn amounts_use_symbol_and_precision() {
        let fmt = CliFormatters::new("¥", 2);
        assert_eq!(fmt.amount(100.0), "¥100.00");
        assert_eq!(fmt.amount(-12.5), "-¥12.50");
        assert_eq!(CliFormatters::new("$", 0).amount(3.4), "$3");
    }

    #[test]
    fn signed_amount_follows_transaction_kind() {
        let fmt = CliFormatters::from_config(&Config::default());
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let income = Transaction::from_input(
            Uuid::new_v4(),
            TransactionInput::new(EntryKind::Income, 8.0, Uuid::new_v4(), date),
        );
        let expense = Transaction {
            kind: EntryKind::Expense,
            ..income.clone()
        };
        assert_eq!(fmt.signed(&income), "+¥8.00");
        assert_eq!(fmt.signed(&expense), "-¥8.00");
        assert_eq!(fmt.date(date), "2024-05-01");
    }
}
