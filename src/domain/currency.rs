use super::models::Amount;
use serde::{Deserialize, Serialize};

/// Shown in place of an amount whose source page has not loaded yet.
pub const PENDING_PLACEHOLDER: &str = "waiting..";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub grouping_separator: char,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "Rp".to_string(),
            grouping_separator: '.',
        }
    }
}

impl CurrencyFormat {
    /// `Rp 1.500.000`, `-Rp 40.000`.
    #[must_use]
    pub fn format(&self, amount: Amount) -> String {
        let digits = group_digits(&amount.unsigned_abs().to_string(), self.grouping_separator);
        let sign = if amount < 0 { "-" } else { "" };
        if self.symbol.is_empty() {
            format!("{sign}{digits}")
        } else {
            format!("{sign}{} {digits}", self.symbol)
        }
    }

    /// Formats a value that may still be loading.
    #[must_use]
    pub fn display(&self, amount: Option<Amount>) -> String {
        match amount {
            Some(value) => self.format(value),
            None => PENDING_PLACEHOLDER.to_string(),
        }
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().enumerate() {
        if count != 0 && (digits.len() - count) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
