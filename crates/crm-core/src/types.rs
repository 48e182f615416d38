//! Common types used throughout Agency CRM

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Monetary amount in whole currency units. The model never carries a
/// currency; formatting picks one from configuration.
pub type Amount = u64;

/// Commission rate applied when a user has none of their own (percent)
pub const DEFAULT_COMMISSION_RATE: f64 = 8.0;

/// Today's calendar date in local time, time-of-day dropped
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Inclusive calendar window `[start, end]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Render an amount with thousands grouping, e.g. `1,250,000`
pub fn group_thousands(amount: Amount) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Render an amount prefixed by a currency symbol
pub fn format_amount(amount: Amount, currency: &str) -> String {
    format!("{}{}", currency, group_thousands(amount))
}
