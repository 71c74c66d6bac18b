//! Number formatting for reports.
//!
//! Formatting options are passed to whoever renders a report as a
//! [`TableFormat`] value; nothing here is global.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Formatter configuration for decimal columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableFormat {
    /// Digits after the decimal point (default: 2).
    pub precision: u32,
    /// Separator between thousands groups, `None` to disable.
    pub thousands_separator: Option<char>,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            precision: 2,
            thousands_separator: Some(','),
        }
    }
}

impl TableFormat {
    /// Create a new config with the specified precision.
    #[must_use]
    pub fn with_precision(precision: u32) -> Self {
        Self {
            precision,
            ..Default::default()
        }
    }

    /// Plain output: no grouping separator.
    #[must_use]
    pub const fn without_grouping(mut self) -> Self {
        self.thousands_separator = None;
        self
    }

    /// Format a number, e.g. `1234567.891` as `1,234,567.89`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fuelbook_core::TableFormat;
    /// use rust_decimal_macros::dec;
    ///
    /// let fmt = TableFormat::default();
    /// assert_eq!(fmt.number(dec!(1234567.891)), "1,234,567.89");
    /// assert_eq!(fmt.number(dec!(-5)), "-5.00");
    /// ```
    #[must_use]
    pub fn number(&self, value: Decimal) -> String {
        let precision = self.precision as usize;
        let rounded = value.round_dp(self.precision);
        let text = format!("{:.precision$}", rounded.abs());

        let (int_part, frac_part) = match text.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (text.as_str(), None),
        };

        let mut out = String::with_capacity(text.len() + text.len() / 3 + 1);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            out.push('-');
        }
        out.push_str(&group_digits(int_part, self.thousands_separator));
        if let Some(frac) = frac_part {
            out.push('.');
            out.push_str(frac);
        }
        out
    }
}

fn group_digits(digits: &str, separator: Option<char>) -> String {
    let Some(sep) = separator else {
        return digits.to_string();
    };

    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}
