//! Summary Metric Module
//! Reduces a selection to its total impressions.

use crate::data::SelectedTable;
use std::fmt;

/// Total impressions of a selection. Displays with `,` thousands separators.
///
/// Held as `u128` so the sum of any selection of `u64` totals is exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Summary(u128);

impl Summary {
    /// Sum of totals; `0` for an empty selection.
    pub fn of(selected: &SelectedTable) -> Self {
        Self(
            selected
                .entries()
                .iter()
                .map(|e| u128::from(e.impressions))
                .sum(),
        )
    }

    /// The exact integer behind the display text.
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Fraction of the total contributed by `impressions`; `0.0` when the total is zero.
    pub fn share_of(&self, impressions: u64) -> f64 {
        if self.0 == 0 {
            0.0
        } else {
            impressions as f64 / self.0 as f64
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&group_thousands(self.0))
    }
}

/// `1234567` → `"1,234,567"`.
pub fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
