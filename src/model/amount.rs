//! Amount types for YNAB milliunits and the values written to the sheet.
//!
//! YNAB reports every amount as an integer count of milliunits, where `1000` milliunits is one
//! unit of the budget's currency. The sheet shows amounts in major units with the sign flipped, so
//! money spent on a credit card (negative in YNAB) is shown as a positive number.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// The number of decimal places kept when converting milliunits to a sheet value.
const DISPLAY_PLACES: u32 = 2;

/// The scale of a milliunit value: `amount * 10^-3` is the value in major units.
const MILLIUNIT_SCALE: u32 = 3;

/// An integer currency amount as reported by YNAB.
///
/// # Examples
///
/// ```
/// # use ynab_sheet_sync::model::Milliunits;
/// let spent = Milliunits::new(-1500).checked_add(Milliunits::new(-500));
/// assert_eq!(spent, Some(Milliunits::new(-2000)));
/// assert_eq!(Milliunits::new(i64::MIN).checked_add(Milliunits::new(-1)), None);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Milliunits(i64);

impl Milliunits {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Returns true if the amount is negative, i.e. money left the account.
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Adds two amounts, returning `None` if the result does not fit in an `i64`.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }
}

impl fmt::Display for Milliunits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A value as it is written to the sheet: the negated milliunit amount, scaled to major units and
/// rounded to two decimal places with midpoints rounded away from zero.
///
/// It renders with at least one fractional digit and without trailing zeros, so whole amounts look
/// like `50.0` and fractional ones like `12.35` or `12.3`.
///
/// # Examples
///
/// ```
/// # use ynab_sheet_sync::model::{Amount, Milliunits};
/// assert_eq!(Amount::from(Milliunits::new(-12345)).to_string(), "12.35");
/// assert_eq!(Amount::from(Milliunits::new(-50000)).to_string(), "50.0");
/// assert_eq!(Amount::from(Milliunits::new(50000)).to_string(), "-50.0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
}

/// Converts a YNAB amount into the value shown in the sheet.
pub fn format_amount(amount: Milliunits) -> Amount {
    let rounded = Decimal::new(amount.value(), MILLIUNIT_SCALE)
        .round_dp_with_strategy(DISPLAY_PLACES, RoundingStrategy::MidpointAwayFromZero);

    // Negating zero would leave a negative zero behind.
    let value = if rounded.is_zero() {
        Decimal::ZERO
    } else {
        -rounded
    };

    Amount {
        value: value.normalize(),
    }
}

impl From<Milliunits> for Amount {
    fn from(amount: Milliunits) -> Self {
        format_amount(amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.scale() == 0 {
            write!(f, "{}.0", self.value)
        } else {
            write!(f, "{}", self.value)
        }
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(milliunits: i64) -> String {
        format_amount(Milliunits::new(milliunits)).to_string()
    }

    #[test]
    fn test_format_amount_rounding_table() {
        let table = [
            (-12345, "12.35"),
            (-12340, "12.34"),
            (-12344, "12.34"),
            (-12346, "12.35"),
            (-12300, "12.3"),
            (-20000, "20.0"),
            (-5, "0.01"),
            (-4, "0.0"),
            (5, "-0.01"),
            (4, "0.0"),
            (0, "0.0"),
            (-1, "0.0"),
            (-995, "1.0"),
            (-1234567, "1234.57"),
        ];
        for (input, expected) in table {
            assert_eq!(fmt(input), expected, "format_amount({input})");
        }
    }

    #[test]
    fn test_format_amount_negates_balance() {
        assert_eq!(fmt(-50000), "50.0");
        assert_eq!(fmt(50000), "-50.0");
    }

    #[test]
    fn test_format_amount_zero_has_no_sign() {
        assert_eq!(fmt(-3), "0.0");
        assert_eq!(fmt(3), "0.0");
    }

    #[test]
    fn test_amount_serialize() {
        let amount = format_amount(Milliunits::new(-20000));
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"20.0\"");
    }

    #[test]
    fn test_milliunits_checked_add() {
        let total = Milliunits::new(-1500).checked_add(Milliunits::new(250));
        assert_eq!(total, Some(Milliunits::new(-1250)));
        assert_eq!(Milliunits::new(i64::MAX).checked_add(Milliunits::new(1)), None);
        assert_eq!(Milliunits::new(i64::MIN).checked_add(Milliunits::new(-1)), None);
    }

    #[test]
    fn test_milliunits_deserialize() {
        let m: Milliunits = serde_json::from_str("-20000").unwrap();
        assert_eq!(m.value(), -20000);
        assert!(m.is_negative());
    }
}
