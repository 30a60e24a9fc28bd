//! Price-string conversion.
//!
//! The purchase-order template carries prices as decimal strings; the
//! catalog API wants integer minor-currency units. Conversion is purely
//! textual so `19.9` and `19.90` mean the same 1990 cents and nothing is
//! ever rounded.

use thiserror::Error;

/// A price string that cannot be converted to cents.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// More than one decimal point in the string.
    #[error("price {0:?} has more than one decimal point")]
    ExtraDecimalPoint(String),

    /// Fractional part is empty or longer than two digits.
    #[error("price {0:?} must have one or two digits after the decimal point")]
    BadFraction(String),

    /// Whole or fractional part is not numeric.
    #[error("price {0:?} is not a number")]
    NotNumeric(String),
}

/// Parse a decimal price string into integer cents.
///
/// `"19.99"` → 1999, `"19.9"` → 1990, `"19"` → 1900. A second decimal
/// point, an empty fraction (`"19."`), or three or more fractional digits
/// is an error: the template is wrong and must be fixed by hand.
pub fn parse_price_cents(price: &str) -> Result<i64, PriceError> {
    let mut parts = price.split('.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next();
    if parts.next().is_some() {
        return Err(PriceError::ExtraDecimalPoint(price.to_owned()));
    }
    if whole.is_empty() && fraction.is_none() {
        return Err(PriceError::NotNumeric(price.to_owned()));
    }

    let digits = match fraction {
        None => format!("{whole}00"),
        Some(f) if f.len() == 2 => format!("{whole}{f}"),
        Some(f) if f.len() == 1 => format!("{whole}{f}0"),
        Some(_) => return Err(PriceError::BadFraction(price.to_owned())),
    };

    digits
        .parse::<i64>()
        .map_err(|_| PriceError::NotNumeric(price.to_owned()))
}

#[cfg(test)]
#[path = "tests/price_tests.rs"]
mod tests;
