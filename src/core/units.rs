use std::fmt;

use super::constants::{ETHER_DECIMALS, WEI_PER_ETHER};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    Empty,
    InvalidCharacter(char),
    MultipleDecimalPoints,
    TooManyDecimals(usize),
    Overflow,
}

impl fmt::Display for UnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitError::Empty => write!(f, "Amount is empty"),
            UnitError::InvalidCharacter(c) => write!(f, "Invalid character in amount: '{}'", c),
            UnitError::MultipleDecimalPoints => write!(f, "Amount has more than one decimal point"),
            UnitError::TooManyDecimals(n) => {
                write!(f, "Too many decimals: {} (max {})", n, ETHER_DECIMALS)
            }
            UnitError::Overflow => write!(f, "Amount is too large"),
        }
    }
}

/// Convert a decimal ether string (e.g. "1.5") into wei.
pub fn parse_ether(input: &str) -> Result<u128, UnitError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed == "." {
        return Err(UnitError::Empty);
    }

    if let Some(c) = trimmed.chars().find(|c| !c.is_ascii_digit() && *c != '.') {
        return Err(UnitError::InvalidCharacter(c));
    }

    let mut parts = trimmed.split('.');
    let whole = parts.next().unwrap_or("");
    let fraction = parts.next().unwrap_or("");
    if parts.next().is_some() {
        return Err(UnitError::MultipleDecimalPoints);
    }

    // trailing zeros beyond the 18th digit carry no value
    let fraction = fraction.trim_end_matches('0');
    if fraction.len() > ETHER_DECIMALS {
        return Err(UnitError::TooManyDecimals(fraction.len()));
    }

    let whole_wei = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u128>()
            .map_err(|_| UnitError::Overflow)?
            .checked_mul(WEI_PER_ETHER)
            .ok_or(UnitError::Overflow)?
    };

    let fraction_wei = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", fraction, width = ETHER_DECIMALS);
        padded.parse::<u128>().map_err(|_| UnitError::Overflow)?
    };

    whole_wei.checked_add(fraction_wei).ok_or(UnitError::Overflow)
}

/// Convert wei into a decimal ether string; always keeps one fractional digit.
pub fn format_ether(wei: u128) -> String {
    let whole = wei / WEI_PER_ETHER;
    let fraction = wei % WEI_PER_ETHER;

    let digits = format!("{:0>width$}", fraction, width = ETHER_DECIMALS);
    let digits = digits.trim_end_matches('0');
    if digits.is_empty() {
        format!("{}.0", whole)
    } else {
        format!("{}.{}", whole, digits)
    }
}
