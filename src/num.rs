//! Fixed-point values as the data store keeps them.
//!
//! Factors are stored as `u256` with [`FLOAT_DECIMALS`] decimals, token
//! amounts with the decimals of their token. Configuration files write them
//! in a readable notation that is converted here without rounding:
//!
//! - `"0.0005"` plain decimal
//! - `"1%"` percentage
//! - `"1e-8"` exponent notation
//! - any of the above followed by `/s`, `/h`, `/d` or `/y` for a per-second
//!   rate (the division floors)

use alloy::primitives::U256;
use fastnum::decimal::{Context, UnsignedDecimal};

/// Decimals of a stored factor ("float" in the contracts).
pub const FLOAT_DECIMALS: u8 = 30;

pub const SECONDS_PER_HOUR: u64 = 3_600;
pub const SECONDS_PER_DAY: u64 = 86_400;
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Wide enough that rescaling any `u256` result cannot overflow the digits.
type Decimal = UnsignedDecimal<8>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumError {
    #[error("malformed number {0:?}")]
    Malformed(String),

    #[error("{0:?} has more fractional digits than {1} decimals hold")]
    PrecisionLoss(String, u8),

    #[error("{0:?} does not fit into 256 bits")]
    Overflow(String),

    #[error("{0:?} is not a percentage")]
    MissingPercent(String),

    #[error("malformed exponent in {0:?}")]
    MalformedExponent(String),

    #[error("unknown rate unit {0:?}")]
    UnknownUnit(String),

    #[error("{0} decimals exceed the {FLOAT_DECIMALS} decimals of a factor")]
    TooManyDecimals(u8),
}

/// Decimal to fixed-point converter.
#[derive(Clone, Copy, Debug, Default)]
pub struct Converter {
    decimals: u8,
}

impl Converter {
    pub fn new(decimals: u8) -> Self {
        Self { decimals }
    }

    /// Float converter, [`FLOAT_DECIMALS`] decimals.
    pub fn float() -> Self {
        Self::new(FLOAT_DECIMALS)
    }

    /// Parse decimal text and scale it to this converter's decimals.
    pub fn parse(&self, text: &str) -> Result<U256, NumError> {
        self.to_unsigned(parse_decimal(text)?, text)
    }

    fn to_unsigned(&self, value: Decimal, source: &str) -> Result<U256, NumError> {
        if value.is_zero() {
            return Ok(U256::ZERO);
        }
        let scale = self.decimals as i16;
        let rescaled = value.rescale(scale);
        if rescaled.is_nan() || rescaled.is_infinite() || rescaled.is_op_overflow() {
            return Err(NumError::Overflow(source.to_string()));
        }
        if rescaled != value || rescaled.fractional_digits_count() != scale {
            return Err(NumError::PrecisionLoss(source.to_string(), self.decimals));
        }
        U256::try_from_le_slice(rescaled.digits().to_radix_le(256).as_slice())
            .ok_or_else(|| NumError::Overflow(source.to_string()))
    }
}

fn parse_decimal(text: &str) -> Result<Decimal, NumError> {
    let malformed = || NumError::Malformed(text.to_string());
    // Digits, one point and an exponent only: no signs on the mantissa, no
    // NaN or infinity spellings.
    let valid = !text.is_empty()
        && text.bytes().next().is_some_and(|b| b.is_ascii_digit() || b == b'.')
        && text
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'-' | b'+'));
    if !valid {
        return Err(malformed());
    }
    let value = Decimal::from_str(text, Context::default().without_traps()).map_err(|_| malformed())?;
    if value.is_nan() || value.is_infinite() {
        return Err(malformed());
    }
    Ok(value)
}

/// `amount * 10^decimals`, e.g. a token amount in its smallest unit.
pub fn expand_decimals(amount: &str, decimals: u8) -> Result<U256, NumError> {
    Converter::new(decimals).parse(amount)
}

/// `value * 10^(30 - decimals)`: reads `value` as a number with `decimals`
/// decimals and returns it as a float.
pub fn decimal_to_float(value: U256, decimals: u8) -> Result<U256, NumError> {
    if decimals > FLOAT_DECIMALS {
        return Err(NumError::TooManyDecimals(decimals));
    }
    let scale = U256::from(10u64).pow(U256::from(FLOAT_DECIMALS - decimals));
    value
        .checked_mul(scale)
        .ok_or_else(|| NumError::Overflow(value.to_string()))
}

/// `"1%"` as a float, i.e. `0.01 * 10^30`.
pub fn percentage_to_float(text: &str) -> Result<U256, NumError> {
    let Some(number) = text.strip_suffix('%') else {
        return Err(NumError::MissingPercent(text.to_string()));
    };
    Converter::new(FLOAT_DECIMALS - 2)
        .parse(number)
        .map_err(|err| match err {
            NumError::PrecisionLoss(_, _) => NumError::PrecisionLoss(text.to_string(), FLOAT_DECIMALS),
            NumError::Malformed(_) => NumError::Malformed(text.to_string()),
            other => other,
        })
}

/// `"5e-8"` as a float, the mantissa scaled by `10^(30 + exponent)`.
pub fn exponent_to_float(text: &str) -> Result<U256, NumError> {
    let Some((mantissa, exponent)) = text.split_once(['e', 'E']) else {
        return Err(NumError::MalformedExponent(text.to_string()));
    };
    let digits = exponent.strip_prefix(['-', '+']).unwrap_or(exponent);
    if mantissa.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NumError::MalformedExponent(text.to_string()));
    }
    if exponent.parse::<i16>().is_err() {
        return Err(NumError::MalformedExponent(text.to_string()));
    }
    Converter::float().parse(text)
}

/// Parse a factor in any of the notations of this module.
pub fn parse_factor(text: &str) -> Result<U256, NumError> {
    let text = text.trim();
    let (number, seconds) = match text.split_once('/') {
        Some((number, unit)) => (number.trim_end(), seconds_per(unit.trim())?),
        None => (text, 1),
    };
    let value = if number.ends_with('%') {
        percentage_to_float(number)?
    } else if number.contains(['e', 'E']) {
        exponent_to_float(number)?
    } else {
        Converter::float().parse(number)?
    };
    Ok(value / U256::from(seconds))
}

/// Parse a raw integer amount, exponent notation allowed (`"24e18"`).
pub fn parse_amount(text: &str) -> Result<U256, NumError> {
    Converter::new(0).parse(text.trim())
}

fn seconds_per(unit: &str) -> Result<u64, NumError> {
    match unit {
        "s" => Ok(1),
        "h" => Ok(SECONDS_PER_HOUR),
        "d" => Ok(SECONDS_PER_DAY),
        "y" => Ok(SECONDS_PER_YEAR),
        other => Err(NumError::UnknownUnit(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::uint;

    use super::*;

    fn float(units: u64, decimals: u8) -> U256 {
        decimal_to_float(U256::from(units), decimals).unwrap()
    }

    #[test]
    fn test_numeric_expand_decimals() {
        assert_eq!(
            expand_decimals("90000000", 18).unwrap(),
            uint!(90000000000000000000000000_U256)
        );
        assert_eq!(expand_decimals("1.5", 6).unwrap(), U256::from(1_500_000));
        assert_eq!(expand_decimals("0", 18).unwrap(), U256::ZERO);
        assert_eq!(
            expand_decimals("1.0000001", 6),
            Err(NumError::PrecisionLoss("1.0000001".to_string(), 6))
        );
        assert!(matches!(expand_decimals("-1", 6), Err(NumError::Malformed(_))));
        assert!(matches!(expand_decimals("NaN", 6), Err(NumError::Malformed(_))));
        assert!(matches!(expand_decimals("", 6), Err(NumError::Malformed(_))));
    }

    #[test]
    fn test_numeric_decimal_to_float() {
        assert_eq!(float(1, 2), uint!(10000000000000000000000000000_U256));
        assert_eq!(float(1, 30), U256::from(1));
        assert_eq!(float(625, 11), uint!(6250000000000000000000_U256));
        assert_eq!(
            decimal_to_float(U256::from(1), 31),
            Err(NumError::TooManyDecimals(31))
        );
        assert!(matches!(
            decimal_to_float(U256::MAX, 0),
            Err(NumError::Overflow(_))
        ));
    }

    #[test]
    fn test_numeric_percentage_to_float() {
        assert_eq!(percentage_to_float("1%").unwrap(), float(1, 2));
        assert_eq!(percentage_to_float("0.05%").unwrap(), float(5, 4));
        assert_eq!(percentage_to_float("0%").unwrap(), U256::ZERO);
        assert_eq!(
            percentage_to_float("1"),
            Err(NumError::MissingPercent("1".to_string()))
        );
    }

    #[test]
    fn test_numeric_exponent_to_float() {
        assert_eq!(exponent_to_float("1e-8").unwrap(), float(1, 8));
        assert_eq!(exponent_to_float("5E-10").unwrap(), float(5, 10));
        assert_eq!(exponent_to_float("2e0").unwrap(), float(2, 0));
        assert!(matches!(
            exponent_to_float("1e"),
            Err(NumError::MalformedExponent(_))
        ));
        assert!(matches!(
            exponent_to_float("1e-x"),
            Err(NumError::MalformedExponent(_))
        ));
        assert!(matches!(
            exponent_to_float("1e-31"),
            Err(NumError::PrecisionLoss(_, FLOAT_DECIMALS))
        ));
    }

    #[test]
    fn test_numeric_parse_factor() {
        assert_eq!(parse_factor("0.0005").unwrap(), float(5, 4));
        assert_eq!(parse_factor("1.5").unwrap(), float(15, 1));
        assert_eq!(parse_factor("80%").unwrap(), float(8, 1));
        assert_eq!(parse_factor("3e-10").unwrap(), float(3, 10));
        assert_eq!(
            parse_factor("1%/h").unwrap(),
            float(1, 2) / U256::from(SECONDS_PER_HOUR)
        );
        assert_eq!(parse_factor("2 / s").unwrap(), float(2, 0));
        assert_eq!(parse_factor("0%/h").unwrap(), U256::ZERO);
        assert_eq!(
            parse_factor("1%/w"),
            Err(NumError::UnknownUnit("w".to_string()))
        );
    }

    #[test]
    fn test_numeric_parse_amount() {
        assert_eq!(parse_amount("24e18").unwrap(), expand_decimals("24", 18).unwrap());
        assert_eq!(parse_amount("256e41").unwrap(), expand_decimals("256", 41).unwrap());
        assert_eq!(parse_amount("10000").unwrap(), U256::from(10_000));
        assert!(matches!(parse_amount("0.5"), Err(NumError::PrecisionLoss(_, 0))));
        assert!(matches!(parse_amount("1e80"), Err(NumError::Overflow(_))));
    }
}
