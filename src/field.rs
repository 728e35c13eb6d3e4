//! Coercion of typed values into Starknet field elements.
//!
//! Strings follow the data-store convention: a `0x`-prefixed hex numeral is
//! taken as a number, anything else is read as a Cairo short string (its
//! UTF-8 bytes as a big-endian numeral).

use alloy::primitives::{U256, uint};
use starknet_types_core::felt::Felt;

use crate::{error::InvalidInput, hash::Identifier};

/// Starknet prime, `2^251 + 17 * 2^192 + 1`.
pub const FIELD_MODULUS: U256 =
    uint!(0x0800000000000011000000000000000000000000000000000000000000000001_U256);

/// Longest text that still fits into a single field element.
pub const MAX_SHORT_STRING_LEN: usize = 31;

/// Single element of a composite key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldValue {
    /// Contract or account address.
    Address(Felt),
    /// Previously derived identifier, e.g. a namespace or a virtual market id.
    Key(Identifier),
    Bool(bool),
    UInt(U256),
    /// Signed integer, negative values wrap to `p - |x|` like Cairo's
    /// `i128 -> felt252` conversion.
    Int(i128),
    /// `0x`-prefixed hex numeral.
    RawHex(String),
    /// Base 10 numeral. Never goes through the short string path.
    Decimal(String),
    /// Hex numeral if it looks like one, short string otherwise.
    Text(String),
}

impl FieldValue {
    /// Coerce the value into a field element.
    pub fn to_felt(&self) -> Result<Felt, InvalidInput> {
        match self {
            FieldValue::Address(felt) => Ok(*felt),
            FieldValue::Key(id) => Ok(id.felt()),
            FieldValue::Bool(flag) => Ok(if *flag { Felt::ONE } else { Felt::ZERO }),
            FieldValue::UInt(value) => felt_from_u256(*value),
            FieldValue::Int(value) => Ok(Felt::from(*value)),
            FieldValue::RawHex(text) => parse_hex(text),
            FieldValue::Decimal(text) => parse_decimal(text),
            FieldValue::Text(text) => encode_text(text),
        }
    }
}

/// Returns true if `text` is a `0x`-prefixed hex numeral.
///
/// `"0x"` alone counts as hex (and then fails to parse), so it never falls
/// back to the short string encoding.
pub fn is_hex(text: &str) -> bool {
    match text.get(..2) {
        Some("0x") | Some("0X") => text[2..].bytes().all(|b| b.is_ascii_hexdigit()),
        _ => false,
    }
}

/// Encode text following the hex-or-short-string rule.
pub fn encode_text(text: &str) -> Result<Felt, InvalidInput> {
    if is_hex(text) {
        return parse_hex(text);
    }
    encode_short_string(text)
}

/// Encode text as a Cairo short string regardless of its content.
pub fn encode_short_string(text: &str) -> Result<Felt, InvalidInput> {
    let bytes = text.as_bytes();
    if bytes.is_empty() {
        return Err(InvalidInput::EmptyText);
    }
    if bytes.len() > MAX_SHORT_STRING_LEN {
        return Err(InvalidInput::TextTooLong(text.to_string(), bytes.len()));
    }
    Ok(Felt::from_bytes_be_slice(bytes))
}

/// Encode bytes as a big-endian numeral reduced modulo the field prime.
///
/// Matches what the data-store scripts did for names wider than a field
/// element; only the namespace catalogue relies on it.
pub fn encode_bytes_wrapping(bytes: &[u8]) -> Felt {
    Felt::from_bytes_be_slice(bytes)
}

/// Parse a `0x`-prefixed hex numeral strictly below the field modulus.
pub fn parse_hex(text: &str) -> Result<Felt, InvalidInput> {
    if !is_hex(text) || text.len() == 2 {
        return Err(InvalidInput::MalformedNumeral(text.to_string()));
    }
    let digits = text[2..].trim_start_matches('0');
    if digits.is_empty() {
        return Ok(Felt::ZERO);
    }
    if digits.len() > 64 {
        return Err(InvalidInput::OutOfRange(text.to_string()));
    }
    let value = U256::from_str_radix(digits, 16)
        .map_err(|_| InvalidInput::MalformedNumeral(text.to_string()))?;
    felt_from_u256(value)
}

/// Parse a base 10 numeral strictly below the field modulus.
pub fn parse_decimal(text: &str) -> Result<Felt, InvalidInput> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidInput::MalformedNumeral(text.to_string()));
    }
    let value = U256::from_str_radix(text, 10)
        .map_err(|_| InvalidInput::OutOfRange(text.to_string()))?;
    felt_from_u256(value)
}

pub fn felt_from_u256(value: U256) -> Result<Felt, InvalidInput> {
    if value >= FIELD_MODULUS {
        return Err(InvalidInput::OutOfRange(format!("{value:#x}")));
    }
    Ok(Felt::from_bytes_be(&value.to_be_bytes::<32>()))
}

pub fn felt_to_u256(felt: &Felt) -> U256 {
    U256::from_be_bytes(felt.to_bytes_be())
}

impl From<Felt> for FieldValue {
    fn from(value: Felt) -> Self {
        FieldValue::Address(value)
    }
}

impl From<Identifier> for FieldValue {
    fn from(value: Identifier) -> Self {
        FieldValue::Key(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<U256> for FieldValue {
    fn from(value: U256) -> Self {
        FieldValue::UInt(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::UInt(U256::from(value))
    }
}

impl From<u128> for FieldValue {
    fn from(value: u128) -> Self {
        FieldValue::UInt(U256::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value as i128)
    }
}

impl From<i128> for FieldValue {
    fn from(value: i128) -> Self {
        FieldValue::Int(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Text(value.clone())
    }
}

impl TryFrom<&serde_json::Value> for FieldValue {
    type Error = InvalidInput;

    /// Decode a field from a JSON config value. JSON numbers that are not
    /// integers within 64 bits are rejected; large numerals go in strings.
    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::String(text) => Ok(FieldValue::Text(text.clone())),
            serde_json::Value::Bool(flag) => Ok(FieldValue::Bool(*flag)),
            serde_json::Value::Number(number) => {
                if let Some(unsigned) = number.as_u64() {
                    Ok(FieldValue::from(unsigned))
                } else if let Some(signed) = number.as_i64() {
                    Ok(FieldValue::from(signed))
                } else {
                    Err(InvalidInput::Unsupported(format!("non-integer number {number}")))
                }
            }
            other => Err(InvalidInput::Unsupported(other.to_string())),
        }
    }
}
