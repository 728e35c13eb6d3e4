//! Poseidon-based identifiers addressing slots of the on-chain data store.

use std::{fmt, str::FromStr};

use alloy::primitives::hex;
use starknet_types_core::{
    felt::Felt,
    hash::{Poseidon, StarkHash},
};
use tracing::trace;

use crate::{
    error::{InvalidInput, KeyError},
    field::{self, FieldValue},
};

/// Fixed-width digest used as a data-store slot or as a namespace tag.
///
/// Formats as canonical hex: lowercase, `0x`-prefixed, no leading zeros.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Identifier(Felt);

impl Identifier {
    pub const fn from_felt(felt: Felt) -> Self {
        Self(felt)
    }

    pub fn felt(&self) -> Felt {
        self.0
    }

    /// Hex form zero-padded to 64 digits, as storage slot tooling prints it.
    pub fn to_fixed_hex(&self) -> String {
        hex::encode_prefixed(self.0.to_bytes_be())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = hex::encode(self.0.to_bytes_be());
        let digits = digits.trim_start_matches('0');
        write!(f, "0x{}", if digits.is_empty() { "0" } else { digits })
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({self})")
    }
}

impl FromStr for Identifier {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        field::parse_hex(s).map(Self)
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Identifier {
    type Error = InvalidInput;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Identifier> for Felt {
    fn from(value: Identifier) -> Self {
        value.0
    }
}

/// Derive the identifier of a named protocol concept, e.g. `"POOL_AMOUNT"`.
///
/// The name goes through the hex-or-short-string rule and then through the
/// Poseidon sponge as a one-element sequence (not `poseidon_hash_single`,
/// which pads differently and yields another digest).
pub fn derive_namespace(name: &str) -> Result<Identifier, KeyError> {
    if name.is_empty() {
        return Err(InvalidInput::EmptyName.into());
    }
    let id = hash_felts(&[field::encode_text(name)?]);
    trace!(name, %id, "derived namespace");
    Ok(id)
}

/// Same as [`derive_namespace`] but reduces names wider than a field element
/// modulo the prime instead of rejecting them.
///
/// A handful of deployed namespace literals are longer than 31 bytes and
/// their slots were written with the reduced value.
pub fn derive_namespace_wrapping(name: &str) -> Result<Identifier, KeyError> {
    if name.is_empty() {
        return Err(InvalidInput::EmptyName.into());
    }
    let felt = if field::is_hex(name) {
        field::parse_hex(name)?
    } else {
        field::encode_bytes_wrapping(name.as_bytes())
    };
    Ok(hash_felts(&[felt]))
}

/// Derive the identifier of an ordered field sequence.
///
/// Order matters: the same values in another order address another slot.
pub fn derive_composite_key(fields: &[FieldValue]) -> Result<Identifier, KeyError> {
    if fields.is_empty() {
        return Err(InvalidInput::EmptyFields.into());
    }
    let felts = fields
        .iter()
        .map(FieldValue::to_felt)
        .collect::<Result<Vec<_>, _>>()?;
    let id = hash_felts(&felts);
    trace!(fields = felts.len(), %id, "derived composite key");
    Ok(id)
}

pub(crate) fn hash_felts(felts: &[Felt]) -> Identifier {
    Identifier(Poseidon::hash_array(felts))
}
