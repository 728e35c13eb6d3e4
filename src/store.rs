//! Calls against the data store and the role store.
//!
//! Nothing here talks to a node. Calls are built as [`Invocation`]s in the
//! shape an account submits them (`contractAddress`, `entrypoint`,
//! `calldata`), so they can be printed, diffed, or handed to a signer.

use std::{fmt, str::FromStr};

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use starknet_types_core::felt::Felt;

use crate::{error::InvalidInput, field, hash::Identifier};

/// A single data-store setter call.
#[derive(Clone, derive_more::Debug, PartialEq, Eq)]
pub enum StoreWrite {
    SetU256 {
        key: Identifier,
        #[debug("{value}")]
        value: U256,
    },
    SetFelt252 {
        key: Identifier,
        #[debug("{value:#x}")]
        value: Felt,
    },
    SetBool { key: Identifier, value: bool },
    SetAddress {
        key: Identifier,
        #[debug("{value:#x}")]
        value: Felt,
    },
}

impl StoreWrite {
    pub fn key(&self) -> Identifier {
        match self {
            StoreWrite::SetU256 { key, .. }
            | StoreWrite::SetFelt252 { key, .. }
            | StoreWrite::SetBool { key, .. }
            | StoreWrite::SetAddress { key, .. } => *key,
        }
    }

    pub fn entrypoint(&self) -> &'static str {
        match self {
            StoreWrite::SetU256 { .. } => "set_u256",
            StoreWrite::SetFelt252 { .. } => "set_felt252",
            StoreWrite::SetBool { .. } => "set_bool",
            StoreWrite::SetAddress { .. } => "set_address",
        }
    }

    /// Getter reading back the slot this call writes.
    pub fn read_entrypoint(&self) -> &'static str {
        match self {
            StoreWrite::SetU256 { .. } => "get_u256",
            StoreWrite::SetFelt252 { .. } => "get_felt252",
            StoreWrite::SetBool { .. } => "get_bool",
            StoreWrite::SetAddress { .. } => "get_address",
        }
    }

    /// `[key, value...]`, a `u256` taking two elements (low, high).
    pub fn calldata(&self) -> Vec<Felt> {
        let key = self.key().felt();
        match self {
            StoreWrite::SetU256 { value, .. } => {
                let (low, high) = split_u256(*value);
                vec![key, low, high]
            }
            StoreWrite::SetFelt252 { value, .. } | StoreWrite::SetAddress { value, .. } => {
                vec![key, *value]
            }
            StoreWrite::SetBool { value, .. } => vec![key, Felt::from(*value)],
        }
    }

    pub fn to_invocation(&self, data_store: Felt) -> Invocation {
        Invocation {
            contract_address: data_store,
            entrypoint: self.entrypoint().to_string(),
            calldata: self.calldata(),
        }
    }
}

/// Cairo `u256` layout: low 128 bits first, then high 128 bits.
pub fn split_u256(value: U256) -> (Felt, Felt) {
    let limbs = value.as_limbs();
    let low = (limbs[1] as u128) << 64 | limbs[0] as u128;
    let high = (limbs[3] as u128) << 64 | limbs[2] as u128;
    (Felt::from(low), Felt::from(high))
}

/// Contract call ready to be signed and submitted.
#[derive(Clone, derive_more::Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invocation {
    #[debug("{contract_address:#x}")]
    pub contract_address: Felt,
    pub entrypoint: String,
    #[debug("{:?}", calldata.iter().map(|felt| format!("{felt:#x}")).collect::<Vec<_>>())]
    pub calldata: Vec<Felt>,
}

/// Role held in the role store, identified by its short string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    RoleAdmin,
    Controller,
    MarketKeeper,
    OrderKeeper,
    FrozenOrderKeeper,
    LiquidationKeeper,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::RoleAdmin,
        Role::Controller,
        Role::MarketKeeper,
        Role::OrderKeeper,
        Role::FrozenOrderKeeper,
        Role::LiquidationKeeper,
    ];

    /// Roles a keeper account needs to operate markets and orders.
    pub const KEEPER: [Role; 5] = [
        Role::Controller,
        Role::MarketKeeper,
        Role::OrderKeeper,
        Role::FrozenOrderKeeper,
        Role::LiquidationKeeper,
    ];

    pub const fn literal(&self) -> &'static str {
        match self {
            Role::RoleAdmin => "ROLE_ADMIN",
            Role::Controller => "CONTROLLER",
            Role::MarketKeeper => "MARKET_KEEPER",
            Role::OrderKeeper => "ORDER_KEEPER",
            Role::FrozenOrderKeeper => "FROZEN_ORDER_KEEPER",
            Role::LiquidationKeeper => "LIQUIDATION_KEEPER",
        }
    }

    /// Short string encoding, roles are not hashed.
    pub fn felt(&self) -> Felt {
        field::encode_bytes_wrapping(self.literal().as_bytes())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}

impl FromStr for Role {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.literal().eq_ignore_ascii_case(s))
            .ok_or_else(|| InvalidInput::Unsupported(format!("role {s:?}")))
    }
}

/// `grant_role(account, role)` on the role store.
pub fn grant_role(role_store: Felt, account: Felt, role: Role) -> Invocation {
    Invocation {
        contract_address: role_store,
        entrypoint: "grant_role".to_string(),
        calldata: vec![account, role.felt()],
    }
}
