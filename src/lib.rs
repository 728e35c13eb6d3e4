//! Data-store keys of a Starknet perpetual DEX.
//!
//! # Overview
//!
//! Protocol parameters and per-entity state live in a single key-value data
//! store contract. Every slot is addressed by a Poseidon digest: named
//! concepts get a namespace identifier (see [`hash::derive_namespace`]) and
//! parameterized entries hash the namespace together with entity attributes
//! in a fixed order (see [`hash::derive_composite_key`]).
//!
//! Off-chain tooling has to reproduce these digests bit for bit, so
//! derivation is pure and deterministic: no I/O, no clock, no randomness.
//!
//! Use [`keys`] for the catalogue of named keys and their constructors, e.g.
//! [`keys::pool_amount_key`].
//!
//! Use [`market::plan_market_config`] and [`market::plan_protocol_config`] to
//! turn JSON configuration into the data-store calls that apply it, encoded
//! by [`store`].
//!
//! See `./tests` for examples.
//!
//! # Limitations/follow-ups
//!
//! * Calls are only planned. Signing and submitting them is left to an
//!   account implementation.
//!
//! * Reading slots back (`get_u256`, ...) is named but not performed.
//!
//! # Testing
//!
//! `keytool catalogue --check FILE` compares every catalogue identifier
//! against digests produced by another implementation.

pub mod error;
pub mod field;
pub mod hash;
pub mod keys;
pub mod market;
pub mod num;
pub mod store;

pub use hash::{Identifier, derive_composite_key, derive_namespace};
pub use market::{Deployment, Environment};
pub use starknet_types_core::felt::Felt;
