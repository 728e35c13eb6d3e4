//! Gas limits charged to keepers for executing requests.

use super::{Namespace, namespaced};
use crate::{error::KeyError, hash::Identifier};

/// `[DEPOSIT_GAS_LIMIT, single_token]`
pub fn deposit_gas_limit_key(single_token: bool) -> Result<Identifier, KeyError> {
    namespaced(Namespace::DepositGasLimit, [single_token.into()])
}

/// `[WITHDRAWAL_GAS_LIMIT]`
///
/// Hashed again as a one-element sequence, so it is not the bare namespace.
pub fn withdrawal_gas_limit_key() -> Result<Identifier, KeyError> {
    namespaced(Namespace::WithdrawalGasLimit, [])
}

pub fn single_swap_gas_limit_key() -> Identifier {
    Namespace::SingleSwapGasLimit.id()
}

pub fn increase_order_gas_limit_key() -> Identifier {
    Namespace::IncreaseOrderGasLimit.id()
}

pub fn decrease_order_gas_limit_key() -> Identifier {
    Namespace::DecreaseOrderGasLimit.id()
}

pub fn swap_order_gas_limit_key() -> Identifier {
    Namespace::SwapOrderGasLimit.id()
}
