//! Pool balances, caps and impact pools.

use super::{Namespace, namespaced};
use crate::{error::KeyError, field::FieldValue, hash::Identifier};

/// `[POOL_AMOUNT, market, token]`
pub fn pool_amount_key(
    market: impl Into<FieldValue>,
    token: impl Into<FieldValue>,
) -> Result<Identifier, KeyError> {
    namespaced(Namespace::PoolAmount, [market.into(), token.into()])
}

/// `[MAX_POOL_AMOUNT, market, token]`
pub fn max_pool_amount_key(
    market: impl Into<FieldValue>,
    token: impl Into<FieldValue>,
) -> Result<Identifier, KeyError> {
    namespaced(Namespace::MaxPoolAmount, [market.into(), token.into()])
}

/// `[MAX_POOL_AMOUNT_FOR_DEPOSIT, market, token]`
pub fn max_pool_amount_for_deposit_key(
    market: impl Into<FieldValue>,
    token: impl Into<FieldValue>,
) -> Result<Identifier, KeyError> {
    namespaced(
        Namespace::MaxPoolAmountForDeposit,
        [market.into(), token.into()],
    )
}

/// `[POOL_AMOUNT_ADJUSTMENT, market, token]`
pub fn pool_amount_adjustment_key(
    market: impl Into<FieldValue>,
    token: impl Into<FieldValue>,
) -> Result<Identifier, KeyError> {
    namespaced(
        Namespace::PoolAmountAdjustment,
        [market.into(), token.into()],
    )
}

/// `[SWAP_IMPACT_POOL_AMT, market, token]`
pub fn swap_impact_pool_amount_key(
    market: impl Into<FieldValue>,
    token: impl Into<FieldValue>,
) -> Result<Identifier, KeyError> {
    namespaced(
        Namespace::SwapImpactPoolAmount,
        [market.into(), token.into()],
    )
}

/// `[POS_IMPACT_POOL_AMT, market]`
pub fn position_impact_pool_amount_key(
    market: impl Into<FieldValue>,
) -> Result<Identifier, KeyError> {
    namespaced(Namespace::PositionImpactPoolAmount, [market.into()])
}

/// `[MIN_POSITION_IMPACT_POOL_AMOUNT, market]`
pub fn min_position_impact_pool_amount_key(
    market: impl Into<FieldValue>,
) -> Result<Identifier, KeyError> {
    namespaced(Namespace::MinPositionImpactPoolAmount, [market.into()])
}

/// `[POSITION_IMPACT_POOL_DISTRIBUTION_RATE, market]`
pub fn position_impact_pool_distribution_rate_key(
    market: impl Into<FieldValue>,
) -> Result<Identifier, KeyError> {
    namespaced(
        Namespace::PositionImpactPoolDistributionRate,
        [market.into()],
    )
}
