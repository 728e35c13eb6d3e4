//! Per-market price impact, fee, collateral and open interest parameters.

use super::{Namespace, namespaced};
use crate::{error::KeyError, field::FieldValue, hash::Identifier};

/// `[POS_IMPACT_FACTOR, market, is_positive]`
pub fn position_impact_factor_key(
    market: impl Into<FieldValue>,
    is_positive: bool,
) -> Result<Identifier, KeyError> {
    namespaced(
        Namespace::PositionImpactFactor,
        [market.into(), is_positive.into()],
    )
}

/// `[POS_IMPACT_EXP_FACTOR, market]`
pub fn position_impact_exponent_factor_key(
    market: impl Into<FieldValue>,
) -> Result<Identifier, KeyError> {
    namespaced(Namespace::PositionImpactExponentFactor, [market.into()])
}

/// `[MAX_POS_IMPACT_FACTOR, market, is_positive]`
pub fn max_position_impact_factor_key(
    market: impl Into<FieldValue>,
    is_positive: bool,
) -> Result<Identifier, KeyError> {
    namespaced(
        Namespace::MaxPositionImpactFactor,
        [market.into(), is_positive.into()],
    )
}

/// `[MAX_POS_IMPFACT_FOR_LIQ, market]`
pub fn max_position_impact_factor_for_liquidations_key(
    market: impl Into<FieldValue>,
) -> Result<Identifier, KeyError> {
    namespaced(
        Namespace::MaxPositionImpactFactorForLiquidations,
        [market.into()],
    )
}

/// `[POSITION_FEE_FACTOR, market, for_positive_impact]`
pub fn position_fee_factor_key(
    market: impl Into<FieldValue>,
    for_positive_impact: bool,
) -> Result<Identifier, KeyError> {
    namespaced(
        Namespace::PositionFeeFactor,
        [market.into(), for_positive_impact.into()],
    )
}

/// `[SWAP_IMPACT_FACTOR, market, is_positive]`
pub fn swap_impact_factor_key(
    market: impl Into<FieldValue>,
    is_positive: bool,
) -> Result<Identifier, KeyError> {
    namespaced(
        Namespace::SwapImpactFactor,
        [market.into(), is_positive.into()],
    )
}

/// `[SWAP_IMPACT_EXP_FACTOR, market]`
pub fn swap_impact_exponent_factor_key(
    market: impl Into<FieldValue>,
) -> Result<Identifier, KeyError> {
    namespaced(Namespace::SwapImpactExponentFactor, [market.into()])
}

/// `[SWAP_FEE_FACTOR, market, for_positive_impact]`
pub fn swap_fee_factor_key(
    market: impl Into<FieldValue>,
    for_positive_impact: bool,
) -> Result<Identifier, KeyError> {
    namespaced(
        Namespace::SwapFeeFactor,
        [market.into(), for_positive_impact.into()],
    )
}

/// `[MIN_COLLATERAL_FACTOR, market]`
pub fn min_collateral_factor_key(market: impl Into<FieldValue>) -> Result<Identifier, KeyError> {
    namespaced(Namespace::MinCollateralFactor, [market.into()])
}

/// `[MIN_COLL_FACT_FOR_OI_MULT, market, is_long]`
pub fn min_collateral_factor_for_open_interest_multiplier_key(
    market: impl Into<FieldValue>,
    is_long: bool,
) -> Result<Identifier, KeyError> {
    namespaced(
        Namespace::MinCollateralFactorForOpenInterestMultiplier,
        [market.into(), is_long.into()],
    )
}

/// `[IS_MARKET_DISABLED, market]`
pub fn is_market_disabled_key(market: impl Into<FieldValue>) -> Result<Identifier, KeyError> {
    namespaced(Namespace::IsMarketDisabled, [market.into()])
}

/// `[OPEN_INTEREST, market, collateral_token, is_long]`
pub fn open_interest_key(
    market: impl Into<FieldValue>,
    collateral_token: impl Into<FieldValue>,
    is_long: bool,
) -> Result<Identifier, KeyError> {
    namespaced(
        Namespace::OpenInterest,
        [market.into(), collateral_token.into(), is_long.into()],
    )
}

/// `[OPEN_INTEREST_IN_TOKENS, market, collateral_token, is_long]`
pub fn open_interest_in_tokens_key(
    market: impl Into<FieldValue>,
    collateral_token: impl Into<FieldValue>,
    is_long: bool,
) -> Result<Identifier, KeyError> {
    namespaced(
        Namespace::OpenInterestInTokens,
        [market.into(), collateral_token.into(), is_long.into()],
    )
}

/// `[RESERVE_FACTOR, market, is_long]`
pub fn reserve_factor_key(
    market: impl Into<FieldValue>,
    is_long: bool,
) -> Result<Identifier, KeyError> {
    namespaced(Namespace::ReserveFactor, [market.into(), is_long.into()])
}

/// `[OI_RESERVE_FACTOR, market, is_long]`
pub fn open_interest_reserve_factor_key(
    market: impl Into<FieldValue>,
    is_long: bool,
) -> Result<Identifier, KeyError> {
    namespaced(
        Namespace::OpenInterestReserveFactor,
        [market.into(), is_long.into()],
    )
}

/// `[MAX_OPEN_INTEREST, market, is_long]`
pub fn max_open_interest_key(
    market: impl Into<FieldValue>,
    is_long: bool,
) -> Result<Identifier, KeyError> {
    namespaced(Namespace::MaxOpenInterest, [market.into(), is_long.into()])
}
