//! Borrowing, funding and pnl factor keys.

use super::{Namespace, namespaced};
use crate::{error::KeyError, field::FieldValue, hash::Identifier};

/// Which pnl cap a [`max_pnl_factor_key`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PnlFactorType {
    Traders,
    Adl,
    Deposits,
    Withdrawals,
}

impl PnlFactorType {
    pub const ALL: [PnlFactorType; 4] = [
        PnlFactorType::Traders,
        PnlFactorType::Adl,
        PnlFactorType::Deposits,
        PnlFactorType::Withdrawals,
    ];

    pub fn namespace(&self) -> Namespace {
        match self {
            PnlFactorType::Traders => Namespace::MaxPnlFactorForTraders,
            PnlFactorType::Adl => Namespace::MaxPnlFactorForAdl,
            PnlFactorType::Deposits => Namespace::MaxPnlFactorForDeposits,
            PnlFactorType::Withdrawals => Namespace::MaxPnlFactorForWithdrawals,
        }
    }
}

/// `[BORROWING_FACTOR, market, is_long]`
pub fn borrowing_factor_key(
    market: impl Into<FieldValue>,
    is_long: bool,
) -> Result<Identifier, KeyError> {
    namespaced(Namespace::BorrowingFactor, [market.into(), is_long.into()])
}

/// `[BORROWING_EXPONENT_FACTOR, market, is_long]`
pub fn borrowing_exponent_factor_key(
    market: impl Into<FieldValue>,
    is_long: bool,
) -> Result<Identifier, KeyError> {
    namespaced(
        Namespace::BorrowingExponentFactor,
        [market.into(), is_long.into()],
    )
}

/// `[CUMULATIVE_BORROWING_FACTOR, market, is_long]`
pub fn cumulative_borrowing_factor_key(
    market: impl Into<FieldValue>,
    is_long: bool,
) -> Result<Identifier, KeyError> {
    namespaced(
        Namespace::CumulativeBorrowingFactor,
        [market.into(), is_long.into()],
    )
}

/// `[CUMUL_BORROW_FACT_UPDATED_AT, market, is_long]`
pub fn cumulative_borrowing_factor_updated_at_key(
    market: impl Into<FieldValue>,
    is_long: bool,
) -> Result<Identifier, KeyError> {
    namespaced(
        Namespace::CumulativeBorrowingFactorUpdatedAt,
        [market.into(), is_long.into()],
    )
}

/// `[FUNDING_FACTOR, market]`
pub fn funding_factor_key(market: impl Into<FieldValue>) -> Result<Identifier, KeyError> {
    namespaced(Namespace::FundingFactor, [market.into()])
}

/// `[FUNDING_EXPONENT_FACTOR, market]`
pub fn funding_exponent_factor_key(market: impl Into<FieldValue>) -> Result<Identifier, KeyError> {
    namespaced(Namespace::FundingExponentFactor, [market.into()])
}

/// `[FUNDING_INCREASE_FACTOR_PER_SECOND, market]`
pub fn funding_increase_factor_per_second_key(
    market: impl Into<FieldValue>,
) -> Result<Identifier, KeyError> {
    namespaced(Namespace::FundingIncreaseFactorPerSecond, [market.into()])
}

/// `[FUNDING_DECREASE_FACTOR_PER_SECOND, market]`
pub fn funding_decrease_factor_per_second_key(
    market: impl Into<FieldValue>,
) -> Result<Identifier, KeyError> {
    namespaced(Namespace::FundingDecreaseFactorPerSecond, [market.into()])
}

/// `[MIN_FUNDING_FACTOR_PER_SECOND, market]`
pub fn min_funding_factor_per_second_key(
    market: impl Into<FieldValue>,
) -> Result<Identifier, KeyError> {
    namespaced(Namespace::MinFundingFactorPerSecond, [market.into()])
}

/// `[MAX_FUNDING_FACTOR_PER_SECOND, market]`
pub fn max_funding_factor_per_second_key(
    market: impl Into<FieldValue>,
) -> Result<Identifier, KeyError> {
    namespaced(Namespace::MaxFundingFactorPerSecond, [market.into()])
}

/// `[STABLE_FUNDING_FACTOR, market]`
pub fn threshold_for_stable_funding_key(
    market: impl Into<FieldValue>,
) -> Result<Identifier, KeyError> {
    namespaced(Namespace::ThresholdForStableFunding, [market.into()])
}

/// `[THRESHOLD_FOR_DECREASE_FUNDING, market]`
pub fn threshold_for_decrease_funding_key(
    market: impl Into<FieldValue>,
) -> Result<Identifier, KeyError> {
    namespaced(Namespace::ThresholdForDecreaseFunding, [market.into()])
}

/// `[MAX_PNL_FACTOR, pnl_factor_type, market, is_long]`
///
/// The pnl factor type is the identifier of its own namespace, e.g.
/// `MAX_PNL_FACTOR_FOR_TRADERS`.
pub fn max_pnl_factor_key(
    pnl_factor_type: PnlFactorType,
    market: impl Into<FieldValue>,
    is_long: bool,
) -> Result<Identifier, KeyError> {
    namespaced(
        Namespace::MaxPnlFactor,
        [
            pnl_factor_type.namespace().into(),
            market.into(),
            is_long.into(),
        ],
    )
}

/// `[MIN_PNL_FACTOR_AFTER_ADL, market, is_long]`
pub fn min_pnl_factor_after_adl_key(
    market: impl Into<FieldValue>,
    is_long: bool,
) -> Result<Identifier, KeyError> {
    namespaced(
        Namespace::MinPnlFactorAfterAdl,
        [market.into(), is_long.into()],
    )
}
