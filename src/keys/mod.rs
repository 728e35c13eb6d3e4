//! Catalogue of data-store keys.
//!
//! Each protocol parameter lives under a namespace identifier derived from a
//! fixed literal. Parameterized keys append entity attributes after the
//! namespace in a fixed order; every constructor in this module documents
//! that order and it must never change once data has been written.

mod account;
mod funding;
mod gas;
mod market;
mod oracle;
mod pool;

pub use account::*;
pub use funding::*;
pub use gas::*;
pub use market::*;
pub use oracle::*;
pub use pool::*;

use std::{collections::HashMap, fmt, str::FromStr, sync::LazyLock};

use crate::{
    error::{InvalidInput, KeyError},
    field::{self, FieldValue},
    hash::{self, Identifier},
};

macro_rules! namespaces {
    ($($variant:ident => $literal:literal,)+) => {
        /// Named protocol concept, the root tag of a parameter family.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Namespace {
            $($variant,)+
        }

        impl Namespace {
            /// Every namespace, in declaration order.
            pub const ALL: &'static [Namespace] = &[$(Namespace::$variant,)+];

            /// Literal the identifier is derived from.
            pub const fn literal(&self) -> &'static str {
                match self {
                    $(Namespace::$variant => $literal,)+
                }
            }
        }
    };
}

namespaces! {
    PositionImpactFactor => "POS_IMPACT_FACTOR",
    MaxPositionImpactFactor => "MAX_POS_IMPACT_FACTOR",
    PositionImpactExponentFactor => "POS_IMPACT_EXP_FACTOR",
    PositionFeeFactor => "POSITION_FEE_FACTOR",
    SwapImpactFactor => "SWAP_IMPACT_FACTOR",
    SwapImpactExponentFactor => "SWAP_IMPACT_EXP_FACTOR",
    SwapFeeFactor => "SWAP_FEE_FACTOR",
    OpenInterest => "OPEN_INTEREST",
    OpenInterestInTokens => "OPEN_INTEREST_IN_TOKENS",
    PoolAmount => "POOL_AMOUNT",
    MaxPoolAmountForDeposit => "MAX_POOL_AMOUNT_FOR_DEPOSIT",
    MaxPoolAmount => "MAX_POOL_AMOUNT",
    ReserveFactor => "RESERVE_FACTOR",
    OpenInterestReserveFactor => "OI_RESERVE_FACTOR",
    MaxOpenInterest => "MAX_OPEN_INTEREST",
    Nonce => "NONCE",
    BorrowingFactor => "BORROWING_FACTOR",
    BorrowingExponentFactor => "BORROWING_EXPONENT_FACTOR",
    FundingFactor => "FUNDING_FACTOR",
    FundingExponentFactor => "FUNDING_EXPONENT_FACTOR",
    FundingIncreaseFactorPerSecond => "FUNDING_INCREASE_FACTOR_PER_SECOND",
    FundingDecreaseFactorPerSecond => "FUNDING_DECREASE_FACTOR_PER_SECOND",
    MinFundingFactorPerSecond => "MIN_FUNDING_FACTOR_PER_SECOND",
    MaxFundingFactorPerSecond => "MAX_FUNDING_FACTOR_PER_SECOND",
    ThresholdForStableFunding => "STABLE_FUNDING_FACTOR",
    ThresholdForDecreaseFunding => "THRESHOLD_FOR_DECREASE_FUNDING",
    MaxPnlFactor => "MAX_PNL_FACTOR",
    MaxPnlFactorForWithdrawals => "MAX_PNL_FACTOR_FOR_WITHDRAWALS",
    MaxPnlFactorForDeposits => "MAX_PNL_FACTOR_FOR_DEPOSITS",
    MaxPnlFactorForTraders => "MAX_PNL_FACTOR_FOR_TRADERS",
    MaxPositionImpactFactorForLiquidations => "MAX_POS_IMPFACT_FOR_LIQ",
    MaxPnlFactorForAdl => "MAX_PNL_FACTOR_FOR_ADL",
    MinPnlFactorAfterAdl => "MIN_PNL_FACTOR_AFTER_ADL",
    PositionImpactPoolAmount => "POS_IMPACT_POOL_AMT",
    MinPositionImpactPoolAmount => "MIN_POSITION_IMPACT_POOL_AMOUNT",
    PositionImpactPoolDistributionRate => "POSITION_IMPACT_POOL_DISTRIBUTION_RATE",
    SwapImpactPoolAmount => "SWAP_IMPACT_POOL_AMT",
    MinCollateralUsd => "MIN_COLLATERAL_USD",
    MinCollateralFactor => "MIN_COLLATERAL_FACTOR",
    MinCollateralFactorForOpenInterestMultiplier => "MIN_COLL_FACT_FOR_OI_MULT",
    MinPositionSizeUsd => "MIN_POSITION_SIZE_USD",
    DepositGasLimit => "DEPOSIT_GAS_LIMIT",
    WithdrawalGasLimit => "WITHDRAWAL_GAS_LIMIT",
    IncreaseOrderGasLimit => "INCR_ORD_GAS_LIMIT",
    DecreaseOrderGasLimit => "DECR_ORD_GAS_LIMIT",
    SwapOrderGasLimit => "SWAP_ORD_GAS_LIMIT",
    SingleSwapGasLimit => "SINGLE_SWAP_GAS_LIMIT",
    EstimatedGasFeeBaseAmount => "EST_GAS_FEE_BASE_AMT",
    EstimatedGasFeeMultiplierFactor => "EST_GAS_FEE_MULT_FACT",
    AccountPositionList => "ACCOUNT_POSITION_LIST",
    AccountOrderList => "ACCOUNT_ORDER_LIST",
    VirtualTokenId => "VIRTUAL_TOKEN_ID",
    VirtualMarketId => "VIRTUAL_MARKET_ID",
    VirtualInventoryForSwaps => "VIRT_INV_FOR_SWAPS",
    VirtualInventoryForPositions => "VIRT_INV_FOR_POSITIONS",
    PoolAmountAdjustment => "POOL_AMOUNT_ADJUSTMENT",
    AffiliateReward => "AFFILIATE_REWARD",
    IsMarketDisabled => "IS_MARKET_DISABLED",
    UiFeeFactor => "UI_FEE_FACTOR",
    MaxUiFeeFactor => "MAX_UI_FEE_FACTOR",
    PriceFeed => "PRICE_FEED",
    PriceFeedMultiplier => "PRICE_FEED_MULTIPLIER",
    PriceFeedHeartbeatDuration => "PRICE_FEED_HEARTBEAT_DURATION",
    StablePrice => "STABLE_PRICE",
    MaxOracleRefPriceDeviationFactor => "MAX_ORAC_REF_PRICE_DEV_FACTOR",
    MinOracleSigners => "MIN_ORACLE_SIGNERS",
    FeeToken => "FEE_TOKEN",
    MaxOraclePriceAge => "MAX_ORACLE_PRICE_AGE",
    ClaimableFeeAmount => "CLAIMABLE_FEE_AMOUNT",
    ClaimableFundingAmount => "CLAIMABLE_FUNDING_AMOUNT",
    ClaimableCollateralAmount => "CLAIMABLE_COLL_AMT",
    ClaimableCollateralFactor => "CLAIMABLE_COLL_FACTOR",
    ClaimableCollateralTimeDivisor => "CLAIMABLE_COLL_TIME_DIV",
    FundingFeeAmountPerSize => "FUNDING_FEE_AMOUNT_PER_SIZE",
    ClaimableFundingAmountPerSize => "CLAIMABLE_FUND_AMT_PER_SIZE",
    CreateDepositFeatureDisabled => "CREATE_DEPOSIT_FEATURE_DISABLED",
    CancelDepositFeatureDisabled => "CANCEL_DEPOSIT_FEATURE_DISABLED",
    ExecuteDepositFeatureDisabled => "EXECUTE_DEPOSIT_FEATURE_DISABLED",
    CreateOrderFeatureDisabled => "CREATE_ORDER_FEATURE_DISABLED",
    ExecuteOrderFeatureDisabled => "EXECUTE_ORDER_FEATURE_DISABLED",
    ExecuteAdlFeatureDisabled => "EXECUTE_ADL_FEATURE_DISABLED",
    UpdateOrderFeatureDisabled => "UPDATE_ORDER_FEATURE_DISABLED",
    CancelOrderFeatureDisabled => "CANCEL_ORDER_FEATURE_DISABLED",
    CumulativeBorrowingFactor => "CUMULATIVE_BORROWING_FACTOR",
    CumulativeBorrowingFactorUpdatedAt => "CUMUL_BORROW_FACT_UPDATED_AT",
    MaxCallbackGasLimit => "MAX_CALLBACK_GAS_LIMIT",
    ExecutionGasFeeBaseAmount => "EXEC_GAS_FEE_BASE_AMT",
    ExecutionGasFeeMultiplierFactor => "EXEC_GAS_FEE_MULT_FACT",
    MaxSwapPathLength => "MAX_SWAP_PATH_LENGTH",
}

static IDENTIFIERS: LazyLock<Vec<Identifier>> = LazyLock::new(|| {
    Namespace::ALL
        .iter()
        .map(|ns| hash::hash_felts(&[field::encode_bytes_wrapping(ns.literal().as_bytes())]))
        .collect()
});

static BY_LITERAL: LazyLock<HashMap<&'static str, Namespace>> =
    LazyLock::new(|| Namespace::ALL.iter().map(|ns| (ns.literal(), *ns)).collect());

impl Namespace {
    /// Identifier of the namespace, computed once per process.
    pub fn id(&self) -> Identifier {
        IDENTIFIERS[*self as usize]
    }

    pub fn from_literal(literal: &str) -> Option<Namespace> {
        BY_LITERAL.get(literal).copied()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}

impl FromStr for Namespace {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Namespace::from_literal(s).ok_or_else(|| InvalidInput::UnknownNamespace(s.to_string()))
    }
}

impl From<Namespace> for FieldValue {
    fn from(value: Namespace) -> Self {
        FieldValue::Key(value.id())
    }
}

/// Every `(literal, identifier)` pair of the catalogue, in declaration order.
pub fn catalogue() -> impl Iterator<Item = (&'static str, Identifier)> {
    Namespace::ALL.iter().map(|ns| (ns.literal(), ns.id()))
}

/// Composite key of `[namespace, fields...]`.
pub(crate) fn namespaced<const N: usize>(
    namespace: Namespace,
    fields: [FieldValue; N],
) -> Result<Identifier, KeyError> {
    let mut sequence = Vec::with_capacity(N + 1);
    sequence.push(FieldValue::from(namespace));
    sequence.extend(fields);
    hash::derive_composite_key(&sequence)
}
