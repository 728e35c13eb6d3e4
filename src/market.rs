//! Market and protocol configuration turned into data-store writes.
//!
//! Configuration is plain JSON with values in the notation of
//! [`crate::num`]. Planning is pure: the output is the ordered list of
//! [`Invocation`]s that configure a market, the same for the same input.

use std::{collections::BTreeMap, fmt, path::Path, str::FromStr};

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use starknet_types_core::felt::Felt;
use tracing::{debug, info};

use crate::{
    error::{ConfigError, InvalidInput},
    hash::{Identifier, derive_namespace},
    keys::{self, Namespace, PnlFactorType},
    num,
    store::{Invocation, Role, StoreWrite, grant_role},
};

/// Per-market parameters.
///
/// Missing fields fall back to [`MarketConfig::default`], the baseline every
/// market starts from. Amounts are raw integers (`"24e18"`), factors use
/// the factor notation (`"0.05%"`, `"1e-8"`, `"1%/h"`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Label of the virtual token id, e.g. `"PERP:ETH/USD"`.
    pub virtual_token_id_for_index_token: Option<String>,
    /// Label of the virtual market id, e.g. `"SPOT:ETH/USD"`.
    pub virtual_market_id: Option<String>,

    pub position_impact_pool_amount: String,
    pub min_position_impact_pool_amount: String,
    pub position_impact_pool_distribution_rate: Option<String>,

    pub max_long_token_pool_amount: String,
    pub max_short_token_pool_amount: String,
    pub max_long_token_pool_amount_for_deposit: String,
    pub max_short_token_pool_amount_for_deposit: String,

    pub negative_position_impact_factor: String,
    pub positive_position_impact_factor: String,
    pub position_impact_exponent_factor: String,

    pub position_fee_factor_for_negative_impact: String,
    pub position_fee_factor_for_positive_impact: String,

    pub min_collateral_factor: String,
    pub min_collateral_factor_for_open_interest_multiplier_long: String,
    pub min_collateral_factor_for_open_interest_multiplier_short: String,

    pub swap_fee_factor_for_negative_impact: String,
    pub swap_fee_factor_for_positive_impact: String,
    pub negative_swap_impact_factor: String,
    pub positive_swap_impact_factor: String,
    pub swap_impact_exponent_factor: String,

    pub max_open_interest_for_longs: String,
    pub max_open_interest_for_shorts: String,

    pub funding_increase_factor_per_second: String,
    pub funding_decrease_factor_per_second: String,
    pub min_funding_factor_per_second: String,
    pub max_funding_factor_per_second: String,
    pub threshold_for_stable_funding: String,
    pub threshold_for_decrease_funding: String,
    pub funding_factor: String,
    pub funding_exponent_factor: String,

    pub borrowing_factor_for_longs: String,
    pub borrowing_factor_for_shorts: String,
    pub borrowing_exponent_factor_for_longs: String,
    pub borrowing_exponent_factor_for_shorts: String,

    pub reserve_factor_longs: String,
    pub reserve_factor_shorts: String,
    pub open_interest_reserve_factor_longs: String,
    pub open_interest_reserve_factor_shorts: String,

    pub max_pnl_factor_for_traders_longs: String,
    pub max_pnl_factor_for_traders_shorts: String,
    pub max_pnl_factor_for_adl_longs: String,
    pub max_pnl_factor_for_adl_shorts: String,
    pub min_pnl_factor_after_adl_longs: String,
    pub min_pnl_factor_after_adl_shorts: String,
    pub max_pnl_factor_for_deposits_longs: String,
    pub max_pnl_factor_for_deposits_shorts: String,
    pub max_pnl_factor_for_withdrawals_longs: String,
    pub max_pnl_factor_for_withdrawals_shorts: String,

    pub positive_max_position_impact_factor: String,
    pub negative_max_position_impact_factor: String,
    pub max_position_impact_factor_for_liquidations: String,

    pub min_collateral_usd: String,
    pub min_position_size_usd: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        let s = |text: &str| text.to_string();
        Self {
            virtual_token_id_for_index_token: None,
            virtual_market_id: None,

            position_impact_pool_amount: s("0"),
            min_position_impact_pool_amount: s("0"),
            position_impact_pool_distribution_rate: None,

            max_long_token_pool_amount: s("1000000000e18"),
            max_short_token_pool_amount: s("1000000000e18"),
            max_long_token_pool_amount_for_deposit: s("1000000000e18"),
            max_short_token_pool_amount_for_deposit: s("1000000000e18"),

            negative_position_impact_factor: s("1e-7"),
            positive_position_impact_factor: s("5e-8"),
            position_impact_exponent_factor: s("2"),

            position_fee_factor_for_negative_impact: s("0.07%"),
            position_fee_factor_for_positive_impact: s("0.05%"),

            min_collateral_factor: s("1%"),
            min_collateral_factor_for_open_interest_multiplier_long: s("0"),
            min_collateral_factor_for_open_interest_multiplier_short: s("0"),

            swap_fee_factor_for_negative_impact: s("0.07%"),
            swap_fee_factor_for_positive_impact: s("0.05%"),
            negative_swap_impact_factor: s("1e-5"),
            positive_swap_impact_factor: s("5e-6"),
            swap_impact_exponent_factor: s("2"),

            max_open_interest_for_longs: s("1000000000"),
            max_open_interest_for_shorts: s("1000000000"),

            funding_increase_factor_per_second: s("0"),
            funding_decrease_factor_per_second: s("0"),
            min_funding_factor_per_second: s("0"),
            max_funding_factor_per_second: s("0"),
            threshold_for_stable_funding: s("0"),
            threshold_for_decrease_funding: s("0"),
            funding_factor: s("1e-8"),
            funding_exponent_factor: s("1"),

            borrowing_factor_for_longs: s("625e-11"),
            borrowing_factor_for_shorts: s("625e-11"),
            borrowing_exponent_factor_for_longs: s("1"),
            borrowing_exponent_factor_for_shorts: s("1"),

            reserve_factor_longs: s("90%"),
            reserve_factor_shorts: s("90%"),
            open_interest_reserve_factor_longs: s("90%"),
            open_interest_reserve_factor_shorts: s("80%"),

            max_pnl_factor_for_traders_longs: s("80%"),
            max_pnl_factor_for_traders_shorts: s("80%"),
            max_pnl_factor_for_adl_longs: s("100%"),
            max_pnl_factor_for_adl_shorts: s("100%"),
            min_pnl_factor_after_adl_longs: s("80%"),
            min_pnl_factor_after_adl_shorts: s("80%"),
            max_pnl_factor_for_deposits_longs: s("80%"),
            max_pnl_factor_for_deposits_shorts: s("80%"),
            max_pnl_factor_for_withdrawals_longs: s("80%"),
            max_pnl_factor_for_withdrawals_shorts: s("80%"),

            positive_max_position_impact_factor: s("1%"),
            negative_max_position_impact_factor: s("1%"),
            max_position_impact_factor_for_liquidations: s("1%"),

            min_collateral_usd: s("1"),
            min_position_size_usd: s("1"),
        }
    }
}

/// Market configurations keyed by deployment contract name, e.g.
/// `"ETHUSDCMarketToken"`.
pub type MarketConfigs = BTreeMap<String, MarketConfig>;

/// Addresses of a market and of the tokens it trades.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketTokens {
    pub market: Felt,
    pub index_token: Felt,
    pub long_token: Felt,
    pub short_token: Felt,
}

/// Collects data-store writes in call order.
struct Plan {
    writes: Vec<StoreWrite>,
}

impl Plan {
    fn new() -> Self {
        Self { writes: Vec::new() }
    }

    fn u256(&mut self, key: Identifier, value: U256) {
        self.writes.push(StoreWrite::SetU256 { key, value });
    }

    fn factor(&mut self, name: &'static str, key: Identifier, text: &str) -> Result<(), ConfigError> {
        let value = num::parse_factor(text).map_err(|err| ConfigError::Value(name, err))?;
        self.u256(key, value);
        Ok(())
    }

    fn amount(&mut self, name: &'static str, key: Identifier, text: &str) -> Result<(), ConfigError> {
        let value = num::parse_amount(text).map_err(|err| ConfigError::Value(name, err))?;
        self.u256(key, value);
        Ok(())
    }

    fn felt(&mut self, key: Identifier, value: Felt) {
        self.writes.push(StoreWrite::SetFelt252 { key, value });
    }

    fn address(&mut self, key: Identifier, value: Felt) {
        self.writes.push(StoreWrite::SetAddress { key, value });
    }

    fn into_invocations(self, data_store: Felt) -> Vec<Invocation> {
        self.writes
            .iter()
            .map(|write| write.to_invocation(data_store))
            .collect()
    }
}

/// Every data-store write configuring one market, in submission order.
pub fn plan_market_config(
    data_store: Felt,
    tokens: &MarketTokens,
    config: &MarketConfig,
) -> Result<Vec<Invocation>, ConfigError> {
    let market = tokens.market;
    let mut plan = Plan::new();

    if let Some(label) = &config.virtual_token_id_for_index_token {
        let virtual_token_id = derive_namespace(label)?.felt();
        plan.felt(keys::virtual_token_id_key(tokens.index_token)?, virtual_token_id);
        plan.felt(keys::virtual_token_id_key(tokens.short_token)?, virtual_token_id);
    }
    if let Some(label) = &config.virtual_market_id {
        plan.felt(keys::virtual_market_id_key(market)?, derive_namespace(label)?.felt());
    }

    plan.amount(
        "position_impact_pool_amount",
        keys::position_impact_pool_amount_key(market)?,
        &config.position_impact_pool_amount,
    )?;
    plan.amount(
        "min_position_impact_pool_amount",
        keys::min_position_impact_pool_amount_key(market)?,
        &config.min_position_impact_pool_amount,
    )?;
    if let Some(rate) = &config.position_impact_pool_distribution_rate {
        plan.amount(
            "position_impact_pool_distribution_rate",
            keys::position_impact_pool_distribution_rate_key(market)?,
            rate,
        )?;
    }

    plan.amount(
        "max_long_token_pool_amount",
        keys::max_pool_amount_key(market, tokens.long_token)?,
        &config.max_long_token_pool_amount,
    )?;
    plan.amount(
        "max_short_token_pool_amount",
        keys::max_pool_amount_key(market, tokens.short_token)?,
        &config.max_short_token_pool_amount,
    )?;
    plan.amount(
        "max_long_token_pool_amount_for_deposit",
        keys::max_pool_amount_for_deposit_key(market, tokens.long_token)?,
        &config.max_long_token_pool_amount_for_deposit,
    )?;
    plan.amount(
        "max_short_token_pool_amount_for_deposit",
        keys::max_pool_amount_for_deposit_key(market, tokens.short_token)?,
        &config.max_short_token_pool_amount_for_deposit,
    )?;

    plan.factor(
        "negative_position_impact_factor",
        keys::position_impact_factor_key(market, false)?,
        &config.negative_position_impact_factor,
    )?;
    plan.factor(
        "positive_position_impact_factor",
        keys::position_impact_factor_key(market, true)?,
        &config.positive_position_impact_factor,
    )?;
    plan.factor(
        "position_impact_exponent_factor",
        keys::position_impact_exponent_factor_key(market)?,
        &config.position_impact_exponent_factor,
    )?;

    plan.factor(
        "position_fee_factor_for_negative_impact",
        keys::position_fee_factor_key(market, false)?,
        &config.position_fee_factor_for_negative_impact,
    )?;
    plan.factor(
        "position_fee_factor_for_positive_impact",
        keys::position_fee_factor_key(market, true)?,
        &config.position_fee_factor_for_positive_impact,
    )?;

    plan.factor(
        "min_collateral_factor",
        keys::min_collateral_factor_key(market)?,
        &config.min_collateral_factor,
    )?;
    plan.factor(
        "min_collateral_factor_for_open_interest_multiplier_long",
        keys::min_collateral_factor_for_open_interest_multiplier_key(market, true)?,
        &config.min_collateral_factor_for_open_interest_multiplier_long,
    )?;
    plan.factor(
        "min_collateral_factor_for_open_interest_multiplier_short",
        keys::min_collateral_factor_for_open_interest_multiplier_key(market, false)?,
        &config.min_collateral_factor_for_open_interest_multiplier_short,
    )?;

    plan.factor(
        "swap_fee_factor_for_negative_impact",
        keys::swap_fee_factor_key(market, false)?,
        &config.swap_fee_factor_for_negative_impact,
    )?;
    plan.factor(
        "swap_fee_factor_for_positive_impact",
        keys::swap_fee_factor_key(market, true)?,
        &config.swap_fee_factor_for_positive_impact,
    )?;
    plan.factor(
        "negative_swap_impact_factor",
        keys::swap_impact_factor_key(market, false)?,
        &config.negative_swap_impact_factor,
    )?;
    plan.factor(
        "positive_swap_impact_factor",
        keys::swap_impact_factor_key(market, true)?,
        &config.positive_swap_impact_factor,
    )?;
    plan.factor(
        "swap_impact_exponent_factor",
        keys::swap_impact_exponent_factor_key(market)?,
        &config.swap_impact_exponent_factor,
    )?;

    plan.factor(
        "max_open_interest_for_longs",
        keys::max_open_interest_key(market, true)?,
        &config.max_open_interest_for_longs,
    )?;
    plan.factor(
        "max_open_interest_for_shorts",
        keys::max_open_interest_key(market, false)?,
        &config.max_open_interest_for_shorts,
    )?;

    plan.factor(
        "funding_increase_factor_per_second",
        keys::funding_increase_factor_per_second_key(market)?,
        &config.funding_increase_factor_per_second,
    )?;
    plan.factor(
        "funding_decrease_factor_per_second",
        keys::funding_decrease_factor_per_second_key(market)?,
        &config.funding_decrease_factor_per_second,
    )?;
    plan.factor(
        "min_funding_factor_per_second",
        keys::min_funding_factor_per_second_key(market)?,
        &config.min_funding_factor_per_second,
    )?;
    plan.factor(
        "max_funding_factor_per_second",
        keys::max_funding_factor_per_second_key(market)?,
        &config.max_funding_factor_per_second,
    )?;
    plan.factor(
        "threshold_for_stable_funding",
        keys::threshold_for_stable_funding_key(market)?,
        &config.threshold_for_stable_funding,
    )?;
    plan.factor(
        "threshold_for_decrease_funding",
        keys::threshold_for_decrease_funding_key(market)?,
        &config.threshold_for_decrease_funding,
    )?;
    plan.factor(
        "funding_factor",
        keys::funding_factor_key(market)?,
        &config.funding_factor,
    )?;
    plan.factor(
        "funding_exponent_factor",
        keys::funding_exponent_factor_key(market)?,
        &config.funding_exponent_factor,
    )?;

    plan.factor(
        "borrowing_factor_for_longs",
        keys::borrowing_factor_key(market, true)?,
        &config.borrowing_factor_for_longs,
    )?;
    plan.factor(
        "borrowing_factor_for_shorts",
        keys::borrowing_factor_key(market, false)?,
        &config.borrowing_factor_for_shorts,
    )?;
    plan.factor(
        "borrowing_exponent_factor_for_longs",
        keys::borrowing_exponent_factor_key(market, true)?,
        &config.borrowing_exponent_factor_for_longs,
    )?;
    plan.factor(
        "borrowing_exponent_factor_for_shorts",
        keys::borrowing_exponent_factor_key(market, false)?,
        &config.borrowing_exponent_factor_for_shorts,
    )?;

    plan.factor(
        "reserve_factor_longs",
        keys::reserve_factor_key(market, true)?,
        &config.reserve_factor_longs,
    )?;
    plan.factor(
        "reserve_factor_shorts",
        keys::reserve_factor_key(market, false)?,
        &config.reserve_factor_shorts,
    )?;
    plan.factor(
        "open_interest_reserve_factor_longs",
        keys::open_interest_reserve_factor_key(market, true)?,
        &config.open_interest_reserve_factor_longs,
    )?;
    plan.factor(
        "open_interest_reserve_factor_shorts",
        keys::open_interest_reserve_factor_key(market, false)?,
        &config.open_interest_reserve_factor_shorts,
    )?;

    let pnl_factors = [
        (
            PnlFactorType::Traders,
            ("max_pnl_factor_for_traders_longs", &config.max_pnl_factor_for_traders_longs),
            ("max_pnl_factor_for_traders_shorts", &config.max_pnl_factor_for_traders_shorts),
        ),
        (
            PnlFactorType::Adl,
            ("max_pnl_factor_for_adl_longs", &config.max_pnl_factor_for_adl_longs),
            ("max_pnl_factor_for_adl_shorts", &config.max_pnl_factor_for_adl_shorts),
        ),
    ];
    for (pnl_factor_type, (long_name, long), (short_name, short)) in pnl_factors {
        plan.factor(long_name, keys::max_pnl_factor_key(pnl_factor_type, market, true)?, long)?;
        plan.factor(short_name, keys::max_pnl_factor_key(pnl_factor_type, market, false)?, short)?;
    }
    plan.factor(
        "min_pnl_factor_after_adl_longs",
        keys::min_pnl_factor_after_adl_key(market, true)?,
        &config.min_pnl_factor_after_adl_longs,
    )?;
    plan.factor(
        "min_pnl_factor_after_adl_shorts",
        keys::min_pnl_factor_after_adl_key(market, false)?,
        &config.min_pnl_factor_after_adl_shorts,
    )?;
    let pnl_factors = [
        (
            PnlFactorType::Deposits,
            ("max_pnl_factor_for_deposits_longs", &config.max_pnl_factor_for_deposits_longs),
            ("max_pnl_factor_for_deposits_shorts", &config.max_pnl_factor_for_deposits_shorts),
        ),
        (
            PnlFactorType::Withdrawals,
            ("max_pnl_factor_for_withdrawals_longs", &config.max_pnl_factor_for_withdrawals_longs),
            ("max_pnl_factor_for_withdrawals_shorts", &config.max_pnl_factor_for_withdrawals_shorts),
        ),
    ];
    for (pnl_factor_type, (long_name, long), (short_name, short)) in pnl_factors {
        plan.factor(long_name, keys::max_pnl_factor_key(pnl_factor_type, market, true)?, long)?;
        plan.factor(short_name, keys::max_pnl_factor_key(pnl_factor_type, market, false)?, short)?;
    }

    plan.factor(
        "positive_max_position_impact_factor",
        keys::max_position_impact_factor_key(market, true)?,
        &config.positive_max_position_impact_factor,
    )?;
    plan.factor(
        "negative_max_position_impact_factor",
        keys::max_position_impact_factor_key(market, false)?,
        &config.negative_max_position_impact_factor,
    )?;
    plan.factor(
        "max_position_impact_factor_for_liquidations",
        keys::max_position_impact_factor_for_liquidations_key(market)?,
        &config.max_position_impact_factor_for_liquidations,
    )?;

    // Protocol wide, written along with every market.
    plan.factor(
        "min_collateral_usd",
        Namespace::MinCollateralUsd.id(),
        &config.min_collateral_usd,
    )?;
    plan.factor(
        "min_position_size_usd",
        Namespace::MinPositionSizeUsd.id(),
        &config.min_position_size_usd,
    )?;

    debug!(market = %format!("{market:#x}"), writes = plan.writes.len(), "planned market config");
    Ok(plan.into_invocations(data_store))
}

/// Parameters written once per deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    pub fee_token: Felt,
    #[serde(default = "default_max_swap_path_length")]
    pub max_swap_path_length: u64,
    pub max_oracle_price_age: u64,

    pub max_callback_gas_limit: u64,
    pub single_swap_gas_limit: u64,
    pub deposit_single_token_gas_limit: u64,
    pub deposit_double_token_gas_limit: u64,
    pub estimated_gas_fee_base_amount: u64,
    /// Factor notation.
    pub estimated_gas_fee_multiplier_factor: String,
    pub execution_gas_fee_base_amount: u64,
    /// Factor notation.
    pub execution_gas_fee_multiplier_factor: String,

    /// Factor notation.
    pub ui_fee_factor: String,
    /// Factor notation.
    pub max_ui_fee_factor: String,
}

fn default_max_swap_path_length() -> u64 {
    5
}

/// Every data-store write of the protocol globals, in submission order.
pub fn plan_protocol_config(
    data_store: Felt,
    ui_fee_receiver: Felt,
    config: &ProtocolConfig,
) -> Result<Vec<Invocation>, ConfigError> {
    let mut plan = Plan::new();

    plan.address(Namespace::FeeToken.id(), config.fee_token);
    plan.u256(
        Namespace::MaxSwapPathLength.id(),
        U256::from(config.max_swap_path_length),
    );
    plan.u256(
        Namespace::MaxOraclePriceAge.id(),
        U256::from(config.max_oracle_price_age),
    );

    plan.u256(
        Namespace::MaxCallbackGasLimit.id(),
        U256::from(config.max_callback_gas_limit),
    );
    plan.u256(
        keys::single_swap_gas_limit_key(),
        U256::from(config.single_swap_gas_limit),
    );
    plan.u256(
        keys::deposit_gas_limit_key(true)?,
        U256::from(config.deposit_single_token_gas_limit),
    );
    plan.u256(
        keys::deposit_gas_limit_key(false)?,
        U256::from(config.deposit_double_token_gas_limit),
    );
    plan.u256(
        Namespace::EstimatedGasFeeBaseAmount.id(),
        U256::from(config.estimated_gas_fee_base_amount),
    );
    plan.factor(
        "estimated_gas_fee_multiplier_factor",
        Namespace::EstimatedGasFeeMultiplierFactor.id(),
        &config.estimated_gas_fee_multiplier_factor,
    )?;
    plan.u256(
        Namespace::ExecutionGasFeeBaseAmount.id(),
        U256::from(config.execution_gas_fee_base_amount),
    );
    plan.factor(
        "execution_gas_fee_multiplier_factor",
        Namespace::ExecutionGasFeeMultiplierFactor.id(),
        &config.execution_gas_fee_multiplier_factor,
    )?;

    plan.factor(
        "ui_fee_factor",
        keys::ui_fee_factor_key(ui_fee_receiver)?,
        &config.ui_fee_factor,
    )?;
    plan.factor(
        "max_ui_fee_factor",
        Namespace::MaxUiFeeFactor.id(),
        &config.max_ui_fee_factor,
    )?;

    debug!(writes = plan.writes.len(), "planned protocol config");
    Ok(plan.into_invocations(data_store))
}

/// Deployment profile selecting the address book.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn name(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    /// File name of the address book of this environment.
    pub fn addresses_file(&self) -> String {
        format!("contractAddresses-{}.json", self.name())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Environment {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            other => Err(InvalidInput::Unsupported(format!("environment {other:?}"))),
        }
    }
}

/// Contracts handed a `CONTROLLER` grant when a deployment is wired up.
pub const CONTROLLER_CONTRACTS: [&str; 7] = [
    "MarketFactory",
    "OrderHandler",
    "DepositHandler",
    "WithdrawalHandler",
    "LiquidationHandler",
    "SwapHandler",
    "ExchangeRouter",
];

/// Named contract addresses of a deployment, as in
/// `{"DataStore": "0x..", "RoleStore": "0x..", ...}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deployment {
    contracts: BTreeMap<String, Felt>,
}

impl Deployment {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load the address book of `environment` from `dir`.
    pub fn load(dir: impl AsRef<Path>, environment: Environment) -> Result<Self, ConfigError> {
        let path = dir.as_ref().join(environment.addresses_file());
        let text = std::fs::read_to_string(&path)?;
        let deployment = Self::from_json(&text)?;
        info!(
            path = %path.display(),
            contracts = deployment.contracts.len(),
            "loaded deployment"
        );
        Ok(deployment)
    }

    pub fn contract(&self, name: &str) -> Result<Felt, ConfigError> {
        self.contracts
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::ContractNotFound(name.to_string()))
    }

    pub fn data_store(&self) -> Result<Felt, ConfigError> {
        self.contract("DataStore")
    }

    pub fn role_store(&self) -> Result<Felt, ConfigError> {
        self.contract("RoleStore")
    }

    pub fn contracts(&self) -> impl Iterator<Item = (&str, Felt)> {
        self.contracts.iter().map(|(name, address)| (name.as_str(), *address))
    }
}

/// Look up the configuration of the market deployed under `market_name`.
pub fn market_config<'a>(
    configs: &'a MarketConfigs,
    market_name: &str,
) -> Result<&'a MarketConfig, ConfigError> {
    configs
        .get(market_name)
        .ok_or_else(|| ConfigError::MarketNotFound(market_name.to_string()))
}

/// Grants wiring a deployment: `CONTROLLER` for the handler contracts and
/// `MARKET_KEEPER` for the market factory.
pub fn plan_contract_role_grants(deployment: &Deployment) -> Result<Vec<Invocation>, ConfigError> {
    let role_store = deployment.role_store()?;
    let mut grants = Vec::with_capacity(CONTROLLER_CONTRACTS.len() + 1);
    for name in CONTROLLER_CONTRACTS {
        let address = deployment.contract(name)?;
        grants.push(grant_role(role_store, address, Role::Controller));
        if name == "MarketFactory" {
            grants.push(grant_role(role_store, address, Role::MarketKeeper));
        }
    }
    Ok(grants)
}

/// Grants of `roles` to `account`, in the order given.
pub fn plan_account_role_grants(role_store: Felt, account: Felt, roles: &[Role]) -> Vec<Invocation> {
    roles
        .iter()
        .map(|role| grant_role(role_store, account, *role))
        .collect()
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::store::split_u256;

    fn tokens() -> MarketTokens {
        MarketTokens {
            market: Felt::from(0x111u64),
            index_token: Felt::from(0xe7u64),
            long_token: Felt::from(0xe7u64),
            short_token: Felt::from(0x5dcu64),
        }
    }

    fn value_of(invocation: &Invocation) -> U256 {
        let (low, high) = (invocation.calldata[1], invocation.calldata[2]);
        let low = U256::from_be_bytes(low.to_bytes_be());
        let high = U256::from_be_bytes(high.to_bytes_be());
        (high << 128) + low
    }

    #[test]
    fn test_default_plan() {
        let data_store = Felt::from(0xd5u64);
        let plan = plan_market_config(data_store, &tokens(), &MarketConfig::default()).unwrap();
        // No virtual ids, no distribution rate in the baseline.
        assert_eq!(plan.len(), 52);
        assert!(plan.iter().all(|i| i.contract_address == data_store));
        assert!(plan.iter().all(|i| i.entrypoint == "set_u256"));
        let keys = plan.iter().map(|i| i.calldata[0]).collect::<Vec<_>>();
        assert_eq!(keys.iter().unique().count(), keys.len());
    }

    #[test]
    fn test_plan_is_deterministic() {
        let config = MarketConfig {
            virtual_market_id: Some("SPOT:ETH/USD".to_string()),
            ..MarketConfig::default()
        };
        let first = plan_market_config(Felt::ONE, &tokens(), &config).unwrap();
        let second = plan_market_config(Felt::ONE, &tokens(), &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_virtual_ids_come_first() {
        let config = MarketConfig {
            virtual_token_id_for_index_token: Some("PERP:ETH/USD".to_string()),
            virtual_market_id: Some("SPOT:ETH/USD".to_string()),
            ..MarketConfig::default()
        };
        let plan = plan_market_config(Felt::ONE, &tokens(), &config).unwrap();
        let perp = derive_namespace("PERP:ETH/USD").unwrap().felt();
        let spot = derive_namespace("SPOT:ETH/USD").unwrap().felt();

        assert_eq!(plan[0].entrypoint, "set_felt252");
        assert_eq!(
            plan[0].calldata,
            vec![keys::virtual_token_id_key(tokens().index_token).unwrap().felt(), perp]
        );
        assert_eq!(
            plan[1].calldata,
            vec![keys::virtual_token_id_key(tokens().short_token).unwrap().felt(), perp]
        );
        assert_eq!(
            plan[2].calldata,
            vec![keys::virtual_market_id_key(tokens().market).unwrap().felt(), spot]
        );
        assert_eq!(plan[3].entrypoint, "set_u256");
    }

    #[test]
    fn test_positive_swap_fee_uses_swap_fee_key() {
        let config = MarketConfig {
            swap_fee_factor_for_positive_impact: "0.07%".to_string(),
            positive_swap_impact_factor: "5e-6".to_string(),
            ..MarketConfig::default()
        };
        let plan = plan_market_config(Felt::ONE, &tokens(), &config).unwrap();
        let fee_key = keys::swap_fee_factor_key(tokens().market, true).unwrap().felt();
        let impact_key = keys::swap_impact_factor_key(tokens().market, true).unwrap().felt();

        let fee = plan.iter().find(|i| i.calldata[0] == fee_key).unwrap();
        assert_eq!(value_of(fee), num::parse_factor("0.07%").unwrap());
        let impact = plan.iter().find(|i| i.calldata[0] == impact_key).unwrap();
        assert_eq!(value_of(impact), num::parse_factor("5e-6").unwrap());
    }

    #[test]
    fn test_wide_amount_splits() {
        let config = MarketConfig {
            position_impact_pool_distribution_rate: Some("256e41".to_string()),
            ..MarketConfig::default()
        };
        let plan = plan_market_config(Felt::ONE, &tokens(), &config).unwrap();
        let key = keys::position_impact_pool_distribution_rate_key(tokens().market)
            .unwrap()
            .felt();
        let write = plan.iter().find(|i| i.calldata[0] == key).unwrap();
        let expected = num::expand_decimals("256", 41).unwrap();
        let (low, high) = split_u256(expected);
        assert_ne!(high, Felt::ZERO);
        assert_eq!(write.calldata, vec![key, low, high]);
    }

    #[test]
    fn test_bad_value_names_field() {
        let config = MarketConfig {
            funding_factor: "1%/w".to_string(),
            ..MarketConfig::default()
        };
        let err = plan_market_config(Felt::ONE, &tokens(), &config).unwrap_err();
        assert!(matches!(err, ConfigError::Value("funding_factor", _)));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: MarketConfig = serde_json::from_str(
            r#"{"virtual_market_id": "SPOT:ETH/USD", "min_collateral_usd": "2"}"#,
        )
        .unwrap();
        assert_eq!(config.min_collateral_usd, "2");
        assert_eq!(config.funding_factor, MarketConfig::default().funding_factor);
    }

    fn protocol() -> ProtocolConfig {
        serde_json::from_value(serde_json::json!({
            "fee_token": "0xe7",
            "max_oracle_price_age": 1_000_000_000_000u64,
            "max_callback_gas_limit": 0,
            "single_swap_gas_limit": 10_000,
            "deposit_single_token_gas_limit": 10_000,
            "deposit_double_token_gas_limit": 20_000,
            "estimated_gas_fee_base_amount": 5_000,
            "estimated_gas_fee_multiplier_factor": "1",
            "execution_gas_fee_base_amount": 5_000,
            "execution_gas_fee_multiplier_factor": "1",
            "ui_fee_factor": "0.01%",
            "max_ui_fee_factor": "1%",
        }))
        .unwrap()
    }

    #[test]
    fn test_protocol_plan_order() {
        let receiver = Felt::from(0xfeeu64);
        let plan = plan_protocol_config(Felt::ONE, receiver, &protocol()).unwrap();
        let keys = plan.iter().map(|i| i.calldata[0]).collect::<Vec<_>>();
        assert_eq!(
            keys,
            vec![
                Namespace::FeeToken.id().felt(),
                Namespace::MaxSwapPathLength.id().felt(),
                Namespace::MaxOraclePriceAge.id().felt(),
                Namespace::MaxCallbackGasLimit.id().felt(),
                keys::single_swap_gas_limit_key().felt(),
                keys::deposit_gas_limit_key(true).unwrap().felt(),
                keys::deposit_gas_limit_key(false).unwrap().felt(),
                Namespace::EstimatedGasFeeBaseAmount.id().felt(),
                Namespace::EstimatedGasFeeMultiplierFactor.id().felt(),
                Namespace::ExecutionGasFeeBaseAmount.id().felt(),
                Namespace::ExecutionGasFeeMultiplierFactor.id().felt(),
                keys::ui_fee_factor_key(receiver).unwrap().felt(),
                Namespace::MaxUiFeeFactor.id().felt(),
            ]
        );
        assert_eq!(plan[0].entrypoint, "set_address");
        assert_eq!(plan[0].calldata[1], Felt::from(0xe7u64));
        assert_eq!(value_of(&plan[1]), U256::from(5));
        assert_eq!(value_of(&plan[11]), num::decimal_to_float(U256::from(1), 4).unwrap());
    }

    #[test]
    fn test_deployment_lookup() {
        let deployment =
            Deployment::from_json(r#"{"DataStore": "0xd5", "RoleStore": "0x5"}"#).unwrap();
        assert_eq!(deployment.data_store().unwrap(), Felt::from(0xd5u64));
        assert_eq!(deployment.role_store().unwrap(), Felt::from(0x5u64));
        assert!(matches!(
            deployment.contract("Reader"),
            Err(ConfigError::ContractNotFound(name)) if name == "Reader"
        ));
        assert!(matches!(
            plan_contract_role_grants(&deployment),
            Err(ConfigError::ContractNotFound(name)) if name == "MarketFactory"
        ));
    }

    #[test]
    fn test_contract_role_grants() {
        let mut json = serde_json::Map::new();
        json.insert("RoleStore".to_string(), "0x5".into());
        for (i, name) in CONTROLLER_CONTRACTS.iter().enumerate() {
            json.insert(name.to_string(), format!("{:#x}", 0x100 + i).into());
        }
        let deployment: Deployment = serde_json::from_value(json.into()).unwrap();
        let grants = plan_contract_role_grants(&deployment).unwrap();
        assert_eq!(grants.len(), CONTROLLER_CONTRACTS.len() + 1);
        assert_eq!(grants[0].calldata, vec![Felt::from(0x100u64), Role::Controller.felt()]);
        assert_eq!(grants[1].calldata, vec![Felt::from(0x100u64), Role::MarketKeeper.felt()]);
        assert!(grants[2..].iter().all(|g| g.calldata[1] == Role::Controller.felt()));
    }

    #[test]
    fn test_environment() {
        assert_eq!(
            Environment::Production.addresses_file(),
            "contractAddresses-production.json"
        );
        assert_eq!("development".parse::<Environment>().unwrap(), Environment::Development);
        assert!("staging".parse::<Environment>().is_err());
        assert!(matches!(
            market_config(&MarketConfigs::new(), "ETHUSDCMarketToken"),
            Err(ConfigError::MarketNotFound(_))
        ));
    }
}
