//! Configuration for the key tool.
//!
//! Configuration comes from two sources:
//! - Environment variables (via .env file or shell): deployment selection
//! - CLI arguments: the command and its inputs

use std::{path::PathBuf, str::FromStr};

use alloy::primitives::U256;
use clap::{Parser, Subcommand};
use dex_keys::{
    Environment, Felt,
    error::{InvalidInput, KeyError},
    field::FieldValue,
    hash::derive_namespace_wrapping,
    store::Role,
};

/// Environment configuration (deployment selection).
#[derive(Debug, serde::Deserialize)]
pub struct EnvConfig {
    /// Deployment profile, `development` or `production`
    #[serde(default)]
    pub dex_env: Environment,

    /// Directory holding `contractAddresses-<env>.json`
    #[serde(default = "default_addresses_dir")]
    pub dex_addresses_dir: PathBuf,
}

fn default_addresses_dir() -> PathBuf {
    PathBuf::from("constants")
}

impl EnvConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }
}

#[derive(Debug, Parser)]
#[command(name = "keytool")]
#[command(about = "Derive data-store keys and plan data-store configuration calls")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the identifier of a namespace literal
    Namespace {
        name: String,

        /// Reduce literals wider than a field element instead of rejecting them
        #[arg(long)]
        wrapping: bool,

        /// Print all 64 hex digits
        #[arg(long)]
        fixed: bool,
    },

    /// Print the composite key of typed fields, e.g. `ns:POOL_AMOUNT 0x12 bool:true`
    ///
    /// Tags: bool, uint, int, hex, dec, text, ns. Untagged values follow the
    /// hex-or-short-string rule.
    Key {
        #[arg(required = true)]
        fields: Vec<TypedField>,

        /// Print all 64 hex digits
        #[arg(long)]
        fixed: bool,
    },

    /// Print every catalogue namespace with its identifier as JSON
    Catalogue {
        /// Compare against a recorded `{"LITERAL": "0x.."}` file instead
        #[arg(long)]
        check: Option<PathBuf>,
    },

    /// Print the data-store calls configuring a market as JSON
    PlanMarket {
        /// Market name in the configuration file, e.g. ETHUSDCMarketToken
        #[arg(long)]
        market: String,

        /// Market configurations, `{"<name>": {...}}`
        #[arg(long)]
        config: PathBuf,

        /// Market and token addresses
        #[arg(long)]
        tokens: PathBuf,
    },

    /// Print the data-store calls writing the protocol globals as JSON
    PlanProtocol {
        #[arg(long)]
        config: PathBuf,

        /// Deployment contract receiving UI fees
        #[arg(long, default_value = "UIFeeReceiver")]
        ui_fee_receiver: String,
    },

    /// Print role-store grants as JSON
    GrantRoles {
        /// Account receiving the roles
        #[arg(long)]
        account: Option<Felt>,

        /// Roles to grant (comma-separated); defaults to every keeper role
        #[arg(long, value_delimiter = ',')]
        role: Vec<Role>,

        /// Also grant the handler contracts of the deployment their roles
        #[arg(long)]
        handlers: bool,
    },
}

/// Command line field with an optional `tag:` prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedField(pub FieldValue);

impl FromStr for TypedField {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unsupported = || InvalidInput::Unsupported(s.to_string());
        let Some((tag, value)) = s.split_once(':') else {
            return Ok(TypedField(FieldValue::Text(s.to_string())));
        };
        let field = match tag {
            "bool" => match value {
                "true" => FieldValue::Bool(true),
                "false" => FieldValue::Bool(false),
                _ => return Err(unsupported().into()),
            },
            "uint" => FieldValue::UInt(U256::from_str_radix(value, 10).map_err(|_| unsupported())?),
            "int" => FieldValue::Int(value.parse().map_err(|_| unsupported())?),
            "hex" => FieldValue::RawHex(value.to_string()),
            "dec" => FieldValue::Decimal(value.to_string()),
            "text" => FieldValue::Text(value.to_string()),
            "ns" => FieldValue::Key(derive_namespace_wrapping(value)?),
            // Not a tag, e.g. `PERP:ETH/USD`.
            _ => FieldValue::Text(s.to_string()),
        };
        Ok(TypedField(field))
    }
}
