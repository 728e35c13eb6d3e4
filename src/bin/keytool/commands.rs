//! Command implementations. Each returns the text to print on success.

use std::collections::BTreeMap;

use dex_keys::{
    Deployment, Felt, Identifier,
    field::FieldValue,
    hash::{derive_composite_key, derive_namespace, derive_namespace_wrapping},
    keys::{self, Namespace},
    market::{self, MarketConfigs, MarketTokens, ProtocolConfig},
    store::{Invocation, Role},
};
use itertools::Itertools;
use tracing::{info, warn};

use crate::{
    config::TypedField,
    error::{Error, Result},
};

fn format_id(id: Identifier, fixed: bool) -> String {
    if fixed { id.to_fixed_hex() } else { id.to_string() }
}

fn to_json(invocations: &[Invocation]) -> Result<String> {
    Ok(serde_json::to_string_pretty(invocations)?)
}

pub fn namespace(name: &str, wrapping: bool, fixed: bool) -> Result<String> {
    let id = if wrapping {
        derive_namespace_wrapping(name)?
    } else {
        derive_namespace(name)?
    };
    Ok(format_id(id, fixed))
}

pub fn key(fields: &[TypedField], fixed: bool) -> Result<String> {
    let fields = fields.iter().map(|f| f.0.clone()).collect::<Vec<FieldValue>>();
    Ok(format_id(derive_composite_key(&fields)?, fixed))
}

pub fn catalogue() -> Result<String> {
    let entries = keys::catalogue().collect::<BTreeMap<_, _>>();
    Ok(serde_json::to_string_pretty(&entries)?)
}

/// Compare identifiers recorded elsewhere against ours.
///
/// Literals outside the catalogue are derived on the fly, so the file may
/// also pin arbitrary labels such as virtual market ids. A label that cannot
/// be derived counts as a mismatch and the remaining entries are still checked.
pub fn check_catalogue(golden: &str) -> Result<String> {
    let recorded: BTreeMap<String, Identifier> = serde_json::from_str(golden)?;
    let mut mismatches = 0;
    for (literal, expected) in &recorded {
        let actual = match Namespace::from_literal(literal) {
            Some(namespace) => namespace.id(),
            None => match derive_namespace_wrapping(literal) {
                Ok(id) => id,
                Err(err) => {
                    warn!(literal = %literal, %expected, %err, "cannot derive identifier");
                    mismatches += 1;
                    continue;
                }
            },
        };
        if actual != *expected {
            warn!(literal = %literal, %expected, %actual, "identifier mismatch");
            mismatches += 1;
        }
    }
    let unchecked = Namespace::ALL
        .iter()
        .filter(|namespace| !recorded.contains_key(namespace.literal()))
        .map(Namespace::literal)
        .collect::<Vec<_>>();
    if !unchecked.is_empty() {
        info!(count = unchecked.len(), literals = %unchecked.iter().join(","), "not recorded");
    }
    if mismatches > 0 {
        return Err(Error::CatalogueMismatch(mismatches));
    }
    Ok(format!(
        "{} identifiers match, {} catalogue literals not recorded",
        recorded.len(),
        unchecked.len()
    ))
}

pub fn plan_market(
    deployment: &Deployment,
    market_name: &str,
    configs: &str,
    tokens: &str,
) -> Result<String> {
    let configs: MarketConfigs = serde_json::from_str(configs)?;
    let tokens: MarketTokens = serde_json::from_str(tokens)?;
    let config = market::market_config(&configs, market_name)?;
    let plan = market::plan_market_config(deployment.data_store()?, &tokens, config)?;
    info!(market = market_name, calls = plan.len(), "market config planned");
    to_json(&plan)
}

pub fn plan_protocol(deployment: &Deployment, config: &str, ui_fee_receiver: &str) -> Result<String> {
    let config: ProtocolConfig = serde_json::from_str(config)?;
    let plan = market::plan_protocol_config(
        deployment.data_store()?,
        deployment.contract(ui_fee_receiver)?,
        &config,
    )?;
    info!(calls = plan.len(), "protocol config planned");
    to_json(&plan)
}

pub fn grant_roles(
    deployment: &Deployment,
    account: Option<Felt>,
    roles: &[Role],
    handlers: bool,
) -> Result<String> {
    if account.is_none() && !handlers {
        return Err(Error::NoGrantee);
    }
    let mut grants = Vec::new();
    if let Some(account) = account {
        let roles = if roles.is_empty() { &Role::KEEPER[..] } else { roles };
        grants.extend(market::plan_account_role_grants(
            deployment.role_store()?,
            account,
            roles,
        ));
    }
    if handlers {
        grants.extend(market::plan_contract_role_grants(deployment)?);
    }
    to_json(&grants)
}
