//! Key constructors checked against recorded digests and against the
//! Poseidon sponge applied by hand.

use std::collections::BTreeMap;

use alloy::primitives::U256;
use dex_keys::{
    Felt, Identifier, derive_composite_key, derive_namespace,
    field::FieldValue,
    keys::{self, Namespace, PnlFactorType},
};
use itertools::Itertools;
use starknet_types_core::hash::{Poseidon, StarkHash};

fn poseidon(felts: &[Felt]) -> Felt {
    Poseidon::hash_array(felts)
}

fn short_string(text: &str) -> Felt {
    Felt::from_bytes_be_slice(text.as_bytes())
}

fn ns(literal: &str) -> Felt {
    poseidon(&[short_string(literal)])
}

fn felt(hex: &str) -> Felt {
    Felt::from_hex(hex).unwrap()
}

fn recorded() -> BTreeMap<String, Identifier> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/catalogue.json");
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_catalogue_matches_recorded_digests() {
    let recorded = recorded();
    for (literal, id) in keys::catalogue() {
        assert_eq!(Some(&id), recorded.get(literal), "{literal}");
    }
    for label in ["PERP:ETH/USD", "SPOT:ETH/USD"] {
        assert_eq!(&derive_namespace(label).unwrap(), &recorded[label], "{label}");
    }
    assert_eq!(recorded.len(), Namespace::ALL.len() + 2);
    assert_eq!(
        recorded["POSITION_IMPACT_POOL_DISTRIBUTION_RATE"].to_string(),
        "0x67e33d85f856a461c9b21d2383d29a162661a36efa8c948883dbf32c0c34b1a"
    );
}

#[test]
fn test_constructors_match_recorded_digests() {
    let (market, token, account) = (felt("0x111"), felt("0xe7"), felt("0xa11ce"));
    let (collateral, data_store) = (felt("0x5dc"), felt("0xd5"));
    let spot = derive_namespace("SPOT:ETH/USD").unwrap();

    let cases = [
        (
            keys::pool_amount_key("0x1234", "0x5678"),
            "0x5f4dc0c4ad613297c41d74c2f11f56b3970fed4d52c776428dd7d65b65ab13",
        ),
        (
            keys::pool_amount_key("0xETH_USDC_MARKET", "0xETH"),
            "0x2b9d3e7e4b47309cdc8eea609a9c3dd36e5d995aee0fd4d3d64a86052cfa2f4",
        ),
        (
            keys::position_impact_factor_key(market, true),
            "0x5927991841ac379049dea5406eb0fd69a392014daa21220ab3e1799b578e461",
        ),
        (
            keys::open_interest_key(market, collateral, true),
            "0x5cd9cc827c1b10d561f26e4e9edda36d1592e76e173de327437dd80d10399ed",
        ),
        (
            keys::max_pnl_factor_key(PnlFactorType::Traders, market, true),
            "0x523cdf788ae9c9646664b1dd5dd16050622f16ddecefd467a6f3632415e4ebc",
        ),
        (
            keys::funding_factor_key(market),
            "0x4c7b7d788352caac01f38af1327c1447c6fba672ce740c84f1764d79a1f14c0",
        ),
        (
            keys::claimable_funding_amount_key(market, token, account),
            "0x44ba7553bb8e75d01eb7f890c52e3d6eaab451523f69ee19aea2e79a46374c9",
        ),
        (
            keys::position_key(account, market, collateral, true),
            "0x7862244ce3d513ec2f2e41f1bb1567e703df9e1eb87d305e22579060a41d679",
        ),
        (
            keys::order_key(data_store, 7u64),
            "0x5790fd770ce2cc6dc6c56512696415325947f61111de53690639ef445b354d1",
        ),
        (
            keys::deposit_gas_limit_key(true),
            "0x40ff654dd06b864f2c0a3f56d5ca56144049329fef52092e707b4609cce7018",
        ),
        (
            keys::withdrawal_gas_limit_key(),
            "0x6e096ff6ccb8f5f1e585179f98655d0dd20b896d537f4a3cfb3a810157db467",
        ),
        (
            keys::virtual_inventory_for_swaps_key(spot, false),
            "0xa988ff986ecc955383632db0f3daa426ea152f8befac0c9f2f9596a69f14c6",
        ),
        (
            keys::price_feed_key("ETH"),
            "0x98851b0598e6a90a1f58cfbec2e132cd7bd751a8ad21d67132aa93d21f46c0",
        ),
        (
            keys::ui_fee_factor_key(account),
            "0x3a89c094b87a2d5988fe08d3d83dc0bd5b1976231f3049ec348909daf38cf7b",
        ),
    ];
    for (i, (id, expected)) in cases.into_iter().enumerate() {
        assert_eq!(id.unwrap().to_string(), expected, "case {i}");
    }
}

#[test]
fn test_pool_amount_scenario() {
    let id = keys::pool_amount_key("0x1234", "0x5678").unwrap();
    let expected = poseidon(&[ns("POOL_AMOUNT"), felt("0x1234"), felt("0x5678")]);
    assert_eq!(id.felt(), expected);

    // Same fields through the generic entry point.
    let fields = [
        FieldValue::Key(derive_namespace("POOL_AMOUNT").unwrap()),
        FieldValue::Text("0x1234".to_string()),
        FieldValue::Text("0x5678".to_string()),
    ];
    assert_eq!(derive_composite_key(&fields).unwrap(), id);
}

#[test]
fn test_pool_amount_symbolic_scenario() {
    // Neither value is a hex numeral, both go through the short string path.
    let first = keys::pool_amount_key("0xETH_USDC_MARKET", "0xETH").unwrap();
    let second = keys::pool_amount_key("0xETH_USDC_MARKET", "0xETH").unwrap();
    assert_eq!(first, second);
    let expected = poseidon(&[
        ns("POOL_AMOUNT"),
        short_string("0xETH_USDC_MARKET"),
        short_string("0xETH"),
    ]);
    assert_eq!(first.felt(), expected);
}

#[test]
fn test_symbols_are_short_strings() {
    let id = keys::price_feed_key("ETH").unwrap();
    assert_eq!(id.felt(), poseidon(&[ns("PRICE_FEED"), Felt::from(0x455448u64)]));
}

#[test]
fn test_position_key_has_no_namespace() {
    let (account, market, collateral) = (felt("0xa11ce"), felt("0x111"), felt("0x5dc"));
    let id = keys::position_key(account, market, collateral, true).unwrap();
    assert_eq!(id.felt(), poseidon(&[account, market, collateral, Felt::ONE]));

    let short = keys::position_key(account, market, collateral, false).unwrap();
    assert_eq!(short.felt(), poseidon(&[account, market, collateral, Felt::ZERO]));
}

#[test]
fn test_request_keys_share_derivation() {
    let data_store = felt("0xd5");
    let expected = poseidon(&[data_store, Felt::from(7u64)]);
    assert_eq!(keys::order_key(data_store, U256::from(7)).unwrap().felt(), expected);
    assert_eq!(keys::deposit_key(data_store, 7u64).unwrap().felt(), expected);
    assert_eq!(keys::withdrawal_key(data_store, 7u64).unwrap().felt(), expected);
}

#[test]
fn test_nested_namespace_field() {
    let market = felt("0x111");
    let id = keys::max_pnl_factor_key(PnlFactorType::Traders, market, true).unwrap();
    let expected = poseidon(&[
        ns("MAX_PNL_FACTOR"),
        ns("MAX_PNL_FACTOR_FOR_TRADERS"),
        market,
        Felt::ONE,
    ]);
    assert_eq!(id.felt(), expected);

    let ids = PnlFactorType::ALL
        .iter()
        .map(|t| keys::max_pnl_factor_key(*t, market, true).unwrap())
        .collect::<Vec<_>>();
    assert_eq!(ids.iter().unique().count(), PnlFactorType::ALL.len());
}

#[test]
fn test_account_keys() {
    let (market, token, account) = (felt("0x111"), felt("0xe7"), felt("0xa11ce"));
    assert_eq!(
        keys::claimable_funding_amount_key(market, token, account).unwrap().felt(),
        poseidon(&[ns("CLAIMABLE_FUNDING_AMOUNT"), market, token, account])
    );
    assert_eq!(
        keys::account_position_list_key(account).unwrap().felt(),
        poseidon(&[ns("ACCOUNT_POSITION_LIST"), account])
    );
}

#[test]
fn test_virtual_inventory_keys() {
    let virtual_market_id = derive_namespace("SPOT:ETH/USD").unwrap();
    let id = keys::virtual_inventory_for_swaps_key(virtual_market_id, false).unwrap();
    let expected = poseidon(&[
        ns("VIRT_INV_FOR_SWAPS"),
        ns("SPOT:ETH/USD"),
        Felt::ZERO,
    ]);
    assert_eq!(id.felt(), expected);
}

#[test]
fn test_order_matters() {
    let (market, token) = (felt("0x111"), felt("0xe7"));
    assert_ne!(
        keys::pool_amount_key(market, token).unwrap(),
        keys::pool_amount_key(token, market).unwrap()
    );
}

#[test]
fn test_namespaced_keys_differ_from_bare_fields() {
    let market = felt("0x111");
    let keyed = keys::funding_factor_key(market).unwrap();
    let bare = derive_composite_key(&[FieldValue::Address(market)]).unwrap();
    assert_ne!(keyed, bare);
}

#[test]
fn test_catalogue_is_complete_and_distinct() {
    let entries = keys::catalogue().collect::<Vec<_>>();
    assert_eq!(entries.len(), Namespace::ALL.len());
    assert_eq!(entries.iter().map(|(literal, _)| literal).unique().count(), entries.len());
    assert_eq!(entries.iter().map(|(_, id)| id).unique().count(), entries.len());

    for (literal, id) in entries {
        let namespace = Namespace::from_literal(literal).unwrap();
        assert_eq!(namespace.id(), id);
        assert_eq!(id.felt(), ns(literal), "{literal}");
    }
}

#[test]
fn test_wide_literals_are_reduced() {
    let wide = keys::catalogue()
        .filter(|(literal, _)| literal.len() > 31)
        .collect::<Vec<_>>();
    assert!(!wide.is_empty());
    for (literal, id) in wide {
        // Reduced modulo the prime, never truncated.
        let truncated = poseidon(&[short_string(&literal[..31])]);
        assert_ne!(id.felt(), truncated, "{literal}");
        assert!(derive_namespace(literal).is_err(), "{literal}");
    }
}

#[test]
fn test_identifier_text_round_trip() {
    let id = Namespace::PoolAmount.id();
    let parsed = id.to_string().parse::<Identifier>().unwrap();
    assert_eq!(parsed, id);
    let fixed = id.to_fixed_hex();
    assert_eq!(fixed.len(), 66);
    assert_eq!(fixed.parse::<Identifier>().unwrap(), id);
}
