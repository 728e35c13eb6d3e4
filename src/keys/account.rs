//! Per-account records: positions, requests, claimables, lists.

use super::{Namespace, namespaced};
use crate::{
    error::KeyError,
    field::FieldValue,
    hash::{Identifier, derive_composite_key},
};

/// `[account, market, collateral_token, is_long]`, no namespace.
pub fn position_key(
    account: impl Into<FieldValue>,
    market: impl Into<FieldValue>,
    collateral_token: impl Into<FieldValue>,
    is_long: bool,
) -> Result<Identifier, KeyError> {
    derive_composite_key(&[
        account.into(),
        market.into(),
        collateral_token.into(),
        is_long.into(),
    ])
}

/// `[data_store, nonce]`, no namespace.
///
/// Orders, deposits and withdrawals all take their key from the data store
/// nonce at creation time, so one derivation serves all three.
pub fn request_key(
    data_store: impl Into<FieldValue>,
    nonce: impl Into<FieldValue>,
) -> Result<Identifier, KeyError> {
    derive_composite_key(&[data_store.into(), nonce.into()])
}

pub fn order_key(
    data_store: impl Into<FieldValue>,
    nonce: impl Into<FieldValue>,
) -> Result<Identifier, KeyError> {
    request_key(data_store, nonce)
}

pub fn deposit_key(
    data_store: impl Into<FieldValue>,
    nonce: impl Into<FieldValue>,
) -> Result<Identifier, KeyError> {
    request_key(data_store, nonce)
}

pub fn withdrawal_key(
    data_store: impl Into<FieldValue>,
    nonce: impl Into<FieldValue>,
) -> Result<Identifier, KeyError> {
    request_key(data_store, nonce)
}

/// `[ACCOUNT_ORDER_LIST, account]`
pub fn account_order_list_key(account: impl Into<FieldValue>) -> Result<Identifier, KeyError> {
    namespaced(Namespace::AccountOrderList, [account.into()])
}

/// `[ACCOUNT_POSITION_LIST, account]`
pub fn account_position_list_key(account: impl Into<FieldValue>) -> Result<Identifier, KeyError> {
    namespaced(Namespace::AccountPositionList, [account.into()])
}

/// `[CLAIMABLE_FUNDING_AMOUNT, market, token, account]`
pub fn claimable_funding_amount_key(
    market: impl Into<FieldValue>,
    token: impl Into<FieldValue>,
    account: impl Into<FieldValue>,
) -> Result<Identifier, KeyError> {
    namespaced(
        Namespace::ClaimableFundingAmount,
        [market.into(), token.into(), account.into()],
    )
}

/// `[AFFILIATE_REWARD, market, token, account]`
pub fn affiliate_reward_key(
    market: impl Into<FieldValue>,
    token: impl Into<FieldValue>,
    account: impl Into<FieldValue>,
) -> Result<Identifier, KeyError> {
    namespaced(
        Namespace::AffiliateReward,
        [market.into(), token.into(), account.into()],
    )
}

/// `[UI_FEE_FACTOR, ui_fee_receiver]`
pub fn ui_fee_factor_key(ui_fee_receiver: impl Into<FieldValue>) -> Result<Identifier, KeyError> {
    namespaced(Namespace::UiFeeFactor, [ui_fee_receiver.into()])
}
