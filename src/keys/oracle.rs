//! Price feed configuration and virtual inventory keys.

use super::{Namespace, namespaced};
use crate::{error::KeyError, field::FieldValue, hash::Identifier};

/// `[PRICE_FEED, token]`
pub fn price_feed_key(token: impl Into<FieldValue>) -> Result<Identifier, KeyError> {
    namespaced(Namespace::PriceFeed, [token.into()])
}

/// `[PRICE_FEED_MULTIPLIER, token]`
pub fn price_feed_multiplier_key(token: impl Into<FieldValue>) -> Result<Identifier, KeyError> {
    namespaced(Namespace::PriceFeedMultiplier, [token.into()])
}

/// `[PRICE_FEED_HEARTBEAT_DURATION, token]`
pub fn price_feed_heartbeat_duration_key(
    token: impl Into<FieldValue>,
) -> Result<Identifier, KeyError> {
    namespaced(Namespace::PriceFeedHeartbeatDuration, [token.into()])
}

/// `[STABLE_PRICE, token]`
pub fn stable_price_key(token: impl Into<FieldValue>) -> Result<Identifier, KeyError> {
    namespaced(Namespace::StablePrice, [token.into()])
}

/// `[VIRTUAL_TOKEN_ID, token]`
pub fn virtual_token_id_key(token: impl Into<FieldValue>) -> Result<Identifier, KeyError> {
    namespaced(Namespace::VirtualTokenId, [token.into()])
}

/// `[VIRTUAL_MARKET_ID, market]`
pub fn virtual_market_id_key(market: impl Into<FieldValue>) -> Result<Identifier, KeyError> {
    namespaced(Namespace::VirtualMarketId, [market.into()])
}

/// `[VIRT_INV_FOR_SWAPS, virtual_market_id, is_long_token]`
pub fn virtual_inventory_for_swaps_key(
    virtual_market_id: impl Into<FieldValue>,
    is_long_token: bool,
) -> Result<Identifier, KeyError> {
    namespaced(
        Namespace::VirtualInventoryForSwaps,
        [virtual_market_id.into(), is_long_token.into()],
    )
}

/// `[VIRT_INV_FOR_POSITIONS, virtual_token_id]`
pub fn virtual_inventory_for_positions_key(
    virtual_token_id: impl Into<FieldValue>,
) -> Result<Identifier, KeyError> {
    namespaced(
        Namespace::VirtualInventoryForPositions,
        [virtual_token_id.into()],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::derive_namespace;

    #[test]
    fn test_price_feed_keys_per_token() {
        let eth = price_feed_key("0xe7").unwrap();
        assert_ne!(eth, price_feed_key("0x05dc").unwrap());
        assert_ne!(eth, price_feed_multiplier_key("0xe7").unwrap());
        assert_ne!(eth, price_feed_heartbeat_duration_key("0xe7").unwrap());
        assert_ne!(eth, stable_price_key("0xe7").unwrap());
    }

    #[test]
    fn test_virtual_ids_accept_derived_identifiers() {
        let perp = derive_namespace("PERP:ETH/USD").unwrap();
        let spot = derive_namespace("SPOT:ETH/USD").unwrap();
        assert_ne!(
            virtual_inventory_for_swaps_key(spot, true).unwrap(),
            virtual_inventory_for_swaps_key(spot, false).unwrap()
        );
        assert_ne!(
            virtual_inventory_for_positions_key(perp).unwrap(),
            virtual_inventory_for_positions_key(spot).unwrap()
        );
        assert_ne!(
            virtual_token_id_key("0xe7").unwrap(),
            virtual_market_id_key("0xe7").unwrap()
        );
    }
}
