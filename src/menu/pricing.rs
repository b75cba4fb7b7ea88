//! Static price tables and cart total calculation
//!
//! The price master is embedded at compile time; a downstream pricing
//! service may still override the payload's `price` field, which is why
//! the backend payload keeps it nullable.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Deserialize;

use crate::order::CartItem;

/// Embedded price master, keyed by backend menu id
#[derive(Debug, Deserialize)]
pub struct PriceTable {
    pub menus: HashMap<String, MenuPrice>,
    pub options: OptionPrices,
}

/// Base price plus per-size surcharge for one menu item
#[derive(Debug, Deserialize)]
pub struct MenuPrice {
    pub base: u32,
    #[serde(default)]
    pub size: HashMap<String, u32>,
}

/// Unit prices for paid options
#[derive(Debug, Deserialize)]
pub struct OptionPrices {
    pub extra_shot: u32,
    pub syrup: u32,
    pub decaf: u32,
}

static PRICES: LazyLock<PriceTable> = LazyLock::new(|| {
    serde_json::from_str(include_str!("prices.json")).expect("embedded prices.json is valid")
});

/// The embedded price master
#[must_use]
pub fn table() -> &'static PriceTable {
    &PRICES
}

/// Price one cart line, quantity included
///
/// Unknown menu ids price as 0 rather than failing; an unpriced line is a
/// configuration gap, not a reason to block an order.
#[must_use]
pub fn price_item(item: &CartItem) -> u32 {
    let Some(menu) = PRICES.menus.get(&item.menu_id) else {
        tracing::warn!(menu_id = %item.menu_id, "no price configured, pricing as 0");
        return 0;
    };

    let size_add = item
        .size
        .map(|s| menu.size.get(s.as_str()).copied().unwrap_or(0))
        .unwrap_or(0);

    let opts = &PRICES.options;
    let mut unit = menu.base + size_add;
    unit += opts.extra_shot * u32::from(item.options.extra_shot);
    if item.options.syrup {
        unit += opts.syrup;
    }
    if item.options.decaf == Some(true) {
        unit += opts.decaf;
    }

    unit * item.quantity.max(1)
}

/// Total for a whole cart
#[must_use]
pub fn cart_total(cart: &[CartItem]) -> u32 {
    cart.iter().map(price_item).sum()
}
