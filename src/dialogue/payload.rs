//! Backend order payload derived from the Slot Store
//!
//! The payload is what a downstream fulfillment system consumes after each
//! turn. The `add_to_cart`/`remove_from_cart` fields are one-shot command
//! flags: building the payload takes them out of the store, so they fire
//! exactly once per commit/removal rather than lingering as state.

use serde::{Deserialize, Serialize};

use crate::dialogue::slots::SlotStore;
use crate::menu::{Category, pricing};
use crate::order::{CartItem, DineType, OptionBundle, PaymentMethod, Size, Temp};

/// Normalized order-submission document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub category: Category,
    pub menu_id: String,
    pub menu_name: String,
    pub temp: Option<Temp>,
    pub size: Option<Size>,
    pub quantity: u32,
    pub options: OptionBundle,
    pub dine_type: Option<DineType>,
    pub payment_method: Option<PaymentMethod>,
    /// Left for the downstream pricing system to overwrite; pre-filled from
    /// the embedded price master when the menu is known
    pub price: Option<u32>,
    /// One-shot: an item was committed this turn
    pub add_to_cart: bool,
    /// One-shot: an item was removed this turn
    pub remove_from_cart: bool,
    /// Identity of the removed item, present with `remove_from_cart`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_menu_id: Option<String>,
    /// Running cart total
    pub cart_total: u32,
}

impl OrderPayload {
    /// Build the payload for the current turn, consuming one-shot flags
    ///
    /// Returns `None` while nothing orderable exists yet (no category and no
    /// menu chosen, empty cart) — callers treat that as "nothing to submit,"
    /// not an error.
    #[must_use]
    pub fn from_store(store: &mut SlotStore) -> Option<Self> {
        let item = store
            .current_item()
            .or_else(|| store.cart.last().cloned())
            .or_else(|| removed_item(store))?;

        let add_to_cart = std::mem::take(&mut store.add_to_cart);
        let removed_menu_id = store.remove_from_cart.take();

        Some(Self {
            price: Some(pricing::price_item(&item)),
            category: item.category,
            menu_id: item.menu_id,
            menu_name: item.menu_name,
            temp: item.temp,
            size: item.size,
            quantity: item.quantity,
            options: item.options,
            dine_type: store.dine_type,
            payment_method: store.payment_method,
            add_to_cart,
            remove_from_cart: removed_menu_id.is_some(),
            removed_menu_id,
            cart_total: pricing::cart_total(&store.cart),
        })
    }
}

/// Identity-only line for a removal that emptied the cart, so the removal
/// event still reaches the backend exactly once
fn removed_item(store: &SlotStore) -> Option<CartItem> {
    let menu_id = store.remove_from_cart.as_deref()?;
    let (category, item) = crate::menu::by_id(menu_id)?;
    Some(CartItem {
        category,
        menu_id: item.id.to_string(),
        menu_name: item.name.to_string(),
        temp: None,
        size: None,
        options: OptionBundle::default(),
        quantity: 1,
    })
}
