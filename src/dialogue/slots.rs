//! Slot Store: everything known so far about one session's order
//!
//! Pure data plus reset/commit bookkeeping; all mutation happens inside the
//! dispatcher during a turn. Invariants:
//! - `menu_id` and `menu_name` are set together or not at all
//! - a chosen menu implies a chosen category implies a chosen dine type
//! - `turn_count` never decreases within a session's lifetime

use serde::{Deserialize, Serialize};

use crate::dialogue::payload::OrderPayload;
use crate::dialogue::state::Step;
use crate::menu::Category;
use crate::order::{CartItem, DineType, OptionBundle, PaymentMethod, Size, Temp};

/// Mutable per-session order state
#[derive(Debug, Clone, Default)]
pub struct SlotStore {
    pub step: Step,
    pub turn_count: u32,
    pub dine_type: Option<DineType>,
    pub category: Option<Category>,
    menu_id: Option<String>,
    menu_name: Option<String>,
    pub temp: Option<Temp>,
    pub size: Option<Size>,
    pub options: OptionBundle,
    pub quantity: u32,
    pub payment_method: Option<PaymentMethod>,
    pub cart: Vec<CartItem>,
    /// One-shot: an item was committed this turn
    pub add_to_cart: bool,
    /// One-shot: this menu id was removed from the cart this turn
    pub remove_from_cart: Option<String>,
    /// Most recent turn result, kept for result polling
    pub last_response: Option<StoredTurn>,
}

/// Snapshot of a finished turn, served to polling clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredTurn {
    pub response_text: String,
    pub payload: Option<OrderPayload>,
}

/// Serializable view of the store for state queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub step: Step,
    pub turn_count: u32,
    pub dine_type: Option<DineType>,
    pub category: Option<Category>,
    pub menu_id: Option<String>,
    pub menu_name: Option<String>,
    pub temp: Option<Temp>,
    pub size: Option<Size>,
    pub options: OptionBundle,
    pub payment_method: Option<PaymentMethod>,
    pub cart: Vec<CartItem>,
}

impl SlotStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            quantity: 1,
            ..Self::default()
        }
    }

    /// Full reset back to the initial defaults
    ///
    /// Used both for "new order after completion" and "abandon and restart";
    /// only the monotone turn counter survives.
    pub fn reset(&mut self) {
        let turn_count = self.turn_count;
        *self = Self::new();
        self.turn_count = turn_count;
    }

    /// Chosen menu identity, both fields or neither
    #[must_use]
    pub fn menu(&self) -> Option<(&str, &str)> {
        match (&self.menu_id, &self.menu_name) {
            (Some(id), Some(name)) => Some((id.as_str(), name.as_str())),
            _ => None,
        }
    }

    #[must_use]
    pub fn menu_id(&self) -> Option<&str> {
        self.menu_id.as_deref()
    }

    #[must_use]
    pub fn menu_name(&self) -> Option<&str> {
        self.menu_name.as_deref()
    }

    /// Record a menu choice; keeps id/name/category in lockstep
    pub fn choose_menu(&mut self, category: Category, menu_id: &str, menu_name: &str) {
        self.category = Some(category);
        self.menu_id = Some(menu_id.to_string());
        self.menu_name = Some(menu_name.to_string());
    }

    /// Clear the in-progress item, leaving dine type, cart and payment alone
    pub fn clear_item(&mut self) {
        self.category = None;
        self.menu_id = None;
        self.menu_name = None;
        self.temp = None;
        self.size = None;
        self.options = OptionBundle::default();
        self.quantity = 1;
    }

    /// Commit the in-progress item into the cart
    ///
    /// Returns the committed line; `None` when no menu has been chosen.
    /// Sets the one-shot `add_to_cart` flag and clears the item slots.
    pub fn commit_item(&mut self) -> Option<CartItem> {
        let (menu_id, menu_name) = {
            let (id, name) = self.menu()?;
            (id.to_string(), name.to_string())
        };
        let item = CartItem {
            category: self.category?,
            menu_id,
            menu_name,
            temp: self.temp,
            size: self.size,
            options: self.options,
            quantity: self.quantity.max(1),
        };
        self.cart.push(item.clone());
        self.add_to_cart = true;
        self.clear_item();
        Some(item)
    }

    /// Remove the first cart line matching `menu_id`
    ///
    /// Sets the one-shot `remove_from_cart` flag when a line was removed.
    pub fn remove_cart_item(&mut self, menu_id: &str) -> Option<CartItem> {
        let idx = self.cart.iter().position(|i| i.menu_id == menu_id)?;
        let removed = self.cart.remove(idx);
        self.remove_from_cart = Some(removed.menu_id.clone());
        Some(removed)
    }

    /// Merge a parsed option bundle into the current item (never overwrite)
    pub fn merge_options(&mut self, parsed: &OptionBundle) {
        self.options.merge(parsed);
    }

    /// View of the in-progress item, once a menu has been chosen
    #[must_use]
    pub fn current_item(&self) -> Option<CartItem> {
        let (menu_id, menu_name) = self.menu()?;
        Some(CartItem {
            category: self.category?,
            menu_id: menu_id.to_string(),
            menu_name: menu_name.to_string(),
            temp: self.temp,
            size: self.size,
            options: self.options,
            quantity: self.quantity.max(1),
        })
    }

    /// Anything orderable yet? True once the cart or the item has substance
    #[must_use]
    pub fn has_order(&self) -> bool {
        !self.cart.is_empty() || self.menu_id.is_some()
    }

    #[must_use]
    pub fn snapshot(&self) -> OrderSnapshot {
        OrderSnapshot {
            step: self.step,
            turn_count: self.turn_count,
            dine_type: self.dine_type,
            category: self.category,
            menu_id: self.menu_id.clone(),
            menu_name: self.menu_name.clone(),
            temp: self.temp,
            size: self.size,
            options: self.options,
            payment_method: self.payment_method,
            cart: self.cart.clone(),
        }
    }
}
