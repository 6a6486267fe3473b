//! The cart store: merge-by-equivalence line items over durable local
//! storage, with totals recomputed after every mutation.

use crate::errors::StorefrontError;
use crate::events::{Event, EventSender};
use crate::models::cart::{Cart, FrameSelection, LineItem};
use crate::storage::CartStorage;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Shopping cart store.
///
/// Every operation is a read-modify-write against the backing storage: the
/// cart document is loaded, mutated, recomputed, and written back wholesale.
/// Each successful mutation broadcasts the updated cart to subscribers.
#[derive(Clone)]
pub struct CartStore {
    storage: Arc<dyn CartStorage>,
    event_sender: EventSender,
    currency: String,
    currency_symbol: String,
}

impl CartStore {
    pub fn new(storage: Arc<dyn CartStorage>, event_sender: EventSender) -> Self {
        Self {
            storage,
            event_sender,
            currency: "INR".to_string(),
            currency_symbol: "₹".to_string(),
        }
    }

    pub fn with_currency(mut self, currency: &str, currency_symbol: &str) -> Self {
        self.currency = currency.to_string();
        self.currency_symbol = currency_symbol.to_string();
        self
    }

    /// Returns the persisted cart, creating and persisting an empty one if
    /// none exists.
    pub fn get(&self) -> Result<Cart, StorefrontError> {
        if let Some(cart) = self.storage.load()? {
            return Ok(cart);
        }
        let cart = Cart::empty(&self.currency, &self.currency_symbol);
        self.storage.save(&cart)?;
        Ok(cart)
    }

    /// Adds a configuration to the cart. An existing line item with an
    /// equivalent configuration absorbs the quantity (keeping its own unit
    /// price); otherwise a new line item is appended with a fresh key.
    #[instrument(skip(self, selection))]
    pub fn add(
        &self,
        selection: FrameSelection,
        unit_price: Decimal,
        quantity: i32,
    ) -> Result<Cart, StorefrontError> {
        if quantity < 1 {
            return Err(StorefrontError::invalid_operation(
                "quantity must be at least 1",
            ));
        }

        let mut cart = self.get()?;
        match cart
            .items
            .iter_mut()
            .find(|item| item.frame.merges_with(&selection))
        {
            Some(item) => {
                item.quantity += quantity;
                item.recompute_subtotal();
                info!(key = %item.key, quantity = item.quantity, "merged into existing line item");
            }
            None => {
                let item = LineItem::new(selection, unit_price, quantity);
                info!(key = %item.key, quantity, "added new line item");
                cart.items.push(item);
            }
        }
        self.commit(cart)
    }

    /// Removes the line item with the given key. A missing key is a no-op,
    /// not an error.
    #[instrument(skip(self))]
    pub fn remove(&self, key: &str) -> Result<Cart, StorefrontError> {
        let mut cart = self.get()?;
        let before = cart.items.len();
        cart.items.retain(|item| item.key != key);
        if cart.items.len() == before {
            return Ok(cart);
        }
        info!(key, "removed line item");
        self.commit(cart)
    }

    /// Sets the quantity of a line item. Quantities below 1 are rejected
    /// as a no-op (never clamped, never treated as removal); an unknown key
    /// is likewise a no-op.
    #[instrument(skip(self))]
    pub fn update_quantity(&self, key: &str, quantity: i32) -> Result<Cart, StorefrontError> {
        let mut cart = self.get()?;
        if quantity < 1 {
            warn!(key, quantity, "ignoring quantity below 1");
            return Ok(cart);
        }
        match cart.items.iter_mut().find(|item| item.key == key) {
            Some(item) => {
                item.quantity = quantity;
                item.recompute_subtotal();
            }
            None => {
                warn!(key, "update for unknown line item ignored");
                return Ok(cart);
            }
        }
        self.commit(cart)
    }

    /// Destroys the persisted cart and notifies subscribers with an empty
    /// cart, then a `CartCleared` marker.
    #[instrument(skip(self))]
    pub fn clear(&self) -> Result<(), StorefrontError> {
        self.storage.delete()?;
        info!("cart cleared");
        self.event_sender
            .send_or_log(Event::CartUpdated(Cart::empty(
                &self.currency,
                &self.currency_symbol,
            )));
        self.event_sender.send_or_log(Event::CartCleared);
        Ok(())
    }

    fn commit(&self, mut cart: Cart) -> Result<Cart, StorefrontError> {
        cart.recompute_totals();
        self.storage.save(&cart)?;
        self.event_sender.send_or_log(Event::CartUpdated(cart.clone()));
        Ok(cart)
    }
}
