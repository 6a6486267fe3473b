//! Cart data model: the sole durable entity of the storefront.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Frame orientation. Part of the line-item equivalence key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Portrait
    }
}

/// A resolved frame configuration, denormalized at add-to-cart time.
///
/// Names, hex code, and dimensions are copied from the catalog when the
/// snapshot is taken; they are never re-derived from a live catalog, so a
/// later catalog change cannot silently reprice or rename cart contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSelection {
    pub size_id: i64,
    pub size_name: String,
    pub dimensions: String,
    pub color_id: i64,
    pub color_name: String,
    pub color_hex: String,
    pub bead_size_id: i64,
    pub bead_size_name: String,
    pub border_thickness_id: i64,
    pub border_thickness_name: String,
    pub orientation: Orientation,
    pub uploaded_image: Option<String>,
    pub is_bulk_order: bool,
}

impl FrameSelection {
    /// Two selections merge into one line item iff the discrete option axes
    /// and orientation match. The uploaded image and bulk flag are display
    /// details, not part of the key.
    pub fn merges_with(&self, other: &FrameSelection) -> bool {
        self.size_id == other.size_id
            && self.color_id == other.color_id
            && self.bead_size_id == other.bead_size_id
            && self.border_thickness_id == other.border_thickness_id
            && self.orientation == other.orientation
    }
}

/// One cart entry: a frame selection at a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Opaque key, generator-assigned, never reused
    pub key: String,
    pub frame: FrameSelection,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

impl LineItem {
    pub fn new(frame: FrameSelection, unit_price: Decimal, quantity: i32) -> Self {
        let mut item = Self {
            key: Uuid::new_v4().to_string(),
            frame,
            quantity,
            unit_price,
            subtotal: Decimal::ZERO,
        };
        item.recompute_subtotal();
        item
    }

    pub fn recompute_subtotal(&mut self) {
        self.subtotal = self.unit_price * Decimal::from(self.quantity);
    }
}

/// The shopping cart. Items keep insertion order for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<LineItem>,
    /// Sum of line-item quantities
    pub item_count: i32,
    /// Sum of line-item subtotals
    pub subtotal: Decimal,
    /// Equal to `subtotal`; no tax or shipping is modeled
    pub total: Decimal,
    pub currency: String,
    pub currency_symbol: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn empty(currency: &str, currency_symbol: &str) -> Self {
        let now = Utc::now();
        Self {
            items: Vec::new(),
            item_count: 0,
            subtotal: Decimal::ZERO,
            total: Decimal::ZERO,
            currency: currency.to_string(),
            currency_symbol: currency_symbol.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find_item(&self, key: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.key == key)
    }

    /// Recomputes the derived fields from the line items. Called after
    /// every mutation; the invariants `item_count == Σ quantity` and
    /// `total == subtotal == Σ line.subtotal` hold exactly afterwards.
    pub fn recompute_totals(&mut self) {
        self.item_count = self.items.iter().map(|item| item.quantity).sum();
        self.subtotal = self.items.iter().map(|item| item.subtotal).sum();
        self.total = self.subtotal;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    pub(crate) fn selection(size_id: i64, orientation: Orientation) -> FrameSelection {
        FrameSelection {
            size_id,
            size_name: "12×8".to_string(),
            dimensions: "12x8 inches".to_string(),
            color_id: 1,
            color_name: "Classic Black".to_string(),
            color_hex: "#212121".to_string(),
            bead_size_id: 3,
            bead_size_name: "1.5 inch".to_string(),
            border_thickness_id: 1,
            border_thickness_name: "1 inch".to_string(),
            orientation,
            uploaded_image: None,
            is_bulk_order: false,
        }
    }

    #[test]
    fn test_merge_key_ignores_image_and_bulk_flag() {
        let a = selection(1, Orientation::Portrait);
        let mut b = selection(1, Orientation::Portrait);
        b.uploaded_image = Some("upload-123.jpg".to_string());
        b.is_bulk_order = true;
        assert!(a.merges_with(&b));
    }

    #[test]
    fn test_merge_key_respects_orientation() {
        let a = selection(1, Orientation::Portrait);
        let b = selection(1, Orientation::Landscape);
        assert!(!a.merges_with(&b));
    }

    #[test]
    fn test_line_item_subtotal() {
        let item = LineItem::new(selection(1, Orientation::Portrait), dec!(649), 3);
        assert_eq!(item.subtotal, dec!(1947));
    }

    #[test]
    fn test_line_item_keys_are_unique() {
        let a = LineItem::new(selection(1, Orientation::Portrait), dec!(649), 1);
        let b = LineItem::new(selection(1, Orientation::Portrait), dec!(649), 1);
        assert_ne!(a.key, b.key);
    }

    #[test]
    fn test_recompute_totals() {
        let mut cart = Cart::empty("INR", "₹");
        cart.items
            .push(LineItem::new(selection(1, Orientation::Portrait), dec!(649), 2));
        cart.items
            .push(LineItem::new(selection(2, Orientation::Portrait), dec!(899), 1));
        cart.recompute_totals();

        assert_eq!(cart.item_count, 3);
        assert_eq!(cart.subtotal, dec!(2197));
        assert_eq!(cart.total, cart.subtotal);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut cart = Cart::empty("INR", "₹");
        cart.items
            .push(LineItem::new(selection(1, Orientation::Landscape), dec!(499), 2));
        cart.recompute_totals();

        let json = serde_json::to_string(&cart).expect("serialize");
        let restored: Cart = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, cart);
    }
}
