//! Catalog option types, mirroring the remote `/frame-options` payload.
//!
//! Options are immutable once fetched. Bead sizes and border thicknesses
//! carry an explicit `inches` field for preview geometry; it is optional so
//! a remote catalog that omits it degrades to fixed default pixel widths
//! rather than failing to decode.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A physical frame size with its absolute price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSize {
    pub id: i64,
    pub name: String,
    /// Physical width in `unit`, portrait orientation
    pub width: f64,
    /// Physical height in `unit`, portrait orientation
    pub height: f64,
    pub unit: String,
    pub price: Decimal,
    pub is_active: bool,
    pub display_order: i32,
}

impl FrameSize {
    /// Denormalized dimension string copied into cart line items.
    pub fn dimensions(&self) -> String {
        format!("{}x{} {}", self.width, self.height, self.unit)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// A frame finish color. Carries no price delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameColor {
    pub id: i64,
    pub name: String,
    pub hex_code: String,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
}

/// Bead profile option with a price add-on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeadSize {
    pub id: i64,
    pub name: String,
    pub price_addon: Decimal,
    /// Physical bead width; `None` falls back to a default preview width
    pub inches: Option<f64>,
    pub is_default: bool,
    pub display_order: i32,
}

/// Border (mat) thickness option with a price add-on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderThickness {
    pub id: i64,
    pub name: String,
    pub price_addon: Decimal,
    /// Physical border width; `None` falls back to a default preview width
    pub inches: Option<f64>,
    pub is_default: bool,
    pub display_order: i32,
}

/// The full configurable option set, one list per axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameOptionSet {
    pub sizes: Vec<FrameSize>,
    pub colors: Vec<FrameColor>,
    pub bead_sizes: Vec<BeadSize>,
    pub border_thicknesses: Vec<BorderThickness>,
}

impl FrameOptionSet {
    /// Smallest active size by area, the anchor for preview scaling.
    pub fn smallest_size(&self) -> Option<&FrameSize> {
        self.sizes
            .iter()
            .filter(|s| s.is_active)
            .min_by(|a, b| a.area().total_cmp(&b.area()))
    }
}

fn size(id: i64, name: &str, width: f64, height: f64, price: Decimal, order: i32) -> FrameSize {
    FrameSize {
        id,
        name: name.to_string(),
        width,
        height,
        unit: "inches".to_string(),
        price,
        is_active: true,
        display_order: order,
    }
}

fn color(id: i64, name: &str, hex: &str, order: i32) -> FrameColor {
    FrameColor {
        id,
        name: name.to_string(),
        hex_code: hex.to_string(),
        image_url: None,
        is_active: true,
        display_order: order,
    }
}

fn bead(id: i64, name: &str, addon: Decimal, inches: f64, default: bool, order: i32) -> BeadSize {
    BeadSize {
        id,
        name: name.to_string(),
        price_addon: addon,
        inches: Some(inches),
        is_default: default,
        display_order: order,
    }
}

fn border(
    id: i64,
    name: &str,
    addon: Decimal,
    inches: f64,
    default: bool,
    order: i32,
) -> BorderThickness {
    BorderThickness {
        id,
        name: name.to_string(),
        price_addon: addon,
        inches: Some(inches),
        is_default: default,
        display_order: order,
    }
}

/// Built-in catalog used when the remote backend is unreachable. The
/// configurator must always be usable, so this covers every axis and flags
/// one default per bead/border axis.
pub fn default_option_set() -> FrameOptionSet {
    FrameOptionSet {
        sizes: vec![
            size(1, "4×6", 4.0, 6.0, dec!(499), 1),
            size(2, "5×7", 5.0, 7.0, dec!(699), 2),
            size(3, "6×8", 6.0, 8.0, dec!(899), 3),
            size(4, "8×10", 8.0, 10.0, dec!(1199), 4),
            size(5, "8×12", 8.0, 12.0, dec!(1399), 5),
            size(6, "10×12", 10.0, 12.0, dec!(1599), 6),
            size(7, "12×15", 12.0, 15.0, dec!(1999), 7),
            size(8, "12×18", 12.0, 18.0, dec!(2299), 8),
            size(9, "16×20", 16.0, 20.0, dec!(2999), 9),
            size(10, "16×24", 16.0, 24.0, dec!(3499), 10),
            size(11, "18×24", 18.0, 24.0, dec!(3999), 11),
            size(12, "20×30", 20.0, 30.0, dec!(4999), 12),
            size(13, "24×36", 24.0, 36.0, dec!(5999), 13),
        ],
        colors: vec![
            color(1, "Walnut Brown", "#5D4037", 1),
            color(2, "Mahogany", "#4E342E", 2),
            color(3, "Classic Black", "#212121", 3),
            color(4, "Pure White", "#FAFAFA", 4),
            color(5, "Natural Oak", "#D7CCC8", 5),
            color(6, "Gold", "#C9A227", 6),
            color(7, "Silver", "#9E9E9E", 7),
            color(8, "Cherry", "#8B0000", 8),
        ],
        bead_sizes: vec![
            bead(1, "0.5 inch", dec!(0), 0.5, true, 1),
            bead(2, "1 inch", dec!(75), 1.0, false, 2),
            bead(3, "1.5 inch", dec!(150), 1.5, false, 3),
            bead(4, "2 inch", dec!(225), 2.0, false, 4),
        ],
        border_thicknesses: vec![
            border(1, "1 inch", dec!(0), 1.0, true, 1),
            border(2, "1.5 inch", dec!(100), 1.5, false, 2),
            border(3, "2 inch", dec!(180), 2.0, false, 3),
        ],
    }
}
