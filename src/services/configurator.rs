//! Configuration state: one selection per option axis with a derived price
//! and preview geometry. Nothing here is persisted; the state lives only
//! until it is snapshotted into a cart line item.

use crate::errors::StorefrontError;
use crate::models::cart::{FrameSelection, Orientation};
use crate::models::catalog::{BeadSize, BorderThickness, FrameColor, FrameOptionSet, FrameSize};
use rust_decimal::Decimal;

/// Maximum preview display box, pixels.
pub const MAX_PREVIEW_WIDTH_PX: f64 = 157.0;
pub const MAX_PREVIEW_HEIGHT_PX: f64 = 222.0;

/// Pixel width per physical inch of bead / border.
const BEAD_PX_PER_INCH: f64 = 8.0;
const BORDER_PX_PER_INCH: f64 = 12.0;

/// Fallbacks when an option carries no `inches` value.
const DEFAULT_BEAD_PX: f64 = 8.0;
const DEFAULT_BORDER_PX: f64 = 12.0;

/// Derived preview geometry, presentation-only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewGeometry {
    pub frame_width_px: f64,
    pub frame_height_px: f64,
    pub bead_px: f64,
    pub border_px: f64,
}

/// The in-memory frame configuration.
///
/// Defaults on construction: first active size, first active color, the
/// `is_default` (else first) bead size and border thickness, portrait
/// orientation, quantity 1. Every selection change is immediately visible
/// through the derived accessors.
#[derive(Debug, Clone)]
pub struct Configurator {
    options: FrameOptionSet,
    /// Pixels per physical inch, anchored so the smallest catalog size
    /// fills the display box height unclamped.
    pixels_per_inch: f64,
    size: FrameSize,
    color: FrameColor,
    bead_size: BeadSize,
    border_thickness: BorderThickness,
    orientation: Orientation,
    is_bulk_order: bool,
    uploaded_image: Option<String>,
    quantity: i32,
}

impl Configurator {
    pub fn new(options: FrameOptionSet) -> Result<Self, StorefrontError> {
        let size = first_active(&options.sizes, |s| s.is_active)
            .ok_or_else(|| StorefrontError::invalid_operation("catalog has no frame sizes"))?
            .clone();
        let color = first_active(&options.colors, |c| c.is_active)
            .ok_or_else(|| StorefrontError::invalid_operation("catalog has no frame colors"))?
            .clone();
        let bead_size = options
            .bead_sizes
            .iter()
            .find(|b| b.is_default)
            .or_else(|| options.bead_sizes.first())
            .ok_or_else(|| StorefrontError::invalid_operation("catalog has no bead sizes"))?
            .clone();
        let border_thickness = options
            .border_thicknesses
            .iter()
            .find(|b| b.is_default)
            .or_else(|| options.border_thicknesses.first())
            .ok_or_else(|| StorefrontError::invalid_operation("catalog has no border thicknesses"))?
            .clone();

        let smallest = options
            .smallest_size()
            .ok_or_else(|| StorefrontError::invalid_operation("catalog has no frame sizes"))?;
        let pixels_per_inch = MAX_PREVIEW_HEIGHT_PX / smallest.height.max(1.0);

        Ok(Self {
            options,
            pixels_per_inch,
            size,
            color,
            bead_size,
            border_thickness,
            orientation: Orientation::default(),
            is_bulk_order: false,
            uploaded_image: None,
            quantity: 1,
        })
    }

    pub fn select_size(&mut self, id: i64) -> Result<(), StorefrontError> {
        self.size = self
            .options
            .sizes
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| StorefrontError::not_found(format!("Frame size {} not found", id)))?;
        Ok(())
    }

    pub fn select_color(&mut self, id: i64) -> Result<(), StorefrontError> {
        self.color = self
            .options
            .colors
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| StorefrontError::not_found(format!("Frame color {} not found", id)))?;
        Ok(())
    }

    pub fn select_bead_size(&mut self, id: i64) -> Result<(), StorefrontError> {
        self.bead_size = self
            .options
            .bead_sizes
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| StorefrontError::not_found(format!("Bead size {} not found", id)))?;
        Ok(())
    }

    pub fn select_border_thickness(&mut self, id: i64) -> Result<(), StorefrontError> {
        self.border_thickness = self
            .options
            .border_thicknesses
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| {
                StorefrontError::not_found(format!("Border thickness {} not found", id))
            })?;
        Ok(())
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn set_bulk_order(&mut self, is_bulk: bool) {
        self.is_bulk_order = is_bulk;
    }

    pub fn set_uploaded_image(&mut self, image: Option<String>) {
        self.uploaded_image = image;
    }

    pub fn set_quantity(&mut self, quantity: i32) -> Result<(), StorefrontError> {
        if quantity < 1 {
            return Err(StorefrontError::invalid_operation(
                "quantity must be at least 1",
            ));
        }
        self.quantity = quantity;
        Ok(())
    }

    pub fn size(&self) -> &FrameSize {
        &self.size
    }

    pub fn color(&self) -> &FrameColor {
        &self.color
    }

    pub fn bead_size(&self) -> &BeadSize {
        &self.bead_size
    }

    pub fn border_thickness(&self) -> &BorderThickness {
        &self.border_thickness
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    /// Unit price of the current configuration. The size carries its own
    /// absolute price; bead and border contribute add-ons; color is free.
    pub fn total_price(&self) -> Decimal {
        self.size.price + self.bead_size.price_addon + self.border_thickness.price_addon
    }

    /// Preview geometry for the current selection: physical dimensions
    /// scaled by the catalog-anchored pixels-per-inch, swapped for
    /// landscape, then capped to the display box preserving aspect ratio.
    pub fn preview_geometry(&self) -> PreviewGeometry {
        let (mut width_in, mut height_in) = (self.size.width, self.size.height);
        if self.orientation == Orientation::Landscape {
            std::mem::swap(&mut width_in, &mut height_in);
        }

        let mut frame_width_px = width_in * self.pixels_per_inch;
        let mut frame_height_px = height_in * self.pixels_per_inch;

        if frame_width_px > MAX_PREVIEW_WIDTH_PX || frame_height_px > MAX_PREVIEW_HEIGHT_PX {
            let scale = (MAX_PREVIEW_WIDTH_PX / frame_width_px)
                .min(MAX_PREVIEW_HEIGHT_PX / frame_height_px);
            frame_width_px *= scale;
            frame_height_px *= scale;
        }

        PreviewGeometry {
            frame_width_px,
            frame_height_px,
            bead_px: self
                .bead_size
                .inches
                .map(|inches| inches * BEAD_PX_PER_INCH)
                .unwrap_or(DEFAULT_BEAD_PX),
            border_px: self
                .border_thickness
                .inches
                .map(|inches| inches * BORDER_PX_PER_INCH)
                .unwrap_or(DEFAULT_BORDER_PX),
        }
    }

    /// Snapshots the current configuration for the cart, denormalizing
    /// names, hex code, and dimensions.
    pub fn selection(&self) -> FrameSelection {
        FrameSelection {
            size_id: self.size.id,
            size_name: self.size.name.clone(),
            dimensions: self.size.dimensions(),
            color_id: self.color.id,
            color_name: self.color.name.clone(),
            color_hex: self.color.hex_code.clone(),
            bead_size_id: self.bead_size.id,
            bead_size_name: self.bead_size.name.clone(),
            border_thickness_id: self.border_thickness.id,
            border_thickness_name: self.border_thickness.name.clone(),
            orientation: self.orientation,
            uploaded_image: self.uploaded_image.clone(),
            is_bulk_order: self.is_bulk_order,
        }
    }
}

fn first_active<T>(items: &[T], is_active: impl Fn(&T) -> bool) -> Option<&T> {
    items
        .iter()
        .find(|&item| is_active(item))
        .or_else(|| items.first())
}
