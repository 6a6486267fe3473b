//! Integration tests for the configurator and catalog client: default
//! selection, derived pricing, preview geometry, and the add-to-cart
//! snapshot feeding the cart store.

mod common;

use common::{assert_cart_invariants, cart_store};
use framecraft::models::cart::Orientation;
use framecraft::models::catalog::default_option_set;
use framecraft::services::catalog::CatalogClient;
use framecraft::services::configurator::{
    Configurator, MAX_PREVIEW_HEIGHT_PX, MAX_PREVIEW_WIDTH_PX,
};
use rust_decimal_macros::dec;
use std::time::Duration;

#[test]
fn test_price_derivation_from_addons() {
    // Size at 499 + "1.5 inch" bead (+150) + "1 inch" border (+0) = 649.
    let mut configurator = Configurator::new(default_option_set()).expect("configurator");
    configurator.select_bead_size(3).expect("bead 1.5 inch");
    configurator.select_border_thickness(1).expect("border 1 inch");
    assert_eq!(configurator.total_price(), dec!(649));
}

#[test]
fn test_configurator_snapshot_feeds_cart_merge() {
    let mut configurator = Configurator::new(default_option_set()).expect("configurator");
    configurator.select_bead_size(3).expect("bead");

    let store = cart_store();
    let cart = store
        .add(configurator.selection(), configurator.total_price(), 1)
        .expect("add");
    assert_eq!(cart.subtotal, dec!(649));

    // The identical configuration again with qty 2 merges into one line.
    let cart = store
        .add(configurator.selection(), configurator.total_price(), 2)
        .expect("add");
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 3);
    assert_eq!(cart.subtotal, dec!(1947));
    assert_cart_invariants(&cart);
}

#[test]
fn test_orientation_change_splits_cart_lines() {
    let mut configurator = Configurator::new(default_option_set()).expect("configurator");
    let store = cart_store();

    store
        .add(configurator.selection(), configurator.total_price(), 1)
        .expect("add");
    configurator.set_orientation(Orientation::Landscape);
    let cart = store
        .add(configurator.selection(), configurator.total_price(), 1)
        .expect("add");

    assert_eq!(cart.items.len(), 2);
}

#[test]
fn test_geometry_stays_inside_display_box_for_all_sizes() {
    let options = default_option_set();
    let mut configurator = Configurator::new(options.clone()).expect("configurator");

    for size in &options.sizes {
        configurator.select_size(size.id).expect("size");
        for orientation in [Orientation::Portrait, Orientation::Landscape] {
            configurator.set_orientation(orientation);
            let geometry = configurator.preview_geometry();
            assert!(
                geometry.frame_width_px <= MAX_PREVIEW_WIDTH_PX + 1e-9,
                "size {} {:?} overflows width",
                size.name,
                orientation
            );
            assert!(
                geometry.frame_height_px <= MAX_PREVIEW_HEIGHT_PX + 1e-9,
                "size {} {:?} overflows height",
                size.name,
                orientation
            );
            assert!(geometry.frame_width_px > 0.0);
            assert!(geometry.frame_height_px > 0.0);
        }
    }
}

#[test]
fn test_geometry_orientation_swap_is_symmetric() {
    let mut configurator = Configurator::new(default_option_set()).expect("configurator");
    configurator.select_size(4).expect("8×10");

    configurator.set_orientation(Orientation::Portrait);
    let portrait = configurator.preview_geometry();
    configurator.set_orientation(Orientation::Landscape);
    let landscape = configurator.preview_geometry();

    // Same footprint, axes swapped (up to the shared cap scale).
    let portrait_aspect = portrait.frame_width_px / portrait.frame_height_px;
    let landscape_aspect = landscape.frame_width_px / landscape.frame_height_px;
    assert!((portrait_aspect * landscape_aspect - 1.0).abs() < 1e-9);
}

#[test]
fn test_bead_and_border_pixels_scale_with_inches() {
    let mut configurator = Configurator::new(default_option_set()).expect("configurator");

    configurator.select_bead_size(1).expect("0.5 inch bead");
    let thin = configurator.preview_geometry();
    configurator.select_bead_size(4).expect("2 inch bead");
    let thick = configurator.preview_geometry();
    assert_eq!(thick.bead_px, 4.0 * thin.bead_px);

    configurator.select_border_thickness(1).expect("1 inch border");
    let narrow = configurator.preview_geometry();
    configurator.select_border_thickness(3).expect("2 inch border");
    let wide = configurator.preview_geometry();
    assert_eq!(wide.border_px, 2.0 * narrow.border_px);
}

#[tokio::test]
async fn test_unreachable_catalog_still_yields_usable_configurator() {
    let client = CatalogClient::new(
        "http://127.0.0.1:9",
        Duration::from_millis(500),
        default_option_set(),
    )
    .expect("client");

    let options = client.fetch_options().await;
    let configurator = Configurator::new(options).expect("configurator");
    assert_eq!(configurator.total_price(), dec!(499));
}
