//! Framecraft storefront core.
//!
//! The client-side heart of a custom photo-frame shop: a frame
//! configurator with derived pricing and preview geometry, a locally
//! persisted shopping cart, and a checkout orchestrator over a remote
//! order/payment backend. The remote catalog and commerce APIs are
//! external collaborators reached through thin clients; everything here
//! runs on the device.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod errors;
pub mod events;
pub mod models;
pub mod services;
pub mod storage;

pub use errors::StorefrontError;
pub use events::{Event, EventSender};
pub use models::cart::{Cart, FrameSelection, LineItem, Orientation};
pub use models::catalog::FrameOptionSet;
pub use services::{CartStore, CatalogClient, CheckoutService, Configurator};
