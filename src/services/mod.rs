pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod configurator;

pub use cart::CartStore;
pub use catalog::CatalogClient;
pub use checkout::{CheckoutService, CheckoutSession, CheckoutStep, HttpOrderGateway, OrderGateway};
pub use configurator::Configurator;
