use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use framecraft::services::{CartStore, CatalogClient, Configurator};
use framecraft::storage::FileCartStorage;
use framecraft::EventSender;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = framecraft::config::load_config().context("loading configuration")?;
    framecraft::config::init_tracing(cfg.log_level(), cfg.log_json);

    let catalog = CatalogClient::from_config(&cfg).context("building catalog client")?;
    let options = catalog.fetch_options().await;
    info!(
        sizes = options.sizes.len(),
        colors = options.colors.len(),
        "catalog loaded"
    );

    let configurator = Configurator::new(options)?;
    println!(
        "Default frame: {} in {}, {} bead, {} border: {}{}",
        configurator.size().name,
        configurator.color().name,
        configurator.bead_size().name,
        configurator.border_thickness().name,
        cfg.currency_symbol,
        configurator.total_price()
    );

    let storage = Arc::new(FileCartStorage::new(&cfg.cart_storage_path));
    let cart_store = CartStore::new(storage, EventSender::default())
        .with_currency(&cfg.currency, &cfg.currency_symbol);
    let cart = cart_store.get()?;
    println!(
        "Cart: {} item(s), total {}{}",
        cart.item_count, cart.currency_symbol, cart.total
    );

    Ok(())
}
