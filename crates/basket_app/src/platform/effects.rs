use std::time::Duration;

use basket_core::{Effect, Money, Msg, Product};
use basket_engine::{CatalogProduct, EngineEvent, EngineHandle};
use basket_logging::{basket_info, basket_warn};

/// Executes core effects on the engine and translates engine events back
/// into core messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchProducts { request_id } => {
                    basket_info!("FetchProducts request_id={}", request_id);
                    self.engine.fetch_catalog(request_id);
                }
            }
        }
    }

    /// Next finished engine event as a message, without blocking.
    pub fn poll(&self) -> Option<Msg> {
        self.engine.try_recv().map(map_event)
    }

    pub fn wait(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(map_event)
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::CatalogFetched {
            request_id,
            result: Ok(products),
        } => Msg::ProductsLoaded {
            request_id,
            products: products.into_iter().map(map_product).collect(),
        },
        EngineEvent::CatalogFetched {
            request_id,
            result: Err(err),
        } => {
            basket_warn!("Catalog request {} failed: {}", request_id, err);
            Msg::ProductsFailed {
                request_id,
                message: err.to_string(),
            }
        }
    }
}

fn map_product(product: CatalogProduct) -> Product {
    Product {
        id: product.id,
        name: product.name,
        price: Money::from_cents(product.price_cents),
    }
}
