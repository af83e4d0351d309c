//! Basket engine: product catalog fetching and background execution.
mod decode;
mod engine;
mod fetch;
mod types;

pub use decode::{decode_catalog, DecodeError, MAX_PRICE_CENTS};
pub use engine::EngineHandle;
pub use fetch::{FetchSettings, ProductFetcher, ReqwestProductFetcher};
pub use types::{CatalogProduct, EngineEvent, FailureKind, FetchError, RequestId};
