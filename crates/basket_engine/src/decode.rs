use std::collections::HashSet;

use serde::Deserialize;

use crate::CatalogProduct;

/// Largest accepted unit price, in cents (one billion in major units).
pub const MAX_PRICE_CENTS: i64 = 100_000_000_000;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DecodeError {
    #[error("invalid catalog json: {0}")]
    Json(String),
    #[error("product {id} has an invalid price {price}")]
    InvalidPrice { id: u64, price: f64 },
    #[error("product {id} has an empty name")]
    MissingName { id: u64 },
    #[error("product id {0} appears more than once")]
    DuplicateId(u64),
}

#[derive(Debug, Deserialize)]
struct WireProduct {
    id: u64,
    name: String,
    price: f64,
}

/// Either a bare array of products or `{ "products": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WirePayload {
    List(Vec<WireProduct>),
    Wrapped { products: Vec<WireProduct> },
}

/// Decode a catalog payload, keeping the payload order.
pub fn decode_catalog(bytes: &[u8]) -> Result<Vec<CatalogProduct>, DecodeError> {
    let payload: WirePayload =
        serde_json::from_slice(bytes).map_err(|err| DecodeError::Json(err.to_string()))?;
    let wire = match payload {
        WirePayload::List(products) | WirePayload::Wrapped { products } => products,
    };

    let mut seen = HashSet::with_capacity(wire.len());
    wire.into_iter()
        .map(|product| {
            if !seen.insert(product.id) {
                return Err(DecodeError::DuplicateId(product.id));
            }
            to_catalog_product(product)
        })
        .collect()
}

fn to_catalog_product(product: WireProduct) -> Result<CatalogProduct, DecodeError> {
    let cents = (product.price * 100.0).round();
    if !cents.is_finite() || product.price < 0.0 || cents > MAX_PRICE_CENTS as f64 {
        return Err(DecodeError::InvalidPrice {
            id: product.id,
            price: product.price,
        });
    }
    let name = product.name.trim();
    if name.is_empty() {
        return Err(DecodeError::MissingName { id: product.id });
    }
    Ok(CatalogProduct {
        id: product.id,
        name: name.to_string(),
        price_cents: cents as i64,
    })
}
