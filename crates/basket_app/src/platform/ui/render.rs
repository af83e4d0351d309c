use basket_core::{BasketViewModel, LoadState, Money, SheetView, CLEAR_CONFIRMATION_MESSAGE};

/// Renders the basket screen as terminal lines.
pub fn render(view: &BasketViewModel, currency: &str) -> Vec<String> {
    let mut lines = vec!["== Shopping Basket ==".to_string()];

    match view.load_state {
        LoadState::Loading => lines.push("Loading products...".to_string()),
        LoadState::Empty if !view.fetch_failed => lines.push("No products loaded.".to_string()),
        LoadState::Empty | LoadState::Ready => {}
    }
    if view.fetch_failed {
        let reason = view.last_error.as_deref().unwrap_or("unknown error");
        lines.push(format!(
            "Could not load products: {reason}. Type `load` to retry."
        ));
    }

    if view.line_items.is_empty() {
        lines.push("  (basket is empty)".to_string());
    }
    for item in &view.line_items {
        lines.push(format!(
            "  [{}] {:<24} {}",
            item.line_id,
            item.product.name,
            price(currency, item.product.price)
        ));
    }
    lines.push(format!("Total price: {currency}{}", view.total_price));

    match &view.sheet {
        SheetView::None => {}
        SheetView::Catalog => {
            lines.push("-- Products --".to_string());
            if view.catalog.is_empty() {
                lines.push("  (no products available)".to_string());
            }
            for product in &view.catalog {
                lines.push(format!(
                    "  #{} {:<24} {}",
                    product.id,
                    product.name,
                    price(currency, product.price)
                ));
            }
            lines.push("Type `add <id>...` to add, `back` to cancel.".to_string());
        }
        SheetView::ItemDetail(item) => {
            lines.push("-- Item --".to_string());
            lines.push(format!("  Product #{}: {}", item.product.id, item.product.name));
            lines.push(format!("  Price: {}", price(currency, item.product.price)));
            lines.push("Type `back` to close.".to_string());
        }
    }

    if view.confirm_clear {
        lines.push(format!("{CLEAR_CONFIRMATION_MESSAGE}? (yes/no)"));
    }

    lines
}

fn price(currency: &str, amount: Money) -> String {
    format!("{currency}{amount}")
}
