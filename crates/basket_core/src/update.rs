use crate::{BasketState, Effect, Msg, Sheet};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: BasketState, msg: Msg) -> (BasketState, Vec<Effect>) {
    let effects = match msg {
        Msg::LoadProducts => match state.begin_load() {
            Some(request_id) => vec![Effect::FetchProducts { request_id }],
            None => Vec::new(),
        },
        Msg::ProductsLoaded {
            request_id,
            products,
        } => {
            state.apply_products_loaded(request_id, products);
            Vec::new()
        }
        Msg::ProductsFailed {
            request_id,
            message,
        } => {
            state.apply_products_failed(request_id, message);
            Vec::new()
        }
        Msg::AddToBasket(product) => {
            state.push_line_item(product);
            Vec::new()
        }
        Msg::ShowCatalog => {
            state.set_sheet(Sheet::ShowCatalog);
            Vec::new()
        }
        Msg::CatalogClosed { added, cancelled } => {
            if !cancelled {
                // Ids missing from the catalog are skipped.
                let products: Vec<_> = added
                    .iter()
                    .filter_map(|id| state.catalog_product(*id).cloned())
                    .collect();
                for product in products {
                    state.push_line_item(product);
                }
            }
            if state.sheet() == Sheet::ShowCatalog {
                state.set_sheet(Sheet::None);
            }
            Vec::new()
        }
        Msg::ShowItemDetail(line_id) => {
            if state.has_line_item(line_id) {
                state.set_sheet(Sheet::ShowItemDetail(line_id));
            }
            Vec::new()
        }
        Msg::DismissSheet => {
            state.set_sheet(Sheet::None);
            Vec::new()
        }
        Msg::ClearRequested => {
            // The Clear button is disabled for an empty basket.
            if !state.line_items().is_empty() {
                state.set_confirm_clear(true);
            }
            Vec::new()
        }
        Msg::ClearDismissed => {
            state.set_confirm_clear(false);
            Vec::new()
        }
        Msg::ClearItems => {
            state.clear_line_items();
            Vec::new()
        }
    };

    (state, effects)
}
