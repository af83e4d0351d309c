use crate::{LineItem, LoadState, Money, Product};

pub const CLEAR_CONFIRMATION_MESSAGE: &str = "Confirm to clear all items in shopping basket";

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BasketViewModel {
    pub load_state: LoadState,
    pub line_items: Vec<LineItem>,
    pub total: Money,
    /// `total` formatted for display, e.g. `5.00`.
    pub total_price: String,
    pub catalog: Vec<Product>,
    /// Sticky: stays set until the next successful catalog load.
    pub fetch_failed: bool,
    pub last_error: Option<String>,
    pub clear_enabled: bool,
    pub confirm_clear: bool,
    pub sheet: SheetView,
}

/// Resolved sheet contents. An item-detail sheet whose line item no longer
/// exists resolves to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SheetView {
    #[default]
    None,
    Catalog,
    ItemDetail(LineItem),
}
