#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Start loading the product catalog (no-op while a load is in flight).
    LoadProducts,
    /// Engine delivered the catalog for a request.
    ProductsLoaded {
        request_id: crate::RequestId,
        products: Vec<crate::Product>,
    },
    /// Engine failed to deliver the catalog for a request.
    ProductsFailed {
        request_id: crate::RequestId,
        message: String,
    },
    /// Append one line item for the given product.
    AddToBasket(crate::Product),
    /// User opened the product picker.
    ShowCatalog,
    /// User closed the product picker, possibly with products to add.
    CatalogClosed {
        added: Vec<crate::ProductId>,
        cancelled: bool,
    },
    /// User opened the detail sheet of a line item.
    ShowItemDetail(crate::LineId),
    /// Close whatever sheet is open.
    DismissSheet,
    /// User clicked Clear; asks for confirmation.
    ClearRequested,
    /// User declined the clear confirmation.
    ClearDismissed,
    /// Empty the basket.
    ClearItems,
}
