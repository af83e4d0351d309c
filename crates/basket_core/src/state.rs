use crate::view_model::{BasketViewModel, SheetView};
use crate::Money;

pub type ProductId = u64;
pub type LineId = u64;
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
}

/// One unit of a product in the basket. Adding the same product twice yields
/// two line items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub line_id: LineId,
    pub product: Product,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Empty,
    Loading,
    Ready,
}

/// Which modal sheet is shown on top of the basket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sheet {
    #[default]
    None,
    ShowCatalog,
    ShowItemDetail(LineId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketState {
    load: LoadState,
    in_flight: Option<RequestId>,
    next_request_id: RequestId,
    catalog: Vec<Product>,
    line_items: Vec<LineItem>,
    next_line_id: LineId,
    fetch_failed: bool,
    last_error: Option<String>,
    sheet: Sheet,
    confirm_clear: bool,
    dirty: bool,
}

impl Default for BasketState {
    fn default() -> Self {
        Self {
            load: LoadState::Empty,
            in_flight: None,
            next_request_id: 1,
            catalog: Vec::new(),
            line_items: Vec::new(),
            next_line_id: 1,
            fetch_failed: false,
            last_error: None,
            sheet: Sheet::None,
            confirm_clear: false,
            dirty: false,
        }
    }
}

impl BasketState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> BasketViewModel {
        let total = self.total_price();
        BasketViewModel {
            load_state: self.load,
            line_items: self.line_items.clone(),
            total,
            total_price: total.to_string(),
            catalog: self.catalog.clone(),
            fetch_failed: self.fetch_failed,
            last_error: self.last_error.clone(),
            clear_enabled: !self.line_items.is_empty(),
            confirm_clear: self.confirm_clear,
            sheet: self.sheet_view(),
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn fetch_failed(&self) -> bool {
        self.fetch_failed
    }

    pub fn sheet(&self) -> Sheet {
        self.sheet
    }

    /// Sum of the prices of all current line items, recomputed on every call.
    pub fn total_price(&self) -> Money {
        self.line_items.iter().map(|item| item.product.price).sum()
    }

    /// Returns whether state changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Enters `Loading` and hands out the id the fetch result must carry.
    /// Returns `None` when a load is already in flight.
    pub(crate) fn begin_load(&mut self) -> Option<RequestId> {
        if self.load == LoadState::Loading {
            return None;
        }
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight = Some(request_id);
        self.load = LoadState::Loading;
        self.mark_dirty();
        Some(request_id)
    }

    pub(crate) fn apply_products_loaded(
        &mut self,
        request_id: RequestId,
        products: Vec<Product>,
    ) -> bool {
        if !self.take_in_flight(request_id) {
            return false;
        }
        self.catalog = products;
        self.load = LoadState::Ready;
        self.fetch_failed = false;
        self.last_error = None;
        self.mark_dirty();
        true
    }

    pub(crate) fn apply_products_failed(&mut self, request_id: RequestId, message: String) -> bool {
        if !self.take_in_flight(request_id) {
            return false;
        }
        self.load = if self.catalog.is_empty() {
            LoadState::Empty
        } else {
            LoadState::Ready
        };
        self.fetch_failed = true;
        self.last_error = Some(message);
        self.mark_dirty();
        true
    }

    fn take_in_flight(&mut self, request_id: RequestId) -> bool {
        if self.in_flight != Some(request_id) {
            return false;
        }
        self.in_flight = None;
        true
    }

    pub(crate) fn push_line_item(&mut self, product: Product) -> LineId {
        let line_id = self.next_line_id;
        self.next_line_id += 1;
        self.line_items.push(LineItem { line_id, product });
        self.mark_dirty();
        line_id
    }

    pub(crate) fn catalog_product(&self, id: ProductId) -> Option<&Product> {
        self.catalog.iter().find(|product| product.id == id)
    }

    pub(crate) fn has_line_item(&self, line_id: LineId) -> bool {
        self.line_items.iter().any(|item| item.line_id == line_id)
    }

    pub(crate) fn clear_line_items(&mut self) {
        self.line_items.clear();
        self.confirm_clear = false;
        if matches!(self.sheet, Sheet::ShowItemDetail(_)) {
            self.sheet = Sheet::None;
        }
        self.mark_dirty();
    }

    pub(crate) fn set_sheet(&mut self, sheet: Sheet) {
        if self.sheet != sheet {
            self.sheet = sheet;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_confirm_clear(&mut self, pending: bool) {
        if self.confirm_clear != pending {
            self.confirm_clear = pending;
            self.mark_dirty();
        }
    }

    fn sheet_view(&self) -> SheetView {
        match self.sheet {
            Sheet::None => SheetView::None,
            Sheet::ShowCatalog => SheetView::Catalog,
            Sheet::ShowItemDetail(line_id) => self
                .line_items
                .iter()
                .find(|item| item.line_id == line_id)
                .map_or(SheetView::None, |item| SheetView::ItemDetail(item.clone())),
        }
    }
}
