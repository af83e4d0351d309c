use basket_core::{
    update, BasketState, Money, Msg, Product, Sheet, SheetView, CLEAR_CONFIRMATION_MESSAGE,
};

fn catalog() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "Milk".to_string(),
            price: Money::from_cents(150),
        },
        Product {
            id: 2,
            name: "Bread".to_string(),
            price: Money::from_cents(200),
        },
    ]
}

fn ready_state() -> BasketState {
    let (state, _) = update(BasketState::new(), Msg::LoadProducts);
    update(
        state,
        Msg::ProductsLoaded {
            request_id: 1,
            products: catalog(),
        },
    )
    .0
}

#[test]
fn picker_adds_selected_products_in_order() {
    let (state, _) = update(ready_state(), Msg::ShowCatalog);
    assert_eq!(state.view().sheet, SheetView::Catalog);

    let (state, _) = update(
        state,
        Msg::CatalogClosed {
            added: vec![2, 1, 2],
            cancelled: false,
        },
    );

    let ids: Vec<_> = state.line_items().iter().map(|i| i.product.id).collect();
    assert_eq!(ids, vec![2, 1, 2]);
    assert_eq!(state.view().total_price, "5.50");
    assert_eq!(state.sheet(), Sheet::None);
}

#[test]
fn cancelled_picker_adds_nothing() {
    let (state, _) = update(ready_state(), Msg::ShowCatalog);
    let (state, _) = update(
        state,
        Msg::CatalogClosed {
            added: vec![1, 2],
            cancelled: true,
        },
    );

    assert!(state.line_items().is_empty());
    assert_eq!(state.sheet(), Sheet::None);
}

#[test]
fn picker_skips_ids_missing_from_catalog() {
    let (state, _) = update(
        ready_state(),
        Msg::CatalogClosed {
            added: vec![7, 1],
            cancelled: false,
        },
    );

    assert_eq!(state.line_items().len(), 1);
    assert_eq!(state.line_items()[0].product.name, "Milk");
}

#[test]
fn item_detail_requires_existing_line_item() {
    let (state, _) = update(ready_state(), Msg::ShowItemDetail(1));
    assert_eq!(state.sheet(), Sheet::None);

    let (state, _) = update(
        state,
        Msg::CatalogClosed {
            added: vec![2],
            cancelled: false,
        },
    );
    let line_id = state.line_items()[0].line_id;
    let (state, _) = update(state, Msg::ShowItemDetail(line_id));

    assert_eq!(state.sheet(), Sheet::ShowItemDetail(line_id));
    match state.view().sheet {
        SheetView::ItemDetail(item) => assert_eq!(item.product.name, "Bread"),
        other => panic!("unexpected sheet {other:?}"),
    }

    let (state, _) = update(state, Msg::DismissSheet);
    assert_eq!(state.view().sheet, SheetView::None);
}

#[test]
fn clearing_closes_item_detail_sheet() {
    let (state, _) = update(
        ready_state(),
        Msg::CatalogClosed {
            added: vec![1],
            cancelled: false,
        },
    );
    let line_id = state.line_items()[0].line_id;
    let (state, _) = update(state, Msg::ShowItemDetail(line_id));
    let (state, _) = update(state, Msg::ClearItems);

    assert_eq!(state.sheet(), Sheet::None);
    assert_eq!(state.view().sheet, SheetView::None);
}

#[test]
fn clear_confirmation_only_for_non_empty_basket() {
    let (state, _) = update(ready_state(), Msg::ClearRequested);
    assert!(!state.view().confirm_clear);

    let (state, _) = update(
        state,
        Msg::CatalogClosed {
            added: vec![1],
            cancelled: false,
        },
    );
    let (state, _) = update(state, Msg::ClearRequested);
    assert!(state.view().confirm_clear);

    let (state, _) = update(state, Msg::ClearDismissed);
    assert!(!state.view().confirm_clear);
    assert_eq!(state.line_items().len(), 1);

    let (state, _) = update(state, Msg::ClearRequested);
    let (state, _) = update(state, Msg::ClearItems);
    let view = state.view();
    assert!(!view.confirm_clear);
    assert!(view.line_items.is_empty());
    assert!(!CLEAR_CONFIRMATION_MESSAGE.is_empty());
}

#[test]
fn sheets_compare_structurally() {
    assert_eq!(Sheet::ShowItemDetail(3), Sheet::ShowItemDetail(3));
    assert_ne!(Sheet::ShowItemDetail(3), Sheet::ShowItemDetail(4));
    assert_ne!(Sheet::ShowCatalog, Sheet::None);
}
