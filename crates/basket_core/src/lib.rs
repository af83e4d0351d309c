//! Basket core: pure state machine and view-model helpers.
mod effect;
mod money;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use money::Money;
pub use msg::Msg;
pub use state::{BasketState, LineId, LineItem, LoadState, Product, ProductId, RequestId, Sheet};
pub use update::update;
pub use view_model::{BasketViewModel, SheetView, CLEAR_CONFIRMATION_MESSAGE};
