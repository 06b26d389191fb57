//! Headless presentation surfaces.

pub mod basket_panel;
pub mod card;
pub mod forms;
pub mod notification;
pub mod page;
pub mod success;

pub use basket_panel::{BasketEntry, BasketPanelSnapshot, BasketPanelView};
pub use card::{CardSnapshot, ProductCardView, format_price};
pub use forms::{AddressFormView, ContactsFormView, FormFeedback};
pub use notification::NotificationView;
pub use page::{PageSnapshot, PageView};
pub use success::{SuccessSnapshot, SuccessView};
