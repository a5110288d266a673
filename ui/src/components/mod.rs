pub mod app;
pub mod cart_view;
pub mod catalog_view;
pub mod checkout_form;
pub mod fetch;
pub mod notice_toast;
pub mod receipt_view;
pub mod session_state;
pub mod theme;
