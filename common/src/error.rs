use thiserror::Error;

use crate::product::ProductIdentity;

/// The catalog document could not be turned into a product list.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog document could not be fetched: {0}")]
    Fetch(String),

    #[error("catalog document is not valid: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Store configuration could not be read.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("store configuration is not valid: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Field of the checkout form, used to report which one is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutField {
    Name,
    Phone,
    PickupDate,
    PickupTime,
}

impl std::fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CheckoutField::Name => "name",
            CheckoutField::Phone => "phone",
            CheckoutField::PickupDate => "pickup date",
            CheckoutField::PickupTime => "pickup time",
        };
        f.write_str(label)
    }
}

/// Order submission was rejected. All variants are recoverable: the shopper
/// corrects the form and submits again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("the cart is empty")]
    EmptyCart,

    #[error("missing required field: {0}")]
    MissingField(CheckoutField),

    #[error("phone number must be exactly 10 digits, got {0:?}")]
    InvalidPhone(String),

    #[error("pickup date {0:?} is not a YYYY-MM-DD date")]
    InvalidPickupDate(String),

    #[error("pickup date {date} is before {today}")]
    PickupInPast {
        date: chrono::NaiveDate,
        today: chrono::NaiveDate,
    },

    #[error("pickup time {0:?} is not a HH:MM time")]
    InvalidPickupTime(String),
}

/// A session command could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no product with identity {0} in the catalog")]
    UnknownProduct(ProductIdentity),

    #[error("pack size {size:?} is not offered for {identity}")]
    PackSizeUnavailable {
        identity: ProductIdentity,
        size: String,
    },

    #[error("custom pack size is empty")]
    EmptyCustomSize,

    #[error(transparent)]
    Order(#[from] OrderError),
}

/// The receipt document could not be rendered.
#[derive(Debug, Error)]
pub enum ReceiptError {
    #[error("receipt PDF could not be rendered: {0}")]
    Pdf(#[from] printpdf::Error),
}

/// Receipt delivery failed. Never fatal for the order itself.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("receipt delivery is not configured")]
    NotConfigured,

    #[cfg(feature = "telegram")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("delivery endpoint rejected the receipt: {0}")]
    Rejected(String),
}
