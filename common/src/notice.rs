use crate::error::{OrderError, SessionError};

/// The two bundled UI languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Marathi,
    English,
}

impl Locale {
    /// Pick a locale from a BCP 47 tag such as `mr-IN`. Anything not English
    /// falls back to Marathi.
    pub fn from_tag(tag: &str) -> Self {
        if tag.to_ascii_lowercase().starts_with("en") {
            Locale::English
        } else {
            Locale::Marathi
        }
    }
}

/// A short user-facing message, shown as a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    AddedToCart { pack_size: Option<String> },
    RemovedFromCart,
    CategorySelected { title_mr: String, title_en: String },
    FiltersCleared,
    CustomSizeSet { size: String },
    EmptyCustomSize,
    FillAllFields,
    InvalidPhone,
    InvalidPickup,
    EmptyCart,
    OrderConfirmed { delivered: bool },
    CatalogLoadFailed,
}

impl Notice {
    /// Error notices are styled differently from confirmations.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Notice::RemovedFromCart
                | Notice::EmptyCustomSize
                | Notice::FillAllFields
                | Notice::InvalidPhone
                | Notice::InvalidPickup
                | Notice::EmptyCart
                | Notice::OrderConfirmed { delivered: false }
                | Notice::CatalogLoadFailed
        )
    }

    pub fn text(&self, locale: Locale) -> String {
        match locale {
            Locale::Marathi => self.marathi(),
            Locale::English => self.english(),
        }
    }

    fn marathi(&self) -> String {
        match self {
            Notice::AddedToCart { pack_size } => format!(
                "उत्पादन कार्टमध्ये जोडले गेले! ({})",
                pack_size.as_deref().unwrap_or("साइझ निवडला नाही")
            ),
            Notice::RemovedFromCart => "उत्पादन कार्टमधून काढले गेले!".into(),
            Notice::CategorySelected { title_mr, .. } => format!("{title_mr} श्रेणी निवडली गेली"),
            Notice::FiltersCleared => "सर्व फिल्टर साफ केले गेले".into(),
            Notice::CustomSizeSet { size } => format!("कस्टम साइझ सेट केला: {size}"),
            Notice::EmptyCustomSize => "कृपया रक्कम लिहा".into(),
            Notice::FillAllFields => "कृपया सर्व माहिती भरा".into(),
            Notice::InvalidPhone => "कृपया वैध फोन नंबर टाका (10 अंक)".into(),
            Notice::InvalidPickup => "कृपया योग्य पिकअप दिनांक व वेळ निवडा".into(),
            Notice::EmptyCart => "तुमची कार्ट रिकामी आहे".into(),
            Notice::OrderConfirmed { delivered: true } => {
                "ऑर्डर कन्फर्म झाला! रसीद Telegram वर पाठवली गेली.".into()
            }
            Notice::OrderConfirmed { delivered: false } => {
                "ऑर्डर कन्फर्म झाला! परंतु रसीद पाठवण्यात त्रुटी.".into()
            }
            Notice::CatalogLoadFailed => {
                "डेटा लोड करण्यात त्रुटी झाली. कृपया पुन्हा प्रयत्न करा.".into()
            }
        }
    }

    fn english(&self) -> String {
        match self {
            Notice::AddedToCart { pack_size } => format!(
                "Added to cart! ({})",
                pack_size.as_deref().unwrap_or("no size selected")
            ),
            Notice::RemovedFromCart => "Removed from cart!".into(),
            Notice::CategorySelected { title_en, .. } => format!("{title_en} category selected"),
            Notice::FiltersCleared => "All filters cleared".into(),
            Notice::CustomSizeSet { size } => format!("Custom size set: {size}"),
            Notice::EmptyCustomSize => "Please enter an amount".into(),
            Notice::FillAllFields => "Please fill in all details".into(),
            Notice::InvalidPhone => "Please enter a valid phone number (10 digits)".into(),
            Notice::InvalidPickup => "Please choose a valid pickup date and time".into(),
            Notice::EmptyCart => "Your cart is empty".into(),
            Notice::OrderConfirmed { delivered: true } => {
                "Order confirmed! Receipt sent on Telegram.".into()
            }
            Notice::OrderConfirmed { delivered: false } => {
                "Order confirmed! But the receipt could not be sent.".into()
            }
            Notice::CatalogLoadFailed => "Could not load the catalog. Please try again.".into(),
        }
    }
}

impl From<&OrderError> for Notice {
    fn from(err: &OrderError) -> Self {
        match err {
            OrderError::EmptyCart => Notice::EmptyCart,
            OrderError::MissingField(_) => Notice::FillAllFields,
            OrderError::InvalidPhone(_) => Notice::InvalidPhone,
            OrderError::InvalidPickupDate(_)
            | OrderError::PickupInPast { .. }
            | OrderError::InvalidPickupTime(_) => Notice::InvalidPickup,
        }
    }
}

impl Notice {
    /// Notice for a failed session command, if the shopper should see one.
    pub fn for_error(err: &SessionError) -> Option<Self> {
        match err {
            SessionError::EmptyCustomSize => Some(Notice::EmptyCustomSize),
            SessionError::Order(order) => Some(Notice::from(order)),
            SessionError::UnknownProduct(_) | SessionError::PackSizeUnavailable { .. } => None,
        }
    }
}
