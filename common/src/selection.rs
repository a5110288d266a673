use std::collections::HashMap;

use crate::error::SessionError;
use crate::product::{Product, ProductIdentity};

/// Pack size reported while the custom-size input is open but unconfirmed.
pub const PENDING_CUSTOM_SIZE: &str = "custom";

/// Which pack size is chosen on a product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackSelection {
    /// One of the product's listed sizes.
    Listed(String),
    /// A size typed by the shopper and confirmed.
    Custom(String),
    /// The custom input is open. Resolves to the last confirmed custom size,
    /// or [`PENDING_CUSTOM_SIZE`] when there is none.
    CustomPending,
}

/// Per-product pack-size choices for the current session.
///
/// Products without an explicit choice use their first listed size.
#[derive(Debug, Clone, Default)]
pub struct PackSelections {
    chosen: HashMap<ProductIdentity, PackSelection>,
    /// Last confirmed custom size per product, kept until cancelled.
    custom: HashMap<ProductIdentity, String>,
}

impl PackSelections {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pack size the cart controls on this product's card act on.
    pub fn resolve(&self, product: &Product) -> Option<String> {
        let identity = product.identity();
        match self.chosen.get(&identity) {
            Some(PackSelection::Listed(size)) | Some(PackSelection::Custom(size)) => {
                Some(size.clone())
            }
            Some(PackSelection::CustomPending) => Some(
                self.custom
                    .get(&identity)
                    .cloned()
                    .unwrap_or_else(|| PENDING_CUSTOM_SIZE.to_string()),
            ),
            None => product.default_pack_size().map(str::to_string),
        }
    }

    pub fn get(&self, identity: &ProductIdentity) -> Option<&PackSelection> {
        self.chosen.get(identity)
    }

    /// The custom size last confirmed for this product, if not cancelled since.
    pub fn confirmed_custom(&self, identity: &ProductIdentity) -> Option<&str> {
        self.custom.get(identity).map(String::as_str)
    }

    pub fn is_custom_input_open(&self, identity: &ProductIdentity) -> bool {
        matches!(self.chosen.get(identity), Some(PackSelection::CustomPending))
    }

    /// Choose one of the listed sizes.
    pub fn select(&mut self, product: &Product, size: &str) -> Result<(), SessionError> {
        if !product.offers_pack_size(size) {
            return Err(SessionError::PackSizeUnavailable {
                identity: product.identity(),
                size: size.to_string(),
            });
        }
        self.chosen
            .insert(product.identity(), PackSelection::Listed(size.to_string()));
        Ok(())
    }

    /// Open the custom-size input.
    pub fn begin_custom(&mut self, product: &Product) -> Result<(), SessionError> {
        let identity = product.identity();
        if product.pack_sizes.is_empty() {
            return Err(SessionError::PackSizeUnavailable {
                identity,
                size: PENDING_CUSTOM_SIZE.to_string(),
            });
        }
        self.chosen.insert(identity, PackSelection::CustomPending);
        Ok(())
    }

    /// Confirm a typed size. Blank input is rejected and leaves the input open.
    pub fn confirm_custom(&mut self, product: &Product, size: &str) -> Result<String, SessionError> {
        let size = size.trim();
        if size.is_empty() {
            return Err(SessionError::EmptyCustomSize);
        }
        if product.pack_sizes.is_empty() {
            return Err(SessionError::PackSizeUnavailable {
                identity: product.identity(),
                size: size.to_string(),
            });
        }
        let identity = product.identity();
        self.custom.insert(identity.clone(), size.to_string());
        self.chosen
            .insert(identity, PackSelection::Custom(size.to_string()));
        Ok(size.to_string())
    }

    /// Close the custom input, forget the custom size and fall back to the
    /// first listed size.
    pub fn cancel_custom(&mut self, identity: &ProductIdentity) {
        self.chosen.remove(identity);
        self.custom.remove(identity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::tests::product;

    fn tea() -> Product {
        let mut p = product(1, "Tea Leaves");
        p.pack_sizes = vec!["250g".into(), "500g".into()];
        p
    }

    #[test]
    fn first_listed_size_is_preselected() {
        let selections = PackSelections::new();
        assert_eq!(selections.resolve(&tea()).as_deref(), Some("250g"));
        assert_eq!(selections.resolve(&product(2, "Salt")), None);
    }

    #[test]
    fn select_listed_size() {
        let tea = tea();
        let mut selections = PackSelections::new();
        selections.select(&tea, "500g").unwrap();
        assert_eq!(selections.resolve(&tea).as_deref(), Some("500g"));

        let err = selections.select(&tea, "1kg").unwrap_err();
        assert!(matches!(err, SessionError::PackSizeUnavailable { .. }));
        assert_eq!(selections.resolve(&tea).as_deref(), Some("500g"));
    }

    #[test]
    fn pending_custom_resolves_to_placeholder() {
        let tea = tea();
        let mut selections = PackSelections::new();
        selections.begin_custom(&tea).unwrap();
        assert!(selections.is_custom_input_open(&tea.identity()));
        assert_eq!(selections.resolve(&tea).as_deref(), Some(PENDING_CUSTOM_SIZE));
    }

    #[test]
    fn confirm_custom_trims_and_rejects_blank() {
        let tea = tea();
        let mut selections = PackSelections::new();
        selections.begin_custom(&tea).unwrap();

        assert_eq!(
            selections.confirm_custom(&tea, "   "),
            Err(SessionError::EmptyCustomSize)
        );
        assert!(selections.is_custom_input_open(&tea.identity()));

        assert_eq!(selections.confirm_custom(&tea, " 2.5 kg ").unwrap(), "2.5 kg");
        assert_eq!(selections.resolve(&tea).as_deref(), Some("2.5 kg"));
        assert!(!selections.is_custom_input_open(&tea.identity()));
    }

    #[test]
    fn cancel_custom_restores_first_size() {
        let tea = tea();
        let mut selections = PackSelections::new();
        selections.select(&tea, "500g").unwrap();
        selections.begin_custom(&tea).unwrap();
        selections.cancel_custom(&tea.identity());
        assert_eq!(selections.resolve(&tea).as_deref(), Some("250g"));
    }

    #[test]
    fn reopening_custom_input_keeps_confirmed_size() {
        let tea = tea();
        let mut selections = PackSelections::new();
        selections.begin_custom(&tea).unwrap();
        selections.confirm_custom(&tea, "2 kg").unwrap();

        // A listed size in between does not forget it either.
        selections.select(&tea, "500g").unwrap();
        selections.begin_custom(&tea).unwrap();
        assert!(selections.is_custom_input_open(&tea.identity()));
        assert_eq!(selections.resolve(&tea).as_deref(), Some("2 kg"));
        assert_eq!(selections.confirmed_custom(&tea.identity()), Some("2 kg"));

        selections.cancel_custom(&tea.identity());
        assert_eq!(selections.confirmed_custom(&tea.identity()), None);
        selections.begin_custom(&tea).unwrap();
        assert_eq!(selections.resolve(&tea).as_deref(), Some(PENDING_CUSTOM_SIZE));
    }

    #[test]
    fn custom_needs_a_pack_size_selector() {
        let salt = product(2, "Salt");
        let mut selections = PackSelections::new();
        assert!(selections.begin_custom(&salt).is_err());
        assert!(selections.confirm_custom(&salt, "1kg").is_err());
        assert_eq!(selections.resolve(&salt), None);
    }
}
