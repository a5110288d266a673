use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::product::{CategoryId, Product, ProductIdentity};

/// Store name used when the catalog document cannot be loaded.
pub const FALLBACK_STORE_NAME: &str = "Maharashtra Kirana";
/// Locale tag used when the catalog document cannot be loaded.
pub const FALLBACK_LOCALE: &str = "mr-IN";

/// Raw catalog document as published next to the app (`data.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub store: String,
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// A top-level category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: CategoryId,
    #[serde(default)]
    pub title_mr: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub subsections: Vec<Subsection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subsection {
    #[serde(default)]
    pub title_mr: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub items: Vec<CatalogItem>,
}

/// An item as it appears in the document, before flattening.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(default)]
    pub name_mr: String,
    #[serde(default)]
    pub name_en: Option<String>,
    #[serde(default)]
    pub variants: Option<Vec<String>>,
    #[serde(default)]
    pub pack_sizes: Option<Vec<String>>,
    #[serde(default)]
    pub brands: Option<Vec<String>>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Category summary used for the category grid and filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub title_mr: String,
    pub title_en: String,
    pub product_count: usize,
}

/// The flattened, immutable catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    store: String,
    locale: String,
    categories: Vec<Category>,
    products: Vec<Arc<Product>>,
}

impl Catalog {
    /// Parse and flatten a catalog document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Ok(Self::from_document(document))
    }

    /// Walk section → subsection → item, copying the section and subsection
    /// labels onto every item. Items without an english name are dropped.
    pub fn from_document(document: CatalogDocument) -> Self {
        let mut categories = Vec::with_capacity(document.sections.len());
        let mut products = Vec::new();

        for section in document.sections {
            let before = products.len();
            for subsection in section.subsections {
                for item in subsection.items {
                    let Some(name_en) = item.name_en else {
                        tracing::warn!(
                            "Dropping item {:?} in category {}: no english name",
                            item.name_mr,
                            section.id
                        );
                        continue;
                    };
                    products.push(Arc::new(Product {
                        category_id: section.id,
                        name_mr: item.name_mr,
                        name_en,
                        category_name: section.title_mr.clone(),
                        category_name_en: section.title_en.clone(),
                        subcategory_name: subsection.title_mr.clone(),
                        subcategory_name_en: subsection.title_en.clone(),
                        variants: item.variants.unwrap_or_default(),
                        pack_sizes: item.pack_sizes.unwrap_or_default(),
                        brands: item.brands.unwrap_or_default(),
                        notes: item.notes,
                    }));
                }
            }
            categories.push(Category {
                id: section.id,
                title_mr: section.title_mr,
                title_en: section.title_en,
                product_count: products.len() - before,
            });
        }

        let catalog = Self {
            store: document.store,
            locale: document.locale,
            categories,
            products,
        };

        for (identity, count) in catalog.identity_collisions() {
            tracing::warn!("{count} catalog items share product identity {identity}");
        }
        tracing::info!(
            "Catalog loaded: {} categories, {} products",
            catalog.categories.len(),
            catalog.products.len()
        );
        catalog
    }

    /// The catalog shown when loading failed: no products, default store name.
    pub fn empty() -> Self {
        Self {
            store: FALLBACK_STORE_NAME.to_string(),
            locale: FALLBACK_LOCALE.to_string(),
            categories: Vec::new(),
            products: Vec::new(),
        }
    }

    /// Take a load result, falling back to [`Catalog::empty`] on failure.
    ///
    /// The failure is terminal for the session; it is not retried.
    pub fn load_or_empty(result: Result<Self, CatalogError>) -> (Self, Option<CatalogError>) {
        match result {
            Ok(catalog) => (catalog, None),
            Err(err) => {
                tracing::error!("Could not load catalog: {err}");
                (Self::empty(), Some(err))
            }
        }
    }

    pub fn store(&self) -> &str {
        &self.store
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// First product with the given identity, in catalog order.
    pub fn find(&self, identity: &ProductIdentity) -> Option<&Arc<Product>> {
        self.products.iter().find(|p| p.identity() == *identity)
    }

    /// Identities shared by more than one item, with the number of items.
    pub fn identity_collisions(&self) -> Vec<(ProductIdentity, usize)> {
        let mut counts: BTreeMap<ProductIdentity, usize> = BTreeMap::new();
        for product in &self.products {
            *counts.entry(product.identity()).or_default() += 1;
        }
        counts.into_iter().filter(|(_, n)| *n > 1).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "store": "Maharashtra Kirana",
        "locale": "mr-IN",
        "sections": [
            {
                "id": 1,
                "title_mr": "पेये",
                "title_en": "Beverages",
                "subsections": [
                    {
                        "title_mr": "चहा",
                        "title_en": "Tea",
                        "items": [
                            { "name_mr": "चहा पत्ती", "name_en": "Tea Leaves", "pack_sizes": ["250g", "500g"] },
                            { "name_mr": "ग्रीन टी", "name_en": "Green Tea", "brands": ["Tata"] }
                        ]
                    }
                ]
            },
            {
                "id": 2,
                "title_mr": "डाळी",
                "title_en": "Pulses",
                "subsections": [
                    { "title_mr": "तूर", "title_en": "Toor", "items": [ { "name_mr": "तूर डाळ", "name_en": "Toor Dal" } ] },
                    { "title_mr": "रिकामे", "title_en": "Empty" }
                ]
            },
            { "id": 3, "title_mr": "इतर", "title_en": "Other" }
        ]
    }"#;

    #[test]
    fn flattens_sections_into_products() {
        let catalog = Catalog::from_json(DOC).unwrap();
        assert_eq!(catalog.store(), "Maharashtra Kirana");
        assert_eq!(catalog.products().len(), 3);

        let tea = &catalog.products()[0];
        assert_eq!(tea.category_id, CategoryId(1));
        assert_eq!(tea.category_name, "पेये");
        assert_eq!(tea.category_name_en, "Beverages");
        assert_eq!(tea.subcategory_name, "चहा");
        assert_eq!(tea.subcategory_name_en, "Tea");
        assert_eq!(tea.pack_sizes, vec!["250g", "500g"]);
        assert!(tea.variants.is_empty());

        let dal = &catalog.products()[2];
        assert_eq!(dal.category_id, CategoryId(2));
        assert_eq!(dal.subcategory_name_en, "Toor");
    }

    #[test]
    fn categories_keep_document_order_and_counts() {
        let catalog = Catalog::from_json(DOC).unwrap();
        let counts: Vec<_> = catalog
            .categories()
            .iter()
            .map(|c| (c.id.0, c.product_count))
            .collect();
        assert_eq!(counts, vec![(1, 2), (2, 1), (3, 0)]);
        assert_eq!(catalog.category(CategoryId(2)).unwrap().title_en, "Pulses");
        assert!(catalog.category(CategoryId(9)).is_none());
    }

    #[test]
    fn find_by_identity() {
        let catalog = Catalog::from_json(DOC).unwrap();
        let id = ProductIdentity::resolve(CategoryId(1), "Tea Leaves");
        assert_eq!(catalog.find(&id).unwrap().name_mr, "चहा पत्ती");
        assert!(catalog.find(&ProductIdentity("9-nothing".into())).is_none());
    }

    #[test]
    fn items_without_english_name_are_dropped() {
        let json = r#"{"sections":[{"id":1,"subsections":[{"items":[{"name_mr":"नाव"},{"name_mr":"साखर","name_en":"Sugar"}]}]}]}"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.products().len(), 1);
        assert_eq!(catalog.products()[0].name_en, "Sugar");
    }

    #[test]
    fn malformed_document_falls_back_to_empty() {
        let (catalog, err) = Catalog::load_or_empty(Catalog::from_json("{ not json"));
        assert!(matches!(err, Some(CatalogError::Parse(_))));
        assert!(catalog.is_empty());
        assert!(catalog.categories().is_empty());
        assert_eq!(catalog.store(), FALLBACK_STORE_NAME);
        assert_eq!(catalog.locale(), FALLBACK_LOCALE);
    }

    #[test]
    fn fetch_failure_falls_back_to_empty() {
        let (catalog, err) =
            Catalog::load_or_empty(Err(CatalogError::Fetch("HTTP 404".into())));
        assert!(err.is_some());
        assert!(catalog.is_empty());
    }

    #[test]
    fn reports_identity_collisions() {
        let json = r#"{"sections":[{"id":5,"subsections":[{"items":[
            {"name_mr":"अ","name_en":"Rice Flour"},
            {"name_mr":"ब","name_en":"rice  flour"},
            {"name_mr":"क","name_en":"Wheat Flour"}
        ]}]}]}"#;
        let catalog = Catalog::from_json(json).unwrap();
        let collisions = catalog.identity_collisions();
        assert_eq!(
            collisions,
            vec![(ProductIdentity("5-rice-flour".into()), 2)]
        );
        // Lookup resolves to the first item in catalog order.
        assert_eq!(catalog.find(&collisions[0].0).unwrap().name_mr, "अ");
    }
}
