use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric id of a catalog section (category).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub u32);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable product key: `{category_id}-{normalized english name}`.
///
/// Two items in the same category whose english names normalize to the same
/// string get the same identity. The catalog loader reports such collisions
/// but does not resolve them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductIdentity(pub String);

impl ProductIdentity {
    /// Derive the identity for an item. Pure and idempotent.
    pub fn resolve(category_id: CategoryId, name_en: &str) -> Self {
        Self(format!("{category_id}-{}", normalize_name(name_en)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replace each whitespace run with one hyphen, then lowercase.
fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_space = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('-');
                in_space = true;
            }
        } else {
            out.extend(ch.to_lowercase());
            in_space = false;
        }
    }
    out
}

/// A flattened catalog item, tagged with its owning category and subcategory.
///
/// Created once by the catalog loader and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub category_id: CategoryId,
    pub name_mr: String,
    pub name_en: String,
    pub category_name: String,
    pub category_name_en: String,
    pub subcategory_name: String,
    pub subcategory_name_en: String,
    #[serde(default)]
    pub variants: Vec<String>,
    /// Offered pack sizes in display order. The first one is preselected.
    #[serde(default)]
    pub pack_sizes: Vec<String>,
    #[serde(default)]
    pub brands: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Product {
    pub fn identity(&self) -> ProductIdentity {
        ProductIdentity::resolve(self.category_id, &self.name_en)
    }

    pub fn offers_pack_size(&self, size: &str) -> bool {
        self.pack_sizes.iter().any(|s| s == size)
    }

    pub fn default_pack_size(&self) -> Option<&str> {
        self.pack_sizes.first().map(String::as_str)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn product(category: u32, name_en: &str) -> Product {
        Product {
            category_id: CategoryId(category),
            name_mr: name_en.to_string(),
            name_en: name_en.to_string(),
            category_name: "किराणा".into(),
            category_name_en: "Grocery".into(),
            subcategory_name: "पेये".into(),
            subcategory_name_en: "Beverages".into(),
            variants: Vec::new(),
            pack_sizes: Vec::new(),
            brands: Vec::new(),
            notes: None,
        }
    }

    #[test]
    fn identity_lowercases_and_hyphenates() {
        let id = ProductIdentity::resolve(CategoryId(1), "Tea Leaves");
        assert_eq!(id.as_str(), "1-tea-leaves");
    }

    #[test]
    fn identity_collapses_whitespace_runs() {
        let id = ProductIdentity::resolve(CategoryId(4), "  Toor \t Dal\nPremium");
        assert_eq!(id.as_str(), "4--toor-dal-premium");
    }

    #[test]
    fn identity_is_idempotent() {
        let p = product(2, "Basmati Rice");
        assert_eq!(p.identity(), p.identity());
    }

    #[test]
    fn same_category_and_normalized_name_collide() {
        let a = product(1, "Tea Leaves");
        let mut b = product(1, "tea   LEAVES");
        b.name_mr = "चहा पत्ती".into();
        assert_eq!(a.identity(), b.identity());

        let c = product(2, "Tea Leaves");
        assert_ne!(a.identity(), c.identity());
    }

    #[test]
    fn default_pack_size_is_first_listed() {
        let mut p = product(1, "Sugar");
        assert_eq!(p.default_pack_size(), None);
        p.pack_sizes = vec!["1kg".into(), "5kg".into()];
        assert_eq!(p.default_pack_size(), Some("1kg"));
        assert!(p.offers_pack_size("5kg"));
        assert!(!p.offers_pack_size("2kg"));
    }
}
