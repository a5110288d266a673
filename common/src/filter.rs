use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::product::{CategoryId, Product};

/// Maximum number of search suggestions shown under the search box.
pub const MAX_SUGGESTIONS: usize = 5;
/// Suggestions appear once the query has at least this many characters.
pub const MIN_SUGGESTION_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Keep catalog order.
    #[default]
    Unsorted,
    /// By Marathi product name.
    Name,
    /// By Marathi category name.
    Category,
}

/// What the shopper is currently looking at. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub category: Option<CategoryId>,
    pub query: Option<String>,
    pub sort: SortKey,
}

impl FilterState {
    /// The query, trimmed, if it is not blank.
    pub fn active_query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    /// Neither a category nor a query is selected.
    pub fn is_idle(&self) -> bool {
        self.category.is_none() && self.active_query().is_none()
    }
}

/// Result of applying a [`FilterState`].
#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    /// Nothing selected yet: show the explanation prompt, not a product grid.
    Prompt,
    /// Matching products in display order. May be empty ("no matches").
    Products(Vec<Arc<Product>>),
}

impl Listing {
    pub fn products(&self) -> &[Arc<Product>] {
        match self {
            Listing::Prompt => &[],
            Listing::Products(products) => products,
        }
    }
}

/// Narrow and order `products` according to `state`.
///
/// Category and query are both honored when both are set; keeping them
/// mutually exclusive is the caller's business.
pub fn apply(products: &[Arc<Product>], state: &FilterState) -> Listing {
    if state.is_idle() {
        return Listing::Prompt;
    }

    let query = state.active_query().map(str::to_lowercase);
    let mut matched: Vec<Arc<Product>> = products
        .iter()
        .filter(|p| state.category.is_none_or(|id| p.category_id == id))
        .filter(|p| query.as_deref().is_none_or(|q| matches_query(p, q)))
        .cloned()
        .collect();

    sort_products(&mut matched, state.sort);
    Listing::Products(matched)
}

/// Stable sort by the chosen key; [`SortKey::Unsorted`] leaves order alone.
pub fn sort_products(products: &mut [Arc<Product>], sort: SortKey) {
    match sort {
        SortKey::Unsorted => {}
        SortKey::Name => products.sort_by_cached_key(|p| collation_key(&p.name_mr)),
        SortKey::Category => products.sort_by_cached_key(|p| collation_key(&p.category_name)),
    }
}

/// Up to [`MAX_SUGGESTIONS`] products whose names or category contain `query`.
pub fn suggestions(products: &[Arc<Product>], query: &str) -> Vec<Arc<Product>> {
    let query = query.trim();
    if query.chars().count() < MIN_SUGGESTION_CHARS {
        return Vec::new();
    }
    let query = query.to_lowercase();
    products
        .iter()
        .filter(|p| {
            contains(&p.name_mr, &query)
                || contains(&p.name_en, &query)
                || contains(&p.category_name, &query)
        })
        .take(MAX_SUGGESTIONS)
        .cloned()
        .collect()
}

/// `query` must already be lowercased.
fn matches_query(product: &Product, query: &str) -> bool {
    contains(&product.name_mr, query)
        || contains(&product.name_en, query)
        || contains(&product.category_name, query)
        || contains(&product.subcategory_name, query)
        || product.variants.iter().any(|v| contains(v, query))
        || product.brands.iter().any(|b| contains(b, query))
}

fn contains(field: &str, lowered_query: &str) -> bool {
    field.to_lowercase().contains(lowered_query)
}

// Devanagari code points are laid out in dictionary order, so case-folded
// code point order is a close stand-in for the Marathi collation.
fn collation_key(s: &str) -> String {
    s.trim().to_lowercase()
}
