use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::product::{Product, ProductIdentity};

/// Key suffix for lines added without a pack size.
pub const DEFAULT_PACK_BUCKET: &str = "default";

/// Composite key of a cart line: product identity plus pack size.
///
/// Renders as `{identity}-{pack_size or "default"}`. A pack size spelled
/// `"default"` is the same bucket as no pack size at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartKey {
    pub identity: ProductIdentity,
    pub pack_size: Option<String>,
}

impl CartKey {
    pub fn new(identity: ProductIdentity, pack_size: Option<&str>) -> Self {
        let pack_size = pack_size
            .filter(|s| *s != DEFAULT_PACK_BUCKET)
            .map(str::to_string);
        Self {
            identity,
            pack_size,
        }
    }

    pub fn bucket(&self) -> &str {
        self.pack_size.as_deref().unwrap_or(DEFAULT_PACK_BUCKET)
    }
}

impl fmt::Display for CartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.identity, self.bucket())
    }
}

/// One product at one pack size. `quantity` is never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub key: CartKey,
    pub product: Arc<Product>,
    pub quantity: u32,
}

impl CartLine {
    pub fn pack_size(&self) -> Option<&str> {
        self.key.pack_size.as_deref()
    }
}

/// The shopper's cart.
///
/// Lines are kept in the order they were first added. Every operation leaves
/// the ledger without zero-quantity lines.
#[derive(Debug, Clone, Default)]
pub struct CartLedger {
    lines: Vec<CartLine>,
}

impl CartLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product` at `pack_size`, merging into an existing line.
    /// Returns the line's new quantity.
    pub fn add(&mut self, product: &Arc<Product>, pack_size: Option<&str>) -> u32 {
        let key = CartKey::new(product.identity(), pack_size);
        let quantity = match self.position(&key) {
            Some(idx) => {
                let line = &mut self.lines[idx];
                line.quantity = line.quantity.saturating_add(1);
                line.quantity
            }
            None => {
                self.lines.push(CartLine {
                    key: key.clone(),
                    product: Arc::clone(product),
                    quantity: 1,
                });
                1
            }
        };
        tracing::debug!("Cart add {key}: quantity {quantity}");
        quantity
    }

    /// Same merge-or-create semantics as [`CartLedger::add`].
    pub fn increase(&mut self, product: &Arc<Product>, pack_size: Option<&str>) -> u32 {
        self.add(product, pack_size)
    }

    /// Remove one unit. The line is deleted when it reaches zero; a missing
    /// line is left alone. Returns the remaining quantity.
    pub fn decrease(&mut self, identity: &ProductIdentity, pack_size: Option<&str>) -> u32 {
        let key = CartKey::new(identity.clone(), pack_size);
        let Some(idx) = self.position(&key) else {
            return 0;
        };
        let line = &mut self.lines[idx];
        line.quantity -= 1;
        let remaining = line.quantity;
        if remaining == 0 {
            self.lines.remove(idx);
        }
        tracing::debug!("Cart decrease {key}: quantity {remaining}");
        remaining
    }

    /// Overwrite the quantity of the line for (`product`, `pack_size`),
    /// creating it if absent. A quantity of zero or less removes the line.
    pub fn set_quantity(
        &mut self,
        product: &Arc<Product>,
        pack_size: Option<&str>,
        quantity: i64,
    ) -> u32 {
        let key = CartKey::new(product.identity(), pack_size);
        if quantity <= 0 {
            self.remove(&key);
            return 0;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.position(&key) {
            Some(idx) => self.lines[idx].quantity = quantity,
            None => self.lines.push(CartLine {
                key: key.clone(),
                product: Arc::clone(product),
                quantity,
            }),
        }
        tracing::debug!("Cart set {key}: quantity {quantity}");
        quantity
    }

    /// Delete a line. Absence is not an error.
    pub fn remove(&mut self, key: &CartKey) -> Option<CartLine> {
        let idx = self.position(key)?;
        tracing::debug!("Cart remove {key}");
        Some(self.lines.remove(idx))
    }

    pub fn get(&self, key: &CartKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.key == *key)
    }

    pub fn quantity(&self, key: &CartKey) -> u32 {
        self.get(key).map(|line| line.quantity).unwrap_or(0)
    }

    /// Sum of all line quantities; drives the cart badge.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// All lines for a product, across every pack size.
    pub fn lines_for_product<'a>(
        &'a self,
        identity: &'a ProductIdentity,
    ) -> impl Iterator<Item = &'a CartLine> + 'a {
        self.lines
            .iter()
            .filter(move |line| line.key.identity == *identity)
    }

    /// Aggregate quantity of a product across pack sizes.
    pub fn quantity_for_product(&self, identity: &ProductIdentity) -> u64 {
        self.lines_for_product(identity)
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn position(&self, key: &CartKey) -> Option<usize> {
        self.lines.iter().position(|line| line.key == *key)
    }
}
