use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::cart::{CartKey, CartLedger};
use crate::catalog::Catalog;
use crate::error::{OrderError, SessionError};
use crate::filter::{self, FilterState, Listing, SortKey};
use crate::notice::Notice;
use crate::order::{CheckoutForm, Order, OrderIdGenerator, OrderStatus};
use crate::product::{CategoryId, Product, ProductIdentity};
use crate::selection::PackSelections;

/// Every shopper action the view can trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// "Add to cart" on a product card, at the selected pack size.
    AddToCart(ProductIdentity),
    /// "+" on a product card, at the selected pack size.
    Increase(ProductIdentity),
    /// "-" on a product card, at the selected pack size.
    Decrease(ProductIdentity),
    /// "+" on a cart line, at that line's own pack size.
    IncreaseLine(CartKey),
    /// "-" on a cart line, at that line's own pack size.
    DecreaseLine(CartKey),
    SetQuantity { key: CartKey, quantity: i64 },
    Remove(CartKey),
    SelectPackSize { product: ProductIdentity, size: String },
    BeginCustomSize(ProductIdentity),
    ConfirmCustomSize { product: ProductIdentity, size: String },
    CancelCustomSize(ProductIdentity),
    SelectCategory(CategoryId),
    Search(String),
    SetSort(SortKey),
    ClearFilters,
}

/// Indicators on a product card, all derived from the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductCardState {
    /// Quantity across every pack size of the product.
    pub quantity: u64,
    pub can_decrease: bool,
    /// "Already in cart": the add button is disabled.
    pub in_cart: bool,
}

/// All state of one shopping session, owned by the application root.
#[derive(Debug, Clone, Default)]
pub struct StoreSession {
    catalog: Catalog,
    cart: CartLedger,
    filter: FilterState,
    packs: PackSelections,
    order_ids: OrderIdGenerator,
}

impl StoreSession {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &CartLedger {
        &self.cart
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn packs(&self) -> &PackSelections {
        &self.packs
    }

    /// Apply one command. Returns the notice to show, if any.
    pub fn dispatch(&mut self, command: SessionCommand) -> Result<Option<Notice>, SessionError> {
        tracing::debug!("Session command: {command:?}");
        match command {
            SessionCommand::AddToCart(identity) => {
                let (_, pack_size) = self.add_to_cart(&identity)?;
                Ok(Some(Notice::AddedToCart { pack_size }))
            }
            SessionCommand::Increase(identity) => {
                self.increase(&identity)?;
                Ok(None)
            }
            SessionCommand::Decrease(identity) => {
                self.decrease(&identity);
                Ok(None)
            }
            SessionCommand::IncreaseLine(key) => {
                let product = self.product(&key.identity)?;
                self.cart.increase(&product, key.pack_size.as_deref());
                Ok(None)
            }
            SessionCommand::DecreaseLine(key) => {
                self.cart.decrease(&key.identity, key.pack_size.as_deref());
                Ok(None)
            }
            SessionCommand::SetQuantity { key, quantity } => {
                self.set_quantity(&key, quantity)?;
                Ok(None)
            }
            SessionCommand::Remove(key) => {
                self.cart.remove(&key);
                Ok(Some(Notice::RemovedFromCart))
            }
            SessionCommand::SelectPackSize { product, size } => {
                let product = self.product(&product)?;
                self.packs.select(&product, &size)?;
                Ok(None)
            }
            SessionCommand::BeginCustomSize(identity) => {
                let product = self.product(&identity)?;
                self.packs.begin_custom(&product)?;
                Ok(None)
            }
            SessionCommand::ConfirmCustomSize { product, size } => {
                let product = self.product(&product)?;
                let size = self.packs.confirm_custom(&product, &size)?;
                Ok(Some(Notice::CustomSizeSet { size }))
            }
            SessionCommand::CancelCustomSize(identity) => {
                self.packs.cancel_custom(&identity);
                Ok(None)
            }
            SessionCommand::SelectCategory(id) => Ok(self.select_category(id)),
            SessionCommand::Search(query) => {
                self.search(&query);
                Ok(None)
            }
            SessionCommand::SetSort(sort) => {
                self.filter.sort = sort;
                Ok(None)
            }
            SessionCommand::ClearFilters => {
                self.clear_filters();
                Ok(Some(Notice::FiltersCleared))
            }
        }
    }

    /// Add one unit at the product's selected pack size. Returns the line's
    /// quantity and the pack size used (`None` for the default bucket).
    pub fn add_to_cart(
        &mut self,
        identity: &ProductIdentity,
    ) -> Result<(u32, Option<String>), SessionError> {
        let product = self.product(identity)?;
        let pack_size = self.packs.resolve(&product);
        let quantity = self.cart.add(&product, pack_size.as_deref());
        Ok((quantity, pack_size))
    }

    /// Card "+": merge into the selected pack size, or the default bucket.
    pub fn increase(&mut self, identity: &ProductIdentity) -> Result<u32, SessionError> {
        let product = self.product(identity)?;
        let pack_size = self.packs.resolve(&product);
        Ok(self.cart.increase(&product, pack_size.as_deref()))
    }

    /// Card "-": only the selected (or default) bucket is touched, even when
    /// the product has lines under other pack sizes.
    pub fn decrease(&mut self, identity: &ProductIdentity) -> u32 {
        let pack_size = self
            .catalog
            .find(identity)
            .and_then(|product| self.packs.resolve(product));
        self.cart.decrease(identity, pack_size.as_deref())
    }

    /// Set a line's quantity by key. Zero or less removes it.
    pub fn set_quantity(&mut self, key: &CartKey, quantity: i64) -> Result<u32, SessionError> {
        if quantity <= 0 {
            self.cart.remove(key);
            return Ok(0);
        }
        let product = self.product(&key.identity)?;
        Ok(self
            .cart
            .set_quantity(&product, key.pack_size.as_deref(), quantity))
    }

    /// Show one category. Clears the search query. Unknown ids change nothing.
    pub fn select_category(&mut self, id: CategoryId) -> Option<Notice> {
        let category = self.catalog.category(id)?;
        let notice = Notice::CategorySelected {
            title_mr: category.title_mr.clone(),
            title_en: category.title_en.clone(),
        };
        self.filter.category = Some(id);
        self.filter.query = None;
        Some(notice)
    }

    /// Search the whole catalog. Clears the category. A blank query returns
    /// to the explanation prompt.
    pub fn search(&mut self, query: &str) {
        let query = query.trim();
        self.filter.category = None;
        self.filter.query = (!query.is_empty()).then(|| query.to_string());
    }

    pub fn clear_filters(&mut self) {
        self.filter = FilterState::default();
    }

    /// Products to display for the current filter state.
    pub fn listing(&self) -> Listing {
        filter::apply(self.catalog.products(), &self.filter)
    }

    pub fn suggestions(&self, query: &str) -> Vec<Arc<Product>> {
        filter::suggestions(self.catalog.products(), query)
    }

    pub fn card_state(&self, identity: &ProductIdentity) -> ProductCardState {
        let quantity = self.cart.quantity_for_product(identity);
        ProductCardState {
            quantity,
            can_decrease: quantity > 0,
            in_cart: quantity > 0,
        }
    }

    /// Pack size the card controls currently act on.
    pub fn selected_pack_size(&self, identity: &ProductIdentity) -> Option<String> {
        self.catalog
            .find(identity)
            .and_then(|product| self.packs.resolve(product))
    }

    pub fn cart_badge(&self) -> u64 {
        self.cart.total_quantity()
    }

    /// Validate the checkout form, snapshot the cart into an [`Order`] and
    /// clear the cart.
    ///
    /// Receipt delivery happens afterwards and cannot undo this.
    pub fn place_order(
        &mut self,
        form: &CheckoutForm,
        now: DateTime<Utc>,
    ) -> Result<Order, SessionError> {
        if self.cart.is_empty() {
            return Err(OrderError::EmptyCart.into());
        }
        let (customer, pickup) = form.validate(now.date_naive())?;

        let order = Order {
            id: self.order_ids.next(now),
            customer,
            pickup,
            lines: self.cart.lines().to_vec(),
            created_at: now,
            status: OrderStatus::Confirmed,
        };
        self.cart.clear();
        tracing::info!(
            "Order {} placed: {} lines, {} items, pickup {}",
            order.id,
            order.lines.len(),
            order.total_items(),
            order.pickup
        );
        Ok(order)
    }

    /// [`StoreSession::place_order`] stamped with the current time.
    #[cfg(feature = "std")]
    pub fn place_order_now(&mut self, form: &CheckoutForm) -> Result<Order, SessionError> {
        self.place_order(form, Utc::now())
    }

    fn product(&self, identity: &ProductIdentity) -> Result<Arc<Product>, SessionError> {
        self.catalog
            .find(identity)
            .cloned()
            .ok_or_else(|| SessionError::UnknownProduct(identity.clone()))
    }
}
