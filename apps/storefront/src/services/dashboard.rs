//! # Dashboard Service
//!
//! The store owner's console over one store.
//!
//! ## Access Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Dashboard::open(store, operator)                                   │
//! │         │                                                           │
//! │         ├── operator is Admin ───────────────► any store           │
//! │         ├── operator is Lojista ──────────────► the store they own │
//! │         └── anyone else ──────────────────────► UNAUTHORIZED       │
//! │                                                                     │
//! │  Every handle method is tenant-scoped: records of another store    │
//! │  read as missing, never as someone else's data.                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Surfaces
//! - Catalog: create / update / deactivate / remove products, categories
//! - Orders: list, status and payment updates (optimistic version), removal
//! - Store configuration: name, slug, delivery options, payment, social
//! - Reports: period aggregations over this store's orders

use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};

use tenantflow_core::reports::{
    self, CategorySales, CustomerSales, DailyRevenue, PeriodComparison, ProductBreakdownRow,
    ProductSales, RankMetric, ReportPeriod, SalesSummary,
};
use tenantflow_core::validation::{
    validate_category_name, validate_delivery_options, validate_price_cents,
    validate_product_name, validate_slug, validate_stock_millis, validate_store_name,
};
use tenantflow_core::{
    Category, CurrentUser, DeliveryOption, Order, OrderStatus, PaymentStatus, Product,
    ProductUnit, SocialLinks, Store,
};
use tenantflow_store::repository::category::generate_category_id;
use tenantflow_store::repository::product::generate_product_id;
use tenantflow_store::MemoryStore;

use crate::error::{ApiError, ApiResult};
use crate::services::auth::can_manage;

/// The product form, for both create and update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub unit: ProductUnit,
    pub category_id: Option<String>,
    pub image_url: Option<String>,
    pub stock_millis: i64,
}

/// One store's management console.
#[derive(Debug)]
pub struct Dashboard {
    records: MemoryStore,
    store_id: String,
    operator: CurrentUser,
}

impl Dashboard {
    /// Opens the dashboard of a store.
    ///
    /// ## Errors
    /// * `NOT_FOUND` - Unknown store
    /// * `UNAUTHORIZED` - Operator neither owns the store nor is an admin
    pub fn open(
        records: &MemoryStore,
        store_id: &str,
        operator: &CurrentUser,
    ) -> ApiResult<Self> {
        let store = records
            .stores()
            .get_by_id(store_id)
            .ok_or_else(|| ApiError::not_found("Store", store_id))?;

        if !can_manage(operator, &store.id) {
            return Err(ApiError::unauthorized("You do not manage this store"));
        }

        info!(
            store_id = %store.id,
            operator = %operator.id,
            "Dashboard opened"
        );

        Ok(Dashboard {
            records: records.clone(),
            store_id: store.id,
            operator: operator.clone(),
        })
    }

    /// The operator using this console.
    pub fn operator(&self) -> &CurrentUser {
        &self.operator
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Every product of the store, deactivated rows included.
    pub fn products(&self) -> Vec<Product> {
        self.records.products().list_all_by_store(&self.store_id)
    }

    /// Creates a product from the form.
    pub fn create_product(&self, input: ProductInput) -> ApiResult<Product> {
        self.validate_product_input(&input)?;
        let now = Utc::now();

        let product = Product {
            id: generate_product_id(),
            store_id: self.store_id.clone(),
            category_id: input.category_id,
            name: input.name.trim().to_string(),
            description: normalize(input.description),
            price_cents: input.price_cents,
            unit: input.unit,
            image_url: normalize(input.image_url),
            stock_millis: input.stock_millis,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        debug!(product_id = %product.id, name = %product.name, "Creating product");
        Ok(self.records.products().insert(product)?)
    }

    /// Replaces a product's editable fields.
    ///
    /// Identity, store, active flag and creation time survive the edit.
    pub fn update_product(&self, product_id: &str, input: ProductInput) -> ApiResult<Product> {
        let current = self.owned_product(product_id)?;
        self.validate_product_input(&input)?;

        let product = Product {
            category_id: input.category_id,
            name: input.name.trim().to_string(),
            description: normalize(input.description),
            price_cents: input.price_cents,
            unit: input.unit,
            image_url: normalize(input.image_url),
            stock_millis: input.stock_millis,
            ..current
        };

        Ok(self.records.products().update(product)?)
    }

    /// Hides a product from the storefront, keeping its history.
    pub fn deactivate_product(&self, product_id: &str) -> ApiResult<Product> {
        self.owned_product(product_id)?;
        Ok(self.records.products().deactivate(product_id)?)
    }

    /// Deletes a product record entirely.
    pub fn remove_product(&self, product_id: &str) -> ApiResult<Product> {
        self.owned_product(product_id)?;
        Ok(self.records.products().remove(product_id)?)
    }

    /// The store's categories.
    pub fn categories(&self) -> Vec<Category> {
        self.records.categories().list_by_store(&self.store_id)
    }

    /// Creates a category with a per-store unique name.
    pub fn create_category(&self, name: &str) -> ApiResult<Category> {
        validate_category_name(name)?;
        let name = name.trim().to_string();

        let taken = self
            .categories()
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(&name));
        if taken {
            return Err(ApiError::validation(format!(
                "category '{}' already exists",
                name
            )));
        }

        let category = Category {
            id: generate_category_id(),
            store_id: self.store_id.clone(),
            name,
            created_at: Utc::now(),
        };

        Ok(self.records.categories().insert(category)?)
    }

    /// Removes a category.
    ///
    /// Products keep their now-dangling reference and report under the
    /// uncategorized bucket until re-assigned.
    pub fn remove_category(&self, category_id: &str) -> ApiResult<Category> {
        self.owned_category(category_id)?;
        Ok(self.records.categories().remove(category_id)?)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// The store's orders, newest first.
    pub fn orders(&self) -> Vec<Order> {
        self.records.orders().list_by_store(&self.store_id)
    }

    /// One order of this store.
    pub fn order(&self, order_id: &str) -> ApiResult<Order> {
        self.owned_order(order_id)
    }

    /// Moves an order to a new status.
    ///
    /// ## Errors
    /// * `VERSION_CONFLICT` - `expected_version` is stale; reload first
    pub fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
        expected_version: i64,
    ) -> ApiResult<Order> {
        self.owned_order(order_id)?;
        let updated = self
            .records
            .orders()
            .update_status(order_id, status, expected_version)?;

        info!(
            order_id = %order_id,
            status = ?status,
            version = updated.version,
            "Order status updated"
        );
        Ok(updated)
    }

    /// Moves an order to a new payment status.
    ///
    /// ## Errors
    /// * `VERSION_CONFLICT` - `expected_version` is stale; reload first
    pub fn update_payment_status(
        &self,
        order_id: &str,
        payment_status: PaymentStatus,
        expected_version: i64,
    ) -> ApiResult<Order> {
        self.owned_order(order_id)?;
        let updated =
            self.records
                .orders()
                .update_payment_status(order_id, payment_status, expected_version)?;

        info!(
            order_id = %order_id,
            payment_status = ?payment_status,
            version = updated.version,
            "Payment status updated"
        );
        Ok(updated)
    }

    /// Deletes an order outright.
    ///
    /// Cancelling keeps history; removal is for records that should never
    /// have existed. Removed orders leave every report.
    pub fn remove_order(&self, order_id: &str) -> ApiResult<Order> {
        self.owned_order(order_id)?;
        info!(order_id = %order_id, "Removing order");
        Ok(self.records.orders().remove(order_id)?)
    }

    // =========================================================================
    // Store Configuration
    // =========================================================================

    /// The store being managed, read fresh.
    pub fn store(&self) -> ApiResult<Store> {
        self.records
            .stores()
            .get_by_id(&self.store_id)
            .ok_or_else(|| ApiError::not_found("Store", &self.store_id))
    }

    /// Renames the store.
    pub fn rename(&self, name: &str) -> ApiResult<Store> {
        validate_store_name(name)?;

        let mut store = self.store()?;
        store.name = name.trim().to_string();
        Ok(self.records.stores().update(store)?)
    }

    /// Changes the public slug.
    ///
    /// ## Errors
    /// * `VALIDATION_ERROR` - Malformed slug, or already taken
    pub fn change_slug(&self, slug: &str) -> ApiResult<Store> {
        validate_slug(slug)?;

        let mut store = self.store()?;
        store.slug = slug.trim().to_string();
        Ok(self.records.stores().update(store)?)
    }

    /// Adds or replaces the delivery option for one method.
    ///
    /// The store keeps at most one entry per method; an upsert for a
    /// configured method replaces that entry.
    pub fn upsert_delivery_option(&self, option: DeliveryOption) -> ApiResult<Store> {
        let mut store = self.store()?;

        match store
            .delivery_options
            .iter_mut()
            .find(|o| o.method == option.method)
        {
            Some(existing) => *existing = option,
            None => store.delivery_options.push(option),
        }

        validate_delivery_options(&store.delivery_options)?;
        Ok(self.records.stores().update(store)?)
    }

    /// Replaces the accepted payment method list.
    ///
    /// Every id must name a registered platform method. Order is kept;
    /// the storefront shows choices in this order.
    pub fn set_payment_methods(&self, method_ids: &[String]) -> ApiResult<Store> {
        let registry = self.records.payment_methods();

        let mut accepted: Vec<String> = Vec::with_capacity(method_ids.len());
        for id in method_ids {
            if registry.get_by_id(id).is_none() {
                return Err(ApiError::validation(format!(
                    "unknown payment method: {}",
                    id
                )));
            }
            if !accepted.contains(id) {
                accepted.push(id.clone());
            }
        }

        let mut store = self.store()?;
        store.payment_method_ids = accepted;
        Ok(self.records.stores().update(store)?)
    }

    /// Sets or clears the Pix key shown at checkout.
    pub fn set_pix_key(&self, pix_key: Option<&str>) -> ApiResult<Store> {
        let mut store = self.store()?;
        store.pix_key = pix_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from);
        Ok(self.records.stores().update(store)?)
    }

    /// Sets the storefront's social links, blank handles cleared.
    pub fn set_social_links(&self, social: SocialLinks) -> ApiResult<Store> {
        let mut store = self.store()?;
        store.social = SocialLinks {
            instagram: normalize(social.instagram),
            facebook: normalize(social.facebook),
        };
        Ok(self.records.stores().update(store)?)
    }

    // =========================================================================
    // Reports
    // =========================================================================
    //
    // Every aggregation runs over this store's orders only. Cancelled
    // orders are excluded inside the aggregations themselves.

    /// Revenue, order count and averages for a period.
    pub fn sales_summary(&self, period: ReportPeriod) -> SalesSummary {
        reports::sales_summary(&self.orders(), period)
    }

    /// One revenue row per day of the period, gap days included.
    pub fn daily_revenue(&self, period: ReportPeriod) -> Vec<DailyRevenue> {
        reports::daily_revenue(&self.orders(), period)
    }

    /// Best-selling products by the chosen metric.
    pub fn top_products(&self, period: ReportPeriod, metric: RankMetric) -> Vec<ProductSales> {
        reports::top_products(&self.orders(), period, metric)
    }

    /// Revenue grouped by the products' current categories.
    pub fn sales_by_category(&self, period: ReportPeriod) -> Vec<CategorySales> {
        // Inactive products still resolve the category of past sales
        let products = self.records.products().list_all_by_store(&self.store_id);
        let categories = self.categories();
        reports::sales_by_category(&self.orders(), &products, &categories, period)
    }

    /// Highest-spending customers of the period.
    pub fn top_customers(&self, period: ReportPeriod) -> Vec<CustomerSales> {
        reports::top_customers(&self.orders(), period)
    }

    /// A month against the month before it.
    pub fn month_over_month(&self, year: i32, month: u32) -> ApiResult<PeriodComparison> {
        Ok(reports::month_over_month(&self.orders(), year, month)?)
    }

    /// A year against the year before it.
    pub fn year_over_year(&self, year: i32) -> ApiResult<PeriodComparison> {
        Ok(reports::year_over_year(&self.orders(), year)?)
    }

    /// Per-product sales table for one calendar month.
    pub fn monthly_product_breakdown(
        &self,
        year: i32,
        month: u32,
    ) -> ApiResult<Vec<ProductBreakdownRow>> {
        Ok(reports::monthly_product_breakdown(&self.orders(), year, month)?)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn validate_product_input(&self, input: &ProductInput) -> ApiResult<()> {
        validate_product_name(&input.name)?;
        validate_price_cents(input.price_cents)?;
        validate_stock_millis(input.stock_millis)?;

        if let Some(category_id) = &input.category_id {
            let known = self
                .records
                .categories()
                .get_by_id(category_id)
                .map(|c| c.store_id == self.store_id)
                .unwrap_or(false);
            if !known {
                return Err(ApiError::validation(format!(
                    "unknown category: {}",
                    category_id
                )));
            }
        }

        Ok(())
    }

    fn owned_product(&self, product_id: &str) -> ApiResult<Product> {
        self.records
            .products()
            .get_by_id(product_id)
            .filter(|p| p.store_id == self.store_id)
            .ok_or_else(|| ApiError::not_found("Product", product_id))
    }

    fn owned_category(&self, category_id: &str) -> ApiResult<Category> {
        self.records
            .categories()
            .get_by_id(category_id)
            .filter(|c| c.store_id == self.store_id)
            .ok_or_else(|| ApiError::not_found("Category", category_id))
    }

    fn owned_order(&self, order_id: &str) -> ApiResult<Order> {
        self.records
            .orders()
            .get_by_id(order_id)
            .filter(|o| o.store_id == self.store_id)
            .ok_or_else(|| ApiError::not_found("Order", order_id))
    }
}

/// Trims an optional field, turning blanks into `None`.
fn normalize(value: Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

// =============================================================================
// Unit Tests
// =============================================================================
