//! # Product Repository
//!
//! Record operations for the catalog.
//!
//! ## Key Operations
//! - Name substring search
//! - CRUD operations
//! - Soft delete (deactivation)
//!
//! ## Substring Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Catalog Search Works                             │
//! │                                                                         │
//! │  Customer types: "pic"                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Lowercase both sides, match anywhere in the product name               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ store-1 products                        │                           │
//! │  │                                         │                           │
//! │  │ Picanha Bovina     | active   | match   │ ← returned                │
//! │  │ Linguiça Toscana   | active   |         │                           │
//! │  │ Picanha Suína      | inactive | match   │ ← hidden (inactive)       │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Results keep catalog (insertion) order                                 │
//! │                                                                         │
//! │  Catalogs here are hundreds of products, not tens of thousands,         │
//! │  so a linear scan under the read lock is plenty.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::collection::Collection;
use crate::error::StoreResult;
use tenantflow_core::Product;

/// Repository for product record operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = store.products();
///
/// // Search the storefront catalog
/// let results = repo.search("store-1", "picanha");
///
/// // Get by ID
/// let product = repo.get_by_id("uuid-here");
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    products: Collection<Product>,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(products: Collection<Product>) -> Self {
        ProductRepository { products }
    }

    /// Inserts a new product.
    ///
    /// ## Arguments
    /// * `product` - Product to insert (id generated beforehand)
    ///
    /// ## Returns
    /// * `Ok(Product)` - The stored product
    /// * `Err(StoreError::Duplicate)` - ID already exists
    pub fn insert(&self, product: Product) -> StoreResult<Product> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        self.products.append(product.clone())?;
        Ok(product)
    }

    /// Gets a product by its ID.
    ///
    /// Returns inactive products too; callers filtering a storefront
    /// check `is_active` themselves.
    pub fn get_by_id(&self, id: &str) -> Option<Product> {
        self.products.find_by_id(id)
    }

    /// Replaces an existing product's fields.
    ///
    /// The repository stamps `updated_at`; callers never set it.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The product after the update
    /// * `Err(StoreError::NotFound)` - Product doesn't exist
    pub fn update(&self, product: Product) -> StoreResult<Product> {
        debug!(id = %product.id, "Updating product");

        let id = product.id.clone();
        self.products.update_with(&id, move |record| {
            *record = product;
            record.updated_at = Utc::now();
            Ok(())
        })
    }

    /// Soft-deletes a product by setting `is_active = false`.
    ///
    /// ## Why Soft Delete?
    /// - Historical orders still reference this product
    /// - Can be restored if deactivated by mistake
    /// - Reports keep resolving its name and category
    pub fn deactivate(&self, id: &str) -> StoreResult<Product> {
        debug!(id = %id, "Deactivating product");

        self.products.update_with(id, |record| {
            record.is_active = false;
            record.updated_at = Utc::now();
            Ok(())
        })
    }

    /// Removes a product record entirely.
    ///
    /// Past order lines keep their frozen snapshot of it; reports fall
    /// back to "Uncategorized" for lines whose product is gone.
    pub fn remove(&self, id: &str) -> StoreResult<Product> {
        debug!(id = %id, "Removing product");
        self.products.remove(id)
    }

    /// Lists a store's active products in catalog (insertion) order.
    ///
    /// ## Usage
    /// This is what the storefront grid renders.
    pub fn list_by_store(&self, store_id: &str) -> Vec<Product> {
        self.products
            .filter(|p| p.store_id == store_id && p.is_active)
    }

    /// Lists every product of a store, inactive included.
    ///
    /// The dashboard catalog view shows deactivated rows greyed out.
    pub fn list_all_by_store(&self, store_id: &str) -> Vec<Product> {
        self.products.filter(|p| p.store_id == store_id)
    }

    /// Searches a store's active products by name substring.
    ///
    /// ## How It Works
    /// 1. Trims the query; empty means "show everything"
    /// 2. Lowercases both sides, matches anywhere in the name
    /// 3. Results keep catalog order
    ///
    /// ## Example
    /// ```rust,ignore
    /// // "pic" matches "Picanha Bovina"
    /// let products = repo.search("store-1", "pic");
    ///
    /// // Empty query returns the whole active catalog
    /// let products = repo.search("store-1", "");
    /// ```
    pub fn search(&self, store_id: &str, query: &str) -> Vec<Product> {
        let query = query.trim();

        debug!(store_id = %store_id, query = %query, "Searching products");

        if query.is_empty() {
            return self.list_by_store(store_id);
        }

        let needle = query.to_lowercase();
        let products = self.products.filter(|p| {
            p.store_id == store_id && p.is_active && p.name.to_lowercase().contains(&needle)
        });

        debug!(count = products.len(), "Search returned products");
        products
    }

    /// Counts a store's active products (for diagnostics).
    pub fn count_by_store(&self, store_id: &str) -> usize {
        self.list_by_store(store_id).len()
    }
}

/// Helper to generate a new product ID.
///
/// ## Usage
/// ```rust,ignore
/// let id = generate_product_id();
/// let product = Product { id, ... };
/// ```
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
