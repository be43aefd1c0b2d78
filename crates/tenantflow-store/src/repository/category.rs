//! # Category Repository
//!
//! Record operations for per-store product categories.
//!
//! Categories are plain groupings; removing one leaves products
//! pointing at the gone id, and reports bucket those lines under
//! "Uncategorized" until the dashboard recategorizes them.

use tracing::debug;
use uuid::Uuid;

use crate::collection::Collection;
use crate::error::StoreResult;
use tenantflow_core::Category;

/// Repository for category record operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    categories: Collection<Category>,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(categories: Collection<Category>) -> Self {
        CategoryRepository { categories }
    }

    /// Inserts a new category.
    pub fn insert(&self, category: Category) -> StoreResult<Category> {
        debug!(id = %category.id, name = %category.name, "Inserting category");

        self.categories.append(category.clone())?;
        Ok(category)
    }

    /// Gets a category by its ID.
    pub fn get_by_id(&self, id: &str) -> Option<Category> {
        self.categories.find_by_id(id)
    }

    /// Lists a store's categories in creation order.
    pub fn list_by_store(&self, store_id: &str) -> Vec<Category> {
        self.categories.filter(|c| c.store_id == store_id)
    }

    /// Removes a category record.
    pub fn remove(&self, id: &str) -> StoreResult<Category> {
        debug!(id = %id, "Removing category");
        self.categories.remove(id)
    }
}

/// Helper to generate a new category ID.
pub fn generate_category_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
