//! # In-Memory Record Store
//!
//! The shared store every service talks to. One `MemoryStore` owns one
//! [`Collection`] per entity and hands out repository handles over them.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         MemoryStore                                     │
//! │                                                                         │
//! │  App Startup                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  MemoryStore::new() ← Create the six empty collections                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │  Collection<Product>   Collection<Order> │                           │
//! │  │  Collection<Store>     Collection<User>  │                           │
//! │  │  Collection<Category>  Collection<...>   │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       │ Cheap clones (Arc handles) shared with every caller            │
//! │       ▼                                                                 │
//! │  store.products()  ──► ProductRepository                               │
//! │  store.orders()    ──► OrderRepository                                 │
//! │  store.stores()    ──► StoreRepository                                 │
//! │  (Services can hold repositories concurrently; all of them             │
//! │   see the same records)                                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifetime
//! Records live as long as the `MemoryStore` (or any clone of it). There
//! is no file behind the collections; a restart starts empty, which is
//! why the seed module exists.

use tracing::info;

use tenantflow_core::{Category, Order, PaymentMethodRecord, Product, Store, User};

use crate::collection::Collection;
use crate::repository::category::CategoryRepository;
use crate::repository::order::OrderRepository;
use crate::repository::payment::PaymentMethodRepository;
use crate::repository::product::ProductRepository;
use crate::repository::store::StoreRepository;
use crate::repository::user::UserRepository;

// =============================================================================
// MemoryStore
// =============================================================================

/// Main store handle providing repository access.
///
/// ## Design: One Handle, Many Repositories
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Service State Management                                               │
/// │                                                                         │
/// │  Instead of one god object, each service holds only the                │
/// │  repositories it needs:                                                 │
/// │                                                                         │
/// │  StorefrontSession ← products(), stores(), orders()                    │
/// │  Dashboard         ← products(), categories(), orders(), stores()      │
/// │  AuthService       ← users()                                           │
/// │                                                                         │
/// │  Benefits:                                                              │
/// │  • Services only get what they need                                    │
/// │  • Easier testing (build a store, seed just the entities used)         │
/// │  • Clear separation of concerns                                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Usage
/// ```rust,ignore
/// let store = MemoryStore::new();
/// store.products().insert(product)?;
/// let found = store.products().search("store-1", "coffee");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    products: Collection<Product>,
    orders: Collection<Order>,
    stores: Collection<Store>,
    users: Collection<User>,
    categories: Collection<Category>,
    payment_methods: Collection<PaymentMethodRecord>,
}

/// Record counts per entity, for startup diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreCounts {
    pub products: usize,
    pub orders: usize,
    pub stores: usize,
    pub users: usize,
    pub categories: usize,
    pub payment_methods: usize,
}

impl MemoryStore {
    /// Creates an empty store.
    ///
    /// ## What This Does
    /// 1. Creates one empty collection per entity
    /// 2. Nothing else: no files, no network, no migrations
    ///
    /// ## Example
    /// ```rust,ignore
    /// let store = MemoryStore::new();
    /// assert_eq!(store.counts().products, 0);
    /// ```
    pub fn new() -> Self {
        info!("Initializing in-memory record store");
        MemoryStore {
            products: Collection::new(),
            orders: Collection::new(),
            stores: Collection::new(),
            users: Collection::new(),
            categories: Collection::new(),
            payment_methods: Collection::new(),
        }
    }

    /// Returns the product repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let products = store.products().search("store-1", "picanha");
    /// ```
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.products.clone())
    }

    /// Returns the order repository.
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.orders.clone())
    }

    /// Returns the store repository.
    pub fn stores(&self) -> StoreRepository {
        StoreRepository::new(self.stores.clone())
    }

    /// Returns the user repository.
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.users.clone())
    }

    /// Returns the category repository.
    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.categories.clone())
    }

    /// Returns the payment method repository.
    pub fn payment_methods(&self) -> PaymentMethodRepository {
        PaymentMethodRepository::new(self.payment_methods.clone())
    }

    /// Counts every record in the store.
    ///
    /// ## When To Call
    /// - After seeding, to log what the store starts with
    /// - In tests, to assert on dataset shape
    pub fn counts(&self) -> StoreCounts {
        StoreCounts {
            products: self.products.len(),
            orders: self.orders.len(),
            stores: self.stores.len(),
            users: self.users.len(),
            categories: self.categories.len(),
            payment_methods: self.payment_methods.len(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
