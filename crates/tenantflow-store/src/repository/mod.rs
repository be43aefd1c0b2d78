//! # Repository Module
//!
//! Collection-backed repository implementations for TenantFlow.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts record access behind a clean API.     │
//! │                                                                         │
//! │  Service Call                                                           │
//! │       │                                                                 │
//! │       │  store.products().search("store-1", "picanha")                  │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  ProductRepository                                                      │
//! │  ├── search(&self, store_id, query)                                     │
//! │  ├── get_by_id(&self, id)                                               │
//! │  ├── insert(&self, product)                                             │
//! │  └── update(&self, product)                                             │
//! │       │                                                                 │
//! │       │  Collection<Product> (shared, lock-protected)                   │
//! │       ▼                                                                 │
//! │  In-Memory Record Store                                                 │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                         │
//! │  • Constraint checks (unique slug, version guard) live in one place     │
//! │  • Easy to test (build a store, exercise the repository)                │
//! │  • Can swap in a real database later without touching services          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Constraint Scope
//! Repositories enforce constraints their own collection can answer:
//! duplicate ids, unique slugs and emails, non-empty orders, version
//! guards. Rules spanning entities (does this product's store exist?)
//! belong to the services that orchestrate them.
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Catalog CRUD and search
//! - [`order::OrderRepository`] - Order log and guarded status updates
//! - [`store::StoreRepository`] - Tenant stores with unique slugs
//! - [`user::UserRepository`] - Accounts looked up by id or email
//! - [`category::CategoryRepository`] - Per-store product groupings
//! - [`payment::PaymentMethodRepository`] - Platform payment method labels

pub mod category;
pub mod order;
pub mod payment;
pub mod product;
pub mod store;
pub mod user;
