//! # Service Layer
//!
//! Business logic on top of the record store. Each service owns one
//! surface of the app:
//!
//! - [`auth`] - login, logout and session identity restore
//! - [`storefront`] - public shopping flow (browse, cart, checkout)
//! - [`dashboard`] - owner-side management (catalog, orders, reports)

pub mod auth;
pub mod dashboard;
pub mod storefront;
