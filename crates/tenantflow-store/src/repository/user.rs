//! # User Repository
//!
//! Record operations for user accounts.
//!
//! ## Key Operations
//! - Insert with unique email
//! - Lookup by id or email (login path)
//! - Removal (admin side)
//!
//! Email is the business identifier people type, so `find_by_email`
//! ignores case and surrounding whitespace. Credentials never appear
//! here; identity arrives pre-authenticated.

use tracing::debug;
use uuid::Uuid;

use crate::collection::Collection;
use crate::error::{StoreError, StoreResult};
use tenantflow_core::User;

/// Repository for user record operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    users: Collection<User>,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(users: Collection<User>) -> Self {
        UserRepository { users }
    }

    /// Inserts a new user.
    ///
    /// ## Returns
    /// * `Ok(User)` - The stored record
    /// * `Err(StoreError::Duplicate)` - ID or email already registered
    pub fn insert(&self, user: User) -> StoreResult<User> {
        debug!(id = %user.id, email = %user.email, "Inserting user");

        self.users.with_write(|records| {
            if records.iter().any(|u| u.id == user.id) {
                return Err(StoreError::duplicate("id", &user.id));
            }
            if records
                .iter()
                .any(|u| u.email.eq_ignore_ascii_case(&user.email))
            {
                return Err(StoreError::duplicate("email", &user.email));
            }
            records.push(user.clone());
            Ok(())
        })?;
        Ok(user)
    }

    /// Gets a user by their ID.
    pub fn get_by_id(&self, id: &str) -> Option<User> {
        self.users.find_by_id(id)
    }

    /// Finds a user by email, ignoring case and surrounding whitespace.
    ///
    /// This is the login lookup. A miss means "unknown email", which
    /// the auth flow reports without revealing more.
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        let needle = email.trim();
        self.users.find(|u| u.email.eq_ignore_ascii_case(needle))
    }

    /// Removes an account.
    ///
    /// Orders keep their frozen customer name, so history survives the
    /// account. Persisted identity snapshots for the removed id stop
    /// restoring on the next login check.
    pub fn remove(&self, id: &str) -> StoreResult<User> {
        debug!(id = %id, "Removing user");
        self.users.remove(id)
    }
}

/// Helper to generate a new user ID.
pub fn generate_user_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
