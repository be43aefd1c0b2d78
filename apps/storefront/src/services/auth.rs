//! # Auth Service
//!
//! Login, logout and identity restore.
//!
//! ## Identity Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  There are no passwords here. Identity arrives pre-authenticated    │
//! │  (the hosted deployment fronts this with an OAuth proxy), so       │
//! │  "login" means: resolve an email to a registered account and pin   │
//! │  that identity in the session.                                     │
//! │                                                                     │
//! │  login(email)  ──► UserRepository::find_by_email                   │
//! │                        │                                            │
//! │                        ▼                                            │
//! │                    CurrentUser ──► session[tenantflow.user]         │
//! │                                                                     │
//! │  restore()     ──► session[tenantflow.user] ──► re-check the id    │
//! │                    still exists before trusting the snapshot       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Session writes are best-effort: a failed snapshot write keeps the
//! in-process login valid and only costs the restore after a restart.

use std::sync::Arc;

use tracing::{debug, info, warn};

use tenantflow_core::validation::validate_email;
use tenantflow_core::{CurrentUser, Role};
use tenantflow_store::{SessionStore, UserRepository, SESSION_USER_KEY};

use crate::error::{ApiError, ApiResult};

/// Resolves emails to accounts and keeps the session identity current.
pub struct AuthService {
    users: UserRepository,
    session: Arc<dyn SessionStore>,
}

impl AuthService {
    pub fn new(users: UserRepository, session: Arc<dyn SessionStore>) -> Self {
        AuthService { users, session }
    }

    /// Logs in by email and persists the identity snapshot.
    pub fn login(&self, email: &str) -> ApiResult<CurrentUser> {
        validate_email(email)?;

        let user = self
            .users
            .find_by_email(email)
            .ok_or_else(|| ApiError::unauthorized("No account matches that email"))?;

        let current = CurrentUser::from(&user);

        match serde_json::to_string(&current) {
            Ok(json) => {
                if let Err(e) = self.session.set(SESSION_USER_KEY, &json) {
                    warn!("Could not persist identity snapshot: {}", e);
                }
            }
            Err(e) => warn!("Could not serialize identity snapshot: {}", e),
        }

        info!(
            user_id = %current.id,
            role = ?current.role,
            "User logged in"
        );

        Ok(current)
    }

    /// Logs out and clears the persisted identity.
    pub fn logout(&self) {
        if let Err(e) = self.session.remove(SESSION_USER_KEY) {
            warn!("Could not clear identity snapshot: {}", e);
        }
        info!("User logged out");
    }

    /// Restores the identity persisted by a previous run.
    ///
    /// Returns `None` when nothing was persisted, the snapshot does not
    /// parse, or the account it names no longer exists. A stale snapshot
    /// is removed so the next run starts clean.
    pub fn restore(&self) -> Option<CurrentUser> {
        let json = self.session.get(SESSION_USER_KEY)?;

        let snapshot: CurrentUser = match serde_json::from_str(&json) {
            Ok(user) => user,
            Err(e) => {
                warn!("Discarding unreadable identity snapshot: {}", e);
                self.discard_snapshot();
                return None;
            }
        };

        if self.users.get_by_id(&snapshot.id).is_none() {
            warn!(user_id = %snapshot.id, "Persisted identity no longer registered");
            self.discard_snapshot();
            return None;
        }

        debug!(user_id = %snapshot.id, "Restored identity from session");
        Some(snapshot)
    }

    fn discard_snapshot(&self) {
        if let Err(e) = self.session.remove(SESSION_USER_KEY) {
            warn!("Could not remove stale identity snapshot: {}", e);
        }
    }
}

/// Whether `user` may manage the store with id `store_id`.
///
/// Admins manage every store; a Lojista manages the one store they own.
pub fn can_manage(user: &CurrentUser, store_id: &str) -> bool {
    match user.role {
        Role::Admin => true,
        Role::Lojista => user.store_id.as_deref() == Some(store_id),
        Role::Cliente => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tenantflow_core::User;
    use tenantflow_store::{FileSessionStore, MemorySessionStore, MemoryStore};

    use crate::error::ErrorCode;

    fn setup() -> (MemoryStore, Arc<MemorySessionStore>, AuthService) {
        let store = MemoryStore::new();
        let session = Arc::new(MemorySessionStore::default());

        store
            .users()
            .insert(User {
                id: "user-1".to_string(),
                name: "Carlos".to_string(),
                email: "carlos@tenantflow.dev".to_string(),
                role: Role::Lojista,
                store_id: Some("store-1".to_string()),
                created_at: Utc::now(),
            })
            .unwrap();

        let auth = AuthService::new(store.users(), session.clone());
        (store, session, auth)
    }

    #[test]
    fn test_login_persists_snapshot() {
        let (_store, session, auth) = setup();

        let current = auth.login("carlos@tenantflow.dev").unwrap();
        assert_eq!(current.id, "user-1");
        assert_eq!(current.role, Role::Lojista);
        assert!(session.get(SESSION_USER_KEY).is_some());
    }

    #[test]
    fn test_login_is_case_insensitive() {
        let (_store, _session, auth) = setup();

        let current = auth.login("  CARLOS@tenantflow.dev ").unwrap();
        assert_eq!(current.id, "user-1");
    }

    #[test]
    fn test_login_unknown_email() {
        let (_store, _session, auth) = setup();

        let err = auth.login("nobody@tenantflow.dev").unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[test]
    fn test_login_rejects_malformed_email() {
        let (_store, _session, auth) = setup();

        let err = auth.login("not-an-email").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_restore_roundtrip() {
        let (store, session, auth) = setup();
        auth.login("carlos@tenantflow.dev").unwrap();

        // A fresh service over the same session sees the login
        let reopened = AuthService::new(store.users(), session);
        let restored = reopened.restore().unwrap();
        assert_eq!(restored.id, "user-1");
        assert_eq!(restored.email, "carlos@tenantflow.dev");
    }

    #[test]
    fn test_identity_survives_process_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = MemoryStore::new();

        store
            .users()
            .insert(User {
                id: "user-1".to_string(),
                name: "Carlos".to_string(),
                email: "carlos@tenantflow.dev".to_string(),
                role: Role::Lojista,
                store_id: Some("store-1".to_string()),
                created_at: Utc::now(),
            })
            .unwrap();

        {
            let session = Arc::new(FileSessionStore::new(path.clone()));
            let auth = AuthService::new(store.users(), session);
            auth.login("carlos@tenantflow.dev").unwrap();
        }

        // A fresh store over the same file is what a restart sees
        let session = Arc::new(FileSessionStore::new(path));
        let auth = AuthService::new(store.users(), session);
        let restored = auth.restore().unwrap();
        assert_eq!(restored.id, "user-1");
        assert_eq!(restored.store_id.as_deref(), Some("store-1"));
    }

    #[test]
    fn test_restore_discards_corrupt_snapshot() {
        let (_store, session, auth) = setup();
        session.set(SESSION_USER_KEY, "{not json").unwrap();

        assert!(auth.restore().is_none());
        assert!(session.get(SESSION_USER_KEY).is_none());
    }

    #[test]
    fn test_restore_discards_deleted_account() {
        let (store, session, auth) = setup();
        auth.login("carlos@tenantflow.dev").unwrap();

        store.users().remove("user-1").unwrap();

        assert!(auth.restore().is_none());
        assert!(session.get(SESSION_USER_KEY).is_none());
    }

    #[test]
    fn test_logout_clears_snapshot() {
        let (_store, session, auth) = setup();
        auth.login("carlos@tenantflow.dev").unwrap();

        auth.logout();
        assert!(session.get(SESSION_USER_KEY).is_none());
        assert!(auth.restore().is_none());
    }

    #[test]
    fn test_can_manage_matrix() {
        let admin = CurrentUser {
            id: "a".to_string(),
            name: "Ana".to_string(),
            email: "ana@tenantflow.dev".to_string(),
            role: Role::Admin,
            store_id: None,
        };
        let owner = CurrentUser {
            id: "b".to_string(),
            name: "Carlos".to_string(),
            email: "carlos@tenantflow.dev".to_string(),
            role: Role::Lojista,
            store_id: Some("store-1".to_string()),
        };
        let shopper = CurrentUser {
            id: "c".to_string(),
            name: "Maria".to_string(),
            email: "maria@tenantflow.dev".to_string(),
            role: Role::Cliente,
            store_id: None,
        };

        assert!(can_manage(&admin, "store-1"));
        assert!(can_manage(&admin, "store-2"));
        assert!(can_manage(&owner, "store-1"));
        assert!(!can_manage(&owner, "store-2"));
        assert!(!can_manage(&shopper, "store-1"));
    }
}
