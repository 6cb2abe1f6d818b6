/// In-process credential store
///
/// Backs tests and local tooling that should not need PostgreSQL. Email
/// uniqueness is enforced atomically through the map entry API, matching the
/// unique index of the SQL schema.
use super::{AppProvider, StoreError, StoreResult, UserProvider, UserSaver};
use crate::models::{App, User};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

#[derive(Default)]
pub struct InMemoryCredentialStore {
    users: DashMap<String, User>,
    admins: DashMap<i64, bool>,
    apps: DashMap<i32, App>,
    next_user_id: AtomicI64,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper to register an application
    pub fn with_app(self, id: i32, name: &str, secret: &str) -> Self {
        self.insert_app(id, name, secret);
        self
    }

    pub fn insert_app(&self, id: i32, name: &str, secret: &str) {
        self.apps.insert(
            id,
            App {
                id,
                name: name.to_string(),
                secret: secret.to_string(),
                created_at: Utc::now(),
            },
        );
    }

    /// Grant or revoke the admin flag of an existing user
    pub fn set_admin(&self, user_id: i64, is_admin: bool) -> StoreResult<()> {
        match self.admins.get_mut(&user_id) {
            Some(mut flag) => {
                *flag = is_admin;
                Ok(())
            }
            None => Err(StoreError::UserNotFound),
        }
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

#[async_trait]
impl UserSaver for InMemoryCredentialStore {
    async fn save_user(&self, email: &str, password_hash: &str) -> StoreResult<i64> {
        match self.users.entry(email.to_string()) {
            Entry::Occupied(_) => Err(StoreError::UserExists),
            Entry::Vacant(slot) => {
                let id = self.next_user_id.fetch_add(1, Ordering::SeqCst) + 1;
                self.admins.insert(id, false);
                slot.insert(User {
                    id,
                    email: email.to_string(),
                    password_hash: password_hash.to_string(),
                    created_at: Utc::now(),
                });
                Ok(id)
            }
        }
    }
}

#[async_trait]
impl UserProvider for InMemoryCredentialStore {
    async fn user(&self, email: &str) -> StoreResult<User> {
        self.users
            .get(email)
            .map(|user| user.value().clone())
            .ok_or(StoreError::UserNotFound)
    }

    async fn is_admin(&self, user_id: i64) -> StoreResult<bool> {
        self.admins
            .get(&user_id)
            .map(|flag| *flag.value())
            .ok_or(StoreError::UserNotFound)
    }
}

#[async_trait]
impl AppProvider for InMemoryCredentialStore {
    async fn app(&self, app_id: i32) -> StoreResult<App> {
        self.apps
            .get(&app_id)
            .map(|app| app.value().clone())
            .ok_or(StoreError::AppNotFound)
    }
}
