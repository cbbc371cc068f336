use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::errors::StoreError;
use crate::domain::user::models::PhoneNumber;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserStore;

/// Process-local user store.
///
/// Ids are assigned sequentially from 1. The phone number uniqueness check and
/// the insert happen under the same write lock, so concurrent registrations
/// of one number cannot both succeed.
#[derive(Default)]
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i64,
    users: HashMap<UserId, User>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn is_phone_number_unique(&self, phone_number: &PhoneNumber) -> Result<bool, StoreError> {
        let inner = self.inner.read().await;
        Ok(!inner
            .users
            .values()
            .any(|user| &user.phone_number == phone_number))
    }

    async fn insert(&self, user: User) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;

        if inner
            .users
            .values()
            .any(|existing| existing.phone_number == user.phone_number)
        {
            return Err(StoreError::PhoneNumberTaken);
        }

        inner.last_id += 1;
        let stored = User {
            id: UserId(inner.last_id),
            ..user
        };
        inner.users.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn find_by_phone_number(&self, phone_number: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|user| user.phone_number.as_str() == phone_number)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.users.get(id).cloned())
    }
}
