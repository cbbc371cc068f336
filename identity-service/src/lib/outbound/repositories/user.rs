use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::user::errors::StoreError;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::PhoneNumber;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserStore;

const PHONE_NUMBER_CONSTRAINT: &str = "users_phone_number_key";

pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    phone_number: String,
    password_hash: String,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            name: DisplayName::new(row.name)
                .map_err(|e| StoreError::Database(format!("corrupt row {}: {}", row.id, e)))?,
            phone_number: PhoneNumber::new(row.phone_number)
                .map_err(|e| StoreError::Database(format!("corrupt row {}: {}", row.id, e)))?,
            password_hash: row.password_hash,
        })
    }
}

fn database_error(e: sqlx::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn is_phone_number_unique(&self, phone_number: &PhoneNumber) -> Result<bool, StoreError> {
        let taken: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE phone_number = $1)
            "#,
        )
        .bind(phone_number.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(!taken)
    }

    async fn insert(&self, user: User) -> Result<User, StoreError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (name, phone_number, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(user.name.as_str())
        .bind(user.phone_number.as_str())
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(PHONE_NUMBER_CONSTRAINT)
                {
                    return StoreError::PhoneNumberTaken;
                }
            }
            database_error(e)
        })?;

        Ok(User {
            id: UserId(id),
            ..user
        })
    }

    async fn find_by_phone_number(&self, phone_number: &str) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, phone_number, password_hash
            FROM users
            WHERE phone_number = $1
            "#,
        )
        .bind(phone_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, phone_number, password_hash
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(User::try_from).transpose()
    }
}
