use aerodesk_core::models::{Approval, User, UserType};
use aerodesk_core::repository::UserRepository;
use aerodesk_core::{CoreError, CoreResult};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{corrupt_row, repo_error};

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    usertype: String,
    password: String,
    approval: String,
}

impl TryFrom<UserRow> for User {
    type Error = CoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            username: row.username,
            email: row.email,
            usertype: UserType::parse(&row.usertype).map_err(corrupt_row)?,
            password: row.password,
            approval: Approval::parse(&row.approval).map_err(corrupt_row)?,
        })
    }
}

const SELECT_USER: &str = "SELECT id, username, email, usertype, password, approval FROM users";

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert_user(&self, user: &User) -> CoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, usertype, password, approval)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.usertype.as_str())
        .bind(&user.password)
        .bind(user.approval.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return CoreError::ValidationError("User already exists".to_string());
                }
            }
            repo_error(e)
        })?;

        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> CoreResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_USER))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(repo_error)?;

        row.map(User::try_from).transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> CoreResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{} WHERE email = $1", SELECT_USER))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(repo_error)?;

        row.map(User::try_from).transpose()
    }

    async fn list_users(&self) -> CoreResult<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!("{} ORDER BY created_at", SELECT_USER))
            .fetch_all(&self.pool)
            .await
            .map_err(repo_error)?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn set_approval(&self, id: Uuid, approval: Approval) -> CoreResult<()> {
        let result = sqlx::query("UPDATE users SET approval = $1 WHERE id = $2")
            .bind(approval.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(repo_error)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFoundError(format!("User {}", id)));
        }
        Ok(())
    }
}
