use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::{ProfileUpdate, User};
use crate::domain::repository::UserRepository;

/// UserPostgresRepository は PostgreSQL ベースのユーザーリポジトリ。
/// usermgmt.users テーブルに対する CRUD 操作を提供する。
pub struct UserPostgresRepository {
    pool: PgPool,
}

impl UserPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// UserRow は usermgmt.users テーブルの行を表す中間構造体。
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub login_id: String,
    pub user_name: String,
    pub password_hash: String,
    pub password_salt: String,
    pub role: i32,
    pub phone_no: Option<String>,
    pub address: Option<String>,
    pub remarks: Option<String>,
    pub is_active: bool,
    pub created_on: chrono::DateTime<chrono::Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            login_id: row.login_id,
            user_name: row.user_name,
            role: row.role,
            is_active: row.is_active,
            created_on: row.created_on,
            phone_no: row.phone_no,
            address: row.address,
            remarks: row.remarks,
            password_hash: row.password_hash,
            password_salt: row.password_salt,
        }
    }
}

const SELECT_COLUMNS: &str = "id, login_id, user_name, password_hash, password_salt, role, \
     phone_no, address, remarks, is_active, created_on";

#[async_trait]
impl UserRepository for UserPostgresRepository {
    async fn find_by_login_id(&self, login_id: &str) -> anyhow::Result<Option<User>> {
        let query = format!(
            "SELECT {} FROM usermgmt.users WHERE login_id = $1",
            SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(login_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_active_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let query = format!(
            "SELECT {} FROM usermgmt.users WHERE id = $1 AND is_active = TRUE",
            SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO usermgmt.users
                (id, login_id, user_name, password_hash, password_salt, role,
                 phone_no, address, remarks, is_active, created_on)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user.id)
        .bind(&user.login_id)
        .bind(&user.user_name)
        .bind(&user.password_hash)
        .bind(&user.password_salt)
        .bind(user.role)
        .bind(&user.phone_no)
        .bind(&user.address)
        .bind(&user.remarks)
        .bind(user.is_active)
        .bind(user.created_on)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE usermgmt.users
            SET user_name = $2, phone_no = $3, address = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&update.user_name)
        .bind(&update.phone_no)
        .bind(&update.address)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
