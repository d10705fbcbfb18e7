use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::db::DBClient,
    models::usermodel::{User, UserRole},
};

#[async_trait]
pub trait UserExt {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error>;

    #[allow(clippy::too_many_arguments)]
    async fn save_user(
        &self,
        name: String,
        email: String,
        phone: String,
        password: String,
        role: UserRole,
    ) -> Result<User, sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let user = if let Some(user_id) = user_id {
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?
        } else if let Some(email) = email {
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?
        } else {
            None
        };

        Ok(user)
    }

    async fn save_user(
        &self,
        name: String,
        email: String,
        phone: String,
        password: String,
        role: UserRole,
    ) -> Result<User, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, phone, password, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(password)
        .bind(role)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}
