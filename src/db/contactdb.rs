use async_trait::async_trait;

use crate::{
    db::db::DBClient, dtos::leaddtos::CreateContactDto, models::leadmodel::ContactMessage,
};

#[async_trait]
pub trait ContactExt {
    async fn save_contact_message(
        &self,
        contact_data: CreateContactDto,
    ) -> Result<ContactMessage, sqlx::Error>;
}

#[async_trait]
impl ContactExt for DBClient {
    async fn save_contact_message(
        &self,
        contact_data: CreateContactDto,
    ) -> Result<ContactMessage, sqlx::Error> {
        let message = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (name, email, subject, message)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&contact_data.name)
        .bind(&contact_data.email)
        .bind(&contact_data.subject)
        .bind(&contact_data.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }
}
