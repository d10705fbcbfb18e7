use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::db::DBClient,
    models::leadmodel::{Lead, LeadStatus},
};

#[async_trait]
pub trait LeadExt {
    async fn save_lead(
        &self,
        property_id: Uuid,
        buyer_name: &str,
        buyer_phone: &str,
    ) -> Result<Lead, sqlx::Error>;

    async fn get_leads(&self, page: u32, limit: usize) -> Result<Vec<Lead>, sqlx::Error>;

    /// Leads against every property submitted by `owner_id`.
    async fn get_leads_for_owner(&self, owner_id: Uuid) -> Result<Vec<Lead>, sqlx::Error>;

    async fn update_lead_status(
        &self,
        lead_id: Uuid,
        status: LeadStatus,
    ) -> Result<Option<Lead>, sqlx::Error>;
}

#[async_trait]
impl LeadExt for DBClient {
    async fn save_lead(
        &self,
        property_id: Uuid,
        buyer_name: &str,
        buyer_phone: &str,
    ) -> Result<Lead, sqlx::Error> {
        let lead = sqlx::query_as::<_, Lead>(
            r#"
            INSERT INTO leads (property_id, buyer_name, buyer_phone)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(property_id)
        .bind(buyer_name)
        .bind(buyer_phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(lead)
    }

    async fn get_leads(&self, page: u32, limit: usize) -> Result<Vec<Lead>, sqlx::Error> {
        let offset = (page.saturating_sub(1) as i64) * (limit as i64);

        let leads = sqlx::query_as::<_, Lead>(
            "SELECT * FROM leads ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(leads)
    }

    async fn get_leads_for_owner(&self, owner_id: Uuid) -> Result<Vec<Lead>, sqlx::Error> {
        let leads = sqlx::query_as::<_, Lead>(
            r#"
            SELECT l.* FROM leads l
            JOIN properties p ON p.id = l.property_id
            WHERE p.submitted_by = $1
            ORDER BY l.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(leads)
    }

    async fn update_lead_status(
        &self,
        lead_id: Uuid,
        status: LeadStatus,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let lead = sqlx::query_as::<_, Lead>(
            "UPDATE leads SET status = $1 WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(lead_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(lead)
    }
}
