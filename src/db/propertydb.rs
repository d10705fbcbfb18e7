use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::db::DBClient,
    dtos::propertydtos::CreatePropertyDto,
    models::propertymodel::{Property, PropertyImage, PropertyStatus},
};

#[async_trait]
pub trait PropertyExt {
    async fn save_property(
        &self,
        submitted_by: Uuid,
        property_data: CreatePropertyDto,
        verified: bool,
    ) -> Result<Property, anyhow::Error>;

    async fn get_property_by_id(
        &self,
        property_id: Uuid,
    ) -> Result<Option<Property>, sqlx::Error>;

    async fn get_verified_properties(
        &self,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Property>, sqlx::Error>;

    async fn get_properties_by_owner(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<Property>, sqlx::Error>;

    async fn get_pending_properties(&self) -> Result<Vec<Property>, sqlx::Error>;

    async fn verify_property(&self, property_id: Uuid) -> Result<Option<Property>, sqlx::Error>;

    async fn update_property_status(
        &self,
        property_id: Uuid,
        status: PropertyStatus,
    ) -> Result<Option<Property>, sqlx::Error>;

    async fn delete_property(&self, property_id: Uuid) -> Result<u64, sqlx::Error>;
}

impl DBClient {
    /// Loads the ordered image rows for each property in one query and
    /// attaches them to the fetched rows.
    async fn attach_images(&self, properties: &mut [Property]) -> Result<(), sqlx::Error> {
        if properties.is_empty() {
            return Ok(());
        }

        let ids: Vec<Uuid> = properties.iter().map(|p| p.id).collect();
        let images = sqlx::query_as::<_, PropertyImage>(
            "SELECT * FROM property_images WHERE property_id = ANY($1) ORDER BY position",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        for property in properties.iter_mut() {
            property.images = images
                .iter()
                .filter(|img| img.property_id == property.id)
                .cloned()
                .collect();
        }

        Ok(())
    }
}

#[async_trait]
impl PropertyExt for DBClient {
    async fn save_property(
        &self,
        submitted_by: Uuid,
        property_data: CreatePropertyDto,
        verified: bool,
    ) -> Result<Property, anyhow::Error> {
        let status = property_data.status.unwrap_or(PropertyStatus::Available);

        let mut tx = self.pool.begin().await?;

        let mut property = sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties (
                submitted_by, title, price, location, colony, property_type,
                area, beds, baths, status, description, verified
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(submitted_by)
        .bind(&property_data.title)
        .bind(&property_data.price)
        .bind(&property_data.location)
        .bind(&property_data.colony)
        .bind(property_data.property_type)
        .bind(&property_data.area)
        .bind(property_data.beds)
        .bind(property_data.baths)
        .bind(status)
        .bind(&property_data.description)
        .bind(verified)
        .fetch_one(&mut *tx)
        .await?;

        for (position, image_url) in property_data.images.iter().enumerate() {
            let image = sqlx::query_as::<_, PropertyImage>(
                r#"
                INSERT INTO property_images (property_id, image, position)
                VALUES ($1, $2, $3)
                RETURNING *
                "#,
            )
            .bind(property.id)
            .bind(image_url)
            .bind(position as i32)
            .fetch_one(&mut *tx)
            .await?;

            property.images.push(image);
        }

        tx.commit().await?;

        Ok(property)
    }

    async fn get_property_by_id(
        &self,
        property_id: Uuid,
    ) -> Result<Option<Property>, sqlx::Error> {
        let property = sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = $1")
            .bind(property_id)
            .fetch_optional(&self.pool)
            .await?;

        match property {
            Some(property) => {
                let mut rows = [property];
                self.attach_images(&mut rows).await?;
                let [property] = rows;
                Ok(Some(property))
            }
            None => Ok(None),
        }
    }

    async fn get_verified_properties(
        &self,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Property>, sqlx::Error> {
        let offset = (page.saturating_sub(1) as i64) * (limit as i64);

        let mut properties = sqlx::query_as::<_, Property>(
            r#"
            SELECT * FROM properties
            WHERE verified = TRUE
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        self.attach_images(&mut properties).await?;
        Ok(properties)
    }

    async fn get_properties_by_owner(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<Property>, sqlx::Error> {
        let mut properties = sqlx::query_as::<_, Property>(
            "SELECT * FROM properties WHERE submitted_by = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        self.attach_images(&mut properties).await?;
        Ok(properties)
    }

    async fn get_pending_properties(&self) -> Result<Vec<Property>, sqlx::Error> {
        let mut properties = sqlx::query_as::<_, Property>(
            "SELECT * FROM properties WHERE verified = FALSE ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        self.attach_images(&mut properties).await?;
        Ok(properties)
    }

    async fn verify_property(&self, property_id: Uuid) -> Result<Option<Property>, sqlx::Error> {
        let property = sqlx::query_as::<_, Property>(
            "UPDATE properties SET verified = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(property)
    }

    async fn update_property_status(
        &self,
        property_id: Uuid,
        status: PropertyStatus,
    ) -> Result<Option<Property>, sqlx::Error> {
        let property = sqlx::query_as::<_, Property>(
            "UPDATE properties SET status = $1 WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(property)
    }

    async fn delete_property(&self, property_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(property_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
