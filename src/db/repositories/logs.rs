use crate::domain::utc_timestamp;
use crate::entities::{logs, prelude::*};
use anyhow::{Context, Result};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set};

pub struct LogRepository {
    conn: DatabaseConnection,
}

impl LogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(&self, user_id: Option<i32>, action: &str, details: &str) -> Result<()> {
        let active_model = logs::ActiveModel {
            user_id: Set(user_id),
            action: Set(action.to_string()),
            details: Set(details.to_string()),
            timestamp: Set(utc_timestamp()),
            ..Default::default()
        };

        Logs::insert(active_model)
            .exec(&self.conn)
            .await
            .context("Failed to append audit log")?;
        Ok(())
    }

    pub async fn latest(&self, limit: u64) -> Result<Vec<logs::Model>> {
        Logs::find()
            .order_by_desc(logs::Column::Timestamp)
            .order_by_desc(logs::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to query latest logs")
    }
}
