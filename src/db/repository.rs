use anyhow::Result;
use sqlx::{Pool, Sqlite};

use crate::db::{
    models::{Charge, NewCharge},
    queries,
};

/// Storage for issued charges
#[async_trait::async_trait]
pub trait ChargeRepository: Send + Sync {
    /// Store `charge` and return its generated id
    async fn insert_charge(&self, charge: NewCharge) -> Result<String>;
    /// Store every charge or none of them; ids come back in input order
    async fn insert_charges(&self, charges: Vec<NewCharge>) -> Result<Vec<String>>;
    async fn get_charge(&self, charge_id: &str) -> Result<Option<Charge>>;
    async fn list_recent(&self, limit: i64) -> Result<Vec<Charge>>;
}

/// Random 16-byte id, hex encoded
pub fn new_charge_id() -> String {
    hex::encode(rand::random::<[u8; 16]>())
}

/// SQLite implementation of ChargeRepository
pub struct DatabaseChargeRepository {
    pool: Pool<Sqlite>,
}

impl DatabaseChargeRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ChargeRepository for DatabaseChargeRepository {
    async fn insert_charge(&self, charge: NewCharge) -> Result<String> {
        let charge_id = new_charge_id();
        queries::insert_charge(&self.pool, &charge_id, &charge).await?;
        Ok(charge_id)
    }

    async fn insert_charges(&self, charges: Vec<NewCharge>) -> Result<Vec<String>> {
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(charges.len());
        for charge in &charges {
            let charge_id = new_charge_id();
            queries::insert_charge(&mut *tx, &charge_id, charge).await?;
            ids.push(charge_id);
        }
        tx.commit().await?;

        Ok(ids)
    }

    async fn get_charge(&self, charge_id: &str) -> Result<Option<Charge>> {
        queries::get_charge(&self.pool, charge_id).await
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Charge>> {
        queries::list_recent_charges(&self.pool, limit).await
    }
}
