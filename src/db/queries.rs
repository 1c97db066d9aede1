use sqlx::{Executor, Pool, Sqlite};
use anyhow::Result;
use crate::db::models::{Charge, NewCharge};

pub async fn insert_charge<'e, E>(executor: E, charge_id: &str, charge: &NewCharge) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO charges (charge_id, pix_key, key_type, merchant_name, merchant_city,
         amount, tx_id, payload)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
    )
    .bind(charge_id)
    .bind(&charge.pix_key)
    .bind(&charge.key_type)
    .bind(&charge.merchant_name)
    .bind(&charge.merchant_city)
    .bind(&charge.amount)
    .bind(&charge.tx_id)
    .bind(&charge.payload)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn get_charge(pool: &Pool<Sqlite>, charge_id: &str) -> Result<Option<Charge>> {
    let charge = sqlx::query_as::<_, Charge>(
        "SELECT * FROM charges WHERE charge_id = ?"
    )
    .bind(charge_id)
    .fetch_optional(pool)
    .await?;

    Ok(charge)
}

pub async fn list_recent_charges(pool: &Pool<Sqlite>, limit: i64) -> Result<Vec<Charge>> {
    let charges = sqlx::query_as::<_, Charge>(
        "SELECT * FROM charges ORDER BY created_at DESC, rowid DESC LIMIT ?"
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(charges)
}
