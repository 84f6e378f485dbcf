use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Row, Transaction};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use crate::models::{Party, Person, SlotPayload, SlotRecord, Weekday};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid stored data: {0}")]
    InvalidData(String),
}

fn people_table(party: Party) -> &'static str {
    match party {
        Party::Candidate => "candidates",
        Party::Interviewer => "interviewers",
    }
}

fn owner_column(party: Party) -> &'static str {
    match party {
        Party::Candidate => "candidate_id",
        Party::Interviewer => "interviewer_id",
    }
}

/// PostgreSQL client for candidates, interviewers and their availability
///
/// Slots keep their weekdays in a side table with an explicit position so
/// order and duplicates survive a round trip.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Insert a person and return it with its new id
    pub async fn create_person<P: Person>(&self, name: &str) -> Result<P, PostgresError> {
        let query = format!(
            "INSERT INTO {} (name, created_at) VALUES ($1, NOW()) RETURNING id",
            people_table(P::PARTY)
        );

        let id: i32 = sqlx::query_scalar(&query)
            .bind(name)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!("Created {} {}", P::PARTY, id);

        Ok(P::from_parts(id, name.to_string()))
    }

    /// All people of one kind, by ascending id
    pub async fn list_people<P: Person>(&self) -> Result<Vec<P>, PostgresError> {
        let query = format!("SELECT id, name FROM {} ORDER BY id", people_table(P::PARTY));

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        Ok(rows
            .iter()
            .map(|row| P::from_parts(row.get("id"), row.get("name")))
            .collect())
    }

    pub async fn get_person<P: Person>(&self, id: i32) -> Result<P, PostgresError> {
        let query = format!("SELECT id, name FROM {} WHERE id = $1", people_table(P::PARTY));

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("{} {}", P::PARTY, id)))?;

        Ok(P::from_parts(row.get("id"), row.get("name")))
    }

    pub async fn update_person<P: Person>(&self, id: i32, name: &str) -> Result<P, PostgresError> {
        let query = format!("UPDATE {} SET name = $1 WHERE id = $2", people_table(P::PARTY));

        let result = sqlx::query(&query)
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PostgresError::NotFound(format!("{} {}", P::PARTY, id)));
        }

        Ok(P::from_parts(id, name.to_string()))
    }

    /// Delete a person; their slots go with them
    pub async fn delete_person(&self, party: Party, id: i32) -> Result<(), PostgresError> {
        let query = format!("DELETE FROM {} WHERE id = $1", people_table(party));

        let result = sqlx::query(&query).bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(PostgresError::NotFound(format!("{} {}", party, id)));
        }

        tracing::info!("Deleted {} {}", party, id);

        Ok(())
    }

    /// Slots owned by one person, in storage order
    pub async fn list_slots(&self, party: Party, owner_id: i32) -> Result<Vec<SlotRecord>, PostgresError> {
        let query = format!(
            "SELECT id, initial_time, final_time FROM slots WHERE {} = $1 ORDER BY id",
            owner_column(party)
        );

        let rows = sqlx::query(&query).bind(owner_id).fetch_all(&self.pool).await?;

        let slot_ids: Vec<i32> = rows.iter().map(|row| row.get("id")).collect();
        let mut weekdays = self.fetch_weekdays(&slot_ids).await?;

        let slots: Vec<SlotRecord> = rows
            .iter()
            .map(|row| {
                let id: i32 = row.get("id");
                SlotRecord {
                    id: Some(id),
                    owner_id: Some(owner_id),
                    initial_time: row.get("initial_time"),
                    final_time: row.get("final_time"),
                    weekdays: weekdays.remove(&id).unwrap_or_default(),
                }
            })
            .collect();

        tracing::debug!("{} {} has {} slots", party, owner_id, slots.len());

        Ok(slots)
    }

    async fn fetch_weekdays(&self, slot_ids: &[i32]) -> Result<HashMap<i32, Vec<Weekday>>, PostgresError> {
        let mut weekdays: HashMap<i32, Vec<Weekday>> = HashMap::new();
        if slot_ids.is_empty() {
            return Ok(weekdays);
        }

        let query = r#"
            SELECT slot_id, weekday
            FROM slot_weekdays
            WHERE slot_id = ANY($1)
            ORDER BY slot_id, position
        "#;

        let rows = sqlx::query(query).bind(slot_ids).fetch_all(&self.pool).await?;

        for row in rows {
            let slot_id: i32 = row.get("slot_id");
            let raw: i16 = row.get("weekday");
            let day = u8::try_from(raw)
                .map_err(|_| format!("weekday must be between 0 and 6, got {}", raw))
                .and_then(|n| Weekday::try_from(n))
                .map_err(|e| PostgresError::InvalidData(format!("slot {}: {}", slot_id, e)))?;
            weekdays.entry(slot_id).or_default().push(day);
        }

        Ok(weekdays)
    }

    /// Add a slot for an existing person
    pub async fn add_slot(
        &self,
        party: Party,
        owner_id: i32,
        payload: &SlotPayload,
    ) -> Result<SlotRecord, PostgresError> {
        let mut tx = self.pool.begin().await?;

        let exists_query = format!("SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1)", people_table(party));
        let exists: bool = sqlx::query_scalar(&exists_query)
            .bind(owner_id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Err(PostgresError::NotFound(format!("{} {}", party, owner_id)));
        }

        let insert_query = format!(
            "INSERT INTO slots ({}, initial_time, final_time) VALUES ($1, $2, $3) RETURNING id",
            owner_column(party)
        );
        let slot_id: i32 = sqlx::query_scalar(&insert_query)
            .bind(owner_id)
            .bind(&payload.initial_time)
            .bind(&payload.final_time)
            .fetch_one(&mut *tx)
            .await?;

        insert_weekdays(&mut tx, slot_id, &payload.weekdays).await?;
        tx.commit().await?;

        tracing::debug!("Added slot {} for {} {}", slot_id, party, owner_id);

        Ok(slot_record(slot_id, owner_id, payload))
    }

    /// Replace a slot's times and weekdays
    pub async fn update_slot(
        &self,
        party: Party,
        owner_id: i32,
        slot_id: i32,
        payload: &SlotPayload,
    ) -> Result<SlotRecord, PostgresError> {
        let mut tx = self.pool.begin().await?;

        let update_query = format!(
            "UPDATE slots SET initial_time = $1, final_time = $2 WHERE id = $3 AND {} = $4",
            owner_column(party)
        );
        let result = sqlx::query(&update_query)
            .bind(&payload.initial_time)
            .bind(&payload.final_time)
            .bind(slot_id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PostgresError::NotFound(format!(
                "slot {} of {} {}",
                slot_id, party, owner_id
            )));
        }

        sqlx::query("DELETE FROM slot_weekdays WHERE slot_id = $1")
            .bind(slot_id)
            .execute(&mut *tx)
            .await?;
        insert_weekdays(&mut tx, slot_id, &payload.weekdays).await?;
        tx.commit().await?;

        Ok(slot_record(slot_id, owner_id, payload))
    }

    pub async fn delete_slot(&self, party: Party, owner_id: i32, slot_id: i32) -> Result<(), PostgresError> {
        let query = format!("DELETE FROM slots WHERE id = $1 AND {} = $2", owner_column(party));

        let result = sqlx::query(&query)
            .bind(slot_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PostgresError::NotFound(format!(
                "slot {} of {} {}",
                slot_id, party, owner_id
            )));
        }

        Ok(())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

async fn insert_weekdays(
    tx: &mut Transaction<'_, Postgres>,
    slot_id: i32,
    weekdays: &[Weekday],
) -> Result<(), PostgresError> {
    for (position, day) in weekdays.iter().enumerate() {
        sqlx::query("INSERT INTO slot_weekdays (slot_id, position, weekday) VALUES ($1, $2, $3)")
            .bind(slot_id)
            .bind(position as i32)
            .bind(day.number() as i16)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

fn slot_record(slot_id: i32, owner_id: i32, payload: &SlotPayload) -> SlotRecord {
    SlotRecord {
        id: Some(slot_id),
        owner_id: Some(owner_id),
        initial_time: payload.initial_time.clone(),
        final_time: payload.final_time.clone(),
        weekdays: payload.weekdays.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_per_party() {
        assert_eq!(people_table(Party::Candidate), "candidates");
        assert_eq!(people_table(Party::Interviewer), "interviewers");
        assert_eq!(owner_column(Party::Candidate), "candidate_id");
        assert_eq!(owner_column(Party::Interviewer), "interviewer_id");
    }

    #[test]
    fn test_slot_record_from_payload() {
        let payload = SlotPayload {
            initial_time: "09:00:00".to_string(),
            final_time: "10:00:00".to_string(),
            weekdays: vec![Weekday::Monday, Weekday::Monday],
        };

        let record = slot_record(3, 8, &payload);
        assert_eq!(record.id, Some(3));
        assert_eq!(record.owner_id, Some(8));
        assert_eq!(record.weekdays, payload.weekdays);
    }
}
