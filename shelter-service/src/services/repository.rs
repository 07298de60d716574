//! Animal record access against PostgreSQL.
//!
//! There is no pool: every call opens its own session and closes it before
//! returning, whatever the outcome of the statement.

use crate::models::{AgeValue, Animal, NewAnimal};
use crate::services::StoreError;
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Connection};
use tracing::{debug, instrument, warn};

const LIST_ANIMALS: &str = r#"
    SELECT id, name, animal_type, age, arrival_date, health_status
    FROM animals
    ORDER BY id
"#;

// `age` is bound twice and at most one side is non-null: $3 as text, which
// the store parses as an integer, and $5 as a float, which it rounds.
const INSERT_ANIMAL: &str = r#"
    INSERT INTO animals (name, animal_type, age, health_status)
    VALUES ($1, $2, COALESCE(CAST($3 AS INTEGER), CAST($5 AS INTEGER)), $4)
    RETURNING id
"#;

#[async_trait]
pub trait AnimalRepository: Send + Sync {
    /// All records, ordered by identifier.
    async fn list_all(&self) -> Result<Vec<Animal>, StoreError>;

    /// Insert one record and return its store-generated identifier.
    async fn create(&self, animal: &NewAnimal) -> Result<i32, StoreError>;

    /// Round-trip a trivial statement to prove the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct PgAnimalRepository {
    options: PgConnectOptions,
}

impl PgAnimalRepository {
    pub fn new(options: PgConnectOptions) -> Self {
        Self { options }
    }

    async fn open_session(&self) -> Result<PgConnection, StoreError> {
        self.options
            .connect()
            .await
            .map_err(StoreError::Connection)
    }

    // A session dropped without reaching here (panic, cancelled future) still
    // closes its socket on drop.
    async fn close_session(session: PgConnection) {
        if let Err(e) = session.close().await {
            warn!(error = %e, "Failed to close store session cleanly");
        }
    }
}

#[async_trait]
impl AnimalRepository for PgAnimalRepository {
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Animal>, StoreError> {
        let mut session = self.open_session().await?;

        let result = sqlx::query_as::<_, Animal>(LIST_ANIMALS)
            .fetch_all(&mut session)
            .await;

        Self::close_session(session).await;

        let animals = result.map_err(StoreError::Query)?;
        debug!(count = animals.len(), "Listed animals");
        Ok(animals)
    }

    #[instrument(skip(self, animal))]
    async fn create(&self, animal: &NewAnimal) -> Result<i32, StoreError> {
        let mut session = self.open_session().await?;

        let result = sqlx::query_scalar::<_, i32>(INSERT_ANIMAL)
            .bind(&animal.name)
            .bind(&animal.species)
            .bind(animal.age.as_ref().and_then(AgeValue::as_text))
            .bind(&animal.health)
            .bind(animal.age.as_ref().and_then(AgeValue::as_number))
            .fetch_one(&mut session)
            .await;

        Self::close_session(session).await;

        let id = result.map_err(StoreError::Query)?;
        debug!(id, "Animal created");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> Result<(), StoreError> {
        let mut session = self.open_session().await?;

        let result = sqlx::query("SELECT 1").execute(&mut session).await;

        Self::close_session(session).await;

        result.map(|_| ()).map_err(StoreError::Query)
    }
}
