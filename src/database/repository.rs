use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::entity::{stamp_for_save, Entity};
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::query_builder::{self, QueryBuilder};
use crate::filter::PredicateSet;

/// Storage contract shared by every resource. Reads never return tombstoned
/// rows unless the predicate set asks for them.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Insert a new entity (nil id) or overwrite an existing one by id.
    /// `created_at` of an existing row is never changed.
    async fn save(&self, entity: T) -> Result<Uuid, DatabaseError>;

    /// First match, or `NotFound`.
    async fn get_one(&self, set: &PredicateSet) -> Result<T, DatabaseError>;

    async fn get_many(&self, set: &PredicateSet) -> Result<Vec<T>, DatabaseError>;

    /// Matches for the default bucket only; OR bucket and pagination are ignored.
    async fn count(&self, set: &PredicateSet) -> Result<i64, DatabaseError>;

    /// Soft delete. `NotFound` if the row is missing or already tombstoned.
    async fn delete(&self, entity: &T) -> Result<(), DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;

    /// Page of rows and the total count, queried concurrently. Either failure
    /// fails the whole fetch.
    async fn fetch(&self, set: &PredicateSet) -> Result<(Vec<T>, i64), DatabaseError> {
        tokio::try_join!(self.get_many(set), self.count(set))
    }
}

pub fn not_found<T: Entity>() -> DatabaseError {
    DatabaseError::NotFound(format!("{} record not found", T::TABLE))
}

/// Postgres-backed repository for one entity table.
pub struct PgRepository<T> {
    pool: PgPool,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> PgRepository<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _phantom: std::marker::PhantomData,
        }
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for PgRepository<T> {
    async fn save(&self, mut entity: T) -> Result<Uuid, DatabaseError> {
        stamp_for_save(&mut entity, Utc::now());
        query_builder::upsert(&self.pool, &entity).await
    }

    async fn get_one(&self, set: &PredicateSet) -> Result<T, DatabaseError> {
        QueryBuilder::<T>::new(set)?
            .select_optional(&self.pool)
            .await?
            .ok_or_else(not_found::<T>)
    }

    async fn get_many(&self, set: &PredicateSet) -> Result<Vec<T>, DatabaseError> {
        QueryBuilder::<T>::new(set)?.select_all(&self.pool).await
    }

    async fn count(&self, set: &PredicateSet) -> Result<i64, DatabaseError> {
        QueryBuilder::<T>::new(set)?.count(&self.pool).await
    }

    async fn delete(&self, entity: &T) -> Result<(), DatabaseError> {
        match query_builder::soft_delete::<T>(&self.pool, entity.id(), Utc::now()).await? {
            0 => Err(not_found::<T>()),
            _ => Ok(()),
        }
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
