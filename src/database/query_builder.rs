use chrono::{DateTime, Utc};
use sqlx::{self, postgres::PgArguments, FromRow, PgPool, Row};
use uuid::Uuid;

use crate::database::entity::Entity;
use crate::database::manager::DatabaseError;
use crate::filter::{Filter, FilterValue, PredicateSet, SqlResult};

/// Runs the SQL rendered by `Filter` for one entity table.
pub struct QueryBuilder<'a, T> {
    filter: Filter<'a>,
    _phantom: std::marker::PhantomData<T>,
}

impl<'a, T: Entity> QueryBuilder<'a, T> {
    pub fn new(set: &'a PredicateSet) -> Result<Self, DatabaseError> {
        Ok(Self {
            filter: Filter::new(T::TABLE, set)?,
            _phantom: std::marker::PhantomData,
        })
    }

    pub async fn select_all(&self, pool: &PgPool) -> Result<Vec<T>, DatabaseError> {
        let sql_result = self.filter.to_sql();
        let mut q = sqlx::query_as::<_, T>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query_as(q, p);
        }
        let rows = q.fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn select_optional(&self, pool: &PgPool) -> Result<Option<T>, DatabaseError> {
        let sql_result = self.filter.to_first_sql();
        let mut q = sqlx::query_as::<_, T>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query_as(q, p);
        }
        let row = q.fetch_optional(pool).await?;
        Ok(row)
    }

    pub async fn count(&self, pool: &PgPool) -> Result<i64, DatabaseError> {
        let sql_result = self.filter.to_count_sql();
        let mut q = sqlx::query(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query(q, p);
        }
        let row = q.fetch_one(pool).await?;
        let count: i64 = row.try_get("count")?;
        Ok(count)
    }
}

/// Insert-or-update keyed on `id`. On conflict every writable column and
/// `modified_at` are replaced; `created_at` and `deleted_at` are left alone.
pub fn upsert_sql<T: Entity>(entity: &T) -> SqlResult {
    let values = entity.values();

    let mut columns = vec!["\"id\"".to_string()];
    let mut params = vec![FilterValue::Uuid(entity.id())];
    for (name, value) in values.iter() {
        columns.push(format!("\"{}\"", name));
        params.push(value.clone());
    }
    columns.push("\"created_at\"".to_string());
    params.push(FilterValue::Timestamp(entity.audit().created_at));
    columns.push("\"modified_at\"".to_string());
    params.push(FilterValue::Timestamp(entity.audit().modified_at));

    let placeholders: Vec<String> = (1..=params.len()).map(|i| format!("${}", i)).collect();
    let updates: Vec<String> = values
        .iter()
        .map(|(name, _)| *name)
        .chain(std::iter::once("modified_at"))
        .map(|name| format!("\"{0}\" = EXCLUDED.\"{0}\"", name))
        .collect();

    SqlResult {
        query: format!(
            "INSERT INTO \"{}\" ({}) VALUES ({}) ON CONFLICT (\"id\") DO UPDATE SET {} RETURNING \"id\"",
            T::TABLE,
            columns.join(", "),
            placeholders.join(", "),
            updates.join(", ")
        ),
        params,
    }
}

pub async fn upsert<T: Entity>(pool: &PgPool, entity: &T) -> Result<Uuid, DatabaseError> {
    let sql_result = upsert_sql(entity);
    let mut q = sqlx::query(&sql_result.query);
    for p in sql_result.params.iter() {
        q = bind_param_query(q, p);
    }
    let row = q.fetch_one(pool).await?;
    let id: Uuid = row.try_get("id")?;
    Ok(id)
}

/// Tombstone a live row. Returns the number of rows touched.
pub async fn soft_delete<T: Entity>(pool: &PgPool, id: Uuid, now: DateTime<Utc>) -> Result<u64, DatabaseError> {
    let query = format!(
        "UPDATE \"{}\" SET \"deleted_at\" = $1 WHERE \"id\" = $2 AND \"deleted_at\" IS NULL",
        T::TABLE
    );
    let result = sqlx::query(&query).bind(now).bind(id).execute(pool).await?;
    Ok(result.rows_affected())
}

fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &'q FilterValue,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        FilterValue::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        FilterValue::Uuid(id) => q.bind(*id),
        FilterValue::Int(i) => q.bind(*i),
        FilterValue::Float(f) => q.bind(*f),
        FilterValue::Timestamp(ts) => q.bind(*ts),
        FilterValue::Text(s) => q.bind(s.as_str()),
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q FilterValue,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, sqlx::postgres::PgRow>,
{
    match v {
        FilterValue::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        FilterValue::Uuid(id) => q.bind(*id),
        FilterValue::Int(i) => q.bind(*i),
        FilterValue::Float(f) => q.bind(*f),
        FilterValue::Timestamp(ts) => q.bind(*ts),
        FilterValue::Text(s) => q.bind(s.as_str()),
    }
}
