use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::entity::{stamp_for_save, Entity};
use crate::database::manager::DatabaseError;
use crate::database::repository::{not_found, Repository};
use crate::filter::{Comparison, FilterValue, Predicate, PredicateSet, SortDirection};

/// In-process repository with the same filter, tombstone and paging rules as
/// the Postgres one. Backs `STORE_BACKEND=memory` and the test suite.
pub struct MemoryRepository<T> {
    rows: RwLock<Vec<T>>,
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self { rows: RwLock::new(Vec::new()) }
    }
}

impl<T: Entity> MemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn matching<'r>(rows: &'r [T], set: &PredicateSet, include_any: bool) -> Vec<&'r T> {
        rows.iter().filter(|row| matches_set(*row, set, include_any)).collect()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for MemoryRepository<T> {
    async fn save(&self, mut entity: T) -> Result<Uuid, DatabaseError> {
        stamp_for_save(&mut entity, Utc::now());
        let id = entity.id();

        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|row| row.id() == id) {
            Some(existing) => {
                entity.audit_mut().created_at = existing.audit().created_at;
                entity.audit_mut().deleted_at = existing.audit().deleted_at;
                *existing = entity;
            }
            None => rows.push(entity),
        }
        Ok(id)
    }

    async fn get_one(&self, set: &PredicateSet) -> Result<T, DatabaseError> {
        let rows = self.rows.read().await;
        Self::matching(&rows, set, true)
            .into_iter()
            .next()
            .cloned()
            .ok_or_else(not_found::<T>)
    }

    async fn get_many(&self, set: &PredicateSet) -> Result<Vec<T>, DatabaseError> {
        let rows = self.rows.read().await;
        let mut found: Vec<T> = Self::matching(&rows, set, true).into_iter().cloned().collect();

        if let Some(pagination) = &set.pagination {
            let field = pagination.sort.field;
            found.sort_by(|a, b| {
                let ordering = compare_values(&a.field(field), &b.field(field));
                match pagination.sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
            let offset = usize::try_from(pagination.offset()).unwrap_or(0);
            let limit = usize::try_from(pagination.limit).unwrap_or(0);
            found = found.into_iter().skip(offset).take(limit).collect();
        }

        Ok(found)
    }

    async fn count(&self, set: &PredicateSet) -> Result<i64, DatabaseError> {
        let rows = self.rows.read().await;
        Ok(Self::matching(&rows, set, false).len() as i64)
    }

    async fn delete(&self, entity: &T) -> Result<(), DatabaseError> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|row| row.id() == entity.id() && !row.is_deleted()) {
            Some(row) => {
                row.audit_mut().deleted_at = Some(Utc::now());
                Ok(())
            }
            None => Err(not_found::<T>()),
        }
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

fn matches_set<T: Entity>(row: &T, set: &PredicateSet, include_any: bool) -> bool {
    if !set.options.include_deleted && row.is_deleted() {
        return false;
    }

    let defaults = (!set.default.is_empty()).then(|| set.default.iter().all(|p| matches_predicate(row, p)));
    let any = (include_any && !set.any.is_empty()).then(|| set.any.iter().any(|p| matches_predicate(row, p)));

    match (defaults, any) {
        (Some(d), Some(o)) => d || o,
        (Some(d), None) => d,
        (None, Some(o)) => o,
        (None, None) => true,
    }
}

fn matches_predicate<T: Entity>(row: &T, predicate: &Predicate) -> bool {
    let Some(actual) = row.field(predicate.column) else {
        return false;
    };
    match predicate.comparison {
        Comparison::Eq => actual == predicate.value,
        Comparison::Like | Comparison::ILike => match (actual.as_text(), predicate.value.as_text()) {
            (Some(text), Some(pattern)) => like_match(pattern, text, predicate.comparison == Comparison::ILike),
            _ => false,
        },
    }
}

/// Ascending order with NULLs last, matching Postgres defaults.
fn compare_values(a: &Option<FilterValue>, b: &Option<FilterValue>) -> Ordering {
    use FilterValue::*;
    match (a, b) {
        (Some(Null), Some(Null)) | (None, None) => Ordering::Equal,
        (Some(Null), _) | (None, _) => Ordering::Greater,
        (_, Some(Null)) | (_, None) => Ordering::Less,
        (Some(Text(x)), Some(Text(y))) => x.cmp(y),
        (Some(Int(x)), Some(Int(y))) => x.cmp(y),
        (Some(Float(x)), Some(Float(y))) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (Some(Timestamp(x)), Some(Timestamp(y))) => x.cmp(y),
        (Some(Uuid(x)), Some(Uuid(y))) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum LikeToken {
    Literal(char),
    AnyChar,
    AnySequence,
}

fn tokenize_like(pattern: &str, fold_case: bool) -> Vec<LikeToken> {
    let mut tokens = Vec::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        let token = match c {
            '\\' => LikeToken::Literal(chars.next().unwrap_or('\\')),
            '%' => LikeToken::AnySequence,
            '_' => LikeToken::AnyChar,
            other => LikeToken::Literal(other),
        };
        tokens.push(match token {
            LikeToken::Literal(c) if fold_case => LikeToken::Literal(fold(c)),
            t => t,
        });
    }
    tokens
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// SQL `LIKE` semantics with `\` as the escape character.
pub fn like_match(pattern: &str, text: &str, case_insensitive: bool) -> bool {
    let tokens = tokenize_like(pattern, case_insensitive);
    let text: Vec<char> = if case_insensitive {
        text.chars().map(fold).collect()
    } else {
        text.chars().collect()
    };

    // reachable[j]: tokens consumed so far can match text[..j]
    let mut reachable = vec![false; text.len() + 1];
    reachable[0] = true;
    for token in tokens {
        let mut next = vec![false; text.len() + 1];
        match token {
            LikeToken::AnySequence => {
                let mut seen = false;
                for j in 0..=text.len() {
                    seen |= reachable[j];
                    next[j] = seen;
                }
            }
            LikeToken::AnyChar => {
                for j in 0..text.len() {
                    next[j + 1] = reachable[j];
                }
            }
            LikeToken::Literal(c) => {
                for j in 0..text.len() {
                    next[j + 1] = reachable[j] && text[j] == c;
                }
            }
        }
        reachable = next;
    }
    reachable[text.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Product;
    use crate::filter::{escape_like, Pagination, SortSpec};

    fn product(name: &str, stock: i64) -> Product {
        Product {
            outlet_id: Uuid::nil(),
            name: name.into(),
            description: "desc".into(),
            stock,
            price: 10.0,
            ..Default::default()
        }
    }

    #[test]
    fn like_handles_wildcards_and_escapes() {
        assert!(like_match("%ban%", "Banana", true));
        assert!(!like_match("%ban%", "Banana", false));
        assert!(like_match("a_c", "abc", false));
        assert!(!like_match("a_c", "abbc", false));
        let pattern = format!("%{}%", escape_like("50%"));
        assert!(like_match(&pattern, "save 50% now", false));
        assert!(!like_match(&pattern, "save 500 now", false));
        let underscore = format!("%{}%", escape_like("a_b"));
        assert!(!like_match(&underscore, "axb", false));
    }

    #[tokio::test]
    async fn save_then_get_one_by_id() {
        let repo = MemoryRepository::<Product>::new();
        let id = repo.save(product("Tea", 3)).await.unwrap();
        let found = repo.get_one(&PredicateSet::by_id(id)).await.unwrap();
        assert_eq!(found.name, "Tea");
        assert!(found.audit.deleted_at.is_none());
    }

    #[tokio::test]
    async fn resave_preserves_created_at() {
        let repo = MemoryRepository::<Product>::new();
        let id = repo.save(product("Tea", 3)).await.unwrap();
        let mut stored = repo.get_one(&PredicateSet::by_id(id)).await.unwrap();
        let created = stored.audit.created_at;

        stored.stock = 9;
        stored.audit.created_at = Utc::now() + chrono::Duration::days(3);
        assert_eq!(repo.save(stored).await.unwrap(), id);

        let reloaded = repo.get_one(&PredicateSet::by_id(id)).await.unwrap();
        assert_eq!(reloaded.stock, 9);
        assert_eq!(reloaded.audit.created_at, created);
        assert!(reloaded.audit.modified_at >= created);
        assert_eq!(repo.count(&PredicateSet::default()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn saving_unchanged_entity_twice_is_idempotent() {
        let repo = MemoryRepository::<Product>::new();
        let id = repo.save(product("Tea", 3)).await.unwrap();
        let first = repo.get_one(&PredicateSet::by_id(id)).await.unwrap();

        assert_eq!(repo.save(first.clone()).await.unwrap(), id);
        let second = repo.get_one(&PredicateSet::by_id(id)).await.unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.audit.created_at, first.audit.created_at);
        assert_eq!(second.audit.deleted_at, None);
        assert_eq!(
            Product { audit: Default::default(), ..second.clone() },
            Product { audit: Default::default(), ..first.clone() }
        );
        assert_eq!(repo.count(&PredicateSet::default()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn deleted_rows_are_hidden_unless_requested() {
        let repo = MemoryRepository::<Product>::new();
        let id = repo.save(product("Tea", 3)).await.unwrap();
        let stored = repo.get_one(&PredicateSet::by_id(id)).await.unwrap();
        repo.delete(&stored).await.unwrap();

        assert!(matches!(repo.get_one(&PredicateSet::by_id(id)).await, Err(DatabaseError::NotFound(_))));
        assert!(matches!(repo.delete(&stored).await, Err(DatabaseError::NotFound(_))));

        let raw = PredicateSet::builder().eq("id", id).include_deleted().build();
        let tombstone = repo.get_one(&raw).await.unwrap();
        assert!(tombstone.audit.deleted_at.is_some());
    }

    #[tokio::test]
    async fn fetch_pages_and_counts() {
        let repo = MemoryRepository::<Product>::new();
        for i in 1..=25 {
            repo.save(product(&format!("item {:02}", i), i)).await.unwrap();
        }
        let set = PredicateSet::builder()
            .paginate(Pagination {
                page: 2,
                limit: 10,
                sort: SortSpec { field: "stock", direction: SortDirection::Asc },
            })
            .build();
        let (rows, total) = repo.fetch(&set).await.unwrap();
        assert_eq!(total, 25);
        let stocks: Vec<i64> = rows.iter().map(|p| p.stock).collect();
        assert_eq!(stocks, (11..=20).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn count_ignores_or_bucket() {
        let repo = MemoryRepository::<Product>::new();
        repo.save(product("Tea", 1)).await.unwrap();
        repo.save(product("Coffee", 2)).await.unwrap();
        let set = PredicateSet::builder().eq("stock", 1_i64).or_eq("stock", 2_i64).build();
        assert_eq!(repo.get_many(&set).await.unwrap().len(), 2);
        assert_eq!(repo.count(&set).await.unwrap(), 1);
    }
}
