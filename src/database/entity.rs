use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, FromRow};
use uuid::Uuid;

use crate::database::models::audit::Audit;
use crate::filter::FilterValue;

/// A persisted resource: UUID primary key, audit triple, and a fixed set of
/// writable columns. Implemented by every model the repositories store.
pub trait Entity: Clone + Send + Sync + Unpin + for<'r> FromRow<'r, PgRow> + 'static {
    const TABLE: &'static str;
    /// Columns a caller may sort by.
    const SORTABLE: &'static [&'static str];

    fn id(&self) -> Uuid;
    fn set_id(&mut self, id: Uuid);
    fn audit(&self) -> &Audit;
    fn audit_mut(&mut self) -> &mut Audit;

    /// Writable columns excluding `id` and the audit columns, in table order.
    fn values(&self) -> Vec<(&'static str, FilterValue)>;

    fn field(&self, column: &str) -> Option<FilterValue> {
        match column {
            "id" => Some(FilterValue::Uuid(self.id())),
            "created_at" => Some(FilterValue::Timestamp(self.audit().created_at)),
            "modified_at" => Some(FilterValue::Timestamp(self.audit().modified_at)),
            "deleted_at" => Some(self.audit().deleted_at.into()),
            other => self.values().into_iter().find(|(name, _)| *name == other).map(|(_, v)| v),
        }
    }

    fn is_deleted(&self) -> bool {
        self.audit().deleted_at.is_some()
    }
}

/// Assign identity and stamp audit timestamps ahead of a save. A nil id marks
/// a new row. Returns whether the entity is new.
pub fn stamp_for_save<T: Entity>(entity: &mut T, now: DateTime<Utc>) -> bool {
    let is_new = entity.id().is_nil();
    if is_new {
        entity.set_id(Uuid::new_v4());
        entity.audit_mut().created_at = now;
    }
    entity.audit_mut().modified_at = now;
    is_new
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::merchant::Merchant;

    #[test]
    fn new_entities_get_identity_and_timestamps() {
        let now = Utc::now();
        let mut merchant = Merchant::default();
        assert!(stamp_for_save(&mut merchant, now));
        assert!(!merchant.id.is_nil());
        assert_eq!(merchant.audit.created_at, now);
        assert_eq!(merchant.audit.modified_at, now);
    }

    #[test]
    fn existing_entities_keep_created_at() {
        let created = Utc::now() - chrono::Duration::days(1);
        let mut merchant = Merchant { id: Uuid::new_v4(), ..Default::default() };
        merchant.audit.created_at = created;
        let now = Utc::now();
        assert!(!stamp_for_save(&mut merchant, now));
        assert_eq!(merchant.audit.created_at, created);
        assert_eq!(merchant.audit.modified_at, now);
    }

    #[test]
    fn field_reads_audit_and_values() {
        let merchant = Merchant { name: "Acme".into(), ..Default::default() };
        assert_eq!(merchant.field("name"), Some(FilterValue::Text("Acme".into())));
        assert_eq!(merchant.field("deleted_at"), Some(FilterValue::Null));
        assert_eq!(merchant.field("nope"), None);
    }
}
