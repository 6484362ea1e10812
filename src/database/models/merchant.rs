use sqlx::FromRow;
use uuid::Uuid;

use super::audit::Audit;
use crate::database::entity::Entity;
use crate::filter::FilterValue;

#[derive(Debug, Clone, Default, FromRow)]
pub struct Merchant {
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    pub name: String,
    pub institution_name: String,
    pub phone_number: String,
    #[sqlx(flatten)]
    pub audit: Audit,
}

impl Entity for Merchant {
    const TABLE: &'static str = "merchants";
    const SORTABLE: &'static [&'static str] = &["created_at", "modified_at", "name", "institution_name"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }

    fn values(&self) -> Vec<(&'static str, FilterValue)> {
        vec![
            ("user_id", self.user_id.into()),
            ("name", self.name.clone().into()),
            ("institution_name", self.institution_name.clone().into()),
            ("phone_number", self.phone_number.clone().into()),
        ]
    }
}
