use sqlx::FromRow;
use uuid::Uuid;

use super::audit::Audit;
use crate::database::entity::Entity;
use crate::filter::FilterValue;

#[derive(Debug, Clone, Default, FromRow)]
pub struct Outlet {
    pub id: Uuid,
    pub merchant_id: Uuid,
    pub name: String,
    pub location: String,
    pub phone_number: String,
    #[sqlx(flatten)]
    pub audit: Audit,
}

impl Entity for Outlet {
    const TABLE: &'static str = "outlets";
    const SORTABLE: &'static [&'static str] = &["created_at", "modified_at", "name", "location"];

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
            ("merchant_id", self.merchant_id.into()),
            ("name", self.name.clone().into()),
            ("location", self.location.clone().into()),
            ("phone_number", self.phone_number.clone().into()),
        ]
    }
}
