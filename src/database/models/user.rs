use sqlx::FromRow;
use uuid::Uuid;

use super::audit::Audit;
use crate::database::entity::Entity;
use crate::filter::FilterValue;

/// Account row. `password` always holds a bcrypt hash.
#[derive(Debug, Clone, Default, FromRow)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
    #[sqlx(flatten)]
    pub audit: Audit,
}

impl Entity for User {
    const TABLE: &'static str = "users";
    const SORTABLE: &'static [&'static str] =
        &["created_at", "modified_at", "first_name", "last_name", "email", "phone_number"];

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
            ("first_name", self.first_name.clone().into()),
            ("last_name", self.last_name.clone().into()),
            ("email", self.email.clone().into()),
            ("password", self.password.clone().into()),
            ("phone_number", self.phone_number.clone().into()),
        ]
    }
}
