use sqlx::FromRow;
use uuid::Uuid;

use super::audit::Audit;
use crate::database::entity::Entity;
use crate::filter::FilterValue;

#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub outlet_id: Uuid,
    pub name: String,
    pub description: String,
    pub stock: i64,
    pub price: f64,
    /// Stored file name of the uploaded image, if any
    pub image: Option<String>,
    #[sqlx(flatten)]
    pub audit: Audit,
}

impl Entity for Product {
    const TABLE: &'static str = "products";
    const SORTABLE: &'static [&'static str] = &["created_at", "modified_at", "name", "stock", "price"];

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
            ("outlet_id", self.outlet_id.into()),
            ("name", self.name.clone().into()),
            ("description", self.description.clone().into()),
            ("stock", self.stock.into()),
            ("price", self.price.into()),
            ("image", self.image.clone().into()),
        ]
    }
}
