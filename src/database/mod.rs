pub mod entity;
pub mod manager;
pub mod memory;
pub mod models;
pub mod query_builder;
pub mod repository;

use std::sync::Arc;

use sqlx::PgPool;

pub use entity::Entity;
pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryRepository;
pub use repository::{PgRepository, Repository};

use models::{Merchant, Outlet, Product, User};

/// One repository per resource, behind the shared contract.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn Repository<User>>,
    pub merchants: Arc<dyn Repository<Merchant>>,
    pub outlets: Arc<dyn Repository<Outlet>>,
    pub products: Arc<dyn Repository<Product>>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgRepository::<User>::new(pool.clone())),
            merchants: Arc::new(PgRepository::<Merchant>::new(pool.clone())),
            outlets: Arc::new(PgRepository::<Outlet>::new(pool.clone())),
            products: Arc::new(PgRepository::<Product>::new(pool)),
        }
    }

    pub fn memory() -> Self {
        Self {
            users: Arc::new(MemoryRepository::<User>::new()),
            merchants: Arc::new(MemoryRepository::<Merchant>::new()),
            outlets: Arc::new(MemoryRepository::<Outlet>::new()),
            products: Arc::new(MemoryRepository::<Product>::new()),
        }
    }
}
