pub mod audit;
pub mod merchant;
pub mod outlet;
pub mod product;
pub mod user;

pub use audit::Audit;
pub use merchant::Merchant;
pub use outlet::Outlet;
pub use product::Product;
pub use user::User;
