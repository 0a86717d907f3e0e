//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod auth_token_repo;
pub mod category_repo;
pub mod permission_repo;
pub mod portfolio_repo;
pub mod profile_repo;
pub mod role_repo;
pub mod section_repo;
pub mod task_repo;
pub mod user_repo;
pub mod work_item_repo;

pub use auth_token_repo::AuthTokenRepo;
pub use category_repo::CategoryRepo;
pub use permission_repo::PermissionRepo;
pub use portfolio_repo::PortfolioRepo;
pub use profile_repo::ProfileRepo;
pub use role_repo::{RoleRepo, RoleTypeRepo};
pub use section_repo::SectionRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
pub use work_item_repo::WorkItemRepo;
