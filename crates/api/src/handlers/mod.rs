pub mod account;
pub mod admin;
pub mod category;
pub mod portfolio;
pub mod role;
pub mod section;
pub mod task;
pub mod user;
pub mod work_item;
