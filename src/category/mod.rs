//! Categories for expenses and income, and their sub-categories.

mod controller;
mod core;
mod db;
mod handlers;

pub use controller::CategoryController;
pub use handlers::{
    RenameCategory, create_category_endpoint, create_sub_category_endpoint,
    delete_category_endpoint, delete_sub_category_endpoint, get_category_endpoint,
    list_categories_endpoint, rename_category_endpoint,
};
pub use core::{
    Category, MAX_CATEGORY_NAME_LENGTH, RESERVED_CATEGORY_NAMES, SubCategory, validate_category,
    validate_category_name, validate_sub_category,
};
pub use db::{CategoryStore, SQLiteCategoryStore, create_category_tables};
