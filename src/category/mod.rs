//! Categories for grouping transactions, e.g. "Lazer", "Supermercado".

mod db;
mod domain;
mod endpoints;

pub use db::{
    create_category, create_category_table, delete_category, get_all_categories, get_category,
};
pub use domain::{Category, CategoryForm, CategoryId, CategoryName};
pub use endpoints::{
    create_category_endpoint, delete_category_endpoint, get_category_endpoint,
    list_categories_endpoint,
};
