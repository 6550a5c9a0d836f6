pub mod attach_custom_time;
pub mod create_product;
pub mod list_products;
mod subscribers;
