pub mod file_controller;
pub mod product_controller;
