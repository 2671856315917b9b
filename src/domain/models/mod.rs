pub mod file;
pub mod product;
