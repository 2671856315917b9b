pub mod file_dto;
pub mod product_dto;
