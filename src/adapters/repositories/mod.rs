mod mongo_product_repository;

pub use mongo_product_repository::MongoProductRepository;
