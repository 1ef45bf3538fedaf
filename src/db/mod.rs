pub mod admin_repository;
pub mod response_repository;
pub mod schema;
