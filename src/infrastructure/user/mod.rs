//! User infrastructure

mod repository;

pub use repository::StorageUserRepository;
