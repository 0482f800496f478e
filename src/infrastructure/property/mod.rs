//! Property infrastructure - storage-backed repository and cached service

mod repository;
mod service;

pub use repository::StoragePropertyRepository;
pub use service::PropertyService;
