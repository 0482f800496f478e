//! Favourite infrastructure - storage-backed repository and cached service

mod repository;
mod service;

pub use repository::StorageFavouriteRepository;
pub use service::{FavouriteService, FavouriteView};
