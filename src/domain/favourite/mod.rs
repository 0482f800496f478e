//! Favourite domain module

mod entity;
mod repository;

pub use entity::{Favourite, FavouriteId};
pub use repository::FavouriteRepository;

#[cfg(test)]
pub use repository::MockFavouriteRepository;
