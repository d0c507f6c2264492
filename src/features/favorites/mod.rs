/// レシピのお気に入り機能
pub mod api;
pub mod models;

pub use api::{FavoriteListController, FavoritesApi, UserFavorites, FAVORITES_PAGE_SIZE};
pub use models::{Favorite, FavoriteCount, FavoriteStatus};
