/// レシピ評価機能
pub mod api;
pub mod models;

pub use api::{HighRatedQuery, RatingListController, RatingsApi, RecipeRatings, RATINGS_PAGE_SIZE};
pub use models::{AverageRating, Rating, RatingRequest, SavedRating, UserRatingStatus};
