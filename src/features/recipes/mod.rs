/// レシピ機能のモジュール
pub mod api;
pub mod mock_data;
pub mod models;

pub use api::{RecipeApi, RecipeListController, RECIPE_PAGE_SIZE};
pub use models::{DifficultyLevel, ImportResult, Recipe, RecipeAuthor, RecipeIngredient};
