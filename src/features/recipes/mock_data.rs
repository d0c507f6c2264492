//! APIに接続できないときに表示する固定レシピ

use crate::features::listing::query::{ListQuery, SortOrder};
use crate::features::recipes::models::{DifficultyLevel, Recipe, RecipeAuthor};
use std::cmp::Ordering;

struct Entry {
    id: i64,
    name: &'static str,
    description: &'static str,
    category: &'static str,
    difficulty: &'static str,
    cooking_time: u32,
    servings: u32,
    author: &'static str,
}

const ENTRIES: [Entry; 20] = [
    Entry { id: 1, name: "김치찌개", description: "매콤하고 시원한 김치찌개로 몸을 따뜻하게 해주는 한국의 대표 찌개", category: "한식", difficulty: "쉬움", cooking_time: 30, servings: 2, author: "김치마스터" },
    Entry { id: 2, name: "크림 파스타", description: "부드럽고 진한 크림소스가 일품인 이탈리안 파스타", category: "양식", difficulty: "보통", cooking_time: 25, servings: 2, author: "파스타셰프" },
    Entry { id: 3, name: "찜갈비", description: "부드럽고 달콤한 갈비찜으로 가족 모두가 좋아하는 한식의 대표", category: "한식", difficulty: "어려움", cooking_time: 90, servings: 4, author: "한식요리사" },
    Entry { id: 4, name: "연어 초밥", description: "신선한 연어로 만드는 일본의 대표적인 초밥", category: "일식", difficulty: "어려움", cooking_time: 60, servings: 2, author: "스시마스터" },
    Entry { id: 5, name: "뉴욕 치즈케이크", description: "진한 치즈맛이 일품인 클래식한 뉴욕 스타일 치즈케이크", category: "디저트", difficulty: "보통", cooking_time: 120, servings: 8, author: "디저트셰프" },
    Entry { id: 6, name: "닭볶음탕", description: "매콤달콤한 닭볶음탕으로 입맛을 돋우는 한국의 대표 요리", category: "한식", difficulty: "보통", cooking_time: 45, servings: 3, author: "닭요리사" },
    Entry { id: 7, name: "리조또", description: "부드럽고 크림 같은 이탈리안 리조또", category: "양식", difficulty: "보통", cooking_time: 35, servings: 2, author: "이탈리안셰프" },
    Entry { id: 8, name: "돈코츠 라멘", description: "진한 돼지뼈 국물이 일품인 일본의 대표 라멘", category: "일식", difficulty: "어려움", cooking_time: 180, servings: 2, author: "라멘마스터" },
    Entry { id: 9, name: "시저 샐러드", description: "신선한 로메인과 시저 드레싱이 일품인 클래식 샐러드", category: "건강식", difficulty: "매우 쉬움", cooking_time: 15, servings: 1, author: "헬시셰프" },
    Entry { id: 10, name: "김밥", description: "간단하고 맛있는 김밥으로 언제든 즐길 수 있는 한국의 대표 간식", category: "간편요리", difficulty: "쉬움", cooking_time: 20, servings: 2, author: "김밥마스터" },
    Entry { id: 11, name: "립아이 스테이크", description: "부드럽고 육즙이 풍부한 소고기 립아이 스테이크", category: "양식", difficulty: "어려움", cooking_time: 40, servings: 2, author: "스테이크셰프" },
    Entry { id: 12, name: "떡볶이", description: "매콤달콤한 떡볶이로 한국의 대표 길거리 음식", category: "간편요리", difficulty: "쉬움", cooking_time: 15, servings: 2, author: "떡볶이마스터" },
    Entry { id: 13, name: "마르게리타 피자", description: "토마토, 모짜렐라, 바질이 조화를 이룬 이탈리안 피자", category: "양식", difficulty: "보통", cooking_time: 30, servings: 4, author: "피자마스터" },
    Entry { id: 14, name: "된장찌개", description: "구수하고 시원한 된장찌개로 한국인의 소울푸드", category: "한식", difficulty: "쉬움", cooking_time: 25, servings: 2, author: "된장마스터" },
    Entry { id: 15, name: "딸기 타르트", description: "달콤한 딸기와 바삭한 타르트가 만나 완성되는 프랑스 디저트", category: "디저트", difficulty: "어려움", cooking_time: 150, servings: 6, author: "타르트셰프" },
    Entry { id: 16, name: "카페라떼", description: "진한 에스프레소와 부드러운 우유가 만나 완성되는 이탈리안 커피", category: "음료", difficulty: "매우 쉬움", cooking_time: 5, servings: 1, author: "바리스타" },
    Entry { id: 17, name: "불고기", description: "달콤한 양념에 재운 소고기 불고기로 한국의 대표 고기 요리", category: "한식", difficulty: "보통", cooking_time: 30, servings: 3, author: "불고기마스터" },
    Entry { id: 18, name: "스시 세트", description: "신선한 생선과 완벽한 샤리의 조화로 이루어진 일본의 대표 요리", category: "일식", difficulty: "어려움", cooking_time: 120, servings: 2, author: "스시마스터" },
    Entry { id: 19, name: "플러피 팬케이크", description: "부드럽고 폭신한 팬케이크로 완벽한 브런치 메뉴", category: "디저트", difficulty: "쉬움", cooking_time: 20, servings: 3, author: "브런치셰프" },
    Entry { id: 20, name: "비빔밥", description: "다양한 나물과 고추장이 어우러진 한국의 대표 한정식", category: "한식", difficulty: "쉬움", cooking_time: 20, servings: 2, author: "비빔밥마스터" },
];

impl Entry {
    fn to_recipe(&self) -> Recipe {
        Recipe {
            id: self.id,
            name: self.name.to_string(),
            description: Some(self.description.to_string()),
            instructions: None,
            cooking_time: Some(self.cooking_time),
            servings: Some(self.servings),
            difficulty_level: DifficultyLevel::from_label(self.difficulty),
            category: Some(self.category.to_string()),
            image_url: None,
            ingredients: Vec::new(),
            author: Some(RecipeAuthor {
                id: self.id,
                username: self.author.to_string(),
                display_name: Some(self.author.to_string()),
                avatar_url: None,
            }),
            created_at: None,
            updated_at: None,
        }
    }
}

/// 固定レシピ全件
pub fn all_recipes() -> Vec<Recipe> {
    ENTRIES.iter().map(Entry::to_recipe).collect()
}

/// 検索条件を適用した固定レシピ
///
/// キーワード（名前・説明）、カテゴリ、難易度で絞り込み、並び替える。
/// ページ分割はせず全件を1ページとして返す。
pub fn recipes_for(query: &ListQuery) -> Vec<Recipe> {
    let keyword = query.keyword.trim().to_lowercase();
    let difficulty = query
        .difficulty_level
        .as_deref()
        .map(DifficultyLevel::from_label);

    let mut recipes: Vec<Recipe> = all_recipes()
        .into_iter()
        .filter(|recipe| {
            keyword.is_empty()
                || recipe.name.to_lowercase().contains(&keyword)
                || recipe
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&keyword))
        })
        .filter(|recipe| match &query.category {
            Some(category) => recipe.category.as_ref() == Some(category),
            None => true,
        })
        .filter(|recipe| match difficulty {
            Some(level) => level.is_some() && recipe.difficulty_level == level,
            None => true,
        })
        .collect();

    recipes.sort_by(|a, b| {
        let ordering = compare(a, b, &query.sort_by);
        match query.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    recipes
}

/// 昇順の比較。createdAt はIDが大きいほど新しい
fn compare(a: &Recipe, b: &Recipe, sort_by: &str) -> Ordering {
    match sort_by {
        "name" => a.name.cmp(&b.name),
        "cookingTime" => a
            .cooking_time
            .unwrap_or(0)
            .cmp(&b.cooking_time.unwrap_or(0)),
        "servings" => a.servings.unwrap_or(0).cmp(&b.servings.unwrap_or(0)),
        _ => a.id.cmp(&b.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(recipes: &[Recipe]) -> Vec<i64> {
        recipes.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_default_is_newest_first() {
        let recipes = recipes_for(&ListQuery::new(12));
        assert_eq!(recipes.len(), 20);
        assert_eq!(recipes[0].id, 20);
        assert_eq!(recipes[19].id, 1);
    }

    #[test]
    fn test_keyword_matches_name_and_description() {
        let mut query = ListQuery::new(12);
        query.keyword = "찌개".to_string();
        assert_eq!(ids(&recipes_for(&query)), vec![14, 1]);

        query.keyword = "이탈리안".to_string();
        let found = ids(&recipes_for(&query));
        assert_eq!(found, vec![16, 13, 7, 2]);
    }

    #[test]
    fn test_category_and_difficulty_filters() {
        let mut query = ListQuery::new(12);
        query.category = Some("일식".to_string());
        query.difficulty_level = Some("HARD".to_string());
        assert_eq!(ids(&recipes_for(&query)), vec![18, 8, 4]);

        // 「매우 쉬움」と「쉬움」はどちらも EASY
        let mut query = ListQuery::new(12);
        query.difficulty_level = Some("쉬움".to_string());
        let easy = recipes_for(&query);
        assert!(easy.iter().any(|r| r.id == 9));
        assert!(easy.iter().any(|r| r.id == 1));
    }

    #[test]
    fn test_unknown_difficulty_matches_nothing() {
        let mut query = ListQuery::new(12);
        query.difficulty_level = Some("EXPERT".to_string());
        assert!(recipes_for(&query).is_empty());
    }

    #[test]
    fn test_sort_by_cooking_time_ascending() {
        let mut query = ListQuery::new(12);
        query.sort_by = "cookingTime".to_string();
        query.sort_order = SortOrder::Asc;

        let recipes = recipes_for(&query);
        assert_eq!(recipes[0].name, "카페라떼");
        assert_eq!(recipes[19].name, "돈코츠 라멘");
    }
}
