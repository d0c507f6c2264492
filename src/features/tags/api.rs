use crate::features::tags::models::{Tag, TagRequest};
use crate::shared::api_client::ApiClient;
use crate::shared::errors::AppResult;
use crate::shared::validation::Validate;
use std::sync::Arc;

/// タグ管理API
#[derive(Clone)]
pub struct TagsApi {
    api_client: Arc<ApiClient>,
}

impl TagsApi {
    pub fn new(api_client: Arc<ApiClient>) -> Self {
        Self { api_client }
    }

    /// 全タグ（作成日時の新しい順）
    pub async fn list(&self) -> AppResult<Vec<Tag>> {
        self.api_client.get("/tags").await
    }

    pub async fn get(&self, id: i64) -> AppResult<Tag> {
        self.api_client.get(&format!("/tags/{id}")).await
    }

    /// 名前の部分一致でサーバー検索する
    pub async fn search(&self, name: &str) -> AppResult<Vec<Tag>> {
        self.api_client
            .get_with_query("/tags/search", &[("name", name)])
            .await
    }

    pub async fn create(&self, request: &TagRequest) -> AppResult<Tag> {
        request.validate()?;
        let tag: Tag = self.api_client.post("/tags", request).await?;
        log::info!("タグを作成しました: id={}, name={}", tag.id, tag.name);
        Ok(tag)
    }

    pub async fn update(&self, id: i64, request: &TagRequest) -> AppResult<Tag> {
        request.validate()?;
        let tag: Tag = self.api_client.put(&format!("/tags/{id}"), request).await?;
        log::info!("タグを更新しました: id={id}");
        Ok(tag)
    }

    /// タグを削除する（レスポンスボディなし）
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.api_client.delete(&format!("/tags/{id}")).await?;
        log::info!("タグを削除しました: id={id}");
        Ok(())
    }
}
