/// コミュニティ機能のモジュール（投稿・コメント・いいね）
pub mod api;
pub mod mock_data;
pub mod models;

pub use api::{
    CommentListController, CommunityApi, PostComments, PostListController, COMMUNITY_PAGE_SIZE,
};
pub use models::{
    Comment, CommentRequest, LikeStatus, MessageResponse, Post, PostAuthor, PostRequest,
    PostStatus,
};
