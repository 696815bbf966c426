//! API 模块
//!
//! 负责所有与题库后台的交互

pub mod client;
pub mod url;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{AnswerUpdate, Category, NewAnswer, Question};

pub use client::QuizClient;
pub use url::{resolve, Environment};

/// 题库后台能力
///
/// 列表管理器只依赖这个 trait，测试里可以换成内存实现
#[async_trait]
pub trait QuizApi: Send + Sync {
    /// 获取全部分类
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError>;

    /// 按 slug 获取单个分类
    async fn get_category(&self, slug: &str) -> Result<Category, ApiError>;

    /// 获取某分类下的题目；负载形状不对时返回空列表
    async fn list_questions_by_category(&self, slug: &str) -> Result<Vec<Question>, ApiError>;

    /// 创建题目，答案不带 id
    async fn create_question(
        &self,
        category_id: i64,
        text: &str,
        answers: &[NewAnswer],
    ) -> Result<Question, ApiError>;

    /// 整体替换题目，调用方必须提供完整答案集
    async fn update_question(
        &self,
        id: i64,
        text: &str,
        category_id: i64,
        answers: &[AnswerUpdate],
    ) -> Result<Question, ApiError>;

    /// 删除题目
    async fn delete_question(&self, id: i64) -> Result<(), ApiError>;
}
