//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 把 API 客户端和表单串起来，维护页面上的题目列表。
//!
//! ## 层次关系
//!
//! ```text
//! question_manager (分类 + 题目列表 + 弹窗)
//!     ↓
//! workflow::QuestionForm (单个题目的编辑表单)
//!     ↓
//! api::QuizApi (HTTP 调用)
//!     ↓
//! models::normalize (原始 JSON → 统一结构)
//! ```

pub mod question_manager;

pub use question_manager::{DeleteOutcome, PendingDelete, QuestionManager};
