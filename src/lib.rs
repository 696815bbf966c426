//! # Quiz Admin
//!
//! 题库后台（分类 / 题目 / 选择题答案）的客户端核心
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - Category / Question / Answer 以及原始 JSON 的归一化
//!
//! ### ② 接口层（API）
//! - `api/` - `QuizApi` trait、基于 reqwest 的 `QuizClient`、URL 解析（直连 / 同源代理）
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - `QuestionForm`，单个题目的编辑表单状态机
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - `QuestionManager`，题目列表加载、保存后重载、乐观删除
//!
//! ### 其他
//! - `services/` - `WarmupProbe`，启动时唤醒后端
//! - `config` / `error` / `utils` - 配置、错误类型、日志
//!
//! ## 模块结构

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use api::{QuizApi, QuizClient};
pub use app::App;
pub use config::Config;
pub use error::{ApiError, AppError, AppResult, ValidationError};
pub use models::{Answer, Category, Question};
pub use orchestrator::{DeleteOutcome, QuestionManager};
pub use services::WarmupProbe;
pub use workflow::{FormMode, QuestionForm};
