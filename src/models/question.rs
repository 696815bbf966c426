use serde::{Deserialize, Serialize};

/// 题目分类
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub title: String,
    /// URL 安全的唯一标识
    pub slug: String,
}

/// 题目
///
/// 题目独占自己的答案列表；分类只按 id 引用
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub category_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub answers: Vec<Answer>,
}

/// 答案
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    /// 未持久化的答案没有 id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub answer: String,
    pub correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_id: Option<i64>,
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let preview = crate::utils::logging::truncate_text(&self.question, 80);
        write!(f, "#{} {} [{} 个答案]", self.id, preview, self.answers.len())
    }
}

// ========== 请求体 ==========

/// 创建题目时的答案，不带 id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAnswer {
    pub answer: String,
    pub correct: bool,
}

/// 更新题目时的答案，已持久化的答案带上 id，由服务端做增删比对
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub answer: String,
    pub correct: bool,
    pub question_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateQuestionBody<'a> {
    pub category_id: i64,
    pub question: &'a str,
    pub answers: &'a [NewAnswer],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateQuestionBody<'a> {
    pub question: &'a str,
    pub category_id: i64,
    pub answers: &'a [AnswerUpdate],
}
