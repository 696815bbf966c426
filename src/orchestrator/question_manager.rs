//! 题目列表管理器 - 编排层
//!
//! 负责加载分类与题目、打开新建/编辑表单、保存后重新加载，以及乐观删除。

use tracing::{debug, error, info, warn};

use crate::api::QuizApi;
use crate::error::{ApiError, AppError, AppResult};
use crate::models::{AnswerUpdate, Category, NewAnswer, Question};
use crate::workflow::{FormMode, QuestionForm, QuestionSubmission};

const LOAD_CATEGORIES_FAILED: &str = "加载分类失败";
const LOAD_QUESTIONS_FAILED: &str = "加载题目失败";
const DELETE_FAILED: &str = "删除题目失败，请重试";

/// 删除结果
#[derive(Debug)]
pub enum DeleteOutcome {
    /// 服务端确认删除，本地移除生效
    Confirmed,
    /// 服务端删除失败，已从服务端重新加载列表
    Reconciled { cause: ApiError },
}

/// 已在本地移除、等待服务端确认的删除
#[derive(Debug)]
#[must_use = "需要调用 finish_delete 完成删除"]
pub struct PendingDelete {
    question_id: i64,
    removed: Option<Question>,
}

impl PendingDelete {
    pub fn question_id(&self) -> i64 {
        self.question_id
    }

    /// 被本地移除的题目；不在列表中时为 None
    pub fn removed(&self) -> Option<&Question> {
        self.removed.as_ref()
    }
}

/// 题目列表管理器
pub struct QuestionManager<A: QuizApi> {
    api: A,
    category_slug: String,
    categories: Vec<Category>,
    /// 由 slug 推导出的分类 id，新建题目时使用
    category_id: Option<i64>,
    questions: Vec<Question>,
    loading: bool,
    error: Option<String>,
    /// 打开中的表单（弹窗）
    editor: Option<QuestionForm>,
}

impl<A: QuizApi> QuestionManager<A> {
    pub fn new(api: A, category_slug: impl Into<String>) -> Self {
        Self {
            api,
            category_slug: category_slug.into(),
            categories: Vec::new(),
            category_id: None,
            questions: Vec::new(),
            loading: false,
            error: None,
            editor: None,
        }
    }

    // ========== 读取状态 ==========

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn category_slug(&self) -> &str {
        &self.category_slug
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_id(&self) -> Option<i64> {
        self.category_id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// 错误横幅内容
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn editor(&self) -> Option<&QuestionForm> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut QuestionForm> {
        self.editor.as_mut()
    }

    // ========== 加载 ==========

    /// 挂载或切换分类时调用
    ///
    /// 分类与题目并发加载，互不影响：一边失败不会阻止另一边生效。
    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;
        info!("📋 正在加载分类 {} 的数据...", self.category_slug);

        let (categories, questions) = futures::join!(
            self.api.list_categories(),
            self.api.list_questions_by_category(&self.category_slug)
        );

        self.apply_categories(categories);
        self.apply_questions(questions);
        self.loading = false;
    }

    /// 切换到另一个分类并重新加载
    pub async fn set_category_slug(&mut self, slug: impl Into<String>) {
        self.category_slug = slug.into();
        self.category_id = None;
        self.editor = None;
        self.load().await;
    }

    /// 从服务端重新加载题目列表
    pub async fn reload_questions(&mut self) {
        self.loading = true;
        self.error = None;

        let result = self
            .api
            .list_questions_by_category(&self.category_slug)
            .await;

        self.apply_questions(result);
        self.loading = false;
    }

    fn apply_categories(&mut self, result: Result<Vec<Category>, ApiError>) {
        match result {
            Ok(categories) => {
                match categories.iter().find(|c| c.slug == self.category_slug) {
                    Some(category) => {
                        debug!(
                            "分类 {} 对应的 ID 为 {}",
                            self.category_slug, category.id
                        );
                        self.category_id = Some(category.id);
                    }
                    None => error!("没有找到 slug 为 {} 的分类", self.category_slug),
                }
                self.categories = categories;
            }
            Err(e) => {
                error!("❌ 加载分类失败: {}", e);
                self.error = Some(LOAD_CATEGORIES_FAILED.to_string());
            }
        }
    }

    fn apply_questions(&mut self, result: Result<Vec<Question>, ApiError>) {
        match result {
            Ok(questions) => {
                info!("✅ 成功加载 {} 道题目", questions.len());
                self.questions = questions;
            }
            Err(e) => {
                error!("❌ 加载分类 {} 的题目失败: {}", self.category_slug, e);
                // 分类也失败时两条都保留
                self.error = Some(match self.error.take() {
                    Some(previous) => format!("{}；{}", previous, LOAD_QUESTIONS_FAILED),
                    None => LOAD_QUESTIONS_FAILED.to_string(),
                });
            }
        }
    }

    // ========== 表单 ==========

    /// 打开新建表单，预设为当前分类
    pub fn open_create(&mut self) -> &mut QuestionForm {
        self.editor.insert(QuestionForm::new_create(self.category_id))
    }

    /// 打开编辑表单；题目不在列表中时返回 None
    pub fn open_edit(&mut self, question_id: i64) -> Option<&mut QuestionForm> {
        let question = self.questions.iter().find(|q| q.id == question_id)?;
        let form = QuestionForm::new_edit(question);
        Some(self.editor.insert(form))
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// 提交当前表单
    ///
    /// 保存成功后从服务端重新加载题目列表（不做本地合并）并关闭表单；
    /// 失败时表单保持打开并显示错误。
    pub async fn submit_editor(&mut self) -> AppResult<()> {
        let Some(mut form) = self.editor.take() else {
            return Err(AppError::Editor("没有打开的表单".to_string()));
        };

        let api = &self.api;
        let mode = form.mode();
        let result = form
            .submit(move |submission| save_question(api, mode, submission))
            .await;

        match result {
            Ok(()) => {
                self.reload_questions().await;
                Ok(())
            }
            Err(e) => {
                self.editor = Some(form);
                Err(e)
            }
        }
    }

    // ========== 删除 ==========

    /// 乐观删除
    ///
    /// 1. 先从本地列表移除；2. 调用删除接口；3. 失败时从服务端重新加载
    /// 列表以撤销本地移除，并显示错误横幅。
    pub async fn delete_question(&mut self, question_id: i64) -> DeleteOutcome {
        let pending = self.begin_delete(question_id);
        self.finish_delete(pending).await
    }

    /// 删除第一步：本地移除
    pub fn begin_delete(&mut self, question_id: i64) -> PendingDelete {
        self.loading = true;
        self.error = None;
        info!("🗑️ 正在删除题目 ID: {}", question_id);

        let position = self.questions.iter().position(|q| q.id == question_id);
        if position.is_none() {
            debug!("题目 {} 不在本地列表中", question_id);
        }
        let removed = position.map(|index| self.questions.remove(index));

        PendingDelete {
            question_id,
            removed,
        }
    }

    /// 删除第二、三步：调用接口，失败时与服务端对账
    pub async fn finish_delete(&mut self, pending: PendingDelete) -> DeleteOutcome {
        let question_id = pending.question_id;

        let outcome = match self.api.delete_question(question_id).await {
            Ok(()) => {
                info!("✅ 题目 {} 删除成功", question_id);
                DeleteOutcome::Confirmed
            }
            Err(cause) => {
                warn!("❌ 删除题目 {} 失败: {}，正在重新同步列表", question_id, cause);
                self.reload_questions().await;
                self.error = Some(DELETE_FAILED.to_string());
                DeleteOutcome::Reconciled { cause }
            }
        };

        self.loading = false;
        outcome
    }
}

/// 把表单数据转成接口请求；新建与更新的答案格式刻意不同
async fn save_question<A: QuizApi>(
    api: &A,
    mode: FormMode,
    submission: QuestionSubmission,
) -> AppResult<()> {
    match mode {
        FormMode::Create => {
            let answers: Vec<NewAnswer> = submission
                .answers
                .into_iter()
                .map(|a| NewAnswer {
                    answer: a.text,
                    correct: a.correct,
                })
                .collect();

            info!("➕ 创建题目: {}", submission.text);
            api.create_question(submission.category_id, &submission.text, &answers)
                .await?;
        }
        FormMode::Edit { question_id } => {
            let answers: Vec<AnswerUpdate> = submission
                .answers
                .into_iter()
                .map(|a| AnswerUpdate {
                    id: a.id,
                    answer: a.text,
                    correct: a.correct,
                    question_id,
                })
                .collect();

            info!("✏️ 更新题目 ID: {}", question_id);
            api.update_question(question_id, &submission.text, submission.category_id, &answers)
                .await?;
        }
    }

    Ok(())
}
