//! 题目编辑表单 - 流程层
//!
//! 核心职责：收集题干、分类与有序答案列表，校验后交给保存回调
//!
//! 表单模式（新建 / 编辑）在构造时确定，不再根据字段内容推断。

use std::future::Future;
use tracing::{debug, info, warn};

use crate::error::{AppError, ValidationError};
use crate::models::Question;

/// 新建表单的默认答案数
const TEMPLATE_ANSWER_COUNT: usize = 4;
/// 答案数下限
const MIN_ANSWERS: usize = 2;

/// 表单模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// 新建题目，提交成功后重置
    Create,
    /// 编辑已有题目，提交成功后保留内容
    Edit { question_id: i64 },
}

/// 表单中的一条答案
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerDraft {
    /// 已持久化的答案才有 id
    pub id: Option<i64>,
    pub text: String,
    pub correct: bool,
}

impl AnswerDraft {
    pub fn new(text: impl Into<String>, correct: bool) -> Self {
        Self {
            id: None,
            text: text.into(),
            correct,
        }
    }
}

/// 通过校验后交给保存回调的数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSubmission {
    pub category_id: i64,
    pub text: String,
    pub answers: Vec<AnswerDraft>,
}

/// 题目编辑表单
#[derive(Debug, Clone)]
pub struct QuestionForm {
    mode: FormMode,
    /// 外部预设的分类（此时不显示分类选择）
    preset_category_id: Option<i64>,
    /// 表单内选择的分类
    category_id: Option<i64>,
    question_text: String,
    answers: Vec<AnswerDraft>,
    error: Option<String>,
    submitting: bool,
}

impl QuestionForm {
    /// 创建新建模式的表单
    pub fn new_create(preset_category_id: Option<i64>) -> Self {
        Self {
            mode: FormMode::Create,
            preset_category_id,
            category_id: None,
            question_text: String::new(),
            answers: template_answers(),
            error: None,
            submitting: false,
        }
    }

    /// 用已有题目创建编辑模式的表单
    pub fn new_edit(question: &Question) -> Self {
        let answers = question
            .answers
            .iter()
            .map(|a| AnswerDraft {
                id: a.id,
                text: a.answer.clone(),
                correct: a.correct,
            })
            .collect();

        Self {
            mode: FormMode::Edit {
                question_id: question.id,
            },
            preset_category_id: Some(question.category_id).filter(|id| *id != 0),
            category_id: None,
            question_text: question.question.clone(),
            answers,
            error: None,
            submitting: false,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_create(&self) -> bool {
        self.mode == FormMode::Create
    }

    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    pub fn answers(&self) -> &[AnswerDraft] {
        &self.answers
    }

    /// 当前展示的错误信息
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// 是否需要显示分类选择
    pub fn needs_category_choice(&self) -> bool {
        self.preset_category_id.is_none()
    }

    /// 生效的分类：预设优先，其次表单内选择
    pub fn active_category_id(&self) -> Option<i64> {
        self.preset_category_id.or(self.category_id)
    }

    /// 提交按钮文字
    pub fn submit_label(&self) -> &'static str {
        match (self.submitting, self.mode) {
            (true, _) => "保存中...",
            (false, FormMode::Create) => "创建题目",
            (false, FormMode::Edit { .. }) => "更新题目",
        }
    }

    pub fn set_question_text(&mut self, text: impl Into<String>) {
        self.question_text = text.into();
    }

    pub fn select_category(&mut self, category_id: Option<i64>) {
        self.category_id = category_id;
    }

    pub fn set_answer_text(&mut self, index: usize, text: impl Into<String>) {
        if let Some(answer) = self.answers.get_mut(index) {
            answer.text = text.into();
        }
    }

    /// 设置答案是否正确
    ///
    /// 设为正确时，其余答案全部取消正确，始终最多一个正确答案。
    pub fn set_correct(&mut self, index: usize, correct: bool) {
        if index >= self.answers.len() {
            return;
        }

        if correct {
            for (i, answer) in self.answers.iter_mut().enumerate() {
                answer.correct = i == index;
            }
        } else {
            self.answers[index].correct = false;
        }
    }

    /// 追加一条空的错误答案
    pub fn add_answer(&mut self) {
        self.answers.push(AnswerDraft::default());
    }

    /// 删除答案
    ///
    /// 答案数不超过下限时不做任何事，返回 false。删掉的是正确答案时，
    /// 剩下的第一条变为正确。
    pub fn remove_answer(&mut self, index: usize) -> bool {
        if self.answers.len() <= MIN_ANSWERS || index >= self.answers.len() {
            return false;
        }

        let removed = self.answers.remove(index);
        if removed.correct {
            self.answers[0].correct = true;
        }
        true
    }

    /// 按顺序校验，遇到第一个问题立即返回
    pub fn validate(&self) -> Result<QuestionSubmission, ValidationError> {
        if self.question_text.trim().is_empty() {
            return Err(ValidationError::EmptyQuestion);
        }

        if self.answers.iter().any(|a| a.text.trim().is_empty()) {
            return Err(ValidationError::EmptyAnswer);
        }

        if !self.answers.iter().any(|a| a.correct) {
            return Err(ValidationError::NoCorrectAnswer);
        }

        let category_id = self
            .active_category_id()
            .ok_or(ValidationError::MissingCategory)?;

        if self.answers.len() < MIN_ANSWERS {
            return Err(ValidationError::TooFewAnswers);
        }

        Ok(QuestionSubmission {
            category_id,
            text: self.question_text.clone(),
            answers: self.answers.clone(),
        })
    }

    /// 提交表单
    ///
    /// 校验失败时不会调用 `save`。保存成功后新建表单重置为模板，编辑表单
    /// 保持原样；保存失败时把错误信息显示在表单上，内容不变，可以重试。
    pub async fn submit<F, Fut>(&mut self, save: F) -> Result<(), AppError>
    where
        F: FnOnce(QuestionSubmission) -> Fut,
        Fut: Future<Output = Result<(), AppError>>,
    {
        self.error = None;

        let submission = match self.validate() {
            Ok(submission) => submission,
            Err(e) => {
                debug!("表单校验未通过: {}", e);
                self.error = Some(e.to_string());
                return Err(e.into());
            }
        };

        self.submitting = true;
        let result = save(submission).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                info!("✓ 表单提交成功 ({:?})", self.mode);
                if self.is_create() {
                    self.reset();
                }
                Ok(())
            }
            Err(e) => {
                warn!("⚠️ 表单保存失败: {}", e);
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// 恢复为新建模板；预设分类保留
    fn reset(&mut self) {
        self.question_text.clear();
        self.answers = template_answers();
        self.error = None;
    }
}

/// 新建模板：四条空答案，第一条预设为正确
fn template_answers() -> Vec<AnswerDraft> {
    (0..TEMPLATE_ANSWER_COUNT)
        .map(|i| AnswerDraft::new("", i == 0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::models::Answer;
    use std::cell::Cell;

    fn filled_form() -> QuestionForm {
        let mut form = QuestionForm::new_create(Some(3));
        form.set_question_text("2+2?");
        for (i, text) in ["4", "5", "6", "22"].iter().enumerate() {
            form.set_answer_text(i, *text);
        }
        form
    }

    fn correct_count(form: &QuestionForm) -> usize {
        form.answers().iter().filter(|a| a.correct).count()
    }

    #[test]
    fn test_template_has_four_answers_first_correct() {
        let form = QuestionForm::new_create(None);
        assert_eq!(form.answers().len(), 4);
        assert!(form.answers()[0].correct);
        assert_eq!(correct_count(&form), 1);
        assert!(form.needs_category_choice());
        assert_eq!(form.submit_label(), "创建题目");
    }

    #[test]
    fn test_set_correct_leaves_exactly_one() {
        let mut form = filled_form();
        for i in 0..form.answers().len() {
            form.set_correct(i, true);
            assert_eq!(correct_count(&form), 1);
            assert!(form.answers()[i].correct);
        }
    }

    #[test]
    fn test_set_correct_false_only_clears_that_answer() {
        let mut form = filled_form();
        form.set_correct(2, true);
        form.set_correct(2, false);
        assert_eq!(correct_count(&form), 0);
    }

    #[test]
    fn test_remove_at_minimum_is_noop() {
        let mut form = filled_form();
        assert!(form.remove_answer(3));
        assert!(form.remove_answer(2));
        let before = form.answers().to_vec();

        assert!(!form.remove_answer(0));
        assert_eq!(form.answers(), before.as_slice());
    }

    #[test]
    fn test_remove_correct_answer_promotes_first() {
        let mut form = filled_form();
        form.set_correct(2, true);

        assert!(form.remove_answer(2));
        assert_eq!(form.answers().len(), 3);
        assert_eq!(correct_count(&form), 1);
        assert!(form.answers()[0].correct);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut form = filled_form();
        assert!(!form.remove_answer(10));
        assert_eq!(form.answers().len(), 4);
    }

    #[test]
    fn test_add_answer_appends_empty_incorrect() {
        let mut form = filled_form();
        form.add_answer();
        assert_eq!(form.answers().len(), 5);
        assert_eq!(form.answers()[4], AnswerDraft::default());
    }

    #[test]
    fn test_validation_order_short_circuits() {
        let mut form = QuestionForm::new_create(None);
        form.set_correct(0, false);
        // 题干、答案、正确答案、分类全都缺，只报第一个
        assert_eq!(form.validate(), Err(ValidationError::EmptyQuestion));

        form.set_question_text("   ");
        assert_eq!(form.validate(), Err(ValidationError::EmptyQuestion));

        form.set_question_text("Q");
        assert_eq!(form.validate(), Err(ValidationError::EmptyAnswer));

        for i in 0..4 {
            form.set_answer_text(i, "a");
        }
        assert_eq!(form.validate(), Err(ValidationError::NoCorrectAnswer));

        form.set_correct(1, true);
        assert_eq!(form.validate(), Err(ValidationError::MissingCategory));

        form.select_category(Some(8));
        assert_eq!(form.validate().map(|s| s.category_id), Ok(8));
    }

    #[test]
    fn test_edit_seed_with_single_answer_is_rejected() {
        let question = Question {
            id: 5,
            question: "Q".to_string(),
            category_id: 1,
            category: None,
            answers: vec![Answer {
                id: Some(1),
                answer: "only".to_string(),
                correct: true,
                question_id: Some(5),
            }],
        };
        let form = QuestionForm::new_edit(&question);
        assert_eq!(form.validate(), Err(ValidationError::TooFewAnswers));
    }

    #[tokio::test]
    async fn test_empty_answer_blocks_save() {
        let mut form = filled_form();
        form.set_answer_text(1, "");
        let called = Cell::new(false);

        let result = form
            .submit(|_| async {
                called.set(true);
                Ok(())
            })
            .await;

        assert!(matches!(
            result,
            Err(AppError::Validation(ValidationError::EmptyAnswer))
        ));
        assert!(!called.get());
        assert_eq!(form.error(), Some("答案内容不能为空"));
    }

    #[tokio::test]
    async fn test_no_correct_answer_blocks_save() {
        let mut form = filled_form();
        form.set_correct(0, false);
        let called = Cell::new(false);

        let result = form
            .submit(|_| async {
                called.set(true);
                Ok(())
            })
            .await;

        assert!(result.is_err());
        assert!(!called.get());
        assert_eq!(form.error(), Some("至少需要一个正确答案"));
    }

    #[tokio::test]
    async fn test_create_success_resets_form() {
        let mut form = filled_form();
        let mut seen = None;

        form.submit(|submission| {
            seen = Some(submission);
            async { Ok(()) }
        })
        .await
        .unwrap();

        let submission = seen.unwrap();
        assert_eq!(submission.category_id, 3);
        assert_eq!(submission.text, "2+2?");
        assert_eq!(submission.answers.len(), 4);

        assert_eq!(form.question_text(), "");
        assert_eq!(form.answers().len(), 4);
        assert!(form.answers().iter().all(|a| a.text.is_empty()));
        assert_eq!(form.active_category_id(), Some(3));
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_edit_success_keeps_form() {
        let question = Question {
            id: 9,
            question: "Höfuðborg Íslands?".to_string(),
            category_id: 2,
            category: None,
            answers: vec![
                Answer {
                    id: Some(1),
                    answer: "Reykjavík".to_string(),
                    correct: true,
                    question_id: Some(9),
                },
                Answer {
                    id: Some(2),
                    answer: "Akureyri".to_string(),
                    correct: false,
                    question_id: Some(9),
                },
            ],
        };
        let mut form = QuestionForm::new_edit(&question);
        assert_eq!(form.submit_label(), "更新题目");

        form.submit(|_| async { Ok(()) }).await.unwrap();

        assert_eq!(form.question_text(), "Höfuðborg Íslands?");
        assert_eq!(form.answers()[0].id, Some(1));
        assert_eq!(form.mode(), FormMode::Edit { question_id: 9 });
    }

    #[tokio::test]
    async fn test_save_failure_keeps_state_and_shows_message() {
        let mut form = filled_form();
        let before = form.answers().to_vec();

        let result = form
            .submit(|_| async {
                Err(AppError::Api(ApiError::Http {
                    endpoint: "/questions".to_string(),
                    status: 500,
                }))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(form.question_text(), "2+2?");
        assert_eq!(form.answers(), before.as_slice());
        assert!(form.error().unwrap().contains("HTTP 500"));

        // 重试成功后错误清除
        form.submit(|_| async { Ok(()) }).await.unwrap();
        assert!(form.error().is_none());
    }
}
