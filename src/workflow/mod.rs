pub mod question_form;

pub use question_form::{AnswerDraft, FormMode, QuestionForm, QuestionSubmission};
