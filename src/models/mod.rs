pub mod normalize;
pub mod question;

pub use normalize::{normalize_answer, normalize_category, normalize_question, unwrap_envelope};
pub use question::{Answer, AnswerUpdate, Category, NewAnswer, Question};
