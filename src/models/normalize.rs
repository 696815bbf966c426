//! 数据归一化
//!
//! 把后端返回的原始 JSON（字段命名、嵌套方式可能不一致）转成统一的
//! Category / Question / Answer。这里的函数永远不会失败：缺失或格式
//! 不对的字段一律退化为默认值。

use serde_json::Value;

use super::question::{Answer, Category, Question};

/// 拆信封：`{ "data": ... }` 取 data，否则原样返回
pub fn unwrap_envelope(value: &Value) -> &Value {
    match value.get("data") {
        Some(data) if !data.is_null() => data,
        _ => value,
    }
}

/// 归一化分类
pub fn normalize_category(value: &Value) -> Category {
    Category {
        id: id_field(value, &["id"]).unwrap_or_default(),
        title: text_field(value, "title"),
        slug: text_field(value, "slug"),
    }
}

/// 归一化题目，递归处理 category 与 answers
pub fn normalize_question(value: &Value) -> Question {
    let category = value
        .get("category")
        .filter(|c| c.is_object())
        .map(normalize_category);

    let category_id = id_field(value, &["categoryId", "category_id"])
        .or_else(|| category.as_ref().map(|c| c.id))
        .unwrap_or_default();

    let answers = value
        .get("answers")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(normalize_answer).collect())
        .unwrap_or_default();

    Question {
        id: id_field(value, &["id"]).unwrap_or_default(),
        question: text_field(value, "question"),
        category_id,
        category,
        answers,
    }
}

/// 归一化答案
pub fn normalize_answer(value: &Value) -> Answer {
    Answer {
        id: id_field(value, &["id"]),
        answer: text_field(value, "answer"),
        correct: value.get("correct").and_then(Value::as_bool).unwrap_or(false),
        question_id: id_field(value, &["questionId", "question_id"]),
    }
}

/// 归一化列表；负载不是数组时返回空列表
pub fn normalize_list<T>(payload: &Value, normalize: fn(&Value) -> T) -> Option<Vec<T>> {
    payload
        .as_array()
        .map(|items| items.iter().map(normalize).collect())
}

fn text_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// id 既可能是整数也可能是数字字符串
fn id_field(value: &Value, keys: &[&str]) -> Option<i64> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find_map(|raw| match raw {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_gets_defaults() {
        let empty = json!({});

        assert_eq!(normalize_category(&empty), Category::default());
        assert_eq!(normalize_question(&empty), Question::default());
        assert_eq!(normalize_answer(&empty), Answer::default());
    }

    #[test]
    fn test_non_object_input_never_panics() {
        for raw in [json!(null), json!(12), json!("text"), json!([1, 2])] {
            let q = normalize_question(&raw);
            assert_eq!(q.question, "");
            assert!(q.answers.is_empty());
        }
    }

    #[test]
    fn test_nested_question_is_normalized() {
        let raw = json!({
            "id": "12",
            "question": "Hvað er 2+2?",
            "category": {"id": 3, "title": "Stærðfræði", "slug": "math"},
            "answers": [
                {"id": 1, "answer": "4", "correct": true, "questionId": 12},
                {"answer": "5"},
                {"id": 3, "correct": "yes", "question_id": "12"}
            ]
        });

        let q = normalize_question(&raw);
        assert_eq!(q.id, 12);
        assert_eq!(q.category_id, 3);
        assert_eq!(q.category.as_ref().map(|c| c.slug.as_str()), Some("math"));
        assert_eq!(q.answers.len(), 3);
        assert!(q.answers[0].correct);
        assert_eq!(q.answers[1].id, None);
        assert!(!q.answers[1].correct);
        assert_eq!(q.answers[2].answer, "");
        assert!(!q.answers[2].correct);
        assert_eq!(q.answers[2].question_id, Some(12));
    }

    #[test]
    fn test_explicit_category_id_wins_over_nested() {
        let raw = json!({"categoryId": 5, "category": {"id": 3}});
        assert_eq!(normalize_question(&raw).category_id, 5);
    }

    #[test]
    fn test_malformed_optional_fields_degrade() {
        let raw = json!({"id": 1.5, "title": 7, "slug": null});
        let c = normalize_category(&raw);
        assert_eq!(c, Category::default());

        let raw = json!({"category": "math", "answers": {"0": {}}});
        let q = normalize_question(&raw);
        assert!(q.category.is_none());
        assert!(q.answers.is_empty());
    }

    #[test]
    fn test_unwrap_envelope() {
        let bare = json!([{"id": 1}]);
        assert_eq!(unwrap_envelope(&bare), &bare);

        let wrapped = json!({"data": [{"id": 1}]});
        assert_eq!(unwrap_envelope(&wrapped), &json!([{"id": 1}]));

        let null_data = json!({"data": null});
        assert_eq!(unwrap_envelope(&null_data), &null_data);
    }

    #[test]
    fn test_normalize_list_rejects_non_array() {
        assert!(normalize_list(&json!("not-an-array"), normalize_question).is_none());
        assert_eq!(
            normalize_list(&json!([{}, {}]), normalize_category).map(|v| v.len()),
            Some(2)
        );
    }
}
