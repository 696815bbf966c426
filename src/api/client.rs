//! 题库后台 API 客户端
//!
//! 封装分类、题目相关的全部 HTTP 调用
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::url::{is_valid_slug, resolve, Environment};
use super::QuizApi;
use crate::config::Config;
use crate::error::ApiError;
use crate::models::normalize::{
    normalize_category, normalize_list, normalize_question, unwrap_envelope,
};
use crate::models::question::{CreateQuestionBody, UpdateQuestionBody};
use crate::models::{AnswerUpdate, Category, NewAnswer, Question};

/// 题库后台客户端
#[derive(Clone)]
pub struct QuizClient {
    http: reqwest::Client,
    environment: Environment,
}

impl QuizClient {
    /// 根据配置创建客户端
    pub fn new(config: &Config) -> Self {
        Self::with_environment(config.environment())
    }

    /// 使用指定环境创建客户端
    pub fn with_environment(environment: Environment) -> Self {
        Self {
            http: reqwest::Client::new(),
            environment,
        }
    }

    /// 发送请求；非 2xx 统一转成 Http 错误
    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            warn!("请求失败 ({}): {}", endpoint, e);
            ApiError::network(endpoint, e)
        })?;

        let status = response.status();
        debug!("响应状态 ({}): {}", endpoint, status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("接口返回错误 ({}): {} 响应体: {}", endpoint, status, body);
            return Err(ApiError::Http {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    /// 读取 JSON 响应体；空响应体视为 null
    async fn read_json(response: Response, endpoint: &str) -> Result<Value, ApiError> {
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::decode(endpoint, e))?;

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| ApiError::decode(endpoint, e))
    }

    async fn get_json(&self, endpoint: &str) -> Result<Value, ApiError> {
        let url = resolve(endpoint, &self.environment);
        debug!("GET {}", url);

        let response = self.send(self.http.get(&url), endpoint).await?;
        Self::read_json(response, endpoint).await
    }

    fn check_slug(slug: &str) -> Result<(), ApiError> {
        if is_valid_slug(slug) {
            Ok(())
        } else {
            Err(ApiError::InvalidSlug {
                slug: slug.to_string(),
            })
        }
    }
}

#[async_trait]
impl QuizApi for QuizClient {
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let endpoint = "/categories";
        let result = self.get_json(endpoint).await?;

        match normalize_list(unwrap_envelope(&result), normalize_category) {
            Some(categories) => {
                debug!("获取到 {} 个分类", categories.len());
                Ok(categories)
            }
            None => {
                warn!("分类接口返回的不是数组: {}", result);
                Ok(Vec::new())
            }
        }
    }

    async fn get_category(&self, slug: &str) -> Result<Category, ApiError> {
        Self::check_slug(slug)?;
        let endpoint = format!("/categories/{}", slug);
        let result = self.get_json(&endpoint).await?;

        Ok(normalize_category(unwrap_envelope(&result)))
    }

    async fn list_questions_by_category(&self, slug: &str) -> Result<Vec<Question>, ApiError> {
        Self::check_slug(slug)?;
        let endpoint = format!("/questions/category/{}", slug);
        let result = self.get_json(&endpoint).await?;

        let questions =
            normalize_list(unwrap_envelope(&result), normalize_question).unwrap_or_default();
        debug!("分类 {} 下获取到 {} 道题目", slug, questions.len());

        Ok(questions)
    }

    async fn create_question(
        &self,
        category_id: i64,
        text: &str,
        answers: &[NewAnswer],
    ) -> Result<Question, ApiError> {
        let endpoint = "/questions";
        let body = CreateQuestionBody {
            category_id,
            question: text,
            answers,
        };
        debug!("创建题目 Payload: {:?}", body);

        let url = resolve(endpoint, &self.environment);
        let response = self.send(self.http.post(&url).json(&body), endpoint).await?;
        let result = Self::read_json(response, endpoint).await?;

        let created = normalize_question(unwrap_envelope(&result));
        info!("✓ 题目创建成功: {}", created);
        Ok(created)
    }

    async fn update_question(
        &self,
        id: i64,
        text: &str,
        category_id: i64,
        answers: &[AnswerUpdate],
    ) -> Result<Question, ApiError> {
        let endpoint = format!("/questions/{}", id);
        let body = UpdateQuestionBody {
            question: text,
            category_id,
            answers,
        };
        debug!("更新题目 Payload: {:?}", body);

        let url = resolve(&endpoint, &self.environment);
        let response = self.send(self.http.put(&url).json(&body), &endpoint).await?;
        let result = Self::read_json(response, &endpoint).await?;

        let updated = normalize_question(unwrap_envelope(&result));
        info!("✓ 题目 {} 更新成功", id);
        Ok(updated)
    }

    async fn delete_question(&self, id: i64) -> Result<(), ApiError> {
        let endpoint = format!("/questions/{}", id);
        let url = resolve(&endpoint, &self.environment);

        self.send(self.http.delete(&url), &endpoint).await?;
        info!("✓ 题目 {} 删除成功", id);
        Ok(())
    }
}
