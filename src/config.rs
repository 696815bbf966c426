use serde::Deserialize;
use std::path::Path;

use crate::api::url::Environment;
use crate::error::ConfigError;

/// 运行环境类型
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployMode {
    /// 本地开发，直接请求后端
    Development,
    /// 部署环境，经由同源代理转发
    Production,
}

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 运行环境
    pub environment: DeployMode,
    /// 后端 API 地址（开发环境直连）
    pub api_base_url: String,
    /// 前端站点 origin（生产环境代理路由的前缀）
    pub app_origin: String,
    /// 同源代理路径
    pub proxy_path: String,
    /// 日志级别
    pub log_level: String,
    /// 是否在启动时唤醒后端
    pub warmup_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: DeployMode::Development,
            api_base_url: "http://localhost:3000".to_string(),
            app_origin: "http://localhost:8080".to_string(),
            proxy_path: "/api/proxy".to_string(),
            log_level: "info".to_string(),
            warmup_enabled: true,
        }
    }
}

impl Config {
    /// 从环境变量加载，缺失的项使用默认值
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载，再叠加环境变量
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadFailed {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content)?.with_env_overrides()
    }

    /// 解析 TOML 配置内容
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::TomlParseFailed { source: e })
    }

    fn with_env_overrides(self) -> Result<Self, ConfigError> {
        let environment = match std::env::var("QUIZ_ENV") {
            Ok(value) => parse_mode(&value)?,
            Err(_) => self.environment,
        };
        let warmup_enabled = match std::env::var("WARMUP_ENABLED") {
            Ok(value) => value.parse().map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: "WARMUP_ENABLED".to_string(),
                value,
                expected_type: "bool".to_string(),
            })?,
            Err(_) => self.warmup_enabled,
        };

        Ok(Self {
            environment,
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(self.api_base_url),
            app_origin: std::env::var("APP_ORIGIN").unwrap_or(self.app_origin),
            proxy_path: std::env::var("PROXY_PATH").unwrap_or(self.proxy_path),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(self.log_level),
            warmup_enabled,
        })
    }

    /// 根据运行环境构建 URL 解析所需的 Environment
    pub fn environment(&self) -> Environment {
        match self.environment {
            DeployMode::Development => Environment::Development {
                backend_base_url: self.api_base_url.clone(),
            },
            DeployMode::Production => Environment::Production {
                proxy_base: format!(
                    "{}/{}",
                    self.app_origin.trim_end_matches('/'),
                    self.proxy_path.trim_start_matches('/')
                ),
            },
        }
    }
}

fn parse_mode(value: &str) -> Result<DeployMode, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "development" | "dev" => Ok(DeployMode::Development),
        "production" | "prod" => Ok(DeployMode::Production),
        _ => Err(ConfigError::EnvVarParseFailed {
            var_name: "QUIZ_ENV".to_string(),
            value: value.to_string(),
            expected_type: "development | production".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            environment = "production"
            app_origin = "https://quiz.example.com/"
            "#,
        )
        .unwrap();

        assert_eq!(config.environment, DeployMode::Production);
        assert_eq!(config.proxy_path, "/api/proxy");
        assert!(config.warmup_enabled);
    }

    #[test]
    fn test_environment_production_uses_proxy() {
        let config = Config {
            environment: DeployMode::Production,
            app_origin: "https://quiz.example.com/".to_string(),
            ..Config::default()
        };

        assert_eq!(
            config.environment(),
            Environment::Production {
                proxy_base: "https://quiz.example.com/api/proxy".to_string()
            }
        );
    }

    #[test]
    fn test_environment_development_is_direct() {
        let config = Config {
            api_base_url: "http://127.0.0.1:4000".to_string(),
            ..Config::default()
        };

        assert_eq!(
            config.environment(),
            Environment::Development {
                backend_base_url: "http://127.0.0.1:4000".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let result = Config::from_toml_str("environment = ");
        assert!(matches!(result, Err(ConfigError::TomlParseFailed { .. })));
    }

    #[test]
    fn test_parse_mode_aliases() {
        assert_eq!(parse_mode("PROD").unwrap(), DeployMode::Production);
        assert_eq!(parse_mode(" dev ").unwrap(), DeployMode::Development);
        assert!(parse_mode("staging").is_err());
    }
}
