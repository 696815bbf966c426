//! 后端唤醒探针 - 能力层
//!
//! 启动时对分类接口发一次请求，让冷启动的后端提前初始化。
//! 不重试，也不影响其他组件的状态。

use std::time::Instant;
use tracing::{debug, info, warn};

use crate::api::url::{resolve, Environment};
use crate::config::{Config, DeployMode};

/// 失败原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeFailure {
    /// 网络层失败，多半是跨域配置问题
    Transport { detail: String },
    /// 后端可达但返回了错误状态
    Http { status: u16, detail: String },
}

impl ProbeFailure {
    pub fn detail(&self) -> &str {
        match self {
            ProbeFailure::Transport { detail } | ProbeFailure::Http { detail, .. } => detail,
        }
    }
}

/// 探针状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    Idle,
    Pinging,
    Success { elapsed_ms: u128 },
    Error(ProbeFailure),
}

/// 横幅上的手动重试操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryAction {
    ReloadPage,
}

/// 状态横幅
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub message: &'static str,
    pub detail: Option<String>,
    pub retry: Option<RetryAction>,
}

/// 后端唤醒探针
pub struct WarmupProbe {
    http: reqwest::Client,
    /// 未配置后端时为 None，探针保持 Idle
    url: Option<String>,
    fired: bool,
    history: Vec<ProbeStatus>,
}

impl WarmupProbe {
    /// 根据配置创建探针
    ///
    /// 开发环境看 `api_base_url`，生产环境看 `app_origin`（请求走代理），
    /// 对应的地址为空时探针保持 Idle。
    pub fn new(config: &Config) -> Self {
        let target = match config.environment {
            DeployMode::Development => &config.api_base_url,
            DeployMode::Production => &config.app_origin,
        };
        let environment =
            (config.warmup_enabled && !target.trim().is_empty()).then(|| config.environment());
        Self::with_environment(environment.as_ref())
    }

    /// 使用指定环境创建探针，与 API 客户端走同一套 URL 解析
    pub fn with_environment(environment: Option<&Environment>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: environment.map(|env| resolve("/categories", env)),
            fired: false,
            history: vec![ProbeStatus::Idle],
        }
    }

    pub fn status(&self) -> &ProbeStatus {
        self.history.last().unwrap_or(&ProbeStatus::Idle)
    }

    /// 经历过的全部状态，首项为 Idle
    pub fn history(&self) -> &[ProbeStatus] {
        &self.history
    }

    /// 发起唤醒请求，只在第一次调用时生效
    pub async fn run(&mut self) -> &ProbeStatus {
        if self.fired {
            return self.status();
        }
        self.fired = true;

        let Some(url) = self.url.clone() else {
            debug!("未配置后端地址，跳过唤醒");
            return self.status();
        };

        self.history.push(ProbeStatus::Pinging);
        info!("⏰ 正在唤醒后端: {}", url);

        let start = Instant::now();
        let next = match self.http.get(&url).send().await {
            Ok(response) => {
                let elapsed_ms = start.elapsed().as_millis();
                let status = response.status();
                info!("后端在 {}ms 内响应，状态码 {}", elapsed_ms, status);

                if status.is_success() {
                    ProbeStatus::Success { elapsed_ms }
                } else {
                    ProbeStatus::Error(ProbeFailure::Http {
                        status: status.as_u16(),
                        detail: format!("后端返回了错误状态 HTTP {}", status.as_u16()),
                    })
                }
            }
            Err(e) => {
                warn!("❌ 唤醒后端失败: {}", e);
                ProbeStatus::Error(ProbeFailure::Transport {
                    detail: format!(
                        "无法连接后端，可能是跨域 (CORS) 配置问题或后端未启动: {}",
                        e
                    ),
                })
            }
        };

        self.history.push(next);
        self.status()
    }

    /// 当前应显示的横幅；Idle 与 Success 不显示
    pub fn banner(&self) -> Option<Banner> {
        match self.status() {
            ProbeStatus::Idle | ProbeStatus::Success { .. } => None,
            ProbeStatus::Pinging => Some(Banner {
                message: "正在唤醒后端服务，首次加载可能需要几十秒...",
                detail: None,
                retry: None,
            }),
            ProbeStatus::Error(failure) => Some(Banner {
                message: "后端连接失败，请刷新页面重试",
                detail: Some(failure.detail().to_string()),
                retry: Some(RetryAction::ReloadPage),
            }),
        }
    }
}
