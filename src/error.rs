use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 表单校验错误
    #[error("{0}")]
    Validation(#[from] ValidationError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 编辑器状态错误（例如没有打开的表单）
    #[error("编辑器错误: {0}")]
    Editor(String),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络层失败（DNS、连接被拒、跨域拦截等）
    #[error("网络连接失败 ({endpoint}): {source}")]
    Network {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 服务端返回非 2xx 状态
    #[error("请求失败 ({endpoint}): HTTP {status}")]
    Http { endpoint: String, status: u16 },
    /// 响应体 JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 分类 slug 不合法，请求未发出
    #[error("非法的分类标识: {slug:?}")]
    InvalidSlug { slug: String },
}

impl ApiError {
    /// HTTP 状态码（仅 Http 错误有）
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 是否为网络层失败
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }
}

/// 表单校验错误，按校验顺序排列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("题目内容不能为空")]
    EmptyQuestion,
    #[error("答案内容不能为空")]
    EmptyAnswer,
    #[error("至少需要一个正确答案")]
    NoCorrectAnswer,
    #[error("请为题目选择分类")]
    MissingCategory,
    #[error("至少需要两个答案")]
    TooFewAnswers,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置文件读取失败
    #[error("读取配置文件失败 ({path}): {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败: {source}")]
    TomlParseFailed {
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl ApiError {
    /// 创建网络层错误
    pub fn network(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ApiError::Network {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }

    /// 创建响应解析错误
    pub fn decode(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ApiError::Decode {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
