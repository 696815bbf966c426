//! URL 解析
//!
//! 部署环境下请求走同源代理（规避跨域），本地开发直连后端。

use regex::Regex;
use std::sync::OnceLock;

/// 请求目标环境
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// 直连后端
    Development { backend_base_url: String },
    /// 经同源代理转发
    Production { proxy_base: String },
}

/// 把接口路径解析为完整 URL
///
/// 纯函数：相同输入永远得到相同输出，无副作用。
pub fn resolve(endpoint_path: &str, environment: &Environment) -> String {
    let base = match environment {
        Environment::Development { backend_base_url } => backend_base_url,
        Environment::Production { proxy_base } => proxy_base,
    };

    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint_path.trim_start_matches('/')
    )
}

/// 检查分类 slug 是否可直接拼进路径
///
/// 只允许 URL 非保留字符（字母、数字、`-` `.` `_` `~`），
/// 单独的 `.` 与 `..` 会改变路径层级，不允许。
pub fn is_valid_slug(slug: &str) -> bool {
    static SLUG_RE: OnceLock<Option<Regex>> = OnceLock::new();
    if slug == "." || slug == ".." {
        return false;
    }
    SLUG_RE
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9._~-]+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(slug))
}
