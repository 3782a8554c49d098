use crate::auth::JwtConfig;

/// 服务器配置 - 所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 4000 | HTTP 服务端口 |
/// | BACKEND_URL | (无) | 托管数据服务地址 |
/// | BACKEND_API_KEY | (无) | 托管数据服务密钥 |
/// | REQUEST_TIMEOUT_MS | 10000 | 网关请求超时(毫秒) |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_DIR | (无) | 日志文件目录 (未设置时只输出到 stdout) |
///
/// `BACKEND_URL` 和 `BACKEND_API_KEY` 是演示模式的唯一开关：
/// 任意一个缺失，整个服务运行在演示模式下，所有写入都被合成响应替代。
///
/// # 示例
///
/// ```ignore
/// BACKEND_URL=https://data.example.com BACKEND_API_KEY=... cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 托管数据服务地址
    pub backend_url: Option<String>,
    /// 托管数据服务密钥
    pub backend_api_key: Option<String>,
    /// 网关请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 日志文件目录
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4000),
            backend_url: std::env::var("BACKEND_URL").ok().filter(|v| !v.is_empty()),
            backend_api_key: std::env::var("BACKEND_API_KEY")
                .ok()
                .filter(|v| !v.is_empty()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10_000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(
        http_port: u16,
        backend_url: Option<String>,
        backend_api_key: Option<String>,
    ) -> Self {
        let mut config = Self::from_env();
        config.http_port = http_port;
        config.backend_url = backend_url;
        config.backend_api_key = backend_api_key;
        config
    }

    /// 后端是否已配置 (两个变量同时存在才算配置完成)
    pub fn backend_configured(&self) -> bool {
        self.backend_url.is_some() && self.backend_api_key.is_some()
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// 设置运行环境 (dotenv + 日志)
///
/// 必须在读取 [`Config`] 之前调用
pub fn setup_environment() {
    let _ = dotenv::dotenv();
    let log_dir = std::env::var("LOG_DIR").ok();
    let log_level = std::env::var("LOG_LEVEL").ok();
    crate::utils::logger::init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_configured_requires_both_variables() {
        let config = Config::with_overrides(0, Some("https://db.example.com".into()), None);
        assert!(!config.backend_configured());

        let config = Config::with_overrides(
            0,
            Some("https://db.example.com".into()),
            Some("service-key".into()),
        );
        assert!(config.backend_configured());

        let config = Config::with_overrides(0, None, None);
        assert!(!config.backend_configured());
    }
}
