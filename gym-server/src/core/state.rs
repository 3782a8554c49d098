use std::sync::Arc;

use crate::auth::JwtService;
use crate::backend::BackendClient;
use crate::core::Config;

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是服务的核心数据结构，使用 Arc 实现浅拷贝，
/// 所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | backend | Option<BackendClient> | 持久化网关 (None = 演示模式) |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
///
/// `backend` 在启动时解析一次，之后不再重新探测 —— 每个请求
/// 只需要一次 `is_live()` 判断，而不是重复读取环境变量。
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 持久化网关 (None 时全局演示模式)
    pub backend: Option<BackendClient>,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`Self::initialize`] 方法代替
    pub fn new(config: Config, backend: Option<BackendClient>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            backend,
            jwt_service,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 持久化网关 (BACKEND_URL + BACKEND_API_KEY 同时存在才会创建)
    /// 2. JWT 服务
    pub fn initialize(config: &Config) -> Self {
        let backend = BackendClient::from_config(config);

        match &backend {
            Some(client) => {
                tracing::info!(url = %client.base_url(), "Persistence gateway configured");
            }
            None => {
                tracing::warn!(
                    "BACKEND_URL / BACKEND_API_KEY not set - running in demo mode, \
                     nothing will be persisted"
                );
            }
        }

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self::new(config.clone(), backend, jwt_service)
    }

    /// 后端是否可用 (false = 演示模式)
    pub fn is_live(&self) -> bool {
        self.backend.is_some()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
