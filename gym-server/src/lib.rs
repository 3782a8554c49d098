//! Gym Server - 多租户健身房管理后端
//!
//! # 架构概述
//!
//! 本模块是 Gym Server 的主入口，提供以下核心功能：
//!
//! - **会员生命周期** (`membership`): Active/Cancelled/Dormant/Pending 状态机
//! - **持久化网关** (`backend`): 托管数据服务的 REST 客户端
//! - **降级策略** (`fallback`): 后端缺失/故障时的合成响应
//! - **认证** (`auth`): JWT + 租户上下文
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! gym-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、租户上下文
//! ├── backend/       # 持久化网关 (托管数据服务)
//! ├── membership/    # 会员生命周期状态机
//! ├── fallback/      # 降级/演示策略
//! ├── demo/          # 演示数据集
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、响应信封、日志等工具
//! ```

pub mod api;
pub mod auth;
pub mod backend;
pub mod core;
pub mod demo;
pub mod fallback;
pub mod membership;
pub mod utils;

// Re-export 公共类型
pub use auth::{JwtService, RequestContext};
pub use backend::BackendClient;
pub use core::{Config, Server, ServerState, setup_environment};
pub use fallback::{Fallback, Source, with_fallback};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
   ______
  / ____/_  ______ ___
 / / __/ / / / __ `__ \
/ /_/ / /_/ / / / / / /
\____/\__, /_/ /_/ /_/
     /____/
   _____
  / ___/___  ______   _____  _____
  \__ \/ _ \/ ___/ | / / _ \/ ___/
 ___/ /  __/ /   | |/ /  __/ /
/____/\___/_/    |___/\___/_/
    "#
    );
}
