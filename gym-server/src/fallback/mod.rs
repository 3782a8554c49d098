//! Fallback / Demo Policy
//!
//! 所有状态变更和读取入口共用的降级决策，每个请求只评估一次：
//!
//! 1. 后端未配置 → 返回**合成的成功响应** (请求输入 + 本地生成的 id +
//!    `updated_at = now`)，不做任何持久化
//! 2. 后端已配置 → 执行真实存储操作；可掩盖的失败 (网络、5xx、解码) 记录
//!    日志后同样返回合成响应，绝不把存储错误抛给调用方
//! 3. 不可掩盖的错误 (NotFound / BadRequest / 凭证被拒) 原样上浮 ——
//!    掩盖它们会改变业务语义
//!
//! 认证缺失在进入这里之前就被中间件用 401 拦下，是唯一不走降级的失败。
//!
//! 调用方拿到的 [`Fallback`] 记录了响应的来源，handler 据此在响应里附加
//! `degraded` 标记：界面可以显示一条非阻塞警告，而不是让"已保存"的假象
//! 蒙混过去。

use std::future::Future;

use crate::backend::{BackendClient, GatewayResult};
use crate::utils::AppResult;

/// 一次存储操作的结果及其来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// 真实后端写入/读取成功
    Live,
    /// 后端未配置，合成响应
    Demo,
    /// 后端配置了但操作失败，合成响应顶替
    Degraded,
}

/// 带来源标记的操作结果
#[derive(Debug, Clone)]
pub struct Fallback<T> {
    pub value: T,
    pub source: Source,
}

impl<T> Fallback<T> {
    pub fn live(value: T) -> Self {
        Self {
            value,
            source: Source::Live,
        }
    }

    pub fn demo(value: T) -> Self {
        Self {
            value,
            source: Source::Demo,
        }
    }

    pub fn degraded(value: T) -> Self {
        Self {
            value,
            source: Source::Degraded,
        }
    }

    /// 响应信封里的 `degraded` 字段：只有真实写入成功时才省略
    pub fn degraded_flag(&self) -> Option<bool> {
        match self.source {
            Source::Live => None,
            Source::Demo | Source::Degraded => Some(true),
        }
    }

    /// 拆成 (值, degraded 标记)
    pub fn into_parts(self) -> (T, Option<bool>) {
        let flag = self.degraded_flag();
        (self.value, flag)
    }
}

/// 统一的降级包装
///
/// - `op`: 真实的网关操作 (只在后端配置时执行)
/// - `synthetic`: 合成结果的构造器 (只在需要时调用)
/// - `what`: 日志里标识这次操作的名字
pub async fn with_fallback<'a, T, Fut, Op, Syn>(
    backend: Option<&'a BackendClient>,
    what: &'static str,
    op: Op,
    synthetic: Syn,
) -> AppResult<Fallback<T>>
where
    Op: FnOnce(&'a BackendClient) -> Fut,
    Fut: Future<Output = GatewayResult<T>>,
    Syn: FnOnce() -> T,
{
    let Some(client) = backend else {
        tracing::debug!(operation = what, "Demo mode - synthesizing response");
        return Ok(Fallback::demo(synthetic()));
    };

    match op(client).await {
        Ok(value) => Ok(Fallback::live(value)),
        Err(e) if e.is_maskable() => {
            // 对调用方静默，但在服务端留下完整记录
            tracing::error!(
                target: "gateway",
                operation = what,
                error = %e,
                "Store operation failed - masking with synthesized response"
            );
            Ok(Fallback::degraded(synthetic()))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::GatewayError;
    use crate::utils::AppError;

    fn unreachable_client() -> BackendClient {
        // 连接会立即被拒绝的地址
        BackendClient::new("http://127.0.0.1:1", "test-key", 500)
    }

    #[tokio::test]
    async fn unconfigured_backend_synthesizes_demo_response() {
        let result = with_fallback(
            None,
            "test_op",
            |_client| async { Ok::<_, GatewayError>(1) },
            || 42,
        )
        .await
        .expect("demo path never errors");

        assert_eq!(result.value, 42);
        assert_eq!(result.source, Source::Demo);
        assert_eq!(result.degraded_flag(), Some(true));
    }

    #[tokio::test]
    async fn live_success_is_not_flagged() {
        let client = unreachable_client();
        let result = with_fallback(
            Some(&client),
            "test_op",
            |_client| async { Ok::<_, GatewayError>(7) },
            || 42,
        )
        .await
        .expect("live path succeeded");

        assert_eq!(result.value, 7);
        assert_eq!(result.source, Source::Live);
        assert_eq!(result.degraded_flag(), None);
    }

    #[tokio::test]
    async fn maskable_failure_degrades_to_synthetic() {
        let client = unreachable_client();
        let result = with_fallback(
            Some(&client),
            "test_op",
            |_client| async { Err::<i32, _>(GatewayError::Unreachable("refused".into())) },
            || 42,
        )
        .await
        .expect("maskable failures never error");

        assert_eq!(result.value, 42);
        assert_eq!(result.source, Source::Degraded);
        assert_eq!(result.degraded_flag(), Some(true));
    }

    #[tokio::test]
    async fn not_found_surfaces_instead_of_masking() {
        let client = unreachable_client();
        let err = with_fallback(
            Some(&client),
            "test_op",
            |_client| async { Err::<i32, _>(GatewayError::NotFound("Member 9".into())) },
            || 42,
        )
        .await
        .expect_err("NotFound must surface");

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn real_unreachable_backend_degrades() {
        let client = unreachable_client();
        let result = with_fallback(
            Some(&client),
            "list_members",
            |c| crate::backend::members::list(c, "gym-1"),
            Vec::new,
        )
        .await
        .expect("unreachable backend is maskable");

        assert_eq!(result.source, Source::Degraded);
        assert!(result.value.is_empty());
    }
}
