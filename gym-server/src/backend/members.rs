//! Member table operations
//!
//! 每条语句都带 `gym_id=eq.<tenant>` 过滤：跨租户访问在查询层面就不可能，
//! 而不是依赖调用方自觉。租户范围内查不到行时统一返回 `NotFound`，
//! 不区分"不存在"和"属于别的租户"，避免租户枚举。

use chrono::Utc;
use shared::models::Member;

use super::{BackendClient, GatewayError, GatewayResult};
use crate::membership::{RatingPatch, StatusPatch};

const TABLE: &str = "members";

/// 列表查询 URL：租户过滤 + 创建时间倒序
pub fn list_url(base: &str, gym_id: &str) -> String {
    format!(
        "{base}/rest/v1/{TABLE}?select=*&gym_id=eq.{gym_id}&order=created_at.desc"
    )
}

/// 单行定位 URL：id + 租户双重过滤
pub fn row_url(base: &str, gym_id: &str, id: &str) -> String {
    format!("{base}/rest/v1/{TABLE}?id=eq.{id}&gym_id=eq.{gym_id}")
}

fn insert_url(base: &str) -> String {
    format!("{base}/rest/v1/{TABLE}")
}

pub async fn list(client: &BackendClient, gym_id: &str) -> GatewayResult<Vec<Member>> {
    let url = list_url(client.base_url(), gym_id);
    let resp = client.http().get(&url).send().await?;
    let resp = BackendClient::check(resp).await?;
    let members: Vec<Member> = resp.json().await?;
    Ok(members)
}

pub async fn find_by_id(
    client: &BackendClient,
    gym_id: &str,
    id: &str,
) -> GatewayResult<Member> {
    let url = row_url(client.base_url(), gym_id, id);
    let resp = client.http().get(&url).send().await?;
    let resp = BackendClient::check(resp).await?;
    let mut rows: Vec<Member> = resp.json().await?;
    rows.pop()
        .ok_or_else(|| GatewayError::NotFound(format!("Member {id}")))
}

/// 插入一条完整的会员行
///
/// `id`、时间戳、`status = Active` 都已经由服务端在构造 `Member` 时填好，
/// 这里只负责持久化并回读。
pub async fn insert(client: &BackendClient, member: &Member) -> GatewayResult<Member> {
    let url = insert_url(client.base_url());
    let resp = client
        .http()
        .post(&url)
        .header("Prefer", "return=representation")
        .json(&[member])
        .send()
        .await?;
    let resp = BackendClient::check(resp).await?;
    let mut rows: Vec<Member> = resp.json().await?;
    rows.pop()
        .ok_or_else(|| GatewayError::Decode("insert returned no rows".to_string()))
}

/// 应用一次生命周期状态补丁 (cancel / reactivate)
pub async fn update_status(
    client: &BackendClient,
    gym_id: &str,
    id: &str,
    patch: &StatusPatch,
) -> GatewayResult<Member> {
    patch_row(client, gym_id, id, serde_json::to_value(patch)).await
}

/// 更新评分
pub async fn update_rating(
    client: &BackendClient,
    gym_id: &str,
    id: &str,
    patch: &RatingPatch,
) -> GatewayResult<Member> {
    patch_row(client, gym_id, id, serde_json::to_value(patch)).await
}

/// 更新余额 (手动支付登记的副作用)
pub async fn update_balance(
    client: &BackendClient,
    gym_id: &str,
    id: &str,
    balance: f64,
) -> GatewayResult<Member> {
    let body = serde_json::json!({
        "balance": balance,
        "updated_at": Utc::now(),
    });
    patch_row(client, gym_id, id, Ok(body)).await
}

async fn patch_row(
    client: &BackendClient,
    gym_id: &str,
    id: &str,
    body: Result<serde_json::Value, serde_json::Error>,
) -> GatewayResult<Member> {
    let body = body.map_err(|e| GatewayError::Decode(e.to_string()))?;
    let url = row_url(client.base_url(), gym_id, id);
    let resp = client
        .http()
        .patch(&url)
        .header("Prefer", "return=representation")
        .json(&body)
        .send()
        .await?;
    let resp = BackendClient::check(resp).await?;
    let mut rows: Vec<Member> = resp.json().await?;
    // 空结果 = 该租户名下没有这一行
    rows.pop()
        .ok_or_else(|| GatewayError::NotFound(format!("Member {id}")))
}

/// 删除会员
///
/// 不检查影响行数：删除一个不存在的 id 对调用方来说也是成功
/// (观察到的幂等删除语义，按设计保留)。
pub async fn delete(client: &BackendClient, gym_id: &str, id: &str) -> GatewayResult<()> {
    let url = row_url(client.base_url(), gym_id, id);
    let resp = client.http().delete(&url).send().await?;
    BackendClient::check(resp).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // P2 的查询层面验证：租户过滤必须出现在每一个 URL 里

    #[test]
    fn list_url_carries_tenant_filter_and_order() {
        let url = list_url("https://db.example.com", "gym-1");
        assert!(url.contains("gym_id=eq.gym-1"));
        assert!(url.contains("order=created_at.desc"));
    }

    #[test]
    fn row_url_carries_both_filters() {
        let url = row_url("https://db.example.com", "gym-1", "42");
        assert!(url.contains("id=eq.42"));
        assert!(url.contains("gym_id=eq.gym-1"));
    }
}
