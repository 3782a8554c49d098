//! Payment table operations
//!
//! 只追加的流水表：insert + 按租户列出，没有更新和删除。

use shared::models::Payment;

use super::{BackendClient, GatewayError, GatewayResult};

const TABLE: &str = "payments";

pub fn list_url(base: &str, gym_id: &str) -> String {
    format!(
        "{base}/rest/v1/{TABLE}?select=*&gym_id=eq.{gym_id}&order=created_at.desc"
    )
}

fn insert_url(base: &str) -> String {
    format!("{base}/rest/v1/{TABLE}")
}

pub async fn list(client: &BackendClient, gym_id: &str) -> GatewayResult<Vec<Payment>> {
    let url = list_url(client.base_url(), gym_id);
    let resp = client.http().get(&url).send().await?;
    let resp = BackendClient::check(resp).await?;
    let payments: Vec<Payment> = resp.json().await?;
    Ok(payments)
}

pub async fn insert(client: &BackendClient, payment: &Payment) -> GatewayResult<Payment> {
    let url = insert_url(client.base_url());
    let resp = client
        .http()
        .post(&url)
        .header("Prefer", "return=representation")
        .json(&[payment])
        .send()
        .await?;
    let resp = BackendClient::check(resp).await?;
    let mut rows: Vec<Payment> = resp.json().await?;
    rows.pop()
        .ok_or_else(|| GatewayError::Decode("insert returned no rows".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_url_carries_tenant_filter() {
        let url = list_url("https://db.example.com", "gym-1");
        assert!(url.contains("gym_id=eq.gym-1"));
    }
}
