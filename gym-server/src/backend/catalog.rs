//! Package / Trainer table operations
//!
//! 套餐目录和教练名册，list + insert 即可覆盖现有流程。

use shared::models::{GymPackage, Trainer};

use super::{BackendClient, GatewayError, GatewayResult};

pub fn packages_url(base: &str, gym_id: &str) -> String {
    format!(
        "{base}/rest/v1/packages?select=*&gym_id=eq.{gym_id}&order=created_at.desc"
    )
}

pub fn trainers_url(base: &str, gym_id: &str) -> String {
    format!(
        "{base}/rest/v1/trainers?select=*&gym_id=eq.{gym_id}&order=created_at.desc"
    )
}

pub async fn list_packages(client: &BackendClient, gym_id: &str) -> GatewayResult<Vec<GymPackage>> {
    let url = packages_url(client.base_url(), gym_id);
    let resp = client.http().get(&url).send().await?;
    let resp = BackendClient::check(resp).await?;
    let packages: Vec<GymPackage> = resp.json().await?;
    Ok(packages)
}

pub async fn insert_package(
    client: &BackendClient,
    package: &GymPackage,
) -> GatewayResult<GymPackage> {
    let url = format!("{}/rest/v1/packages", client.base_url());
    let resp = client
        .http()
        .post(&url)
        .header("Prefer", "return=representation")
        .json(&[package])
        .send()
        .await?;
    let resp = BackendClient::check(resp).await?;
    let mut rows: Vec<GymPackage> = resp.json().await?;
    rows.pop()
        .ok_or_else(|| GatewayError::Decode("insert returned no rows".to_string()))
}

pub async fn list_trainers(client: &BackendClient, gym_id: &str) -> GatewayResult<Vec<Trainer>> {
    let url = trainers_url(client.base_url(), gym_id);
    let resp = client.http().get(&url).send().await?;
    let resp = BackendClient::check(resp).await?;
    let trainers: Vec<Trainer> = resp.json().await?;
    Ok(trainers)
}

pub async fn insert_trainer(client: &BackendClient, trainer: &Trainer) -> GatewayResult<Trainer> {
    let url = format!("{}/rest/v1/trainers", client.base_url());
    let resp = client
        .http()
        .post(&url)
        .header("Prefer", "return=representation")
        .json(&[trainer])
        .send()
        .await?;
    let resp = BackendClient::check(resp).await?;
    let mut rows: Vec<Trainer> = resp.json().await?;
    rows.pop()
        .ok_or_else(|| GatewayError::Decode("insert returned no rows".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_urls_carry_tenant_filter() {
        assert!(packages_url("https://db.example.com", "gym-1").contains("gym_id=eq.gym-1"));
        assert!(trainers_url("https://db.example.com", "gym-1").contains("gym_id=eq.gym-1"));
    }
}
