//! Client for the public Indonesian regional-geography API
//! (`{base_url}/regencies/{province_id}.json`)

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::core::config::RegionApiConfig;
use crate::core::error::AppError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteRegency {
    pub id: String,
    pub province_id: String,
    pub name: String,
}

#[derive(Debug, Error)]
pub enum RegionApiError {
    #[error("Region API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Province '{0}' not found in region API")]
    ProvinceNotFound(String),

    #[error("Region API returned {0}")]
    Status(u16),
}

impl From<RegionApiError> for AppError {
    fn from(err: RegionApiError) -> Self {
        match err {
            RegionApiError::ProvinceNotFound(_) => AppError::NotFound(err.to_string()),
            other => AppError::ExternalServiceError(other.to_string()),
        }
    }
}

pub struct RegionApiClient {
    http_client: Client,
    base_url: String,
}

impl RegionApiClient {
    pub fn new(config: &RegionApiConfig) -> Result<Self, RegionApiError> {
        let http_client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
        })
    }

    fn regencies_url(&self, province_id: &str) -> String {
        format!("{}/regencies/{}.json", self.base_url, province_id)
    }

    pub async fn fetch_regencies(
        &self,
        province_id: &str,
    ) -> Result<Vec<RemoteRegency>, RegionApiError> {
        let url = self.regencies_url(province_id);
        debug!("Fetching regencies from {}", url);

        let response = self.http_client.get(&url).send().await?;

        match response.status().as_u16() {
            200..=299 => Ok(response.json::<Vec<RemoteRegency>>().await?),
            404 => Err(RegionApiError::ProvinceNotFound(province_id.to_string())),
            status => Err(RegionApiError::Status(status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_regencies_url() {
        let client = RegionApiClient::new(&RegionApiConfig {
            base_url: "https://example.com/api".to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap();
        assert_eq!(
            client.regencies_url("19"),
            "https://example.com/api/regencies/19.json"
        );
    }

    #[test]
    fn test_parse_remote_regency() {
        let regencies: Vec<RemoteRegency> = serde_json::from_str(
            r#"[{"id":"1901","province_id":"19","name":"KABUPATEN BANGKA"}]"#,
        )
        .unwrap();
        assert_eq!(regencies[0].id, "1901");
        assert_eq!(regencies[0].name, "KABUPATEN BANGKA");
    }

    #[test]
    fn test_province_not_found_maps_to_not_found() {
        let err: AppError = RegionApiError::ProvinceNotFound("99".to_string()).into();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
