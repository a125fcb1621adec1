//! MinIO/S3-compatible storage backend
//!
//! Objects are written below a public prefix that the bucket policy opens for
//! anonymous reads, so stored paths are plain URLs.

use async_trait::async_trait;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::{Client, Url};
use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use super::FileStorage;
use crate::core::config::MinIOConfig;
use crate::core::error::{AppError, Result};

type HmacSha256 = Hmac<Sha256>;

pub struct MinIOClient {
    bucket: Box<Bucket>,
    region: Region,
    credentials: Credentials,
    endpoint: String,
    public_endpoint: String,
    public_prefix: String,
    access_key: String,
    secret_key: String,
    region_name: String,
    http_client: Client,
}

impl MinIOClient {
    /// Connect to the bucket, creating it and its public read policy if needed
    pub async fn new(config: MinIOConfig) -> Result<Self> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Failed to create MinIO credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
            .map_err(|e| AppError::Internal(format!("Failed to create MinIO bucket: {}", e)))?;

        // Path-style URLs: http://endpoint/bucket
        bucket.set_path_style();

        let http_client = Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let client = Self {
            bucket,
            region,
            credentials,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            public_endpoint: config.public_endpoint.trim_end_matches('/').to_string(),
            public_prefix: config.public_prefix.trim_matches('/').to_string(),
            access_key: config.access_key,
            secret_key: config.secret_key,
            region_name: config.region,
            http_client,
        };

        client.ensure_bucket_exists().await;
        client.set_public_read_policy().await;

        info!(
            "MinIO storage initialized for endpoint: {}, bucket: {}, prefix: {}",
            client.endpoint,
            client.bucket.name(),
            client.public_prefix
        );

        Ok(client)
    }

    async fn ensure_bucket_exists(&self) {
        let result = Bucket::create_with_path_style(
            &self.bucket.name(),
            self.region.clone(),
            self.credentials.clone(),
            BucketConfiguration::default(),
        )
        .await;

        match result {
            Ok(_) => info!("Bucket '{}' created", self.bucket.name()),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("BucketAlreadyOwnedByYou")
                    || error_str.contains("BucketAlreadyExists")
                    || error_str.contains("already own it")
                {
                    debug!("Bucket '{}' already exists", self.bucket.name());
                } else {
                    warn!(
                        "Could not create bucket '{}': {}. Assuming it exists.",
                        self.bucket.name(),
                        e
                    );
                }
            }
        }
    }

    /// Allow anonymous `GetObject` below the public prefix
    async fn set_public_read_policy(&self) {
        let bucket_name = self.bucket.name();
        let public_prefix = &self.public_prefix;

        let policy = json!({
            "Version": "2012-10-17",
            "Statement": [
                {
                    "Effect": "Allow",
                    "Principal": {"AWS": "*"},
                    "Action": ["s3:GetObject"],
                    "Resource": [format!("arn:aws:s3:::{bucket_name}/{public_prefix}/*")]
                }
            ]
        });

        match self
            .put_bucket_policy_with_sigv4(&bucket_name, &policy.to_string())
            .await
        {
            Ok(_) => info!("Set public read policy for {}/{}/*", bucket_name, public_prefix),
            Err(e) => warn!(
                "Failed to set bucket policy for '{}': {}. \
                Set it manually with: mc anonymous set download minio/{}/{}",
                bucket_name, e, bucket_name, public_prefix
            ),
        }
    }

    /// `PUT /{bucket}?policy` signed with AWS Signature v4, which rust-s3
    /// does not expose
    async fn put_bucket_policy_with_sigv4(&self, bucket_name: &str, policy: &str) -> Result<()> {
        let endpoint_url = Url::parse(&self.endpoint)
            .map_err(|e| AppError::Internal(format!("Invalid endpoint URL: {}", e)))?;
        let host = endpoint_url
            .host_str()
            .ok_or_else(|| AppError::Internal("Endpoint URL has no host".to_string()))?;
        let host_header = match endpoint_url.port() {
            Some(p) => format!("{}:{}", host, p),
            None => host.to_string(),
        };

        let amz_date = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
        let payload_hash = hex::encode(Sha256::digest(policy.as_bytes()));
        let request = SignedRequest {
            method: "PUT",
            host: &host_header,
            uri: &format!("/{}", bucket_name),
            query: "policy=",
            payload_hash: &payload_hash,
            amz_date: &amz_date,
        };
        let authorization =
            request.authorization(&self.access_key, &self.secret_key, &self.region_name)?;

        let response = self
            .http_client
            .put(format!("{}/{}?policy", self.endpoint, bucket_name))
            .header("Host", &host_header)
            .header("x-amz-date", &amz_date)
            .header("x-amz-content-sha256", &payload_hash)
            .header("Authorization", authorization)
            .header("Content-Type", "application/json")
            .body(policy.to_string())
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to send policy request: {}", e)))?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Internal(format!(
            "Failed to set bucket policy: {} - {}",
            status, body
        )))
    }

    fn object_key(&self, key: &str) -> String {
        format!("{}/{}", self.public_prefix, key)
    }

    pub fn public_url(&self, object_key: &str) -> String {
        format!("{}/{}/{}", self.public_endpoint, self.bucket.name(), object_key)
    }

    /// Map a URL produced by [`public_url`](Self::public_url), or an internal
    /// endpoint URL, back to its object key
    pub fn extract_key_from_url(&self, url: &str) -> Option<String> {
        [&self.public_endpoint, &self.endpoint]
            .iter()
            .find_map(|endpoint| {
                url.strip_prefix(&format!("{}/{}/", endpoint, self.bucket.name()))
            })
            .map(str::to_string)
    }
}

#[async_trait]
impl FileStorage for MinIOClient {
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String> {
        let object_key = self.object_key(key);

        self.bucket
            .put_object_with_content_type(&object_key, &data, content_type)
            .await
            .map_err(|e| {
                AppError::Internal(format!("Failed to upload file '{}': {}", object_key, e))
            })?;

        debug!("Uploaded file '{}' to bucket '{}'", object_key, self.bucket.name());
        Ok(self.public_url(&object_key))
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let object_key = self
            .extract_key_from_url(path)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown file path '{}'", path)))?;

        self.bucket.delete_object(&object_key).await.map_err(|e| {
            AppError::Internal(format!("Failed to delete file '{}': {}", object_key, e))
        })?;

        debug!("Deleted file '{}' from bucket '{}'", object_key, self.bucket.name());
        Ok(())
    }
}

/// The parts of an S3 request covered by a Signature v4
struct SignedRequest<'a> {
    method: &'a str,
    host: &'a str,
    uri: &'a str,
    query: &'a str,
    payload_hash: &'a str,
    /// `YYYYMMDDTHHMMSSZ`
    amz_date: &'a str,
}

impl SignedRequest<'_> {
    const ALGORITHM: &'static str = "AWS4-HMAC-SHA256";
    const SIGNED_HEADERS: &'static str = "host;x-amz-content-sha256;x-amz-date";

    fn authorization(&self, access_key: &str, secret_key: &str, region: &str) -> Result<String> {
        let date_stamp = &self.amz_date[..8.min(self.amz_date.len())];
        let canonical_request = format!(
            "{}\n{}\n{}\nhost:{}\nx-amz-content-sha256:{}\nx-amz-date:{}\n\n{}\n{}",
            self.method,
            self.uri,
            self.query,
            self.host,
            self.payload_hash,
            self.amz_date,
            Self::SIGNED_HEADERS,
            self.payload_hash
        );

        let scope = format!("{}/{}/s3/aws4_request", date_stamp, region);
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            Self::ALGORITHM,
            self.amz_date,
            scope,
            hex::encode(Sha256::digest(canonical_request.as_bytes()))
        );

        let mut key = hmac_sha256(format!("AWS4{}", secret_key).as_bytes(), date_stamp.as_bytes())?;
        for part in [region.as_bytes(), b"s3".as_slice(), b"aws4_request".as_slice()] {
            key = hmac_sha256(&key, part)?;
        }
        let signature = hex::encode(hmac_sha256(&key, string_to_sign.as_bytes())?);

        Ok(format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            Self::ALGORITHM,
            access_key,
            scope,
            Self::SIGNED_HEADERS,
            signature
        ))
    }
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| AppError::Internal(format!("HMAC key error: {}", e)))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_header_shape() {
        let request = SignedRequest {
            method: "PUT",
            host: "localhost:9000",
            uri: "/aduan-uploads",
            query: "policy=",
            payload_hash: "abc",
            amz_date: "20240101T000000Z",
        };

        let header = request
            .authorization("minioadmin", "minioadmin", "us-east-1")
            .unwrap();

        assert!(header.starts_with(
            "AWS4-HMAC-SHA256 Credential=minioadmin/20240101/us-east-1/s3/aws4_request, "
        ));
        assert!(header.contains("SignedHeaders=host;x-amz-content-sha256;x-amz-date"));

        let signature = header.rsplit("Signature=").next().unwrap();
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_signature_is_deterministic() {
        let request = SignedRequest {
            method: "PUT",
            host: "minio",
            uri: "/bucket",
            query: "policy=",
            payload_hash: "hash",
            amz_date: "20240101T000000Z",
        };

        let a = request.authorization("key", "secret", "us-east-1").unwrap();
        let b = request.authorization("key", "secret", "us-east-1").unwrap();
        let c = request.authorization("key", "other", "us-east-1").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
