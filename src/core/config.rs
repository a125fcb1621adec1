use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub otp: OtpConfig,
    pub swagger: SwaggerConfig,
    pub storage: StorageConfig,
    pub email: EmailConfig,
    pub chat_completion: ChatCompletionConfig,
    pub region_api: RegionApiConfig,
    pub bootstrap: BootstrapConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Settings for signing and validating locally issued access tokens
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: Duration,
    pub leeway: Duration,
}

#[derive(Clone, Debug)]
pub struct OtpConfig {
    pub expiry: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Which backend stores uploaded files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageDriver {
    Local,
    MinIO,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub driver: StorageDriver,
    pub local: LocalStorageConfig,
    pub minio: MinIOConfig,
}

/// Local upload directory served back over HTTP
#[derive(Debug, Clone)]
pub struct LocalStorageConfig {
    /// Directory on disk where uploads are written
    pub upload_dir: String,
    /// URL path prefix the directory is served under
    pub public_path: String,
}

/// MinIO/S3 storage configuration for file uploads
#[derive(Debug, Clone)]
pub struct MinIOConfig {
    /// MinIO/S3 endpoint URL
    pub endpoint: String,
    /// Public endpoint URL for publicly accessible files (optional, defaults to endpoint)
    pub public_endpoint: String,
    /// Access key for authentication
    pub access_key: String,
    /// Secret key for authentication
    pub secret_key: String,
    /// Bucket name for storing files
    pub bucket: String,
    /// AWS region (for S3 compatibility)
    pub region: String,
    /// Prefix every uploaded object is stored under (e.g., "public")
    pub public_prefix: String,
}

/// Transactional email API (Mailjet v3.1 compatible)
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_url: String,
    pub api_key: String,
    pub api_secret: String,
    pub from_address: String,
    pub from_name: String,
    pub timeout: Duration,
}

/// OpenAI-compatible chat completion API
#[derive(Debug, Clone)]
pub struct ChatCompletionConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct RegionApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

/// Optional super admin created at startup when none exists
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub super_admin: Option<SuperAdminSeed>,
}

#[derive(Debug, Clone)]
pub struct SuperAdminSeed {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub telephone_number: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            otp: OtpConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            email: EmailConfig::from_env()?,
            chat_completion: ChatCompletionConfig::from_env()?,
            region_api: RegionApiConfig::from_env()?,
            bootstrap: BootstrapConfig::from_env()?,
        })
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, String>
where
    T: ToString,
{
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<T>()
        .map_err(|_| format!("{} must be a valid number", key))
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 50 * 1024 * 1024; // 50MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size =
            parse_env("MAX_REQUEST_BODY_SIZE", Self::DEFAULT_MAX_REQUEST_BODY_SIZE)?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        Ok(Self {
            url,
            max_connections: parse_env("DB_MAX_CONNECTIONS", Self::DEFAULT_MAX_CONNECTIONS)?,
            min_connections: parse_env("DB_MIN_CONNECTIONS", Self::DEFAULT_MIN_CONNECTIONS)?,
            acquire_timeout_secs: parse_env(
                "DB_ACQUIRE_TIMEOUT_SECS",
                Self::DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?,
            idle_timeout_secs: parse_env("DB_IDLE_TIMEOUT_SECS", Self::DEFAULT_IDLE_TIMEOUT_SECS)?,
            max_lifetime_secs: parse_env("DB_MAX_LIFETIME_SECS", Self::DEFAULT_MAX_LIFETIME_SECS)?,
        })
    }
}

impl JwtConfig {
    const DEFAULT_ACCESS_TOKEN_EXPIRY_SECS: u64 = 72 * 3600; // 3 days
    const DEFAULT_LEEWAY_SECS: u64 = 60;

    pub fn from_env() -> Result<Self, String> {
        let secret = env::var("JWT_SECRET")
            .map_err(|_| "JWT_SECRET environment variable is required".to_string())?;

        if secret.len() < 32 {
            return Err("JWT_SECRET must be at least 32 characters".to_string());
        }

        let expiry_secs = parse_env(
            "JWT_ACCESS_TOKEN_EXPIRY",
            Self::DEFAULT_ACCESS_TOKEN_EXPIRY_SECS,
        )?;
        let leeway_secs = parse_env("JWT_LEEWAY", Self::DEFAULT_LEEWAY_SECS)?;

        Ok(Self {
            secret,
            access_token_expiry: Duration::from_secs(expiry_secs),
            leeway: Duration::from_secs(leeway_secs),
        })
    }
}

impl OtpConfig {
    const DEFAULT_EXPIRY_MINUTES: u64 = 5;

    pub fn from_env() -> Result<Self, String> {
        let minutes = parse_env("OTP_EXPIRY_MINUTES", Self::DEFAULT_EXPIRY_MINUTES)?;
        Ok(Self {
            expiry: Duration::from_secs(minutes * 60),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Aduan API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API documentation for the citizen complaint service".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, String> {
        let driver = match env::var("STORAGE_DRIVER")
            .unwrap_or_else(|_| "local".to_string())
            .to_lowercase()
            .as_str()
        {
            "local" => StorageDriver::Local,
            "minio" | "s3" => StorageDriver::MinIO,
            other => return Err(format!("Unsupported STORAGE_DRIVER: {}", other)),
        };

        Ok(Self {
            driver,
            local: LocalStorageConfig::from_env(),
            minio: MinIOConfig::from_env(),
        })
    }
}

impl LocalStorageConfig {
    pub fn from_env() -> Self {
        let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());
        let public_path = env::var("UPLOAD_PUBLIC_PATH").unwrap_or_else(|_| "/uploads".to_string());

        Self {
            upload_dir,
            public_path: public_path.trim_end_matches('/').to_string(),
        }
    }
}

impl MinIOConfig {
    pub fn from_env() -> Self {
        let endpoint =
            env::var("MINIO_ENDPOINT").unwrap_or_else(|_| "http://localhost:9000".to_string());

        // Public endpoint defaults to the main endpoint if not specified
        let public_endpoint =
            env::var("MINIO_PUBLIC_ENDPOINT").unwrap_or_else(|_| endpoint.clone());

        let access_key = env::var("MINIO_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".to_string());
        let secret_key = env::var("MINIO_SECRET_KEY").unwrap_or_else(|_| "minioadmin".to_string());
        let bucket = env::var("MINIO_BUCKET").unwrap_or_else(|_| "aduan-uploads".to_string());
        let region = env::var("MINIO_REGION").unwrap_or_else(|_| "us-east-1".to_string());
        let public_prefix =
            env::var("MINIO_PUBLIC_PREFIX").unwrap_or_else(|_| "public".to_string());

        Self {
            endpoint,
            public_endpoint,
            access_key,
            secret_key,
            bucket,
            region,
            public_prefix,
        }
    }
}

impl EmailConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 15;

    pub fn from_env() -> Result<Self, String> {
        let api_url = env::var("EMAIL_API_URL")
            .unwrap_or_else(|_| "https://api.mailjet.com/v3.1/send".to_string());
        let api_key = env::var("EMAIL_API_KEY").unwrap_or_default();
        let api_secret = env::var("EMAIL_API_SECRET").unwrap_or_default();
        let from_address = env::var("EMAIL_FROM_ADDRESS")
            .unwrap_or_else(|_| "no-reply@aduan.local".to_string());
        let from_name = env::var("EMAIL_FROM_NAME").unwrap_or_else(|_| "Aduan".to_string());
        let timeout_secs = parse_env("EMAIL_TIMEOUT_SECS", Self::DEFAULT_TIMEOUT_SECS)?;

        Ok(Self {
            api_url,
            api_key,
            api_secret,
            from_address,
            from_name,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl ChatCompletionConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 60;

    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let api_key = env::var("OPENAI_API_KEY").ok().filter(|s| !s.is_empty());
        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let timeout_secs = parse_env("OPENAI_TIMEOUT_SECS", Self::DEFAULT_TIMEOUT_SECS)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl RegionApiConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 15;

    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("REGION_API_BASE_URL")
            .unwrap_or_else(|_| "https://www.emsifa.com/api-wilayah-indonesia/api".to_string());
        let timeout_secs = parse_env("REGION_API_TIMEOUT_SECS", Self::DEFAULT_TIMEOUT_SECS)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl BootstrapConfig {
    pub fn from_env() -> Result<Self, String> {
        let username = env::var("SUPER_ADMIN_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SUPER_ADMIN_PASSWORD").ok().filter(|s| !s.is_empty());

        let super_admin = match (username, password) {
            (Some(username), Some(password)) => {
                if password.len() < 8 {
                    return Err("SUPER_ADMIN_PASSWORD must be at least 8 characters".to_string());
                }
                Some(SuperAdminSeed {
                    name: env::var("SUPER_ADMIN_NAME").unwrap_or_else(|_| "Super Admin".to_string()),
                    email: env::var("SUPER_ADMIN_EMAIL")
                        .unwrap_or_else(|_| format!("{}@aduan.local", username)),
                    telephone_number: env::var("SUPER_ADMIN_TELEPHONE")
                        .unwrap_or_else(|_| "0000000000".to_string()),
                    username,
                    password,
                })
            }
            _ => None,
        };

        Ok(Self { super_admin })
    }
}
