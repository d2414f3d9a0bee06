//! Service configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Default OAuth2 token endpoint for service-account assertions
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Default FCM endpoint base (v1 send path is appended per project)
const DEFAULT_FCM_ENDPOINT: &str = "https://fcm.googleapis.com";

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP port
    pub http_port: u16,
    /// Directory for the embedded database files
    pub database_dir: String,
    /// Environment: development | staging | production
    pub environment: String,
    /// FCM project id (path segment of the v1 send URL)
    pub fcm_project_id: String,
    /// Service-account client email (assertion issuer)
    pub fcm_client_email: String,
    /// Service-account RSA private key, PEM (env: FCM_PRIVATE_KEY, `\n` escaped)
    pub fcm_private_key: String,
    /// OAuth2 token exchange endpoint
    pub token_uri: String,
    /// FCM endpoint base URL
    pub fcm_endpoint: String,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        // Keys pasted into env files carry literal `\n` escapes
        let fcm_private_key = crate::push::credentials::normalize_private_key(
            &Self::require_secret("FCM_PRIVATE_KEY", &environment)?,
        );

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database_dir: std::env::var("DATABASE_DIR").unwrap_or_else(|_| "data/maitred.db".into()),
            environment: environment.clone(),
            fcm_project_id: std::env::var("FCM_PROJECT_ID")
                .map_err(|_| "FCM_PROJECT_ID must be set")?,
            fcm_client_email: Self::require_secret("FCM_CLIENT_EMAIL", &environment)?,
            fcm_private_key,
            token_uri: std::env::var("TOKEN_URI").unwrap_or_else(|_| DEFAULT_TOKEN_URI.into()),
            fcm_endpoint: std::env::var("FCM_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_FCM_ENDPOINT.into()),
        })
    }
}
