//! HTTP-level configuration for the API service

/// Configuration for the HTTP surface: bind address, static uploads
/// directory, and CORS origins.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Address the server binds to
    pub bind_addr: String,
    /// Directory served under `/uploads`
    pub uploads_dir: String,
    /// Allowed CORS origins; `None` means permissive
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl HttpConfig {
    /// Create a new HttpConfig from environment variables
    ///
    /// # Environment Variables
    /// - `BIND_ADDR`: Full bind address (overrides `PORT`)
    /// - `PORT`: Port to listen on (default: 3000)
    /// - `UPLOADS_DIR`: Directory for locally served uploads (default: "uploads")
    /// - `CORS_ALLOWED_ORIGINS`: Comma-separated origin list; unset means any origin
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(3000);

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| format!("0.0.0.0:{}", port));

        let uploads_dir = std::env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".to_string());

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .ok()
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty());

        HttpConfig {
            bind_addr,
            uploads_dir,
            cors_allowed_origins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_http_config_defaults() {
        unsafe {
            std::env::remove_var("BIND_ADDR");
            std::env::remove_var("PORT");
            std::env::remove_var("UPLOADS_DIR");
            std::env::remove_var("CORS_ALLOWED_ORIGINS");
        }

        let config = HttpConfig::from_env();
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.uploads_dir, "uploads");
        assert!(config.cors_allowed_origins.is_none());
    }

    #[test]
    #[serial]
    fn test_http_config_origin_list() {
        unsafe {
            std::env::remove_var("BIND_ADDR");
            std::env::set_var(
                "CORS_ALLOWED_ORIGINS",
                "https://pintrail.example, http://localhost:5173 ,",
            );
            std::env::set_var("PORT", "8080");
        }

        let config = HttpConfig::from_env();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(
            config.cors_allowed_origins,
            Some(vec![
                "https://pintrail.example".to_string(),
                "http://localhost:5173".to_string(),
            ])
        );

        unsafe {
            std::env::remove_var("CORS_ALLOWED_ORIGINS");
            std::env::remove_var("PORT");
        }
    }
}
