//! Application Configuration
//!
//! Endpoints and keys baked in at build time (trunk passes the environment through).

const DEFAULT_BACKEND_URL: &str = "http://localhost:8081";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Backend REST base URL, no trailing slash
    pub backend_url: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    /// Identity provider web API key
    pub identity_api_key: String,
    /// Web push VAPID key for device token registration
    pub vapid_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_BACKEND_URL,
            "",
            DEFAULT_GEMINI_MODEL,
            "",
            "",
        )
    }
}

impl AppConfig {
    pub fn new(
        backend_url: &str,
        gemini_api_key: &str,
        gemini_model: &str,
        identity_api_key: &str,
        vapid_key: &str,
    ) -> Self {
        Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            gemini_api_key: gemini_api_key.to_string(),
            gemini_model: gemini_model.to_string(),
            identity_api_key: identity_api_key.to_string(),
            vapid_key: vapid_key.to_string(),
        }
    }

    /// Read `LOSTFOUND_*` variables captured at compile time
    pub fn from_build_env() -> Self {
        Self::new(
            option_env!("LOSTFOUND_BACKEND_URL").unwrap_or(DEFAULT_BACKEND_URL),
            option_env!("LOSTFOUND_GEMINI_API_KEY").unwrap_or(""),
            option_env!("LOSTFOUND_GEMINI_MODEL").unwrap_or(DEFAULT_GEMINI_MODEL),
            option_env!("LOSTFOUND_FIREBASE_API_KEY").unwrap_or(""),
            option_env!("LOSTFOUND_VAPID_KEY").unwrap_or(""),
        )
    }

    /// Join an API path onto the backend base URL
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.backend_url, path.trim_start_matches('/'))
    }

    /// Resolve an image reference returned by the backend.
    /// Absolute and data URLs pass through; relative paths hang off the backend.
    pub fn resolve_media(&self, reference: &str) -> String {
        if reference.starts_with("http://")
            || reference.starts_with("https://")
            || reference.starts_with("data:")
            || reference.starts_with("blob:")
        {
            reference.to_string()
        } else {
            self.api_url(reference)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let cfg = AppConfig::new("http://api.campus.edu/", "", DEFAULT_GEMINI_MODEL, "", "");
        assert_eq!(cfg.backend_url, "http://api.campus.edu");
        assert_eq!(cfg.api_url("/api/items"), "http://api.campus.edu/api/items");
        assert_eq!(cfg.api_url("api/items/my"), "http://api.campus.edu/api/items/my");
    }

    #[test]
    fn test_resolve_media() {
        let cfg = AppConfig::default();
        assert_eq!(
            cfg.resolve_media("/uploads/images/a.jpg"),
            "http://localhost:8081/uploads/images/a.jpg"
        );
        assert_eq!(cfg.resolve_media("https://cdn.x/a.png"), "https://cdn.x/a.png");
        assert_eq!(cfg.resolve_media("data:image/png;base64,AA"), "data:image/png;base64,AA");
    }
}
