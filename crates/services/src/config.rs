use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ApiError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Where the backend lives and how long to wait for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
    timeout: Duration,
}

impl ApiConfig {
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` unless `base_url` is an absolute http(s) URL.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url.trim())
            .map_err(|err| ApiError::InvalidBaseUrl(format!("{base_url}: {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url: parsed,
            timeout,
        })
    }

    /// Reads `BRAINPATH_API_URL` and `BRAINPATH_API_TIMEOUT_SECS`, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` if `BRAINPATH_API_URL` is set but unusable.
    pub fn from_env() -> Result<Self, ApiError> {
        let base_url = env::var("BRAINPATH_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let timeout_secs = env::var("BRAINPATH_API_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self::new(&base_url, Duration::from_secs(timeout_secs))
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URL of `/api/<path>`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/api/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Absolute URL of `/api/<collection>/<id>`, with `id` encoded as a single path segment.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidPath` for an empty id or a dot segment.
    pub fn resource(&self, collection: &str, id: &str) -> Result<Url, ApiError> {
        if matches!(id.trim(), "" | "." | "..") {
            return Err(ApiError::InvalidPath(id.to_string()));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("api")
            .extend(collection.split('/').filter(|segment| !segment.is_empty()))
            .push(id);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let config = ApiConfig::new("https://brainpath.example/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            config.endpoint("/auth/login"),
            "https://brainpath.example/api/auth/login"
        );

        let nested = ApiConfig::new("http://localhost:8000/tenant", Duration::from_secs(5)).unwrap();
        assert_eq!(nested.endpoint("progress"), "http://localhost:8000/tenant/api/progress");
    }

    #[test]
    fn resource_ids_stay_in_one_segment() {
        let config = ApiConfig::new("http://localhost:8000/tenant/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            config.resource("learning/session", "s1").unwrap().as_str(),
            "http://localhost:8000/tenant/api/learning/session/s1"
        );
        assert_eq!(
            config.resource("learning/session", "a/../b?c#d").unwrap().as_str(),
            "http://localhost:8000/tenant/api/learning/session/a%2F..%2Fb%3Fc%23d"
        );
        assert!(matches!(
            config.resource("learning/session", ".."),
            Err(ApiError::InvalidPath(_))
        ));
        assert!(config.resource("learning/session", " ").is_err());
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(ApiConfig::new("ftp://example.com", Duration::from_secs(1)).is_err());
        assert!(ApiConfig::new("not a url", Duration::from_secs(1)).is_err());
    }
}
