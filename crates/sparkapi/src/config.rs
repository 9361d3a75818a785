use std::time::Duration;

use sparkapi_core::endpoints::parse_base_url;

use crate::prelude::Error;

/// Spark client configuration resolved from CLI flags and environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct SparkConfig {
    pub api_url: String,
    pub access_token: String,
    pub timeout: Option<Duration>,
}

impl SparkConfig {
    /// Build the configuration from the global options.
    ///
    /// Clap already folds `SPARK_ACCESS_TOKEN`, `SPARK_API_URL` and `SPARK_TIMEOUT`
    /// into the flags, so only validation happens here.
    pub fn from_global(global: &crate::Global) -> Result<Self, Error> {
        let access_token = global
            .token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(Error::MissingToken)?
            .to_string();

        let api_url = parse_base_url(&global.api_url)
            .map_err(|e| Error::Config(e.to_string()))?
            .to_string();

        let timeout = match global.timeout {
            Some(0) => {
                return Err(Error::Config(
                    "timeout must be at least one second".to_string(),
                ))
            }
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        Ok(Self {
            api_url,
            access_token,
            timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Global;

    fn global(token: Option<&str>) -> Global {
        Global {
            token: token.map(str::to_string),
            api_url: sparkapi_core::endpoints::DEFAULT_API_URL.to_string(),
            timeout: None,
            verbose: false,
        }
    }

    #[test]
    fn test_from_global() {
        let mut options = global(Some(" secret-token "));
        options.timeout = Some(30);

        let config = SparkConfig::from_global(&options).unwrap();
        assert_eq!(config.access_token, "secret-token");
        assert_eq!(config.api_url, "https://api.ciscospark.com/v1/");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_missing_token() {
        assert_eq!(
            SparkConfig::from_global(&global(None)),
            Err(Error::MissingToken)
        );
        assert_eq!(
            SparkConfig::from_global(&global(Some("  "))),
            Err(Error::MissingToken)
        );
    }

    #[test]
    fn test_rejects_relative_api_url() {
        let mut options = global(Some("token"));
        options.api_url = "api.ciscospark.com/v1".to_string();
        assert!(matches!(
            SparkConfig::from_global(&options),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_api_url() {
        for bad in ["https://", "https://bad host", "ftp://api.ciscospark.com/v1"] {
            let mut options = global(Some("token"));
            options.api_url = bad.to_string();
            assert!(
                matches!(SparkConfig::from_global(&options), Err(Error::Config(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_normalizes_api_url() {
        let mut options = global(Some("token"));
        options.api_url = "https://api.ciscospark.com/v1".to_string();
        assert_eq!(
            SparkConfig::from_global(&options).unwrap().api_url,
            "https://api.ciscospark.com/v1/"
        );
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut options = global(Some("token"));
        options.timeout = Some(0);
        assert!(matches!(
            SparkConfig::from_global(&options),
            Err(Error::Config(_))
        ));
    }
}
