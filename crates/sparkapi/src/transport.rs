//! Blocking HTTP transport backed by reqwest

use log::{debug, trace};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, LINK};
use serde_json::Value as Json;
use sparkapi_core::transport::{parse_next_link, Method, Request, Response, Transport};
use sparkapi_core::SparkApi;

use crate::config::SparkConfig;
use crate::prelude::{eprintln, *};

/// Create an HTTP client carrying the bearer token and timeout on every request
pub fn create_spark_client(config: &SparkConfig) -> Result<reqwest::blocking::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", config.access_token))
            .map_err(|e| eyre!("Invalid header value: {}", e))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    reqwest::blocking::Client::builder()
        .default_headers(headers)
        .timeout(config.timeout)
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

/// [`Transport`] implementation issuing blocking requests.
///
/// The response body is read completely before `send` returns, so the connection
/// is released whatever the caller does with the result.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(config: &SparkConfig) -> Result<Self> {
        Ok(Self {
            client: create_spark_client(config)?,
        })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &Request) -> sparkapi_core::Result<Response> {
        let http_error = |message: String| sparkapi_core::Error::Http {
            url: request.url.clone(),
            message,
        };

        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        if !request.query.is_empty() {
            builder = builder.query(request.query.pairs());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!("{} {}", request.method, request.url);
        let response = builder
            .send()
            .map_err(|e| http_error(format!("Failed to send request: {}", e)))?;

        let status = response.status().as_u16();
        let next_link = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_next_link);

        let text = response
            .text()
            .map_err(|e| http_error(format!("Failed to read response body: {}", e)))?;
        trace!("HTTP {} from {}: {}", status, request.url, text);

        Ok(Response {
            status,
            next_link,
            body: parse_body(&text),
        })
    }
}

/// Parse a response body. Empty bodies become `Null`, non-JSON text is kept as a string.
fn parse_body(text: &str) -> Json {
    if text.trim().is_empty() {
        return Json::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Json::String(text.to_string()))
}

/// Build an API client from the global CLI options
pub fn connect(global: &crate::Global) -> Result<SparkApi<HttpTransport>> {
    let config = SparkConfig::from_global(global)?;
    if global.verbose {
        eprintln!("Spark API: {}", config.api_url);
    }
    let transport = HttpTransport::new(&config)?;
    Ok(SparkApi::with_base_url(transport, &config.api_url)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(""), Json::Null);
        assert_eq!(parse_body("  \n"), Json::Null);
        assert_eq!(parse_body(r#"{"items": []}"#), json!({"items": []}));
        assert_eq!(
            parse_body("<html>Bad Gateway</html>"),
            Json::String("<html>Bad Gateway</html>".to_string())
        );
    }

    #[test]
    fn test_create_spark_client() {
        let config = SparkConfig {
            api_url: "https://api.ciscospark.com/v1/".to_string(),
            access_token: "token".to_string(),
            timeout: None,
        };
        assert!(create_spark_client(&config).is_ok());

        let bad = SparkConfig {
            access_token: "line\nbreak".to_string(),
            ..config
        };
        assert!(create_spark_client(&bad).is_err());
    }
}
