//! Platform-neutral HTTP request/response types and the backend seam

use derive_more::Display;
use serde::de::DeserializeOwned;

use super::error::TransportError;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum HttpMethod {
    #[display("GET")]
    Get,
    #[display("POST")]
    Post,
    #[display("PUT")]
    Put,
    #[display("DELETE")]
    Delete,
}

/// Request payload
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Serialized JSON document
    Json(String),
    /// Key/value pairs sent url-encoded
    Form(Vec<(String, String)>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Path relative to the API base URL, e.g. `/auth/me`
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A fully read response
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// JSON response with the matching content type
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status, value.to_string()).with_header(CONTENT_TYPE, APPLICATION_JSON)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// 2xx
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn is_json(&self) -> bool {
        self.header(CONTENT_TYPE)
            .is_some_and(|value| value.contains(APPLICATION_JSON))
    }

    /// Decode the body as JSON
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, TransportError> {
        serde_json::from_str(&self.body).map_err(|e| TransportError::Decode(e.to_string()))
    }

    /// Server-supplied error message from a JSON `{"detail": ...}` body.
    ///
    /// A string detail is returned as-is; a validation list is joined from each entry's `msg`.
    pub fn detail(&self) -> Option<String> {
        if !self.is_json() {
            return None;
        }
        let value: serde_json::Value = serde_json::from_str(&self.body).ok()?;
        match value.get("detail")? {
            serde_json::Value::String(detail) if !detail.is_empty() => Some(detail.clone()),
            serde_json::Value::Array(items) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|msg| msg.as_str()))
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            _ => None,
        }
    }
}

/// Executes requests against the remote service.
///
/// Implementations attach the ambient session credential (cookie) themselves;
/// callers never see or handle it.
#[allow(async_fn_in_trait)]
pub trait HttpBackend {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: HttpBackend> HttpBackend for std::sync::Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.as_ref().execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_range() {
        assert!(HttpResponse::new(200, "").ok());
        assert!(HttpResponse::new(201, "").ok());
        assert!(!HttpResponse::new(302, "").ok());
        assert!(!HttpResponse::new(401, "").ok());
        assert!(HttpResponse::new(401, "").is_unauthorized());
    }

    #[test]
    fn test_detail_string() {
        let resp = HttpResponse::json(400, &json!({"detail": "Username already registered"}));
        assert_eq!(resp.detail().as_deref(), Some("Username already registered"));
    }

    #[test]
    fn test_detail_validation_list() {
        let resp = HttpResponse::json(
            422,
            &json!({"detail": [
                {"loc": ["body", "email"], "msg": "value is not a valid email address"},
                {"loc": ["body", "password"], "msg": "Password must contain at least one digit"}
            ]}),
        );
        assert_eq!(
            resp.detail().as_deref(),
            Some("value is not a valid email address; Password must contain at least one digit")
        );
    }

    #[test]
    fn test_detail_requires_json_content_type() {
        let resp = HttpResponse::new(500, r#"{"detail": "boom"}"#)
            .with_header("content-type", "text/html");
        assert_eq!(resp.detail(), None);

        let resp = HttpResponse::new(500, "<html>").with_header(CONTENT_TYPE, APPLICATION_JSON);
        assert_eq!(resp.detail(), None);
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let req = HttpRequest::new(HttpMethod::Post, "/x").with_header("content-type", "text/plain");
        assert_eq!(req.header(CONTENT_TYPE), Some("text/plain"));
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }
}
