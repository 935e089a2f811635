//! Browser backend: `fetch` through gloo-net with cookies included

use gloo_net::http::{Request, RequestBuilder};
use web_sys::{RequestCredentials, UrlSearchParams};

use super::error::TransportError;
use super::http::{HttpBackend, HttpMethod, HttpRequest, HttpResponse, RequestBody};

/// Sends requests to `base_url` with `credentials: include`, so the browser
/// attaches (and stores) the session cookie on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchBackend {
    base_url: String,
}

impl FetchBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn builder(&self, request: &HttpRequest) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, request.path);
        let builder = match request.method {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
            HttpMethod::Put => Request::put(&url),
            HttpMethod::Delete => Request::delete(&url),
        };
        request
            .headers
            .iter()
            .fold(builder, |builder, (name, value)| builder.header(name, value))
            .credentials(RequestCredentials::Include)
    }
}

fn form_body(fields: &[(String, String)]) -> Result<UrlSearchParams, TransportError> {
    let params =
        UrlSearchParams::new().map_err(|e| TransportError::Encode(format!("{:?}", e)))?;
    for (name, value) in fields {
        params.append(name, value);
    }
    Ok(params)
}

impl HttpBackend for FetchBackend {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let builder = self.builder(&request);
        let prepared = match &request.body {
            Some(RequestBody::Json(json)) => builder.body(json.as_str()),
            Some(RequestBody::Form(fields)) => builder.body(form_body(fields)?),
            None => builder.build(),
        }
        .map_err(|e| TransportError::Encode(e.to_string()))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let headers = response.headers().entries().collect();
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
