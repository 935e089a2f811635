//! Session transport
//!
//! Every call that needs session context goes through [`SessionTransport`]. It
//! relies on the backend to carry the ambient credential, fills in the JSON
//! content type, and owns the single policy for a rejected session: a 401 on a
//! required call sends the browser to sign-in with the current location
//! captured as the return path.

use serde::Serialize;

use super::error::{SessionError, TransportError};
use super::http::{
    APPLICATION_JSON, CONTENT_TYPE, FORM_URLENCODED, HttpBackend, HttpMethod, HttpRequest,
    HttpResponse, RequestBody,
};
use super::navigation::{Navigator, ReturnPath};

/// Whether a 401 on this call means "go sign in" or is an expected answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequirement {
    /// 401 redirects to sign-in and fails with `AuthenticationRequired`
    Required,
    /// 401 is returned to the caller untouched (probes such as "am I logged in?")
    Optional,
}

impl From<bool> for AuthRequirement {
    fn from(required: bool) -> Self {
        if required {
            AuthRequirement::Required
        } else {
            AuthRequirement::Optional
        }
    }
}

pub struct SessionTransport<B, N> {
    backend: B,
    navigator: N,
    login_path: String,
}

impl<B: HttpBackend, N: Navigator> SessionTransport<B, N> {
    pub fn new(backend: B, navigator: N, login_path: impl Into<String>) -> Self {
        Self {
            backend,
            navigator,
            login_path: login_path.into(),
        }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Issue a request. Non-401 responses, error statuses included, come back as-is.
    pub async fn send(
        &self,
        mut request: HttpRequest,
        auth: AuthRequirement,
    ) -> Result<HttpResponse, SessionError> {
        let default_type = match request.body {
            Some(RequestBody::Json(_)) => Some(APPLICATION_JSON),
            Some(RequestBody::Form(_)) => Some(FORM_URLENCODED),
            None => None,
        };
        if let Some(content_type) = default_type {
            if request.header(CONTENT_TYPE).is_none() {
                request.headers.push((CONTENT_TYPE.to_string(), content_type.to_string()));
            }
        }

        let method = request.method;
        let path = request.path.clone();
        let response = self.backend.execute(request).await?;

        if response.is_unauthorized() && auth == AuthRequirement::Required {
            let return_to = ReturnPath::capture(&self.navigator);
            let login_url = return_to.login_url(&self.login_path);
            leptos::logging::warn!(
                "{} {} rejected the session, redirecting to {}",
                method,
                path,
                login_url
            );
            self.navigator.redirect(&login_url);
            return Err(SessionError::AuthenticationRequired { return_to });
        }

        Ok(response)
    }

    pub async fn get(&self, path: &str, auth: AuthRequirement) -> Result<HttpResponse, SessionError> {
        self.send(HttpRequest::new(HttpMethod::Get, path), auth).await
    }

    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
        auth: AuthRequirement,
    ) -> Result<HttpResponse, SessionError> {
        let request = HttpRequest::new(HttpMethod::Post, path).with_body(json_body(payload)?);
        self.send(request, auth).await
    }

    pub async fn post_form(
        &self,
        path: &str,
        fields: Vec<(String, String)>,
        auth: AuthRequirement,
    ) -> Result<HttpResponse, SessionError> {
        let request = HttpRequest::new(HttpMethod::Post, path).with_body(RequestBody::Form(fields));
        self.send(request, auth).await
    }

    pub async fn put<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
        auth: AuthRequirement,
    ) -> Result<HttpResponse, SessionError> {
        let request = HttpRequest::new(HttpMethod::Put, path).with_body(json_body(payload)?);
        self.send(request, auth).await
    }

    pub async fn delete(
        &self,
        path: &str,
        auth: AuthRequirement,
    ) -> Result<HttpResponse, SessionError> {
        self.send(HttpRequest::new(HttpMethod::Delete, path), auth).await
    }
}

fn json_body<T: Serialize + ?Sized>(payload: &T) -> Result<RequestBody, TransportError> {
    serde_json::to_string(payload)
        .map(RequestBody::Json)
        .map_err(|e| TransportError::Encode(e.to_string()))
}
