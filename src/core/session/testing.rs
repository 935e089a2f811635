//! In-memory identity service and recording navigator used by the session tests

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::{Value, json};

use super::error::TransportError;
use super::http::{HttpBackend, HttpMethod, HttpRequest, HttpResponse, RequestBody};
use super::navigation::Navigator;

pub const KNOWN_USERNAME: &str = "ada";
pub const KNOWN_EMAIL: &str = "ada@example.com";
pub const KNOWN_PASSWORD: &str = "Analytical1";

pub fn identity_json(id: i64, username: &str, email: &str, full_name: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": email,
        "full_name": full_name,
        "is_active": true,
        "created_at": "2024-05-01T10:00:00",
        "updated_at": "2024-05-02T08:30:00"
    })
}

fn known_identity() -> Value {
    identity_json(1, KNOWN_USERNAME, KNOWN_EMAIL, "Ada Lovelace")
}

#[derive(Default)]
struct MockState {
    /// Whether the server currently honors the browser's session cookie
    session_active: bool,
    login_grants_session: bool,
    me_status_override: Option<u16>,
    offline: bool,
    routes: HashMap<String, HttpResponse>,
    requests: Vec<HttpRequest>,
}

/// Identity service double. The session credential is modelled as a flag.
pub struct MockIdentityService {
    state: Mutex<MockState>,
}

impl MockIdentityService {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                login_grants_session: true,
                ..Default::default()
            }),
        }
    }

    pub fn signed_in() -> Self {
        let service = Self::new();
        service.set_session(true);
        service
    }

    pub fn set_session(&self, active: bool) {
        self.state.lock().unwrap().session_active = active;
    }

    pub fn session_active(&self) -> bool {
        self.state.lock().unwrap().session_active
    }

    /// Accept credentials on `/auth/login` without establishing a session
    pub fn login_without_session(&self) {
        self.state.lock().unwrap().login_grants_session = false;
    }

    /// Force `/auth/me` to answer with the given status
    pub fn fail_me_with(&self, status: u16) {
        self.state.lock().unwrap().me_status_override = Some(status);
    }

    pub fn go_offline(&self) {
        self.state.lock().unwrap().offline = true;
    }

    /// Fixed response for any other path
    pub fn respond(&self, path: &str, response: HttpResponse) {
        self.state
            .lock()
            .unwrap()
            .routes
            .insert(path.to_string(), response);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

fn json_body(request: &HttpRequest) -> Value {
    match &request.body {
        Some(RequestBody::Json(body)) => serde_json::from_str(body).unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

fn field<'a>(body: &'a Value, name: &str) -> &'a str {
    body.get(name).and_then(Value::as_str).unwrap_or_default()
}

impl HttpBackend for MockIdentityService {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());

        if state.offline {
            return Err(TransportError::Network("connection refused".into()));
        }

        let unauthorized = || HttpResponse::json(401, &json!({"detail": "Unauthorized"}));

        let response = match (request.method, request.path.as_str()) {
            (HttpMethod::Get, "/auth/me") => match state.me_status_override {
                Some(status) => HttpResponse::json(status, &json!({"detail": "Unauthorized"})),
                None if state.session_active => HttpResponse::json(200, &known_identity()),
                None => unauthorized(),
            },
            (HttpMethod::Post, "/auth/login") => {
                let body = json_body(&request);
                let username = field(&body, "username");
                let known = username == KNOWN_USERNAME || username == KNOWN_EMAIL;
                if known && field(&body, "password") == KNOWN_PASSWORD {
                    if state.login_grants_session {
                        state.session_active = true;
                    }
                    HttpResponse::json(200, &json!({"access_token": "opaque"}))
                } else {
                    HttpResponse::json(401, &json!({"detail": "Incorrect username or password"}))
                }
            }
            (HttpMethod::Post, "/auth/signup") => {
                let body = json_body(&request);
                if field(&body, "username") == KNOWN_USERNAME {
                    HttpResponse::json(400, &json!({"detail": "Username already registered"}))
                } else {
                    state.session_active = true;
                    HttpResponse::json(
                        201,
                        &json!({
                            "user": identity_json(
                                2,
                                field(&body, "username"),
                                field(&body, "email"),
                                field(&body, "full_name"),
                            ),
                            "token": {"access_token": "opaque", "token_type": "bearer"}
                        }),
                    )
                }
            }
            (_, path) => match state.routes.get(path) {
                Some(response) => response.clone(),
                None => HttpResponse::json(404, &json!({"detail": "Not Found"})),
            },
        };

        Ok(response)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    Navigate(String),
    Redirect(String),
}

/// Navigator that records every request and tracks the resulting location
pub struct RecordingNavigator {
    location: Mutex<String>,
    events: Mutex<Vec<NavEvent>>,
}

impl RecordingNavigator {
    pub fn at(location: &str) -> Self {
        Self {
            location: Mutex::new(location.to_string()),
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<NavEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<NavEvent> {
        self.events.lock().unwrap().last().cloned()
    }

    pub fn redirects(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                NavEvent::Redirect(url) => Some(url),
                NavEvent::Navigate(_) => None,
            })
            .collect()
    }
}

impl Navigator for RecordingNavigator {
    fn current_location(&self) -> String {
        self.location.lock().unwrap().clone()
    }

    fn navigate(&self, path: &str) {
        *self.location.lock().unwrap() = path.to_string();
        self.events
            .lock()
            .unwrap()
            .push(NavEvent::Navigate(path.to_string()));
    }

    fn redirect(&self, url: &str) {
        *self.location.lock().unwrap() = url.to_string();
        self.events
            .lock()
            .unwrap()
            .push(NavEvent::Redirect(url.to_string()));
    }
}
