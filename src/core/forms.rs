//! Login and signup form controllers
//!
//! Forms validate locally first, so an invalid submission never reaches the
//! network. Valid ones go to the session store; whatever it fails with ends up
//! as one message under the `submit` key.

use std::collections::BTreeMap;

use super::session::{
    HttpBackend, Identity, Navigator, ReturnPath, SessionError, SessionStore, SignupRequest,
};
use super::validation::{
    ValidationError, validate_display_name, validate_email, validate_identifier,
    validate_login_password, validate_new_password, validate_username,
};

/// Key for the form-wide message
pub const SUBMIT: &str = "submit";

/// Field name to message. Rebuilt on submit, cleared per field on edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    fn check(&mut self, field: &str, result: Result<(), ValidationError>) {
        if let Err(error) = result {
            self.insert(field, error.to_string());
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn submit(&self) -> Option<&str> {
        self.get(SUBMIT)
    }

    /// The user edited `field`: drop its message and the form-wide one
    pub fn clear(&mut self, field: &str) {
        self.0.remove(field);
        self.0.remove(SUBMIT);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn from_submit_error(error: &SessionError) -> Self {
        let mut errors = Self::new();
        errors.insert(SUBMIT, error.user_message());
        errors
    }
}

/// Sign-in form values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    /// Username or email
    pub identifier: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.check("identifier", validate_identifier(&self.identifier));
        errors.check("password", validate_login_password(&self.password));
        errors
    }
}

/// Sign-up form values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupForm {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.check("username", validate_username(&self.username));
        errors.check("name", validate_display_name(&self.name));
        errors.check("email", validate_email(&self.email));
        errors.check("password", validate_new_password(&self.password));
        errors
    }

    /// Wire payload; everything but the password is trimmed
    pub fn to_request(&self) -> SignupRequest {
        SignupRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            full_name: self.name.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

/// Validate and sign in. `Err` holds either field errors or a `submit` message.
pub async fn submit_login<B: HttpBackend, N: Navigator>(
    store: &SessionStore<B, N>,
    form: &LoginForm,
    return_to: Option<ReturnPath>,
) -> Result<Identity, FieldErrors> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Err(errors);
    }
    store
        .login(form.identifier.trim(), &form.password, return_to)
        .await
        .map_err(|e| FieldErrors::from_submit_error(&e))
}

/// Validate and register
pub async fn submit_signup<B: HttpBackend, N: Navigator>(
    store: &SessionStore<B, N>,
    form: &SignupForm,
) -> Result<Identity, FieldErrors> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Err(errors);
    }
    store
        .signup(&form.to_request())
        .await
        .map_err(|e| FieldErrors::from_submit_error(&e))
}

/// Shown under the signup password field
pub const PASSWORD_HINT: &str =
    "At least 8 characters, with a digit, an uppercase and a lowercase letter";

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::session::SessionRoutes;
    use crate::core::session::testing::{
        KNOWN_PASSWORD, KNOWN_USERNAME, MockIdentityService, NavEvent, RecordingNavigator,
    };

    type TestStore = SessionStore<Arc<MockIdentityService>, Arc<RecordingNavigator>>;

    fn store(location: &str) -> (TestStore, Arc<MockIdentityService>, Arc<RecordingNavigator>) {
        let service = Arc::new(MockIdentityService::new());
        let navigator = Arc::new(RecordingNavigator::at(location));
        let store = SessionStore::new(service.clone(), navigator.clone(), SessionRoutes::default());
        (store, service, navigator)
    }

    fn valid_signup() -> SignupForm {
        SignupForm {
            username: "grace".to_string(),
            name: "  Grace Hopper ".to_string(),
            email: " grace@example.com ".to_string(),
            password: "Compiler1".to_string(),
        }
    }

    #[test]
    fn test_signup_collects_every_violation() {
        let form = SignupForm {
            username: "a!".to_string(),
            name: String::new(),
            email: "nope".to_string(),
            password: "short".to_string(),
        };

        let errors = form.validate();

        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("username"), Some("Username must be at least 3 characters"));
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("email"), Some("Please enter a valid email"));
        assert_eq!(errors.get("password"), Some("Password must be at least 8 characters"));
    }

    #[test]
    fn test_signup_password_without_uppercase() {
        let mut form = valid_signup();
        form.password = "abcdefg1".to_string();
        let errors = form.validate();
        assert!(errors.get("password").unwrap().contains("uppercase"));

        form.password = "Abcdefg1".to_string();
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_signup_request_is_trimmed() {
        let request = valid_signup().to_request();
        assert_eq!(request.username, "grace");
        assert_eq!(request.full_name, "Grace Hopper");
        assert_eq!(request.email, "grace@example.com");
        assert_eq!(request.password, "Compiler1");
    }

    #[test]
    fn test_clear_drops_field_and_submit_messages() {
        let mut errors = FieldErrors::new();
        errors.insert("email", "Email is required");
        errors.insert("password", "Password is required");
        errors.insert(SUBMIT, "Login failed");

        errors.clear("email");

        assert_eq!(errors.get("email"), None);
        assert_eq!(errors.submit(), None);
        assert_eq!(errors.get("password"), Some("Password is required"));
    }

    #[tokio::test]
    async fn test_login_with_empty_password_makes_no_call() {
        let (store, service, _) = store("/auth/login");
        let form = LoginForm {
            identifier: KNOWN_USERNAME.to_string(),
            password: String::new(),
        };

        let errors = submit_login(&store, &form, None).await.unwrap_err();

        assert_eq!(errors.get("password"), Some("Password is required"));
        assert_eq!(errors.submit(), None);
        assert_eq!(service.request_count(), 0);
    }

    #[tokio::test]
    async fn test_login_failure_lands_in_submit() {
        let (store, _, _) = store("/auth/login");
        let form = LoginForm {
            identifier: KNOWN_USERNAME.to_string(),
            password: "wrong".to_string(),
        };

        let errors = submit_login(&store, &form, None).await.unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.submit(), Some("Incorrect username or password"));
    }

    #[tokio::test]
    async fn test_login_trims_identifier_and_follows_return_path() {
        let (store, service, navigator) = store("/auth/login?next=%2Fdashboard%2Freports%3Fx%3D1");
        let form = LoginForm {
            identifier: format!("  {}  ", KNOWN_USERNAME),
            password: KNOWN_PASSWORD.to_string(),
        };
        let next = ReturnPath::from_next("/dashboard/reports?x=1");

        let identity = submit_login(&store, &form, next).await.unwrap();

        assert_eq!(identity.username, KNOWN_USERNAME);
        assert!(service.session_active());
        assert_eq!(
            navigator.last(),
            Some(NavEvent::Navigate("/dashboard/reports?x=1".to_string()))
        );
    }

    #[tokio::test]
    async fn test_invalid_signup_makes_no_call() {
        let (store, service, _) = store("/auth/signup");
        let mut form = valid_signup();
        form.password = "abcdefg1".to_string();

        let errors = submit_signup(&store, &form).await.unwrap_err();

        assert!(errors.get("password").is_some());
        assert_eq!(service.request_count(), 0);
    }

    #[tokio::test]
    async fn test_signup_rejection_lands_in_submit() {
        let (store, _, _) = store("/auth/signup");
        let mut form = valid_signup();
        form.username = KNOWN_USERNAME.to_string();

        let errors = submit_signup(&store, &form).await.unwrap_err();

        assert_eq!(errors.submit(), Some("Username already registered"));
    }

    #[tokio::test]
    async fn test_signup_success() {
        let (store, service, navigator) = store("/auth/signup");

        let identity = submit_signup(&store, &valid_signup()).await.unwrap();

        assert_eq!(identity.full_name, "Grace Hopper");
        assert_eq!(store.identity(), Some(identity));
        assert_eq!(service.paths(), vec!["/auth/signup"]);
        assert_eq!(navigator.last(), Some(NavEvent::Navigate("/".to_string())));
    }
}
