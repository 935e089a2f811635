//! Code-execution API client
//!
//! Runs on the same session transport as everything else. The sandbox itself
//! is remote; this module only speaks its request/response contract.

use serde::{Deserialize, Serialize};

use super::session::{AuthRequirement, HttpBackend, Navigator, SessionError, SessionTransport};

pub const LANGUAGES_ENDPOINT: &str = "/code-execution/languages";
pub const EXECUTE_ENDPOINT: &str = "/code-execution/execute";
pub const PREFERRED_LANGUAGE: &str = "python";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub code: String,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdin: Option<String>,
}

impl ExecutionRequest {
    /// Normalized request: language lower-cased, blank stdin dropped
    pub fn new(code: impl Into<String>, language: &str, stdin: &str) -> Self {
        Self {
            code: code.into(),
            language: language.to_lowercase(),
            stdin: (!stdin.is_empty()).then(|| stdin.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    /// Seconds
    pub execution_time: f64,
    #[serde(default)]
    pub error: Option<String>,
}

impl ExecutionResult {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: 1,
            execution_time: 0.0,
            error: Some(message.into()),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.exit_code == 0 && self.error.is_none()
    }

    /// First non-empty of stdout, stderr, error
    pub fn output(&self) -> &str {
        [self.stdout.as_str(), self.stderr.as_str()]
            .into_iter()
            .chain(self.error.as_deref())
            .find(|text| !text.is_empty())
            .unwrap_or("")
    }
}

/// `python` -> `Python`
pub fn language_label(language: &str) -> String {
    let mut chars = language.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Starter program loaded into the editor when a language is picked
pub fn starter_code(language: &str) -> &'static str {
    match language {
        "python" => "name = input() or \"world\"\nprint(f\"Hello, {name}!\")\n",
        "javascript" => {
            "const name = require(\"fs\").readFileSync(0, \"utf8\").trim() || \"world\";\nconsole.log(`Hello, ${name}!`);\n"
        }
        "rust" => {
            "use std::io::Read;\n\nfn main() {\n    let mut name = String::new();\n    std::io::stdin().read_to_string(&mut name).unwrap();\n    let name = if name.trim().is_empty() { \"world\" } else { name.trim() };\n    println!(\"Hello, {}!\", name);\n}\n"
        }
        "go" => {
            "package main\n\nimport \"fmt\"\n\nfunc main() {\n    name := \"world\"\n    fmt.Scanln(&name)\n    fmt.Printf(\"Hello, %s!\\n\", name)\n}\n"
        }
        "ruby" => "name = $stdin.read.strip\nname = \"world\" if name.empty?\nputs \"Hello, #{name}!\"\n",
        _ => "",
    }
}

#[derive(Debug, Clone, Deserialize)]
struct LanguagesResponse {
    languages: Vec<String>,
}

/// Languages the sandbox accepts
pub async fn supported_languages<B: HttpBackend, N: Navigator>(
    transport: &SessionTransport<B, N>,
) -> Result<Vec<String>, SessionError> {
    let response = transport
        .get(LANGUAGES_ENDPOINT, AuthRequirement::Optional)
        .await?;
    if !response.ok() {
        leptos::logging::warn!("Languages request answered {}", response.status);
        return Ok(Vec::new());
    }
    Ok(response.parse::<LanguagesResponse>()?.languages)
}

/// `python` when offered, otherwise the first language
pub fn default_language(languages: &[String]) -> Option<&str> {
    languages
        .iter()
        .find(|language| language.as_str() == PREFERRED_LANGUAGE)
        .or_else(|| languages.first())
        .map(String::as_str)
}

/// Run code remotely. Failures come back as a failed result, never as `Err`.
pub async fn execute<B: HttpBackend, N: Navigator>(
    transport: &SessionTransport<B, N>,
    request: &ExecutionRequest,
) -> ExecutionResult {
    let response = match transport
        .post(EXECUTE_ENDPOINT, request, AuthRequirement::Optional)
        .await
    {
        Ok(response) => response,
        Err(e) => {
            leptos::logging::error!("Execution request failed: {}", e);
            return ExecutionResult::failed(e.user_message());
        }
    };

    if !response.ok() {
        return ExecutionResult::failed(
            response
                .detail()
                .unwrap_or_else(|| "Execution failed".to_string()),
        );
    }

    response
        .parse::<ExecutionResult>()
        .unwrap_or_else(|e| ExecutionResult::failed(e.to_string()))
}

/// Equivalent curl invocation for the request
pub fn curl_command(api_base: &str, request: &ExecutionRequest) -> String {
    let endpoint = format!("{}{}", api_base.trim_end_matches('/'), EXECUTE_ENDPOINT);
    let payload = serde_json::to_string_pretty(request).unwrap_or_default();
    format!(
        "curl -X POST '{}' \\\n  -H 'Content-Type: application/json' \\\n  -d '{}'",
        endpoint,
        payload.replace('\'', "\\'")
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::core::session::HttpResponse;
    use crate::core::session::testing::{MockIdentityService, RecordingNavigator};

    fn transport() -> (
        SessionTransport<Arc<MockIdentityService>, Arc<RecordingNavigator>>,
        Arc<MockIdentityService>,
    ) {
        let service = Arc::new(MockIdentityService::new());
        let transport = SessionTransport::new(
            service.clone(),
            Arc::new(RecordingNavigator::at("/code-execution")),
            "/auth/login",
        );
        (transport, service)
    }

    #[test]
    fn test_request_normalization() {
        let request = ExecutionRequest::new("print(1)", "Python", "");
        assert_eq!(request.language, "python");
        assert_eq!(request.stdin, None);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"code": "print(1)", "language": "python"})
        );

        let request = ExecutionRequest::new("x", "go", "42\n");
        assert_eq!(request.stdin.as_deref(), Some("42\n"));
    }

    #[test]
    fn test_output_prefers_stdout_then_stderr_then_error() {
        let mut result = ExecutionResult::failed("boom");
        assert_eq!(result.output(), "boom");

        result.stderr = "trace".to_string();
        assert_eq!(result.output(), "trace");

        result.stdout = "ok".to_string();
        assert_eq!(result.output(), "ok");

        result.error = None;
        result.stdout.clear();
        result.stderr.clear();
        assert_eq!(result.output(), "");
    }

    #[test]
    fn test_language_label_and_starter() {
        assert_eq!(language_label("python"), "Python");
        assert_eq!(language_label(""), "");
        assert!(starter_code("python").contains("print"));
        assert_eq!(starter_code("cobol"), "");
    }

    #[test]
    fn test_default_language() {
        let langs = vec!["javascript".to_string(), "python".to_string()];
        assert_eq!(default_language(&langs), Some("python"));

        let langs = vec!["go".to_string(), "rust".to_string()];
        assert_eq!(default_language(&langs), Some("go"));

        assert_eq!(default_language(&[]), None);
    }

    #[tokio::test]
    async fn test_supported_languages() {
        let (transport, service) = transport();
        service.respond(
            LANGUAGES_ENDPOINT,
            HttpResponse::json(200, &json!({"languages": ["python", "go"]})),
        );

        let langs = supported_languages(&transport).await.unwrap();

        assert_eq!(langs, vec!["python", "go"]);
    }

    #[tokio::test]
    async fn test_supported_languages_unavailable_is_empty() {
        let (transport, service) = transport();
        service.respond(
            LANGUAGES_ENDPOINT,
            HttpResponse::json(503, &json!({"detail": "Code execution service is not available."})),
        );

        assert!(supported_languages(&transport).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_execute_success() {
        let (transport, service) = transport();
        service.respond(
            EXECUTE_ENDPOINT,
            HttpResponse::json(
                200,
                &json!({"stdout": "hi\n", "stderr": "", "exit_code": 0, "execution_time": 0.12}),
            ),
        );

        let result = execute(&transport, &ExecutionRequest::new("print('hi')", "python", "")).await;

        assert!(result.succeeded());
        assert_eq!(result.stdout, "hi\n");
    }

    #[tokio::test]
    async fn test_execute_error_detail_becomes_failed_result() {
        let (transport, service) = transport();
        service.respond(
            EXECUTE_ENDPOINT,
            HttpResponse::json(500, &json!({"detail": "Code execution failed: timeout"})),
        );

        let result = execute(&transport, &ExecutionRequest::new("loop", "python", "")).await;

        assert_eq!(result.exit_code, 1);
        assert_eq!(result.error.as_deref(), Some("Code execution failed: timeout"));
    }

    #[tokio::test]
    async fn test_execute_network_failure_becomes_failed_result() {
        let (transport, service) = transport();
        service.go_offline();

        let result = execute(&transport, &ExecutionRequest::new("1", "python", "")).await;

        assert!(!result.succeeded());
        assert_eq!(
            result.error.as_deref(),
            Some("Could not reach the server. Please try again.")
        );
    }

    #[test]
    fn test_curl_command() {
        let request = ExecutionRequest::new("print('hi')", "Python", "");
        let curl = curl_command("http://127.0.0.1:8000/api/v1/", &request);

        assert!(curl.starts_with(
            "curl -X POST 'http://127.0.0.1:8000/api/v1/code-execution/execute' \\\n"
        ));
        assert!(curl.contains("-H 'Content-Type: application/json'"));
        assert!(curl.contains(r#""code": "print(\'hi\')""#));
        assert!(curl.contains(r#""language": "python""#));
    }
}
