use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;

/// WebDriver keycode for the Enter key, appended to typed text to signal
/// submission.
pub const ENTER_KEY: char = '\u{E007}';

/// Bound on every wire request: a stalled remote end must surface as a
/// transport failure instead of hanging the suite.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the WebDriver remote end or its transport.
#[derive(Error, Debug)]
pub enum WebDriverError {
    #[error("webdriver transport failure")]
    Transport(#[from] reqwest::Error),

    /// Non-success response from the remote end, decoded from the W3C
    /// error payload.
    #[error("webdriver protocol error `{error}` (http {status}): {message}")]
    Protocol {
        status: StatusCode,
        error: String,
        message: String,
    },

    #[error("unexpected webdriver response payload: {0}")]
    UnexpectedPayload(String),
}

impl WebDriverError {
    /// Transport-level failures mean the remote end (or the network to it)
    /// is down, as opposed to the driven page misbehaving.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// A W3C element reference as returned by element location commands.
#[derive(Debug, Clone, Deserialize)]
pub struct ElementRef {
    #[serde(rename = "element-6066-11e4-a52e-4f735466cecf")]
    id: String,
}

#[derive(Deserialize)]
struct ResponseValue<T> {
    value: T,
}

#[derive(Deserialize)]
struct NewSessionValue {
    #[serde(rename = "sessionId")]
    session_id: String,
}

#[derive(Deserialize)]
struct ErrorValue {
    error: String,
    message: String,
}

/// A live session against a W3C WebDriver remote end (chromedriver,
/// geckodriver, a Selenium grid node), speaking the wire protocol over
/// HTTP.
///
/// Only the handful of commands the oracle adapter needs are implemented.
pub struct WebDriverSession {
    client: Client,
    remote_url: String,
    session_id: String,
}

impl WebDriverSession {
    /// Open a new headless browser session on the given remote end.
    pub async fn connect(remote_url: &str) -> Result<Self, WebDriverError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let remote_url = remote_url.trim_end_matches('/').to_string();
        let capabilities = json!({
            "capabilities": {
                "alwaysMatch": {
                    "goog:chromeOptions": {
                        "args": ["--headless=new", "--disable-gpu", "--window-size=1280,800"]
                    }
                }
            }
        });

        let value = send(
            &client,
            Method::POST,
            &format!("{remote_url}/session"),
            Some(capabilities),
        )
        .await?;
        let session: NewSessionValue = decode(value)?;

        Ok(Self {
            client,
            remote_url,
            session_id: session.session_id,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Navigate the session to the given url.
    pub async fn navigate(&self, url: &str) -> Result<(), WebDriverError> {
        self.command(Method::POST, "url", Some(json!({ "url": url }))).await?;

        Ok(())
    }

    /// Locate all elements matching a CSS selector, in document order.
    ///
    /// An empty list is not an error: discovery polling relies on it.
    pub async fn find_elements(&self, css: &str) -> Result<Vec<ElementRef>, WebDriverError> {
        let value = self
            .command(
                Method::POST,
                "elements",
                Some(json!({ "using": "css selector", "value": css })),
            )
            .await?;

        decode(value)
    }

    /// Reset an editable element to its empty state.
    pub async fn clear(&self, element: &ElementRef) -> Result<(), WebDriverError> {
        self.command(
            Method::POST,
            &format!("element/{}/clear", element.id),
            Some(json!({})),
        )
        .await?;

        Ok(())
    }

    /// Type text into an element. Include [ENTER_KEY] to submit.
    pub async fn send_keys(&self, element: &ElementRef, text: &str) -> Result<(), WebDriverError> {
        self.command(
            Method::POST,
            &format!("element/{}/value", element.id),
            Some(json!({ "text": text })),
        )
        .await?;

        Ok(())
    }

    /// Read the `value` property of an element.
    ///
    /// A null property (element without a value) is the empty string.
    pub async fn element_value(&self, element: &ElementRef) -> Result<String, WebDriverError> {
        let value = self
            .command(
                Method::GET,
                &format!("element/{}/property/value", element.id),
                None,
            )
            .await?;

        match value {
            Value::Null => Ok(String::new()),
            Value::String(text) => Ok(text),
            other => Err(WebDriverError::UnexpectedPayload(other.to_string())),
        }
    }

    /// End the session, closing the browser.
    pub async fn close(&self) -> Result<(), WebDriverError> {
        self.command(Method::DELETE, "", None).await?;

        Ok(())
    }

    async fn command(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, WebDriverError> {
        let url = if path.is_empty() {
            format!("{}/session/{}", self.remote_url, self.session_id)
        } else {
            format!("{}/session/{}/{path}", self.remote_url, self.session_id)
        };

        send(&self.client, method, &url, body).await
    }
}

async fn send(
    client: &Client,
    method: Method,
    url: &str,
    body: Option<Value>,
) -> Result<Value, WebDriverError> {
    let mut request = client.request(method, url);
    if let Some(body) = body {
        request = request.json(&body);
    }
    let response = request.send().await?;
    let status = response.status();
    let payload: ResponseValue<Value> = response.json().await?;

    if status.is_success() {
        Ok(payload.value)
    } else {
        match serde_json::from_value::<ErrorValue>(payload.value.clone()) {
            Ok(error) => Err(WebDriverError::Protocol {
                status,
                error: error.error,
                message: error.message,
            }),
            Err(_) => Err(WebDriverError::UnexpectedPayload(payload.value.to_string())),
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, WebDriverError> {
    serde_json::from_value(value.clone())
        .map_err(|_| WebDriverError::UnexpectedPayload(value.to_string()))
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;

    use super::*;

    fn session_against(server: &MockServer) -> WebDriverSession {
        WebDriverSession {
            client: Client::new(),
            remote_url: server.base_url(),
            session_id: "test-session".to_string(),
        }
    }

    #[tokio::test]
    async fn connect_opens_a_session_and_keeps_its_id() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(httpmock::Method::POST).path("/session");
            then.status(200).body(
                r#"{"value": {"sessionId": "abc-123", "capabilities": {"browserName": "chrome"}}}"#,
            );
        });

        let session = WebDriverSession::connect(&server.base_url()).await.unwrap();

        mock.assert();
        assert_eq!("abc-123", session.session_id());
    }

    #[tokio::test]
    async fn find_elements_decodes_w3c_element_references() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(httpmock::Method::POST)
                .path("/session/test-session/elements")
                .json_body(serde_json::json!({ "using": "css selector", "value": "textarea" }));
            then.status(200).body(
                r#"{"value": [
                    {"element-6066-11e4-a52e-4f735466cecf": "el-1"},
                    {"element-6066-11e4-a52e-4f735466cecf": "el-2"}
                ]}"#,
            );
        });

        let elements = session_against(&server).find_elements("textarea").await.unwrap();

        assert_eq!(2, elements.len());
        assert_eq!("el-1", elements[0].id);
        assert_eq!("el-2", elements[1].id);
    }

    #[tokio::test]
    async fn find_elements_yields_an_empty_list_when_nothing_matches() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(httpmock::Method::POST)
                .path("/session/test-session/elements");
            then.status(200).body(r#"{"value": []}"#);
        });

        let elements = session_against(&server).find_elements("textarea").await.unwrap();

        assert!(elements.is_empty());
    }

    #[tokio::test]
    async fn element_value_maps_null_property_to_empty_string() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/session/test-session/element/el-1/property/value");
            then.status(200).body(r#"{"value": null}"#);
        });

        let element = ElementRef { id: "el-1".to_string() };
        let value = session_against(&server).element_value(&element).await.unwrap();

        assert_eq!("", value);
    }

    #[tokio::test]
    async fn element_value_reads_the_current_text() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/session/test-session/element/el-2/property/value");
            then.status(200).body(r#"{"value": "வணக்கம் டா"}"#);
        });

        let element = ElementRef { id: "el-2".to_string() };
        let value = session_against(&server).element_value(&element).await.unwrap();

        assert_eq!("வணக்கம் டா", value);
    }

    #[tokio::test]
    async fn protocol_errors_carry_the_w3c_error_code() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(httpmock::Method::POST)
                .path("/session/test-session/element/gone/clear");
            then.status(404).body(
                r#"{"value": {"error": "no such element", "message": "stale element", "stacktrace": ""}}"#,
            );
        });

        let element = ElementRef { id: "gone".to_string() };
        let error = session_against(&server).clear(&element).await.unwrap_err();

        match error {
            WebDriverError::Protocol { status, error, .. } => {
                assert_eq!(StatusCode::NOT_FOUND, status);
                assert_eq!("no such element", error);
            }
            other => panic!("expected a protocol error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn send_keys_posts_the_typed_text() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(httpmock::Method::POST)
                .path("/session/test-session/element/el-1/value")
                .json_body(serde_json::json!({ "text": "vanakkam da\u{E007}" }));
            then.status(200).body(r#"{"value": null}"#);
        });

        let element = ElementRef { id: "el-1".to_string() };
        session_against(&server)
            .send_keys(&element, &format!("vanakkam da{ENTER_KEY}"))
            .await
            .unwrap();

        mock.assert();
    }
}
