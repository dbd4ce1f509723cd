//! GitHub GraphQL transport.
//!
//! The collector talks to the remote source only through [`GraphQlTransport`], so the
//! statistics logic can be exercised against scripted responses. [`HttpTransport`]
//! is the production implementation: a blocking `reqwest` client posting
//! `{query, variables}` documents with bearer authentication.

use crate::core::error::{ProfileStatsError, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Value};

const USER_AGENT: &str = concat!("profile-stats/", env!("CARGO_PKG_VERSION"));

pub trait GraphQlTransport {
    /// Execute one query and return its `data` object.
    fn execute(&self, operation: &str, query: &str, variables: Value) -> Result<Value>;
}

pub struct HttpTransport {
    client: Client,
    endpoint: String,
    token: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(client, endpoint, token))
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }
}

impl GraphQlTransport for HttpTransport {
    fn execute(&self, operation: &str, query: &str, variables: Value) -> Result<Value> {
        log::debug!("POST {} ({operation})", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            log::error!("{operation} failed with status {status}");
            return Err(ProfileStatsError::transport_failed(
                operation,
                status.as_u16(),
                body,
            ));
        }

        let envelope: GraphQlEnvelope = response.json()?;
        envelope.into_data(operation)
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlEnvelope {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

/// True when every top-level field of `data` is null, i.e. nothing usable came back.
fn is_unresolved(data: &Value) -> bool {
    match data {
        Value::Null => true,
        Value::Object(fields) => fields.values().all(Value::is_null),
        _ => false,
    }
}

impl GraphQlEnvelope {
    fn into_data(self, operation: &str) -> Result<Value> {
        let messages = self
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");

        match self.data {
            Some(data) if !data.is_null() && (messages.is_empty() || !is_unresolved(&data)) => {
                if !messages.is_empty() {
                    log::warn!("{operation} returned partial data: {messages}");
                }
                Ok(data)
            }
            _ if messages.is_empty() => Err(ProfileStatsError::graphql(operation, "empty response")),
            _ => Err(ProfileStatsError::graphql(operation, messages)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread;

    fn envelope(raw: &str) -> GraphQlEnvelope {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_envelope_returns_data() {
        let data = envelope(r#"{"data": {"user": {"name": "Octo"}}}"#)
            .into_data("getUserInfo")
            .unwrap();
        assert_eq!(data["user"]["name"], "Octo");
    }

    #[test]
    fn test_envelope_keeps_partial_data() {
        let data = envelope(
            r#"{"data": {"user": {"name": "Octo"}, "viewer": null}, "errors": [{"message": "viewer hidden"}]}"#,
        )
        .into_data("getUserInfo")
        .unwrap();
        assert_eq!(data["user"]["name"], "Octo");
    }

    #[test]
    fn test_envelope_with_null_root_field_reports_messages() {
        let err = envelope(
            r#"{"data": {"user": null}, "errors": [{"message": "Could not resolve to a User with the login of 'octocatt'."}]}"#,
        )
        .into_data("getUserInfo")
        .unwrap_err();

        assert!(matches!(err, ProfileStatsError::GraphQl { .. }));
        assert!(err.to_string().contains("Could not resolve to a User"));
    }

    #[test]
    fn test_envelope_null_root_field_without_errors_is_data() {
        let data = envelope(r#"{"data": {"repository": null}}"#)
            .into_data("getLinesOfCode")
            .unwrap();
        assert!(data["repository"].is_null());
    }

    #[test]
    fn test_envelope_without_data_reports_messages() {
        let err = envelope(r#"{"data": null, "errors": [{"message": "Bad query"}, {"message": "Second"}]}"#)
            .into_data("getTotalCommits")
            .unwrap_err();
        assert_eq!(err.to_string(), "getTotalCommits returned no data: Bad query; Second");
    }

    #[test]
    fn test_envelope_empty() {
        let err = envelope("{}").into_data("getUserInfo").unwrap_err();
        assert!(matches!(err, ProfileStatsError::GraphQl { .. }));
    }

    #[test]
    fn test_http_transport_builds() {
        assert!(HttpTransport::new("http://127.0.0.1:1/graphql", "token").is_ok());
    }

    /// Answer exactly one request on a local port and hand back the raw request.
    fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}/graphql", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut head = String::new();
            let mut content_length = 0;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = value.trim().parse().unwrap();
                }
                head.push_str(&line);
            }
            let mut payload = vec![0; content_length];
            reader.read_exact(&mut payload).unwrap();

            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
            stream.flush().unwrap();

            head + &String::from_utf8(payload).unwrap()
        });

        (endpoint, handle)
    }

    fn local_transport(endpoint: &str) -> HttpTransport {
        let client = Client::builder().no_proxy().user_agent(USER_AGENT).build().unwrap();
        HttpTransport::with_client(client, endpoint, "secret-token")
    }

    #[test]
    fn test_http_non_success_status_carries_body() {
        let (endpoint, server) = serve_once("401 Unauthorized", r#"{"message":"Bad credentials"}"#);

        let err = local_transport(&endpoint)
            .execute("getUserInfo", "query { viewer { login } }", json!({}))
            .unwrap_err();
        server.join().unwrap();

        match err {
            ProfileStatsError::TransportFailed {
                operation,
                status,
                body,
            } => {
                assert_eq!(operation, "getUserInfo");
                assert_eq!(status, 401);
                assert_eq!(body, r#"{"message":"Bad credentials"}"#);
            }
            other => panic!("expected TransportFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_http_success_returns_data_and_sends_credentials() {
        let (endpoint, server) = serve_once("200 OK", r#"{"data":{"user":{"name":"Octo"}}}"#);

        let data = local_transport(&endpoint)
            .execute("getUserInfo", "query($login: String!) { user(login: $login) { name } }", json!({ "login": "octocat" }))
            .unwrap();
        let request = server.join().unwrap();

        assert_eq!(data, json!({ "user": { "name": "Octo" } }));
        assert!(request.starts_with("POST /graphql"));
        assert!(request.to_ascii_lowercase().contains("authorization: bearer secret-token"));
        assert!(request.contains(r#""login":"octocat""#));
    }
}
