//! Classification of the processor's response into a renderable outcome.

use serde::Serialize;

/// Response body, parsed as JSON when possible.
///
/// Parse failure is not an error: the raw text is kept so the caller always
/// has something to display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

impl ResponseBody {
    /// Attempts a JSON parse, falling back to the raw text unmodified.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(raw.to_string()),
        }
    }

    /// Pretty rendering for display: indented JSON or the raw text.
    pub fn to_display_string(&self) -> String {
        match self {
            ResponseBody::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            ResponseBody::Text(text) => text.clone(),
        }
    }
}

/// What happened to a submitted payment request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// HTTP 201: the payment was created.
    Created(ResponseBody),
    /// The processor rejected the request (4xx, and any status outside
    /// the expected ranges).
    ClientError { status: u16, body: ResponseBody },
    /// The processor failed (5xx).
    ServerError { status: u16, body: ResponseBody },
    /// No response was received (connect, DNS, timeout). Distinct from
    /// ServerError: the request may never have reached the processor.
    TransportFailure(String),
}

impl Outcome {
    /// Maps an HTTP response to an outcome category.
    ///
    /// 201 is the only success. Statuses outside 2xx/4xx/5xx (1xx, 3xx,
    /// other 2xx) are treated as unexpected-but-non-fatal client errors.
    pub fn classify(status: u16, raw_body: &str) -> Self {
        let body = ResponseBody::parse(raw_body);
        match status {
            201 => Outcome::Created(body),
            400..=499 => Outcome::ClientError { status, body },
            500.. => Outcome::ServerError { status, body },
            _ => Outcome::ClientError { status, body },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Created(_))
    }

    /// The response body, when a response was received at all.
    pub fn body(&self) -> Option<&ResponseBody> {
        match self {
            Outcome::Created(body)
            | Outcome::ClientError { body, .. }
            | Outcome::ServerError { body, .. } => Some(body),
            Outcome::TransportFailure(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_201_is_created_with_parsed_body() {
        let outcome = Outcome::classify(201, r#"{"id":"p_1"}"#);
        assert_eq!(
            outcome,
            Outcome::Created(ResponseBody::Json(json!({"id": "p_1"})))
        );
        assert!(outcome.is_success());
    }

    #[test]
    fn test_422_is_client_error() {
        let outcome = Outcome::classify(422, r#"{"error":"bad_cvv"}"#);
        assert_eq!(
            outcome,
            Outcome::ClientError {
                status: 422,
                body: ResponseBody::Json(json!({"error": "bad_cvv"})),
            }
        );
    }

    #[test]
    fn test_500_with_empty_body_is_server_error() {
        let outcome = Outcome::classify(500, "");
        assert_eq!(
            outcome,
            Outcome::ServerError {
                status: 500,
                body: ResponseBody::Text(String::new()),
            }
        );
    }

    #[test]
    fn test_201_with_unparseable_body_falls_back_to_text() {
        let outcome = Outcome::classify(201, "not json");
        assert_eq!(
            outcome,
            Outcome::Created(ResponseBody::Text("not json".to_string()))
        );
    }

    #[test]
    fn test_unexpected_statuses_are_client_errors() {
        for status in [100, 200, 204, 302] {
            match Outcome::classify(status, "{}") {
                Outcome::ClientError { status: got, .. } => assert_eq!(got, status),
                other => panic!("expected client error for {}, got {:?}", status, other),
            }
        }
    }

    #[test]
    fn test_503_is_server_error() {
        assert!(matches!(
            Outcome::classify(503, "Service Temporarily Unavailable"),
            Outcome::ServerError { status: 503, .. }
        ));
    }

    #[test]
    fn test_transport_failure_has_no_body() {
        let outcome = Outcome::TransportFailure("connection refused".to_string());
        assert!(outcome.body().is_none());
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_display_string_pretty_prints_json() {
        let body = ResponseBody::parse(r#"{"id":"p_1"}"#);
        assert_eq!(body.to_display_string(), "{\n  \"id\": \"p_1\"\n}");
    }
}
