//! Tests for `TelegramNotifier`.

use super::{DEFAULT_API_URL, DeliveryError, Notifier, TelegramNotifier};
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};
use std::sync::{Arc, Mutex};

/// Mock HTTP client that returns a configurable sequence of responses.
#[derive(Debug)]
struct MockClient {
    responses: Mutex<Vec<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockClient {
    fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn accepting() -> Self {
        Self::new(vec![Ok(HttpResponse::with_status(
            http::StatusCode::OK,
            r#"{"ok": true, "result": {"message_id": 1}}"#,
        ))])
    }

    fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        self.responses.lock().unwrap().remove(0)
    }
}

impl HttpClient for Arc<MockClient> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(req).await
    }
}

fn api_base() -> url::Url {
    url::Url::parse(DEFAULT_API_URL).unwrap()
}

fn notifier(client: &Arc<MockClient>) -> TelegramNotifier<Arc<MockClient>> {
    TelegramNotifier::new(Arc::clone(client), &api_base(), "123:abc", "42").unwrap()
}

mod construction {
    use super::*;

    #[test]
    fn debug_output_hides_token() {
        let client = Arc::new(MockClient::accepting());
        let debug = format!("{:?}", notifier(&client));

        assert!(debug.contains("TelegramNotifier"));
        assert!(!debug.contains("123:abc"));
    }

    #[test]
    fn exposes_chat_id() {
        let client = Arc::new(MockClient::accepting());
        assert_eq!(notifier(&client).chat_id(), "42");
    }

    #[test]
    fn rejects_base_that_cannot_hold_a_path() {
        let base = url::Url::parse("mailto:bot@example.com").unwrap();
        let result = TelegramNotifier::new(MockClient::accepting(), &base, "123:abc", "42");

        assert!(matches!(
            result,
            Err(DeliveryError::InvalidEndpoint { .. })
        ));
    }
}

mod sending {
    use super::*;

    #[tokio::test]
    async fn posts_send_message_with_chat_and_text() {
        let client = Arc::new(MockClient::accepting());

        notifier(&client).notify("Привет").await.unwrap();

        let requests = client.captured_requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, http::Method::POST);
        assert_eq!(
            request.url.as_str(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
        let body: serde_json::Value =
            serde_json::from_slice(request.body.as_ref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"chat_id": "42", "text": "Привет"}));
    }

    #[tokio::test]
    async fn keeps_path_prefix_of_self_hosted_api() {
        let client = Arc::new(MockClient::accepting());
        let base = url::Url::parse("http://localhost:8081/telegram/").unwrap();
        let notifier = TelegramNotifier::new(Arc::clone(&client), &base, "1:x", "42").unwrap();

        notifier.notify("hi").await.unwrap();

        assert_eq!(
            client.captured_requests()[0].url.as_str(),
            "http://localhost:8081/telegram/bot1:x/sendMessage"
        );
    }

    #[tokio::test]
    async fn api_refusal_is_rejected_with_description() {
        let client = Arc::new(MockClient::new(vec![Ok(HttpResponse::with_status(
            http::StatusCode::BAD_REQUEST,
            r#"{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}"#,
        ))]));

        let result = notifier(&client).notify("hi").await;

        match result {
            Err(DeliveryError::Rejected {
                status,
                description,
            }) => {
                assert_eq!(status, http::StatusCode::BAD_REQUEST);
                assert_eq!(description.as_deref(), Some("Bad Request: chat not found"));
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn ok_false_on_200_is_rejected() {
        let client = Arc::new(MockClient::new(vec![Ok(HttpResponse::with_status(
            http::StatusCode::OK,
            r#"{"ok": false}"#,
        ))]));

        let result = notifier(&client).notify("hi").await;

        assert!(matches!(result, Err(DeliveryError::Rejected { .. })));
    }

    #[tokio::test]
    async fn unparseable_reply_is_rejected() {
        let client = Arc::new(MockClient::new(vec![Ok(HttpResponse::with_status(
            http::StatusCode::OK,
            "not json",
        ))]));

        let result = notifier(&client).notify("hi").await;

        assert!(matches!(
            result,
            Err(DeliveryError::Rejected {
                description: None,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn transport_failure_is_returned_not_swallowed() {
        let client = Arc::new(MockClient::new(vec![Err(HttpError::Timeout)]));

        let result = notifier(&client).notify("hi").await;

        assert!(matches!(
            result,
            Err(DeliveryError::Transport(HttpError::Timeout))
        ));
    }
}
