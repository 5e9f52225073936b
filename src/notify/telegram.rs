//! Telegram Bot API notifier.

use serde::{Deserialize, Serialize};
use url::Url;

use super::{DeliveryError, Notifier};
use crate::transport::{HttpClient, HttpRequest};

/// Public Telegram Bot API base URL.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org/";

/// Sends messages to one chat through the Bot API `sendMessage` method.
///
/// # Example
///
/// ```
/// use homework_bot::notify::{TelegramNotifier, DEFAULT_API_URL};
/// use homework_bot::transport::ReqwestClient;
/// use url::Url;
///
/// let notifier = TelegramNotifier::new(
///     ReqwestClient::new(),
///     &Url::parse(DEFAULT_API_URL).unwrap(),
///     "123456:bot-token",
///     "987654321",
/// )
/// .unwrap();
/// ```
pub struct TelegramNotifier<H> {
    client: H,
    send_url: Url,
    chat_id: String,
}

// The send URL embeds the bot token.
impl<H> std::fmt::Debug for TelegramNotifier<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("host", &self.send_url.host_str())
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

impl<H> TelegramNotifier<H> {
    /// Creates a notifier for `chat_id` using the bot identified by `bot_token`.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::InvalidEndpoint`] if `api_base` cannot carry
    /// a path (e.g. a `mailto:` URL).
    pub fn new(
        client: H,
        api_base: &Url,
        bot_token: &str,
        chat_id: impl Into<String>,
    ) -> Result<Self, DeliveryError> {
        let send_url = send_message_url(api_base, bot_token).ok_or_else(|| {
            DeliveryError::InvalidEndpoint {
                url: api_base.to_string(),
            }
        })?;

        Ok(Self {
            client,
            send_url,
            chat_id: chat_id.into(),
        })
    }

    /// Returns the chat the notifier delivers to.
    #[must_use]
    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }
}

/// `<api_base>/bot<token>/sendMessage`, keeping any path prefix of `api_base`.
fn send_message_url(api_base: &Url, bot_token: &str) -> Option<Url> {
    let mut url = api_base.clone();
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .push(&format!("bot{bot_token}"))
        .push("sendMessage");
    Some(url)
}

/// Request body for `sendMessage`.
#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Envelope every Bot API reply is wrapped in.
#[derive(Deserialize)]
struct ApiReply {
    ok: bool,
    description: Option<String>,
}

impl<H: HttpClient> TelegramNotifier<H> {
    async fn send(&self, message: &str) -> Result<(), DeliveryError> {
        let request = HttpRequest::post(self.send_url.clone())
            .with_json(&SendMessage {
                chat_id: &self.chat_id,
                text: message,
            })
            .map_err(DeliveryError::Encode)?;

        let response = self
            .client
            .request(request)
            .await
            .map_err(DeliveryError::Transport)?;

        let reply = response.json::<ApiReply>().ok();
        if response.is_success() && reply.as_ref().is_some_and(|r| r.ok) {
            return Ok(());
        }

        Err(DeliveryError::Rejected {
            status: response.status,
            description: reply.and_then(|r| r.description),
        })
    }
}

impl<H: HttpClient> Notifier for TelegramNotifier<H> {
    async fn notify(&self, message: &str) -> Result<(), DeliveryError> {
        tracing::info!("Отправка сообщения");

        match self.send(message).await {
            Ok(()) => {
                tracing::info!("Сообщение отправлено");
                Ok(())
            }
            Err(e) => {
                tracing::error!("{e}");
                Err(e)
            }
        }
    }
}
