//! Chat widget.

use super::ErrorFraming;
use crate::client::{ChatRequest, StrokeBackend};
use crate::display::{Bubble, ChatTranscript, RenderOutcome, Tone};
use crate::logging::{generate_request_id, truncate_content};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::Instrument;

/// Used when the backend answers without a usable reply.
pub const NO_REPLY_FALLBACK: &str = "Could not get response.";

const FRAMING: ErrorFraming = ErrorFraming {
    error_prefix: "Error: ",
    fallback: NO_REPLY_FALLBACK,
    network_prefix: "Error: Failed to connect to chatbot service. ",
    network_hint: "",
};

/// One settled message/reply pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatExchange {
    pub user: Bubble,
    /// The bot's reply, or the error bubble shown in its place
    pub reply: Bubble,
    pub outcome: RenderOutcome,
}

/// Chat widget owning an append-only transcript.
///
/// Exchanges run one at a time: a second `send` waits until the first has
/// removed its typing placeholder, so at most one placeholder is ever shown.
pub struct ChatWidget {
    backend: Arc<dyn StrokeBackend>,
    transcript: Arc<ChatTranscript>,
    exchange: Mutex<()>,
    content_logging: bool,
}

impl ChatWidget {
    pub fn new(backend: Arc<dyn StrokeBackend>) -> Self {
        Self {
            backend,
            transcript: Arc::new(ChatTranscript::new()),
            exchange: Mutex::new(()),
            content_logging: false,
        }
    }

    /// Include (truncated) message text in log lines.
    pub fn with_content_logging(mut self, enabled: bool) -> Self {
        self.content_logging = enabled;
        self
    }

    pub fn transcript(&self) -> &Arc<ChatTranscript> {
        &self.transcript
    }

    /// Send a message. Blank input (after trimming) is ignored and returns `None`.
    pub async fn send(&self, message: &str) -> Option<ChatExchange> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        let _turn = self.exchange.lock().await;

        let span = tracing::info_span!(
            "chat",
            request_id = %generate_request_id(),
            endpoint = crate::client::CHAT_PATH,
        );

        let exchange = async {
            if let Some(preview) = truncate_content(message, self.content_logging) {
                tracing::debug!(message = %preview, "Sending chat message");
            }

            let user = self.transcript.append_user(message);
            let typing = self.transcript.show_typing();

            let result = self
                .backend
                .chat(&ChatRequest {
                    message: message.to_string(),
                })
                .await;

            self.transcript.remove_typing(typing);

            let outcome = match result {
                Ok(reply) if !reply.reply.is_empty() => RenderOutcome::Success {
                    text: reply.reply,
                    tone: Tone::Success,
                },
                Ok(reply) => {
                    let message = reply
                        .error
                        .filter(|error| !error.is_empty())
                        .unwrap_or_else(|| NO_REPLY_FALLBACK.to_string());
                    RenderOutcome::Error {
                        text: format!("{}{}", FRAMING.error_prefix, message),
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Chatbot request failed");
                    FRAMING.render(&e)
                }
            };

            let reply = if outcome.is_success() {
                self.transcript.append_bot(outcome.text())
            } else {
                self.transcript.append_error(outcome.text())
            };

            ChatExchange {
                user,
                reply,
                outcome,
            }
        }
        .instrument(span)
        .await;

        Some(exchange)
    }
}
