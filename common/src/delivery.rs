//! Forwarding confirmed-order receipts to the shop owner.
//!
//! The order is already confirmed (and the cart cleared) by the time a
//! receipt is delivered, so delivery can only succeed or report a soft
//! failure.

use crate::error::DeliveryError;
use crate::notice::Notice;
use crate::receipt::ReceiptDocument;

/// Something that accepts a receipt document and reports success or failure.
#[allow(async_fn_in_trait)]
pub trait ReceiptDelivery {
    async fn deliver(&self, document: &ReceiptDocument) -> Result<(), DeliveryError>;
}

/// Used when no delivery endpoint is configured; always fails softly.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelivery;

impl ReceiptDelivery for NoDelivery {
    async fn deliver(&self, _document: &ReceiptDocument) -> Result<(), DeliveryError> {
        Err(DeliveryError::NotConfigured)
    }
}

/// Deliver `document` and turn the outcome into the confirmation notice.
pub async fn deliver_receipt<D: ReceiptDelivery>(delivery: &D, document: &ReceiptDocument) -> Notice {
    match delivery.deliver(document).await {
        Ok(()) => {
            tracing::info!("Receipt {} delivered", document.file_name);
            Notice::OrderConfirmed { delivered: true }
        }
        Err(err) => {
            tracing::warn!("Receipt {} not delivered: {err}", document.file_name);
            Notice::OrderConfirmed { delivered: false }
        }
    }
}

#[cfg(feature = "telegram")]
pub use telegram::TelegramDelivery;

#[cfg(feature = "telegram")]
mod telegram {
    use reqwest::multipart::{Form, Part};
    use reqwest::Client;
    use serde::Deserialize;

    use super::ReceiptDelivery;
    use crate::config::TelegramConfig;
    use crate::error::DeliveryError;
    use crate::receipt::ReceiptDocument;

    /// Sends receipts through the Telegram Bot API `sendDocument` method.
    #[derive(Debug, Clone)]
    pub struct TelegramDelivery {
        client: Client,
        config: TelegramConfig,
    }

    #[derive(Debug, Deserialize)]
    struct TelegramReply {
        ok: bool,
        #[serde(default)]
        description: Option<String>,
    }

    impl TelegramDelivery {
        pub fn new(config: TelegramConfig) -> Self {
            Self {
                client: Client::new(),
                config,
            }
        }

        fn endpoint(&self) -> String {
            format!(
                "{}/bot{}/sendDocument",
                self.config.api_base.trim_end_matches('/'),
                self.config.bot_token
            )
        }
    }

    impl ReceiptDelivery for TelegramDelivery {
        async fn deliver(&self, document: &ReceiptDocument) -> Result<(), DeliveryError> {
            if !self.config.is_configured() {
                return Err(DeliveryError::NotConfigured);
            }

            let part = Part::bytes(document.body.clone())
                .file_name(document.file_name.clone())
                .mime_str(document.mime_type)?;
            let form = Form::new()
                .text("chat_id", self.config.chat_id.clone())
                .part("document", part)
                .text("caption", document.caption.clone());

            let reply: TelegramReply = self
                .client
                .post(self.endpoint())
                .multipart(form)
                .send()
                .await?
                .json()
                .await?;

            if reply.ok {
                Ok(())
            } else {
                Err(DeliveryError::Rejected(
                    reply
                        .description
                        .unwrap_or_else(|| "no description".to_string()),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Always(bool);

    impl ReceiptDelivery for Always {
        async fn deliver(&self, _document: &ReceiptDocument) -> Result<(), DeliveryError> {
            if self.0 {
                Ok(())
            } else {
                Err(DeliveryError::Rejected("chat not found".into()))
            }
        }
    }

    fn document() -> ReceiptDocument {
        ReceiptDocument {
            file_name: "Order_1.pdf".into(),
            caption: "caption".into(),
            mime_type: "application/pdf",
            body: b"receipt".to_vec(),
        }
    }

    #[tokio::test]
    async fn success_reports_delivered() {
        let notice = deliver_receipt(&Always(true), &document()).await;
        assert_eq!(notice, Notice::OrderConfirmed { delivered: true });
    }

    #[tokio::test]
    async fn failure_is_soft() {
        let notice = deliver_receipt(&Always(false), &document()).await;
        assert_eq!(notice, Notice::OrderConfirmed { delivered: false });
    }

    #[tokio::test]
    async fn unconfigured_never_delivers() {
        let result = NoDelivery.deliver(&document()).await;
        assert!(matches!(result, Err(DeliveryError::NotConfigured)));
    }
}
