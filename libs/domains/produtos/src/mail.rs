//! Hand-off of mail commands to the mail service.

use async_trait::async_trait;
use stream_worker::{StreamDef, StreamProducer};

use crate::error::{ProdutoError, ProdutoResult};
use crate::models::EnviarEmail;

/// Routing key the mail service listens on.
pub const ENVIAR_EMAIL_PATTERN: &str = "enviar-email";

/// Stream consumed by the mail service.
pub struct MailStream;

impl StreamDef for MailStream {
    const STREAM_NAME: &'static str = "mail.enviar-email";
    const CONSUMER_GROUP: &'static str = "mail_workers";
    const DLQ_STREAM: &'static str = "mail.enviar-email:dlq";
}

/// Fire-and-forget publication of an [`EnviarEmail`].
///
/// Success means the command was queued, not that the mail was sent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailDispatcher: Send + Sync {
    async fn dispatch(&self, email: EnviarEmail) -> ProdutoResult<()>;
}

#[derive(Clone)]
pub struct StreamMailDispatcher {
    producer: StreamProducer,
}

impl StreamMailDispatcher {
    pub fn new(producer: StreamProducer) -> Self {
        Self { producer }
    }

    /// Producer bound to [`MailStream`].
    pub fn from_redis(redis: redis::aio::ConnectionManager) -> Self {
        Self::new(StreamProducer::from_stream_def::<MailStream>(redis))
    }
}

#[async_trait]
impl MailDispatcher for StreamMailDispatcher {
    #[tracing::instrument(skip(self, email), fields(to = %email.to))]
    async fn dispatch(&self, email: EnviarEmail) -> ProdutoResult<()> {
        let entry_id = self
            .producer
            .publish(ENVIAR_EMAIL_PATTERN, &email)
            .await
            .map_err(|e| ProdutoError::ExportFailed(format!("mail publish failed: {}", e)))?;

        tracing::info!(
            stream = self.producer.stream_name(),
            entry_id = %entry_id,
            attachments = email.attachments.len(),
            "Queued report mail"
        );
        Ok(())
    }
}
