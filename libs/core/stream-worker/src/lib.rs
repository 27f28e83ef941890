//! Stream Worker Framework (producer side)
//!
//! Jobs are appended to Redis Streams with `XADD ... MAXLEN ~ n`. Each entry
//! carries a `pattern` field naming the job kind and a `job` field holding the
//! JSON payload, so consumers can route entries without decoding them first.
//!
//! ```ignore
//! use stream_worker::{StreamDef, StreamProducer};
//!
//! struct MailStream;
//! impl StreamDef for MailStream {
//!     const STREAM_NAME: &'static str = "mail.enviar-email";
//!     const CONSUMER_GROUP: &'static str = "mail_workers";
//!     const DLQ_STREAM: &'static str = "mail.enviar-email:dlq";
//! }
//!
//! let producer = StreamProducer::from_stream_def::<MailStream>(redis);
//! producer.publish("enviar-email", &email).await?;
//! ```

mod error;
mod producer;
mod registry;

pub use error::StreamError;
pub use producer::StreamProducer;
pub use registry::{MessageKey, StreamDef};
