//! Stream definitions shared between producers and workers.

use strum::{AsRefStr, Display};

/// Field names written into every stream entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum MessageKey {
    /// Routing key of the job (e.g. `enviar-email`)
    Pattern,
    /// JSON payload
    Job,
}

/// Stream definition trait.
///
/// Each producer/worker pair agrees on a stream through one implementation.
pub trait StreamDef: Send + Sync {
    /// The Redis stream name.
    const STREAM_NAME: &'static str;

    /// Consumer group the workers read with.
    const CONSUMER_GROUP: &'static str;

    /// Where workers park entries they cannot process.
    const DLQ_STREAM: &'static str;

    /// Approximate cap applied on every `XADD`.
    const MAX_LENGTH: i64 = 100_000;
}
