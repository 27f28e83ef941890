//! Stream producer for job enqueuing

use crate::error::StreamError;
use crate::registry::{MessageKey, StreamDef};
use redis::aio::ConnectionManager;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Appends jobs to a single Redis stream.
///
/// Cloning is cheap; clones share the connection manager.
#[derive(Clone)]
pub struct StreamProducer {
    redis: Arc<ConnectionManager>,
    stream_name: String,
    max_length: i64,
}

impl StreamProducer {
    /// Stream name and trim length come from `S`, so workers and producers agree.
    pub fn from_stream_def<S: StreamDef>(redis: ConnectionManager) -> Self {
        Self {
            redis: Arc::new(redis),
            stream_name: S::STREAM_NAME.to_string(),
            max_length: S::MAX_LENGTH,
        }
    }

    pub fn stream_name(&self) -> &str {
        &self.stream_name
    }

    /// Enqueue `job` under the routing key `pattern`.
    ///
    /// Returns the stream entry id assigned by Redis.
    pub async fn publish<J: Serialize>(&self, pattern: &str, job: &J) -> Result<String, StreamError> {
        let cmd = xadd_command(&self.stream_name, self.max_length, pattern, job)?;

        let mut conn = (*self.redis).clone();
        let stream_id: String = cmd.query_async(&mut conn).await?;

        debug!(
            stream = %self.stream_name,
            stream_id = %stream_id,
            pattern,
            "Enqueued job"
        );

        Ok(stream_id)
    }
}

fn xadd_command<J: Serialize>(
    stream: &str,
    max_length: i64,
    pattern: &str,
    job: &J,
) -> Result<redis::Cmd, StreamError> {
    let job_json = serde_json::to_string(job)?;

    let mut cmd = redis::cmd("XADD");
    cmd.arg(stream)
        .arg("MAXLEN")
        .arg("~")
        .arg(max_length)
        .arg("*")
        .arg(MessageKey::Pattern.as_ref())
        .arg(pattern)
        .arg(MessageKey::Job.as_ref())
        .arg(job_json);

    Ok(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Ping {
        to: &'static str,
    }

    fn packed_args(cmd: &redis::Cmd) -> String {
        String::from_utf8_lossy(&cmd.get_packed_command()).into_owned()
    }

    #[test]
    fn test_xadd_command_carries_pattern_and_payload() {
        let cmd = xadd_command("mail.enviar-email", 500, "enviar-email", &Ping { to: "a@b.c" })
            .unwrap();
        let packed = packed_args(&cmd);

        for expected in [
            "XADD",
            "mail.enviar-email",
            "MAXLEN",
            "500",
            "pattern",
            "enviar-email",
            "job",
            r#"{"to":"a@b.c"}"#,
        ] {
            assert!(packed.contains(expected), "missing {expected} in {packed}");
        }
    }

    #[test]
    fn test_xadd_command_field_order() {
        let cmd = xadd_command("s", 10, "p", &Ping { to: "x" }).unwrap();
        let packed = packed_args(&cmd);

        let pattern_at = packed.find("pattern").unwrap();
        let job_at = packed.find("job").unwrap();
        assert!(pattern_at < job_at);
    }
}
