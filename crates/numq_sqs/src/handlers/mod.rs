use numq_core::retry::RetryPolicy;
use serde_json::json;

use crate::adapters::pacer::Pacer;

pub mod consumer;
pub mod producer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerError {
    pub message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HandlerError {}

/// Runs a queue operation under the retry policy: transient failures are
/// retried with backoff, exhaustion becomes a `HandlerError` that
/// terminates the calling loop.
pub(crate) fn with_retry<T>(
    component: &str,
    operation: &str,
    policy: &RetryPolicy,
    pacer: &dyn Pacer,
    mut call: impl FnMut() -> Result<T, String>,
) -> Result<T, HandlerError> {
    let mut attempt = 1u32;
    loop {
        match call() {
            Ok(value) => return Ok(value),
            Err(error) if attempt < policy.max_attempts => {
                let delay = policy.delay_for(attempt);
                log_error(
                    component,
                    "operation_retried",
                    json!({
                        "operation": operation,
                        "attempt": attempt,
                        "delay_ms": delay.as_millis() as u64,
                        "error": error,
                    }),
                );
                pacer.pause(delay);
                attempt += 1;
            }
            Err(error) => {
                return Err(HandlerError::new(format!(
                    "Failed to {operation} after {attempt} attempts: {error}"
                )));
            }
        }
    }
}

pub(crate) fn log_info(component: &str, event: &str, details: serde_json::Value) {
    eprintln!(
        "{}",
        json!({
            "component": component,
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

pub(crate) fn log_error(component: &str, event: &str, details: serde_json::Value) {
    eprintln!(
        "{}",
        json!({
            "component": component,
            "level": "error",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::fs;
    use std::sync::Mutex;
    use std::time::Duration;

    use numq_core::contract::{ConsumerConfig, ProducerConfig, ReceivedMessage};
    use numq_core::retry::RetryPolicy;
    use numq_core::shutdown::ShutdownFlag;

    use crate::adapters::line_sink::FileLineSink;
    use crate::adapters::pacer::Pacer;
    use crate::adapters::queue::MessageQueue;

    use super::consumer::run_consumer;
    use super::producer::run_producer;

    struct NoopPacer;

    impl Pacer for NoopPacer {
        fn pause(&self, _duration: Duration) {}
    }

    /// In-memory stand-in for the managed queue, shared by the producer and
    /// consumer runs. Stops the producer after a fixed number of sends and
    /// the consumer on the first empty poll.
    struct InMemoryQueue {
        messages: Mutex<VecDeque<ReceivedMessage>>,
        next_id: Mutex<usize>,
        producer_shutdown: ShutdownFlag,
        consumer_shutdown: ShutdownFlag,
        sends_before_shutdown: usize,
    }

    impl InMemoryQueue {
        fn new(sends_before_shutdown: usize) -> Self {
            Self {
                messages: Mutex::new(VecDeque::new()),
                next_id: Mutex::new(0),
                producer_shutdown: ShutdownFlag::new(),
                consumer_shutdown: ShutdownFlag::new(),
                sends_before_shutdown,
            }
        }
    }

    impl MessageQueue for InMemoryQueue {
        fn send(&self, body: &str) -> Result<String, String> {
            let mut next_id = self.next_id.lock().expect("poisoned mutex");
            *next_id += 1;
            let id = format!("mid-{next_id}", next_id = *next_id);

            self.messages
                .lock()
                .expect("poisoned mutex")
                .push_back(ReceivedMessage {
                    body: body.to_string(),
                    receipt_handle: format!("rh-{id}"),
                });

            if *next_id >= self.sends_before_shutdown {
                self.producer_shutdown.trigger();
            }
            Ok(id)
        }

        fn receive(
            &self,
            max_messages: i32,
            _wait_seconds: i32,
        ) -> Result<Vec<ReceivedMessage>, String> {
            let mut messages = self.messages.lock().expect("poisoned mutex");
            if messages.is_empty() {
                self.consumer_shutdown.trigger();
                return Ok(Vec::new());
            }

            let mut received = Vec::new();
            while received.len() < max_messages as usize {
                match messages.pop_front() {
                    Some(message) => received.push(message),
                    None => break,
                }
            }
            Ok(received)
        }

        fn delete(&self, _receipt_handle: &str) -> Result<(), String> {
            Ok(())
        }
    }

    #[test]
    fn producer_then_consumer_lands_every_number_in_the_file() {
        let dir = tempfile::tempdir().expect("temp dir should exist");
        let path = dir.path().join("numbers.txt");
        let queue = InMemoryQueue::new(3);

        let producer_config = ProducerConfig::new(
            "https://sqs.example/queue",
            Duration::from_secs(60),
            "1",
        )
        .expect("config should pass");
        let producer_summary = run_producer(
            &queue,
            &NoopPacer,
            &queue.producer_shutdown,
            &producer_config,
            &RetryPolicy::default(),
        )
        .expect("producer should pass");
        assert_eq!(producer_summary.messages_sent, 3);

        let sink = FileLineSink::new(&path);
        let consumer_config = ConsumerConfig::new(
            "https://sqs.example/queue",
            path.to_string_lossy(),
            10,
            1,
        )
        .expect("config should pass");
        let consumer_summary = run_consumer(
            &queue,
            &sink,
            &NoopPacer,
            &queue.consumer_shutdown,
            &consumer_config,
            &RetryPolicy::default(),
        )
        .expect("consumer should pass");

        assert_eq!(consumer_summary.messages_written, 3);
        assert_eq!(consumer_summary.messages_deleted, 3);

        let content = fs::read_to_string(&path).expect("output file should exist");
        assert_eq!(content, "1\n2\n3\n");
    }
}
