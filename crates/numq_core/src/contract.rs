use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_QUEUE_URL: &str =
    "https://sqs.us-east-1.amazonaws.com/123456789012/number-queue";
pub const DEFAULT_SEND_INTERVAL_SECONDS: u64 = 60;
pub const DEFAULT_START_VALUE: &str = "1";
pub const DEFAULT_OUTPUT_PATH: &str = "numbers.txt";
pub const DEFAULT_WAIT_TIME_SECONDS: i32 = 10;
pub const DEFAULT_MAX_MESSAGES: i32 = 1;

// SQS bounds for a single receive call.
pub const MAX_WAIT_TIME_SECONDS: i32 = 20;
pub const MAX_MESSAGES_PER_RECEIVE: i32 = 10;

/// One delivery pulled from the queue. The receipt handle is opaque and
/// only valid for acknowledging this specific delivery; a redelivered
/// message carries a fresh handle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReceivedMessage {
    pub body: String,
    pub receipt_handle: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProducerConfig {
    pub queue_url: String,
    pub send_interval: Duration,
    pub start_value: String,
}

impl ProducerConfig {
    pub fn new(
        queue_url: impl Into<String>,
        send_interval: Duration,
        start_value: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let queue_url = queue_url.into().trim().to_string();
        if queue_url.is_empty() {
            return Err(ValidationError::new("queue_url cannot be empty"));
        }

        if send_interval.is_zero() {
            return Err(ValidationError::new("send_interval must be positive"));
        }

        Ok(Self {
            queue_url,
            send_interval,
            start_value: start_value.into(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsumerConfig {
    pub queue_url: String,
    pub output_path: String,
    pub wait_time_seconds: i32,
    pub max_messages: i32,
}

impl ConsumerConfig {
    pub fn new(
        queue_url: impl Into<String>,
        output_path: impl Into<String>,
        wait_time_seconds: i32,
        max_messages: i32,
    ) -> Result<Self, ValidationError> {
        let queue_url = queue_url.into().trim().to_string();
        if queue_url.is_empty() {
            return Err(ValidationError::new("queue_url cannot be empty"));
        }

        let output_path = output_path.into();
        if output_path.trim().is_empty() {
            return Err(ValidationError::new("output_path cannot be empty"));
        }

        if !(0..=MAX_WAIT_TIME_SECONDS).contains(&wait_time_seconds) {
            return Err(ValidationError::new(format!(
                "wait_time_seconds must be between 0 and {MAX_WAIT_TIME_SECONDS}"
            )));
        }

        if !(1..=MAX_MESSAGES_PER_RECEIVE).contains(&max_messages) {
            return Err(ValidationError::new(format!(
                "max_messages must be between 1 and {MAX_MESSAGES_PER_RECEIVE}"
            )));
        }

        Ok(Self {
            queue_url,
            output_path,
            wait_time_seconds,
            max_messages,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}
