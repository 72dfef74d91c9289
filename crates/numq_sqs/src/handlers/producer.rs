use numq_core::contract::ProducerConfig;
use numq_core::counter::Counter;
use numq_core::retry::RetryPolicy;
use numq_core::shutdown::ShutdownFlag;
use serde::Serialize;
use serde_json::json;

use crate::adapters::pacer::Pacer;
use crate::adapters::queue::MessageQueue;

use super::{log_info, with_retry, HandlerError};

const COMPONENT: &str = "producer";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProducerSummary {
    pub messages_sent: usize,
}

/// Sends the counter's decimal text to the queue, then pauses for the send
/// interval, until shutdown. The interval is measured from send completion,
/// so service latency lengthens the effective period. The counter advances
/// only after a send has succeeded.
pub fn run_producer(
    queue: &dyn MessageQueue,
    pacer: &dyn Pacer,
    shutdown: &ShutdownFlag,
    config: &ProducerConfig,
    retry_policy: &RetryPolicy,
) -> Result<ProducerSummary, HandlerError> {
    let mut counter = Counter::starting_at(&config.start_value)
        .map_err(|error| HandlerError::new(format!("Invalid counter start value: {error}")))?;
    let mut messages_sent = 0usize;

    while !shutdown.is_triggered() {
        let body = counter.current().to_string();
        let message_id = with_retry(COMPONENT, "send message", retry_policy, pacer, || {
            queue.send(&body)
        })?;

        messages_sent += 1;
        log_info(
            COMPONENT,
            "message_sent",
            json!({
                "body": body.clone(),
                "message_id": message_id,
                "messages_sent": messages_sent,
            }),
        );
        counter.advance();

        if shutdown.is_triggered() {
            break;
        }
        pacer.pause(config.send_interval);
    }

    Ok(ProducerSummary { messages_sent })
}
