use numq_core::contract::ConsumerConfig;
use numq_core::retry::RetryPolicy;
use numq_core::shutdown::ShutdownFlag;
use serde::Serialize;
use serde_json::json;

use crate::adapters::line_sink::LineSink;
use crate::adapters::pacer::Pacer;
use crate::adapters::queue::MessageQueue;

use super::{log_info, with_retry, HandlerError};

const COMPONENT: &str = "consumer";

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ConsumerSummary {
    pub messages_written: usize,
    pub messages_deleted: usize,
}

/// One poll cycle: receive up to `max_messages` with the queue's long-poll
/// wait, append each body to the sink, then acknowledge it by receipt
/// handle. An empty poll does nothing. A failed append is fatal and leaves
/// the message undeleted, so the queue redelivers it after the visibility
/// timeout; duplicate lines from redelivery are expected at-least-once
/// behavior, not corrected here.
pub fn poll_once(
    queue: &dyn MessageQueue,
    sink: &dyn LineSink,
    pacer: &dyn Pacer,
    config: &ConsumerConfig,
    retry_policy: &RetryPolicy,
    summary: &mut ConsumerSummary,
) -> Result<(), HandlerError> {
    let messages = with_retry(COMPONENT, "receive messages", retry_policy, pacer, || {
        queue.receive(config.max_messages, config.wait_time_seconds)
    })?;

    for message in messages {
        log_info(
            COMPONENT,
            "message_received",
            json!({
                "body": message.body.clone(),
            }),
        );

        sink.append_line(&message.body)
            .map_err(|error| HandlerError::new(format!("Failed to append received body: {error}")))?;
        summary.messages_written += 1;
        log_info(
            COMPONENT,
            "line_appended",
            json!({
                "body": message.body.clone(),
                "output_path": config.output_path.clone(),
            }),
        );

        with_retry(COMPONENT, "delete message", retry_policy, pacer, || {
            queue.delete(&message.receipt_handle)
        })?;
        summary.messages_deleted += 1;
        log_info(
            COMPONENT,
            "message_deleted",
            json!({
                "body": message.body,
            }),
        );
    }

    Ok(())
}

/// Polls until shutdown. The only wait is the queue's own long poll; an
/// empty response loops immediately.
pub fn run_consumer(
    queue: &dyn MessageQueue,
    sink: &dyn LineSink,
    pacer: &dyn Pacer,
    shutdown: &ShutdownFlag,
    config: &ConsumerConfig,
    retry_policy: &RetryPolicy,
) -> Result<ConsumerSummary, HandlerError> {
    let mut summary = ConsumerSummary::default();

    while !shutdown.is_triggered() {
        poll_once(queue, sink, pacer, config, retry_policy, &mut summary)?;
    }

    Ok(summary)
}
