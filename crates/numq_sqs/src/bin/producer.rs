use std::time::Duration;

use numq_core::contract::{
    ProducerConfig, ReceivedMessage, DEFAULT_QUEUE_URL, DEFAULT_SEND_INTERVAL_SECONDS,
    DEFAULT_START_VALUE,
};
use numq_core::retry::RetryPolicy;
use numq_core::shutdown::ShutdownFlag;
use numq_sqs::adapters::pacer::ThreadPacer;
use numq_sqs::adapters::queue::MessageQueue;
use numq_sqs::handlers::producer::run_producer;

struct SqsMessageQueue {
    queue_url: String,
    sqs_client: aws_sdk_sqs::Client,
}

impl MessageQueue for SqsMessageQueue {
    fn send(&self, body: &str) -> Result<String, String> {
        let queue_url = self.queue_url.clone();
        let message_body = body.to_string();
        let client = self.sqs_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .send_message()
                    .queue_url(queue_url)
                    .message_body(message_body)
                    .send()
                    .await
                    .map(|output| output.message_id().unwrap_or_default().to_string())
                    .map_err(|error| format!("failed to send message to sqs: {error}"))
            })
        })
    }

    fn receive(
        &self,
        max_messages: i32,
        wait_seconds: i32,
    ) -> Result<Vec<ReceivedMessage>, String> {
        let queue_url = self.queue_url.clone();
        let client = self.sqs_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .receive_message()
                    .queue_url(queue_url)
                    .max_number_of_messages(max_messages)
                    .wait_time_seconds(wait_seconds)
                    .send()
                    .await
                    .map_err(|error| format!("failed to receive messages from sqs: {error}"))?;

                let mut received = Vec::new();
                for message in output.messages.unwrap_or_default() {
                    let receipt_handle = message
                        .receipt_handle()
                        .ok_or_else(|| "sqs message is missing a receipt handle".to_string())?
                        .to_string();
                    received.push(ReceivedMessage {
                        body: message.body().unwrap_or_default().to_string(),
                        receipt_handle,
                    });
                }
                Ok(received)
            })
        })
    }

    fn delete(&self, receipt_handle: &str) -> Result<(), String> {
        let queue_url = self.queue_url.clone();
        let receipt_handle = receipt_handle.to_string();
        let client = self.sqs_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .delete_message()
                    .queue_url(queue_url)
                    .receipt_handle(receipt_handle)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to delete message from sqs: {error}"))
            })
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let queue_url =
        std::env::var("NUMQ_QUEUE_URL").unwrap_or_else(|_| DEFAULT_QUEUE_URL.to_string());
    let send_interval_seconds = match std::env::var("NUMQ_SEND_INTERVAL_SECONDS") {
        Ok(value) => value
            .parse::<u64>()
            .map_err(|_| "NUMQ_SEND_INTERVAL_SECONDS must be a positive integer")?,
        Err(_) => DEFAULT_SEND_INTERVAL_SECONDS,
    };
    let config = ProducerConfig::new(
        queue_url.clone(),
        Duration::from_secs(send_interval_seconds),
        DEFAULT_START_VALUE,
    )?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let queue = SqsMessageQueue {
        queue_url,
        sqs_client: aws_sdk_sqs::Client::new(&aws_config),
    };

    // Never triggered here; the loop runs until the process is killed.
    let shutdown = ShutdownFlag::new();
    tokio::task::block_in_place(|| {
        run_producer(
            &queue,
            &ThreadPacer,
            &shutdown,
            &config,
            &RetryPolicy::default(),
        )
    })?;

    Ok(())
}
