use numq_core::contract::{
    ConsumerConfig, ReceivedMessage, DEFAULT_MAX_MESSAGES, DEFAULT_OUTPUT_PATH,
    DEFAULT_QUEUE_URL, DEFAULT_WAIT_TIME_SECONDS,
};
use numq_core::retry::RetryPolicy;
use numq_core::shutdown::ShutdownFlag;
use numq_sqs::adapters::line_sink::FileLineSink;
use numq_sqs::adapters::pacer::ThreadPacer;
use numq_sqs::adapters::queue::MessageQueue;
use numq_sqs::handlers::consumer::run_consumer;

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
    let output_path =
        std::env::var("NUMQ_OUTPUT_PATH").unwrap_or_else(|_| DEFAULT_OUTPUT_PATH.to_string());
    let wait_time_seconds = match std::env::var("NUMQ_WAIT_TIME_SECONDS") {
        Ok(value) => value
            .parse::<i32>()
            .map_err(|_| "NUMQ_WAIT_TIME_SECONDS must be an integer")?,
        Err(_) => DEFAULT_WAIT_TIME_SECONDS,
    };
    let config = ConsumerConfig::new(
        queue_url.clone(),
        output_path,
        wait_time_seconds,
        DEFAULT_MAX_MESSAGES,
    )?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let queue = SqsMessageQueue {
        queue_url,
        sqs_client: aws_sdk_sqs::Client::new(&aws_config),
    };
    let sink = FileLineSink::new(&config.output_path);

    // Never triggered here; the loop runs until the process is killed.
    let shutdown = ShutdownFlag::new();
    tokio::task::block_in_place(|| {
        run_consumer(
            &queue,
            &sink,
            &ThreadPacer,
            &shutdown,
            &config,
            &RetryPolicy::default(),
        )
    })?;

    Ok(())
}
