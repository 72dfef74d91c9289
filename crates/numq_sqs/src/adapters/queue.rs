use numq_core::contract::ReceivedMessage;

pub trait MessageQueue {
    fn send(&self, body: &str) -> Result<String, String>;

    fn receive(
        &self,
        max_messages: i32,
        wait_seconds: i32,
    ) -> Result<Vec<ReceivedMessage>, String>;

    fn delete(&self, receipt_handle: &str) -> Result<(), String>;
}
