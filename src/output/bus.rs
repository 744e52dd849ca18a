//! Event-sink abstraction over the bus producer
//!
//! The dispatcher publishes through this trait so the pipeline can run
//! against Kafka in production and against an in-memory sink in tests.
//! Publishing is fire-and-forget: failures are logged by the sink, never
//! surfaced to the crawl.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// One message bound for a bus topic
#[derive(Debug, Clone)]
pub struct BusMessage {
    pub topic: String,
    /// Partitioning key; the crawler keys by document URL
    pub key: String,
    pub payload: Vec<u8>,
    pub headers: Vec<(String, String)>,
}

/// Destination for serialized documents
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Hands a message to the sink; must not block the crawl on delivery
    async fn publish(&self, message: BusMessage);

    /// Flushes buffered messages, waiting at most `grace`
    async fn flush(&self, grace: Duration);
}

/// In-process sink that records every published message
///
/// Used by the test suite in place of a broker.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<BusMessage>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages published so far, in order
    pub fn messages(&self) -> Vec<BusMessage> {
        self.messages.lock().expect("sink lock poisoned").clone()
    }

    /// Messages published to one topic, in order
    pub fn topic_messages(&self, topic: &str) -> Vec<BusMessage> {
        self.messages()
            .into_iter()
            .filter(|m| m.topic == topic)
            .collect()
    }
}

#[async_trait]
impl EventSink for MemorySink {
    async fn publish(&self, message: BusMessage) {
        self.messages
            .lock()
            .expect("sink lock poisoned")
            .push(message);
    }

    async fn flush(&self, _grace: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_sink_records_in_order() {
        let sink = MemorySink::new();
        for i in 0..3 {
            sink.publish(BusMessage {
                topic: "raw.content".to_string(),
                key: format!("https://a.test/{}", i),
                payload: vec![i],
                headers: Vec::new(),
            })
            .await;
        }
        let messages = sink.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].key, "https://a.test/0");
        assert_eq!(messages[2].payload, vec![2]);
    }

    #[tokio::test]
    async fn topic_filter_selects_one_topic() {
        let sink = MemorySink::new();
        sink.publish(BusMessage {
            topic: "raw.content".to_string(),
            key: "k".to_string(),
            payload: Vec::new(),
            headers: Vec::new(),
        })
        .await;
        sink.publish(BusMessage {
            topic: "dream.seeds".to_string(),
            key: "k".to_string(),
            payload: Vec::new(),
            headers: Vec::new(),
        })
        .await;
        assert_eq!(sink.topic_messages("dream.seeds").len(), 1);
        assert_eq!(sink.topic_messages("raw.content").len(), 1);
    }
}
