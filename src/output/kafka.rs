//! Kafka-backed event sink
//!
//! A single `FutureProducer` with small-batch buffering (16 KiB batches,
//! 10ms linger). Sends are fire-and-forget: each delivery future goes to a
//! dedicated drainer task that logs failures at WARN, so publish latency
//! never couples to crawl throughput.

use crate::output::{BusMessage, EventSink};
use crate::{CrawlerError, Result};
use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::message::{Header, OwnedHeaders};
use rdkafka::producer::{DeliveryFuture, FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;
use std::time::Duration;
use tokio::sync::mpsc;

const METADATA_TIMEOUT: Duration = Duration::from_secs(5);

pub struct KafkaSink {
    producer: FutureProducer,
    deliveries: mpsc::UnboundedSender<DeliveryFuture>,
}

impl KafkaSink {
    /// Connects to the broker and verifies it answers a metadata request
    ///
    /// A broker that cannot be reached is a fatal init error; nothing else
    /// in the pipeline is allowed to start without a working sink.
    pub async fn connect(broker: &str) -> Result<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", broker)
            .set("batch.size", "16384")
            .set("linger.ms", "10")
            .create()
            .map_err(|e| CrawlerError::Bus(format!("producer creation failed: {}", e)))?;

        // librdkafka connects lazily; probe the broker now so a bad
        // --kafka-broker fails the process instead of the first publish
        let probe = producer.clone();
        tokio::task::spawn_blocking(move || {
            probe
                .client()
                .fetch_metadata(None, Timeout::After(METADATA_TIMEOUT))
        })
        .await
        .map_err(|e| CrawlerError::Bus(format!("metadata probe panicked: {}", e)))?
        .map_err(|e| CrawlerError::Bus(format!("broker unreachable: {}", e)))?;

        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(drain_deliveries(rx));

        Ok(Self {
            producer,
            deliveries: tx,
        })
    }
}

#[async_trait]
impl EventSink for KafkaSink {
    async fn publish(&self, message: BusMessage) {
        let mut headers = OwnedHeaders::new();
        for (key, value) in &message.headers {
            headers = headers.insert(Header {
                key,
                value: Some(value.as_str()),
            });
        }

        let record = FutureRecord::to(&message.topic)
            .key(&message.key)
            .payload(&message.payload)
            .headers(headers);

        match self.producer.send_result(record) {
            Ok(delivery) => {
                // The drainer owns failure logging; a closed drainer means
                // the process is already shutting down
                let _ = self.deliveries.send(delivery);
            }
            Err((e, _)) => {
                tracing::warn!("bus enqueue failed for topic {}: {}", message.topic, e);
            }
        }
    }

    async fn flush(&self, grace: Duration) {
        let producer = self.producer.clone();
        let result =
            tokio::task::spawn_blocking(move || producer.flush(Timeout::After(grace))).await;
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!("bus flush incomplete: {}", e),
            Err(e) => tracing::warn!("bus flush task failed: {}", e),
        }
    }
}

/// Drains delivery reports, logging failures at WARN
async fn drain_deliveries(mut rx: mpsc::UnboundedReceiver<DeliveryFuture>) {
    while let Some(delivery) = rx.recv().await {
        match delivery.await {
            Ok(Ok(_)) => {}
            Ok(Err((e, _message))) => {
                tracing::warn!("bus delivery failed: {}", e);
            }
            Err(_) => {
                tracing::warn!("bus delivery report dropped");
            }
        }
    }
}
