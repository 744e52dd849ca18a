//! Document dispatcher
//!
//! Consumes finished documents from the worker pool and publishes them: every
//! document goes to the raw-content topic, and documents past the surrealism
//! gate additionally go to the dream topic. When the input channel closes the
//! dispatcher flushes the sink and exits.

use crate::config::CRAWLER_VERSION;
use crate::model::Document;
use crate::output::{BusMessage, CrawlerStats, EventSink};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Surrealism threshold above which a document is dream-ready
const DREAM_GATE: f64 = 0.5;

/// Shutdown grace period for flushing buffered messages
const FLUSH_GRACE: Duration = Duration::from_secs(15);

/// Topic wiring for the dispatcher
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    pub raw_topic: String,
    pub dream_topic: String,
    pub enable_dreaming: bool,
}

/// Runs the dispatcher until the worker-output channel closes
pub async fn run_dispatcher(
    mut input: mpsc::Receiver<Document>,
    sink: Arc<dyn EventSink>,
    config: DispatcherConfig,
    stats: Arc<CrawlerStats>,
) {
    while let Some(doc) = input.recv().await {
        publish_document(sink.as_ref(), &config, &stats, &doc).await;
    }
    sink.flush(FLUSH_GRACE).await;
}

async fn publish_document(
    sink: &dyn EventSink,
    config: &DispatcherConfig,
    stats: &CrawlerStats,
    doc: &Document,
) {
    let payload = match serde_json::to_vec(doc) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!("failed to serialize document for {}: {}", doc.url, e);
            return;
        }
    };
    let score = format!("{:.2}", doc.dream_hints.surrealism);

    sink.publish(BusMessage {
        topic: config.raw_topic.clone(),
        key: doc.url.clone(),
        payload: payload.clone(),
        headers: vec![
            ("content_type".to_string(), "application/json".to_string()),
            ("crawler_version".to_string(), CRAWLER_VERSION.to_string()),
            ("surrealism_score".to_string(), score.clone()),
        ],
    })
    .await;

    if config.enable_dreaming && doc.dream_hints.surrealism > DREAM_GATE {
        stats.increment_dreams();
        sink.publish(BusMessage {
            topic: config.dream_topic.clone(),
            key: doc.url.clone(),
            payload,
            headers: vec![
                ("dream_ready".to_string(), "true".to_string()),
                ("surrealism_score".to_string(), score),
            ],
        })
        .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocumentMetadata;
    use crate::output::MemorySink;

    fn doc_with_surrealism(url: &str, surrealism: f64) -> Document {
        let mut doc = Document::shell(url, 200, DocumentMetadata::default());
        doc.dream_hints.surrealism = surrealism;
        doc
    }

    fn config() -> DispatcherConfig {
        DispatcherConfig {
            raw_topic: "raw.content".to_string(),
            dream_topic: "dream.seeds".to_string(),
            enable_dreaming: true,
        }
    }

    async fn dispatch(docs: Vec<Document>, config: DispatcherConfig) -> (Arc<MemorySink>, Arc<CrawlerStats>) {
        let sink = Arc::new(MemorySink::new());
        let stats = Arc::new(CrawlerStats::new());
        let (tx, rx) = mpsc::channel(8);
        for doc in docs {
            tx.send(doc).await.unwrap();
        }
        drop(tx);
        run_dispatcher(rx, sink.clone(), config, stats.clone()).await;
        (sink, stats)
    }

    #[tokio::test]
    async fn every_document_reaches_raw_topic() {
        let (sink, _stats) = dispatch(
            vec![
                doc_with_surrealism("https://a.test/1", 0.1),
                doc_with_surrealism("https://a.test/2", 0.9),
            ],
            config(),
        )
        .await;
        assert_eq!(sink.topic_messages("raw.content").len(), 2);
    }

    #[tokio::test]
    async fn dream_topic_is_gated_on_surrealism() {
        let (sink, stats) = dispatch(
            vec![
                doc_with_surrealism("https://a.test/dull", 0.5),
                doc_with_surrealism("https://a.test/dreamy", 0.51),
            ],
            config(),
        )
        .await;

        let dreams = sink.topic_messages("dream.seeds");
        assert_eq!(dreams.len(), 1);
        assert_eq!(dreams[0].key, "https://a.test/dreamy");
        assert_eq!(stats.snapshot().dreams, 1);
    }

    #[tokio::test]
    async fn disabled_dreaming_suppresses_second_topic() {
        let mut cfg = config();
        cfg.enable_dreaming = false;
        let (sink, stats) =
            dispatch(vec![doc_with_surrealism("https://a.test/x", 0.99)], cfg).await;
        assert!(sink.topic_messages("dream.seeds").is_empty());
        assert_eq!(sink.topic_messages("raw.content").len(), 1);
        assert_eq!(stats.snapshot().dreams, 0);
    }

    #[tokio::test]
    async fn headers_carry_version_and_score() {
        let (sink, _stats) =
            dispatch(vec![doc_with_surrealism("https://a.test/x", 0.75)], config()).await;

        let raw = &sink.topic_messages("raw.content")[0];
        assert!(raw
            .headers
            .contains(&("content_type".to_string(), "application/json".to_string())));
        assert!(raw
            .headers
            .contains(&("crawler_version".to_string(), CRAWLER_VERSION.to_string())));
        assert!(raw
            .headers
            .contains(&("surrealism_score".to_string(), "0.75".to_string())));

        let dream = &sink.topic_messages("dream.seeds")[0];
        assert!(dream
            .headers
            .contains(&("dream_ready".to_string(), "true".to_string())));
        assert!(dream
            .headers
            .contains(&("surrealism_score".to_string(), "0.75".to_string())));
    }

    #[tokio::test]
    async fn payload_is_the_serialized_document() {
        let (sink, _stats) =
            dispatch(vec![doc_with_surrealism("https://a.test/x", 0.2)], config()).await;
        let raw = &sink.topic_messages("raw.content")[0];
        let parsed: serde_json::Value = serde_json::from_slice(&raw.payload).unwrap();
        assert_eq!(parsed["url"], "https://a.test/x");
        assert_eq!(parsed["dream_hints"]["surrealism_potential"], 0.2);
    }
}
