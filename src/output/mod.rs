//! Output stage: event-bus publishing and crawl statistics
//!
//! Documents leave the crawl through an [`EventSink`]; the production sink
//! batches onto Kafka, and an in-memory sink backs the tests.

mod bus;
mod dispatcher;
mod kafka;
mod stats;

pub use bus::{BusMessage, EventSink, MemorySink};
pub use dispatcher::{run_dispatcher, DispatcherConfig};
pub use kafka::KafkaSink;
pub use stats::{run_reporter, CrawlerStats, StatsSnapshot};
