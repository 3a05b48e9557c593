//! Logging infrastructure: structured run event logging.
//!
//! Provides [`JsonlRunEventLogger`], a JSONL file writer that implements
//! the [`RunEventLogger`](proposal_application::RunEventLogger) port.

mod jsonl_event_logger;

pub use jsonl_event_logger::JsonlRunEventLogger;
