//! DONKI space weather notifications: records, the HTTP source and the
//! three-category aggregator.

pub mod aggregator;
pub mod event;
pub mod source;

pub use aggregator::{EventAggregator, FetchReport};
pub use event::{DateWindow, Event};
pub use source::{BoxFuture, DonkiClient, EventSource};
