//! Adapters Layer (Driven Adapters)
//!
//! Implementations of [`EventSink`](crate::ports::EventSink):
//!
//! - `EventQueue` - in-process FIFO drained by the caller
//! - `ChannelEventSink` - forwards events to an async task over a tokio channel

pub mod channel;
pub mod event_queue;

pub use channel::ChannelEventSink;
pub use event_queue::EventQueue;
