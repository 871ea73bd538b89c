#![forbid(unsafe_code)]
#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::all))]

//! # quiztrack
//!
//! Minimal event tracking for a client-side quiz funnel. Events arrive over
//! HTTP, land as one JSON line each in an append-only file, and come back out
//! as JSON or CSV reports for the dashboard.
//!
//! Three pieces:
//!
//! - [`store::EventStore`]: the JSONL file plus an append guard
//! - [`handlers`]: `POST /track`, `GET /report.json`, `GET /report.csv`
//! - [`report`]: newest-first ordering and the fixed 12-column CSV rendering
//!
//! The store is the only durable state. Reports re-read and re-parse the
//! whole file on every call; at quiz-funnel volume that is fine.

pub mod config;
pub mod error;
pub mod event;
pub mod handlers;
pub mod report;
pub mod store;

// Re-exports
pub use config::Config;
pub use error::StoreError;
pub use event::{Clock, NumberOrEmpty, SystemClock, TrackEvent, TrackPayload};
pub use store::EventStore;
