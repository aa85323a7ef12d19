//! # Crate phyphox-rs
//!
//! ## phyphox-rs
//!
//! The `phyphox-rs` crate polls [`Phyphox`](https://phyphox.org/), a mobile phone app that exposes
//! the phone sensors through a REST API, and turns every poll into a normalized
//! [`SensorSnapshot`](common::SensorSnapshot).
//!
//! Features include:
//! - Polling of gravity, linear acceleration, acceleration and gyroscope channels at a
//!   best-effort sampling interval.
//! - Tolerant parsing: channels missing from a response default to `0.0` and are flagged absent.
//! - Indefinite retry with backoff on connection and payload errors.
//! - A bounded rolling history of snapshots, and fan-out to any number of consumer queues.
//! - Mock devices to run without a phone.

pub mod adapters;
pub mod constants;
pub mod errors;
mod helpers;
mod http_client;
pub mod models;
pub mod ports;
pub mod services;

pub use errors::PhyphoxError;
pub use helpers::{build_query, parse_snapshot};
pub use models::acquisition::{AcquisitionConfig, AcquisitionStats, CollectionState};
pub use services::{run_mock_service, run_service, AcquisitionService};
