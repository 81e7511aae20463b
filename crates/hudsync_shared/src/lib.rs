//! # HUDSYNC Shared
//!
//! Common types used by the store kernel and the client session.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - the host engine's event bus
//! - any UI or panel abstraction
//! - anything that cannot run in a plain test binary
//!
//! If you need host glue, put it behind the `Transport` trait in
//! `hudsync_client`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod protocol;
pub mod scope;

pub use protocol::{DataRequest, DataUpdate, DataValue, EntityTransmit, LocalNotice, RequestId};
pub use scope::{DataScope, UnknownScope};
