//! A native implementation of the MySQL client/server wire protocol.
//!
//! This crate speaks the MySQL 4.1+ text protocol directly over a plaintext TCP or Unix
//! socket: no prepared statements, no TLS, no compression. Three pieces fit together:
//!
//! - [`Connection`] drives a single socket through the protocol's phases (handshake, idle,
//!   command-in-flight, result streaming) and reports what it sees through a small set of
//!   typed callbacks.
//! - [`Database`] owns one [`Connection`] and serializes queries submitted against it onto a
//!   FIFO waiting list, supporting both a blocking call that drives the connection to
//!   completion and a non-blocking call that fires a callback once its turn comes up.
//! - [`Pool`] caches idle connections keyed by the owning process id and hands out
//!   [`Database`] handles backed by either a cached connection or a freshly dialed one.
//!
//! Prepared statements, SSL, compression, load balancing, and automatic reconnection are out
//! of scope; see the crate's design notes for the reasoning.

#![forbid(unsafe_code)]

#[macro_use]
mod error;

pub mod connection;
mod database;
mod io;
mod options;
mod pool;
pub mod protocol;
mod results;
pub mod sql;

pub use connection::{Connection, ConnectionEvents, Phase};
pub use database::{Database, QueryCallback};
pub use error::{Error, Result};
pub use options::{ConnectOptions, Host};
pub use pool::Pool;
pub use results::{Column, Results};
