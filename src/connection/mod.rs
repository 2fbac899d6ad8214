//! The connection state machine: socket lifecycle plus the phases from the protocol's handshake
//! through query dispatch.

mod handshake;
mod query;
mod stream;

use std::str::FromStr;
use std::time::Instant;

use crate::error::Error;
use crate::options::ConnectOptions;
use crate::protocol::{ColumnDefinition, ServerStatus};
use stream::Stream;

pub use handshake::ServerInfo;

/// Where a [`Connection`] is in the protocol's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Disconnected,
    HandshakeWait,
    AuthSent,
    Idle,
    CommandSent,
    ReadColumns,
    ReadRows,
    Closed,
}

/// Terminal metadata carried by an `OK` packet, or its row-phase equivalent under
/// `CLIENT_DEPRECATE_EOF`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryEnd {
    pub affected_rows: u64,
    pub last_insert_id: u64,
    pub warnings_count: u16,
    pub status: ServerStatus,
}

/// A well-formed `ERR` packet received mid-query.
#[derive(Debug, Clone)]
pub struct ServerErrorEvent {
    pub error_code: u16,
    pub sql_state: Box<str>,
    pub error_message: Box<str>,
}

/// Callbacks a [`Connection`] drives while a query is in flight.
///
/// The protocol core dispatches through this typed callback table rather than a generic
/// observer list (design note in the crate's protocol design): a query's events reach exactly
/// one consumer, the [`Database`][crate::Database] that currently owns the connection, with no
/// reentrancy bookkeeping.
pub trait ConnectionEvents {
    fn on_fields(&mut self, columns: Vec<ColumnDefinition>);
    fn on_row(&mut self, row: Vec<Option<Box<str>>>);
    fn on_end(&mut self, end: QueryEnd);
    fn on_error(&mut self, error: ServerErrorEvent);
}

struct NoopEvents;

impl ConnectionEvents for NoopEvents {
    fn on_fields(&mut self, _columns: Vec<ColumnDefinition>) {}
    fn on_row(&mut self, _row: Vec<Option<Box<str>>>) {}
    fn on_end(&mut self, _end: QueryEnd) {}
    fn on_error(&mut self, _error: ServerErrorEvent) {}
}

/// A single socket driven through the MySQL wire protocol.
///
/// Every I/O failure is fatal: the socket is torn down and `phase` moves to `Closed`. A
/// well-formed `ERR` packet mid-query, by contrast, is not fatal — `query` still returns
/// `Ok(())`, the error reaches whichever [`ConnectionEvents::on_error`] is subscribed, and
/// `phase` returns to `Idle`.
pub struct Connection {
    stream: Option<Stream>,
    phase: Phase,
    options: ConnectOptions,
    server: Option<ServerInfo>,
    events: Option<Box<dyn ConnectionEvents>>,
}

impl Connection {
    /// Parses `url`, dials the server, and performs the handshake.
    pub fn connect(url: &str) -> Result<Self, Error> {
        Self::connect_with(ConnectOptions::from_str(url)?)
    }

    /// Dials and handshakes using already-built options.
    #[tracing::instrument(skip_all, fields(host = ?options.host, port = options.port))]
    pub fn connect_with(options: ConnectOptions) -> Result<Self, Error> {
        let mut conn = Self {
            stream: None,
            phase: Phase::Disconnected,
            options,
            server: None,
            events: None,
        };

        let deadline = conn.options.connect_timeout.map(|d| Instant::now() + d);

        conn.phase = Phase::HandshakeWait;
        let mut stream = Stream::connect(&conn.options.host, conn.options.port, conn.options.connect_timeout)?;

        conn.phase = Phase::AuthSent;
        let server = handshake::establish(&mut stream, &conn.options, deadline)?;

        conn.stream = Some(stream);
        conn.server = Some(server);
        conn.phase = Phase::Idle;

        if conn.options.utf8 {
            conn.run_query("SET NAMES utf8", &mut NoopEvents)?;
        }

        tracing::debug!(connection_id = ?conn.pid(), "connected");
        Ok(conn)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn server(&self) -> Option<&ServerInfo> {
        self.server.as_ref()
    }

    /// The server-assigned connection id, usable with `KILL <pid>`.
    pub fn pid(&self) -> Option<u32> {
        self.server.as_ref().map(|s| s.connection_id)
    }

    /// Registers the callback table that receives this connection's query events until
    /// [`unsubscribe`][Self::unsubscribe] is called.
    pub fn on(&mut self, events: impl ConnectionEvents + 'static) {
        self.events = Some(Box::new(events));
    }

    pub fn unsubscribe(&mut self) {
        self.events = None;
    }

    /// Runs `sql` to completion, driving the state machine synchronously and dispatching events
    /// to whatever is currently registered with [`on`][Self::on].
    ///
    /// Only a fatal failure (network, protocol, or timeout) is returned as `Err`; a well-formed
    /// `ERR` packet reaches [`ConnectionEvents::on_error`] and this still returns `Ok(())`.
    pub fn query(&mut self, sql: &str) -> Result<(), Error> {
        let mut events = self.events.take();
        let result = match events.as_deref_mut() {
            Some(events) => self.run_query(sql, events),
            None => self.run_query(sql, &mut NoopEvents),
        };
        self.events = events;
        result
    }

    fn run_query(&mut self, sql: &str, events: &mut dyn ConnectionEvents) -> Result<(), Error> {
        if self.phase != Phase::Idle {
            return Err(protocol_err!("query issued while connection is in phase {:?}", self.phase));
        }

        let Some(stream) = self.stream.as_mut() else {
            return Err(protocol_err!("query issued on a disconnected connection"));
        };

        let capabilities = self.server.as_ref().map(|s| s.capability_flags).unwrap_or_default();
        let deadline = self.options.query_timeout.map(|d| Instant::now() + d);

        self.phase = Phase::CommandSent;
        let outcome = query::run(stream, &self.options, capabilities, sql, events, deadline);

        self.phase = match &outcome {
            Ok(()) => Phase::Idle,
            Err(err) => {
                tracing::debug!(%err, "query failed, closing connection");
                Phase::Closed
            }
        };

        outcome
    }

    /// Issues `COM_PING`. Returns `false` rather than propagating an error if the connection is
    /// unhealthy — this is the health check [`Pool`][crate::Pool] uses before reusing an idle
    /// connection.
    pub fn ping(&mut self) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }

        let Some(stream) = self.stream.as_mut() else {
            return false;
        };

        let deadline = self.options.connect_timeout.map(|d| Instant::now() + d);
        let healthy = ping(stream, deadline).is_ok();
        if !healthy {
            self.phase = Phase::Closed;
        }

        healthy
    }

    /// Issues a best-effort `COM_QUIT` and closes the socket.
    pub fn disconnect(mut self) {
        if let Some(stream) = self.stream.take() {
            stream.quit();
        }
        self.phase = Phase::Closed;
    }
}

fn ping(stream: &mut Stream, deadline: Option<Instant>) -> Result<(), Error> {
    stream.reset_sequence();
    stream.write_packet(&[crate::protocol::COM_PING])?;

    let packet = stream.read_packet(deadline)?;
    if packet.first() != Some(&0x00) {
        return Err(protocol_err!("expected an OK packet in response to COM_PING"));
    }

    Ok(())
}
