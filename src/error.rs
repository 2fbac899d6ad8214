//! Error and Result types.

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::io;

/// A specialized `Result` type used throughout this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A generic error that represents all the ways a call into this crate can fail.
///
/// Everything except [`Error::Server`] is fatal to the [`Connection`][crate::Connection] that
/// raised it: the socket is closed and the connection is discarded rather than returned to a
/// [`Pool`][crate::Pool].
#[derive(Debug)]
pub enum Error {
    /// The underlying socket failed, or was closed unexpectedly by the peer.
    Network(io::Error),

    /// A packet was malformed, arrived out of sequence, or otherwise didn't match the shape
    /// the current connection phase expected.
    Protocol(Box<str>),

    /// The server rejected our credentials during the handshake.
    Auth(Box<str>),

    /// A well-formed `ERR` packet was received mid-session. Unlike the other variants this is
    /// not fatal: the connection returns to `idle` and may be reused.
    Server {
        error_code: u16,
        sql_state: Box<str>,
        error_message: Box<str>,
    },

    /// `connect_timeout` or `query_timeout` elapsed before the operation completed.
    Timeout,

    /// A blocking [`Database::query`][crate::Database::query] was issued while a non-blocking
    /// query was still in flight on the same connection.
    Busy,

    /// [`expand_sql`][crate::sql::expand_sql] was called with a number of arguments that does
    /// not match the number of unescaped `?` placeholders in the template.
    ArityMismatch { placeholders: usize, arguments: usize },

    /// [`Database::begin`][crate::Database::begin] was called on a connection that is already
    /// inside a transaction.
    AlreadyInTransaction,

    /// The connection URL could not be parsed.
    UrlParse(Box<str>),
}

impl Error {
    pub(crate) fn protocol(args: fmt::Arguments<'_>) -> Self {
        Error::Protocol(args.to_string().into_boxed_str())
    }

    /// `true` if receiving this error leaves the connection in the `idle` phase rather than
    /// `closed`.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Server { .. })
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Network(error) => Some(error),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Network(error) => write!(f, "network error: {error}"),

            Error::Protocol(message) => write!(f, "protocol error: {message}"),

            Error::Auth(message) => write!(f, "authentication failed: {message}"),

            Error::Server {
                error_code,
                sql_state,
                error_message,
            } => write!(f, "{error_code} ({sql_state}): {error_message}"),

            Error::Timeout => f.write_str("operation timed out"),

            Error::Busy => f.write_str("a non-blocking query is already in flight on this connection"),

            Error::ArityMismatch {
                placeholders,
                arguments,
            } => write!(
                f,
                "expected {placeholders} argument(s) for placeholders in the query, got {arguments}"
            ),

            Error::AlreadyInTransaction => {
                f.write_str("cannot begin a transaction: connection already has one in progress")
            }

            Error::UrlParse(message) => write!(f, "invalid connection url: {message}"),
        }
    }
}

impl From<io::Error> for Error {
    #[inline]
    fn from(err: io::Error) -> Self {
        Error::Network(err)
    }
}

impl From<io::ErrorKind> for Error {
    #[inline]
    fn from(err: io::ErrorKind) -> Self {
        Error::Network(err.into())
    }
}

/// Used by the `protocol_err!()` macro for a lazily evaluated conversion to
/// [`Error::Protocol`] so the macro can be used in expression position.
macro_rules! protocol_err (
    ($($args:tt)*) => {
        $crate::error::Error::protocol(format_args!($($args)*))
    }
);
