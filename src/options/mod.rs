//! Connection configuration, parsed from a `mysql://` URL or built up with the fluent setters
//! below.

use std::path::{Path, PathBuf};
use std::time::Duration;

mod parse;

/// Where to dial to reach the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Host {
    Tcp(String),
    Unix(PathBuf),
}

/// Options and flags used to configure a [`Connection`][crate::Connection].
///
/// A value can be parsed from a connection URL, as described in the crate's external interface
/// notes:
///
/// ```text
/// mysql://[user[:password]@]host-or-socket[:port]/database?opt=val&...
/// ```
///
/// or built up manually with the fluent setters.
///
/// ```rust
/// # use native_mysql::ConnectOptions;
/// let options = ConnectOptions::new()
///     .host("localhost")
///     .username("root")
///     .password("hunter2")
///     .database("app_development");
/// ```
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub(crate) host: Host,
    pub(crate) port: u16,
    pub(crate) username: String,
    pub(crate) password: Option<String>,
    pub(crate) database: Option<String>,
    pub(crate) found_rows: bool,
    pub(crate) multi_statements: bool,
    pub(crate) utf8: bool,
    pub(crate) connect_timeout: Option<Duration>,
    pub(crate) query_timeout: Option<Duration>,
    pub(crate) print_error: bool,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectOptions {
    pub fn new() -> Self {
        Self {
            host: Host::Tcp(String::from("localhost")),
            port: 3306,
            username: String::from("root"),
            password: None,
            database: None,
            found_rows: true,
            multi_statements: false,
            utf8: true,
            connect_timeout: None,
            query_timeout: None,
            print_error: false,
        }
    }

    /// Sets the host to dial over TCP. Overrides any previously set [`socket`][Self::socket].
    pub fn host(mut self, host: &str) -> Self {
        self.host = Host::Tcp(host.to_owned());
        self
    }

    /// Dial a Unix domain socket instead of TCP. Overrides any previously set
    /// [`host`][Self::host].
    pub fn socket(mut self, path: impl AsRef<Path>) -> Self {
        self.host = Host::Unix(path.as_ref().to_path_buf());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn username(mut self, username: &str) -> Self {
        self.username = username.to_owned();
        self
    }

    pub fn password(mut self, password: &str) -> Self {
        self.password = Some(password.to_owned());
        self
    }

    pub fn database(mut self, database: &str) -> Self {
        self.database = Some(database.to_owned());
        self
    }

    /// `UPDATE` reports matched rather than changed row count.
    pub fn found_rows(mut self, found_rows: bool) -> Self {
        self.found_rows = found_rows;
        self
    }

    /// Allow `;`-separated statements in a single `query` call.
    pub fn multi_statements(mut self, multi_statements: bool) -> Self {
        self.multi_statements = multi_statements;
        self
    }

    /// Send `SET NAMES utf8` after the handshake and decode text rows as UTF-8.
    pub fn utf8(mut self, utf8: bool) -> Self {
        self.utf8 = utf8;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = Some(timeout);
        self
    }

    /// Reserved for a caller-side diagnostic channel mirroring the source's `PrintError` option.
    /// The value is only stored and parsed from the connection URL; this crate does not read it
    /// or log anything on its behalf.
    pub fn print_error(mut self, print_error: bool) -> Self {
        self.print_error = print_error;
        self
    }
}
