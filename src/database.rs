//! Owns one [`Connection`], serializing queries submitted against it onto a FIFO waiting list and
//! returning it to the [`Pool`] it came from once healthy and idle.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use crate::connection::{Connection, ConnectionEvents, QueryEnd, ServerErrorEvent};
use crate::error::Error;
use crate::pool::Pool;
use crate::protocol::{ColumnDefinition, ServerStatus};
use crate::results::Results;
use crate::sql;

/// A non-blocking query's completion callback: `(error, results)`, mirroring the blocking path's
/// `Result<Results, Error>` but split so a caller can inspect partial results alongside an error.
pub type QueryCallback = Box<dyn FnOnce(Option<Error>, Results)>;

struct QueryDescriptor {
    sql: String,
    callback: Option<QueryCallback>,
    started: bool,
    results: Rc<RefCell<Results>>,
}

/// Routes a single query's events into its descriptor's [`Results`] without Database needing to
/// hand `Connection` a back-reference to itself.
struct ResultsSink(Rc<RefCell<Results>>);

impl ConnectionEvents for ResultsSink {
    fn on_fields(&mut self, columns: Vec<ColumnDefinition>) {
        self.0.borrow_mut().on_fields(columns);
    }

    fn on_row(&mut self, row: Vec<Option<Box<str>>>) {
        self.0.borrow_mut().on_row(row);
    }

    fn on_end(&mut self, end: QueryEnd) {
        self.0.borrow_mut().on_end(end);
    }

    fn on_error(&mut self, error: ServerErrorEvent) {
        self.0.borrow_mut().on_error(error);
    }
}

/// One leased [`Connection`] plus its query queue.
///
/// Dropping a `Database` returns its connection to the originating [`Pool`] if a health check
/// (`ping`) succeeds, per the pool's implicit-return-on-drop design; otherwise the connection is
/// discarded.
pub struct Database {
    connection: Option<Connection>,
    pool: Weak<Pool>,
    waiting: VecDeque<QueryDescriptor>,
    status: ServerStatus,
}

impl Database {
    pub(crate) fn new(connection: Connection, pool: Weak<Pool>) -> Self {
        Self {
            connection: Some(connection),
            pool,
            waiting: VecDeque::new(),
            status: ServerStatus::empty(),
        }
    }

    /// Number of queued non-blocking queries beyond the one currently executing.
    ///
    /// Always `0` once [`query_async`][Self::query_async] has returned: with no underlying
    /// non-blocking socket, draining the waiting list down to empty is part of that single call,
    /// so there is no externally observable moment where a query is still outstanding. The
    /// guard on [`query`][Self::query] below is kept for the API contract this method documents
    /// (and for a connection backend that can genuinely overlap I/O in the future), not because
    /// it currently fires in practice.
    pub fn backlog(&self) -> usize {
        self.waiting.len().saturating_sub(1)
    }

    /// Substitutes `params` into `sql` and runs it to completion, blocking the calling thread.
    ///
    /// Fails with [`Error::Busy`] if a non-blocking query submitted earlier is still queued. In
    /// the current synchronous implementation this can't actually happen through safe use of the
    /// public API — see [`backlog`][Self::backlog] — but the check stays because it's part of
    /// this method's documented contract. Otherwise any [`Error::Server`] the query raises is
    /// also returned as `Err`, carrying the server's `error_code`/`sql_state`/`error_message`.
    pub fn query(&mut self, sql: &str, params: &[Option<&str>]) -> Result<Results, Error> {
        if self.backlog() > 0 {
            return Err(Error::Busy);
        }

        let expanded = sql::expand_sql(sql, params)?;
        self.waiting.push_back(QueryDescriptor {
            sql: expanded,
            callback: None,
            started: true,
            results: Rc::new(RefCell::new(Results::new())),
        });

        let outcome = self.run_head();
        let descriptor = self.waiting.pop_front().expect("head present: just pushed above");
        let results = unwrap_results(descriptor.results);

        outcome?;
        into_result(results)
    }

    /// Substitutes `params` into `sql`, queues it, and invokes `callback` once it completes.
    ///
    /// "Returns immediately" describes the caller-facing shape of the method, not its timing:
    /// there is no non-blocking socket underneath, so by the time this call returns the query has
    /// already run to completion and `callback` has already fired. Callbacks across a single
    /// `Database` fire in submission order regardless.
    pub fn query_async(&mut self, sql: &str, params: &[Option<&str>], callback: QueryCallback) -> Result<(), Error> {
        let expanded = sql::expand_sql(sql, params)?;
        let was_idle = self.waiting.is_empty();

        self.waiting.push_back(QueryDescriptor {
            sql: expanded,
            callback: Some(callback),
            started: false,
            results: Rc::new(RefCell::new(Results::new())),
        });

        if was_idle {
            self.drain();
        }

        Ok(())
    }

    /// Starts a transaction: fails with [`Error::AlreadyInTransaction`] if the connection's last
    /// known status already reports one in progress; otherwise issues `START TRANSACTION` and
    /// `SET autocommit=0`.
    ///
    /// Committing or rolling back is the caller's responsibility (`db.query("COMMIT", &[])`):
    /// the transaction-lifecycle wrapper itself is an external concern layered on top of this
    /// core.
    pub fn begin(&mut self) -> Result<(), Error> {
        if self.status.contains(ServerStatus::IN_TRANSACTION) {
            return Err(Error::AlreadyInTransaction);
        }

        self.query("START TRANSACTION", &[])?;
        self.query("SET autocommit=0", &[])?;
        Ok(())
    }

    pub fn ping(&mut self) -> bool {
        self.connection.as_mut().is_some_and(Connection::ping)
    }

    pub fn pid(&self) -> Option<u32> {
        self.connection.as_ref().and_then(Connection::pid)
    }

    /// Issues `COM_QUIT` and closes the underlying socket without returning it to the pool.
    pub fn disconnect(mut self) {
        if let Some(connection) = self.connection.take() {
            connection.disconnect();
        }
    }

    /// Drains the waiting list starting from the head, dispatching each descriptor's callback
    /// (if any) as it completes, until the list is empty or a fatal connection error occurs.
    fn drain(&mut self) {
        while let Some(front) = self.waiting.front_mut() {
            front.started = true;
            let outcome = self.run_head();
            let descriptor = self.waiting.pop_front().expect("head present: loop condition");
            let results = unwrap_results(descriptor.results);

            if let Some(callback) = descriptor.callback {
                let error = outcome.err().or_else(|| error_from_results(&results));
                callback(error, results);
            }
        }
    }

    /// Runs the head descriptor's SQL to completion against the connection, routing its events
    /// into the head's `Results`. Only the head may have `started = true` at any point.
    fn run_head(&mut self) -> Result<(), Error> {
        debug_assert!(self.waiting.front().is_some_and(|d| d.started));

        let sql = self.waiting.front().expect("called with a head present").sql.clone();
        let results = self.waiting.front().expect("called with a head present").results.clone();

        let connection = self
            .connection
            .as_mut()
            .expect("connection present while Database is alive");

        connection.on(ResultsSink(results.clone()));
        let outcome = connection.query(&sql);
        connection.unsubscribe();

        self.status = results.borrow().status();
        outcome
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        let Some(mut connection) = self.connection.take() else {
            return;
        };

        if connection.ping() {
            if let Some(pool) = self.pool.upgrade() {
                pool.enqueue(connection);
                return;
            }
        }

        connection.disconnect();
    }
}

fn unwrap_results(results: Rc<RefCell<Results>>) -> Results {
    Rc::try_unwrap(results)
        .unwrap_or_else(|_| unreachable!("ResultsSink is dropped by Connection::unsubscribe before this runs"))
        .into_inner()
}

fn into_result(results: Results) -> Result<Results, Error> {
    match error_from_results(&results) {
        Some(error) => Err(error),
        None => Ok(results),
    }
}

fn error_from_results(results: &Results) -> Option<Error> {
    Some(Error::Server {
        error_code: results.error_code()?,
        sql_state: results.sql_state()?.into(),
        error_message: results.error_message()?.into(),
    })
}
