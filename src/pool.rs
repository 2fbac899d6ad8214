//! Caches idle [`Connection`]s keyed by the owning process id and hands out [`Database`]
//! handles backed by either a cached connection or a freshly dialed one.

use std::cell::{Cell, RefCell};
use std::process;
use std::rc::Rc;

use crate::connection::Connection;
use crate::database::Database;
use crate::error::Error;
use crate::options::ConnectOptions;

const DEFAULT_MAX_CONNECTIONS: usize = 5;

/// A per-process cache of idle connections, bounded by `max_connections`.
///
/// `Database` holds only a [`Weak`] reference back to its `Pool` (see the crate's design notes
/// on avoiding cyclic ownership): the pool must be kept alive by the caller, typically in an
/// `Rc<Pool>` held for the process's lifetime.
pub struct Pool {
    options: ConnectOptions,
    max_connections: usize,
    idle: RefCell<Vec<Connection>>,
    owner_pid: Cell<u32>,
}

impl Pool {
    pub fn new(options: ConnectOptions) -> Rc<Self> {
        Self::with_max_connections(options, DEFAULT_MAX_CONNECTIONS)
    }

    pub fn with_max_connections(options: ConnectOptions, max_connections: usize) -> Rc<Self> {
        Rc::new(Self {
            options,
            max_connections,
            idle: RefCell::new(Vec::new()),
            owner_pid: Cell::new(process::id()),
        })
    }

    /// Leases a `Database`: a cached, still-healthy idle connection if one is available,
    /// otherwise a freshly dialed one.
    pub fn db(self: &Rc<Self>) -> Result<Database, Error> {
        self.discard_if_forked();

        while let Some(mut connection) = self.idle.borrow_mut().pop() {
            if connection.ping() {
                return Ok(Database::new(connection, Rc::downgrade(self)));
            }
            // unhealthy: drop it and try the next cached connection
        }

        let connection = Connection::connect_with(self.options.clone())?;
        tracing::debug!(pid = ?connection.pid(), "dialed a fresh connection for the pool");

        Ok(Database::new(connection, Rc::downgrade(self)))
    }

    pub(crate) fn enqueue(&self, connection: Connection) {
        self.discard_if_forked();

        let mut idle = self.idle.borrow_mut();
        idle.push(connection);
        while idle.len() > self.max_connections {
            idle.remove(0);
        }
    }

    /// If the current process id no longer matches the one that created this pool, the idle
    /// list is inherited file descriptors from a `fork`: drop them without `COM_QUIT` (the
    /// parent remains responsible for them) and re-record the current process id.
    fn discard_if_forked(&self) {
        let current = process::id();
        if self.owner_pid.get() != current {
            self.idle.borrow_mut().clear();
            self.owner_pid.set(current);
        }
    }

    pub fn max_connections(&self) -> usize {
        self.max_connections
    }

    pub fn idle_len(&self) -> usize {
        self.idle.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_defaults_to_five_max_connections() {
        let pool = Pool::new(ConnectOptions::new());
        assert_eq!(pool.max_connections(), 5);
    }

    #[test]
    fn it_starts_with_an_empty_idle_list() {
        let pool = Pool::new(ConnectOptions::new());
        assert_eq!(pool.idle_len(), 0);
    }
}
