// https://mariadb.com/kb/en/server-status-flags/
// https://dev.mysql.com/doc/dev/mysql-server/latest/mysql__com_8h.html
bitflags::bitflags! {
    /// Server status flags carried on `OK` and `EOF` packets.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct ServerStatus: u16 {
        /// A transaction is currently active.
        const IN_TRANSACTION = 1;

        /// Auto-commit is enabled.
        const AUTOCOMMIT = 2;

        /// More results exist: another result set follows in a multi-statement response.
        const MORE_RESULTS_EXISTS = 8;

        const NO_GOOD_INDEX_USED = 16;

        const NO_INDEX_USED = 32;

        /// Set for the `OK` packet terminating a server-side cursor, which this crate never
        /// opens.
        const CURSOR_EXISTS = 64;

        const LAST_ROW_SENT = 128;

        const DB_DROPPED = 256;

        const NO_BACKSLASH_ESCAPES = 512;

        const METADATA_CHANGED = 1024;

        const QUERY_WAS_SLOW = 2048;

        const PS_OUT_PARAMS = 4096;

        /// A read-only transaction is active.
        const IN_TRANS_READONLY = 8192;

        const SESSION_STATE_CHANGED = 1 << 14;
    }
}
