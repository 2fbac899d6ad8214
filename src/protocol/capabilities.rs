// https://mariadb.com/kb/en/connection/#capabilities
// https://dev.mysql.com/doc/dev/mysql-server/latest/group__group__cs__capabilities__flags.html
bitflags::bitflags! {
    /// Capability flags exchanged during the handshake. We only ever set the subset this crate
    /// actually implements; everything else is left unset even if the server advertises it.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Capabilities: u32 {
        /// Use the improved version of Old Password Authentication.
        const LONG_PASSWORD = 1;

        /// Send found rows instead of affected rows in the `OK` packet's affected-row count.
        const FOUND_ROWS = 2;

        /// Longer flags in `Column Definition`, supports server-side prepared statements.
        const LONG_FLAG = 4;

        /// One can specify a default database on connect.
        const CONNECT_WITH_DB = 8;

        /// DB-level configuration not supported, always unset.
        const NO_SCHEMA = 16;

        /// Compression protocol supported, never set by this crate.
        const COMPRESS = 32;

        /// Special handling of `ODBC` behavior, never set.
        const ODBC = 64;

        /// Can use `LOAD DATA LOCAL`, never set (see non-goals).
        const LOCAL_FILES = 128;

        /// Ignore spaces before `(`, never set.
        const IGNORE_SPACE = 256;

        /// New 4.1 protocol, always set.
        const PROTOCOL_41 = 512;

        /// This is an interactive client, never set.
        const INTERACTIVE = 1024;

        /// Use SSL encryption, never set (see non-goals).
        const SSL = 2048;

        /// Client only flag, ignore.
        const IGNORE_SIGPIPE = 4096;

        /// Client knows about transactions, always set.
        const TRANSACTIONS = 8192;

        /// Old flag for 4.1 protocol, unused.
        const RESERVED = 16384;

        /// New 4.1 authentication, always set.
        const SECURE_CONNECTION = 32768;

        /// Enable/disable multi-statement support, set when
        /// [`ConnectOptions::multi_statements`][crate::ConnectOptions::multi_statements] is on.
        const MULTI_STATEMENTS = 1 << 16;

        /// Enable/disable multi-results.
        const MULTI_RESULTS = 1 << 17;

        /// Multi-results and OUT parameters in PS-protocol.
        const PS_MULTI_RESULTS = 1 << 18;

        /// Client supports plugin authentication, always set.
        const PLUGIN_AUTH = 1 << 19;

        /// Client supports connection attributes, never set.
        const CONNECT_ATTRS = 1 << 20;

        /// Enable authentication response packet to be larger than 255 bytes.
        const PLUGIN_AUTH_LENENC_CLIENT_DATA = 1 << 21;

        /// Don't close the connection for a user account with expired password.
        const CAN_HANDLE_EXPIRED_PASSWORDS = 1 << 22;

        /// Capable of handling server state change information.
        const SESSION_TRACK = 1 << 23;

        /// Client no longer needs `EOF` packets, always set.
        const DEPRECATE_EOF = 1 << 24;

        /// The client can handle optional metadata information on `COM_STMT_EXECUTE`.
        const OPTIONAL_RESULTSET_METADATA = 1 << 25;

        /// Compression protocol extended to support zstd.
        const ZSTD_COMPRESSION_ALGORITHM = 1 << 26;

        /// Verify server certificate, never set.
        const SSL_VERIFY_SERVER_CERT = 1 << 30;

        /// Don't reset the options after an unsuccessful connect.
        const REMEMBER_OPTIONS = 1 << 31;
    }
}

impl Capabilities {
    /// The capabilities this crate always advertises, regardless of [`ConnectOptions`][crate::ConnectOptions].
    pub const BASE: Self = Self::from_bits_truncate(
        Self::PROTOCOL_41.bits()
            | Self::LONG_PASSWORD.bits()
            | Self::TRANSACTIONS.bits()
            | Self::SECURE_CONNECTION.bits()
            | Self::PLUGIN_AUTH.bits()
            | Self::DEPRECATE_EOF.bits()
            | Self::MULTI_RESULTS.bits()
            | Self::PS_MULTI_RESULTS.bits(),
    );
}
