//! `COM_PING`: ask the server if the connection is alive. Always answered with an `OK` packet.
//!
//! See <https://mariadb.com/kb/en/com_ping/>.

pub const COM_PING: u8 = 0x0E;
