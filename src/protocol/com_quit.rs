//! `COM_QUIT`: tell the server we're closing the connection. Best-effort, no reply expected.
//!
//! See <https://mariadb.com/kb/en/com_quit/>.

pub const COM_QUIT: u8 = 0x01;
