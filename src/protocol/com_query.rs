//! `COM_QUERY`: run a SQL statement through the text protocol.
//!
//! See <https://mariadb.com/kb/en/com_query/>.

use crate::io::BufMut;

pub const COM_QUERY: u8 = 0x03;

/// Builds the command payload for `query`. Splitting across multiple physical packets when the
/// payload exceeds a single packet's capacity is handled by
/// [`write_packet`][crate::protocol::write_packet], not here.
pub fn encode(query: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(1 + query.len());
    buf.put_u8(COM_QUERY);
    buf.put_str(query);
    buf
}
