//! Legacy `EOF` packets: the terminator between the column-definition and row phases, and at
//! the end of the row phase, when `CLIENT_DEPRECATE_EOF` is not negotiated.
//!
//! See <https://mariadb.com/kb/en/eof_packet/>.

use byteorder::LittleEndian;

use crate::error::Error;
use crate::io::Buf;
use crate::protocol::ServerStatus;

#[derive(Debug)]
pub struct EofPacket {
    pub warnings: u16,
    pub status: ServerStatus,
}

impl EofPacket {
    /// `true` if `header` marks the start of a legacy EOF packet.
    ///
    /// A bare `0xFE` only means EOF when the payload is short enough (`< 9` bytes); a longer
    /// payload starting with `0xFE` is instead a lenenc-encoded row value or, under
    /// `CLIENT_DEPRECATE_EOF`, an OK packet (which also permits a `0xFE` header).
    pub fn is_eof_header(payload: &[u8]) -> bool {
        payload.first() == Some(&0xFE) && payload.len() < 9
    }

    pub fn read(mut buf: &[u8]) -> Result<Self, Error> {
        let header = buf.get_u8()?;
        if header != 0xFE {
            return Err(protocol_err!("expected an EOF packet header (0xFE), received {header:#04x}"));
        }

        let warnings = buf.get_u16::<LittleEndian>()?;
        let status = ServerStatus::from_bits_truncate(buf.get_u16::<LittleEndian>()?);

        Ok(Self { warnings, status })
    }
}
