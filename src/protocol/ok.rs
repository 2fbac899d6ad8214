//! `OK` packets: the terminal reply for a statement with no result set, and the terminator for
//! the row phase under `CLIENT_DEPRECATE_EOF`.
//!
//! See <https://mariadb.com/kb/en/ok_packet/>.

use byteorder::LittleEndian;

use crate::error::Error;
use crate::io::Buf;
use crate::protocol::{BufExt, ServerStatus};

#[derive(Debug)]
pub struct OkPacket {
    pub affected_rows: u64,
    pub last_insert_id: u64,
    pub status: ServerStatus,
    pub warnings: u16,
}

impl OkPacket {
    pub fn read(mut buf: &[u8]) -> Result<Self, Error> {
        let header = buf.get_u8()?;
        if header != 0x00 && header != 0xFE {
            return Err(protocol_err!("expected an OK packet header (0x00 or 0xFE), received {header:#04x}"));
        }

        let affected_rows = buf.get_uint_lenenc::<LittleEndian>()?.unwrap_or(0);
        let last_insert_id = buf.get_uint_lenenc::<LittleEndian>()?.unwrap_or(0);
        let status = ServerStatus::from_bits_truncate(buf.get_u16::<LittleEndian>()?);
        let warnings = buf.get_u16::<LittleEndian>()?;

        Ok(Self {
            affected_rows,
            last_insert_id,
            status,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OK_HANDSHAKE: &[u8] = b"\x00\x00\x00\x02@\x00\x00";

    #[test]
    fn it_decodes_an_ok_packet() {
        let p = OkPacket::read(OK_HANDSHAKE).unwrap();

        assert_eq!(p.affected_rows, 0);
        assert_eq!(p.last_insert_id, 0);
        assert_eq!(p.warnings, 0);
        assert!(p.status.contains(ServerStatus::AUTOCOMMIT));
    }
}
