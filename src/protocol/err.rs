//! `ERR` packets: a well-formed server error reply.
//!
//! See <https://mariadb.com/kb/en/err_packet/>.

use byteorder::LittleEndian;

use crate::error::Error;
use crate::io::Buf;

#[derive(Debug, Clone)]
pub struct ErrPacket {
    pub error_code: u16,
    pub sql_state: Box<str>,
    pub error_message: Box<str>,
}

impl ErrPacket {
    pub fn read(mut buf: &[u8]) -> Result<Self, Error> {
        let header = buf.get_u8()?;
        if header != 0xFF {
            return Err(protocol_err!("expected an ERR packet header (0xFF), received {header:#04x}"));
        }

        let error_code = buf.get_u16::<LittleEndian>()?;

        // sql_state_marker ('#')
        buf.get_u8()?;
        let sql_state = buf.get_str(5)?.into();

        let error_message = buf.get_str(buf.len())?.into();

        Ok(Self {
            error_code,
            sql_state,
            error_message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ERR_UNKNOWN_DB: &[u8] = b"\xff\x19\x04#42000Unknown database 'unknown'";

    #[test]
    fn it_decodes_an_err_packet() {
        let p = ErrPacket::read(ERR_UNKNOWN_DB).unwrap();

        assert_eq!(p.error_code, 1049);
        assert_eq!(&*p.sql_state, "42000");
        assert_eq!(&*p.error_message, "Unknown database 'unknown'");
    }
}
