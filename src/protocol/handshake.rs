//! The server's initial handshake packet (protocol version 10).
//!
//! See <https://mariadb.com/kb/en/connection/#initial-handshake-packet>.

use byteorder::LittleEndian;

use crate::error::Error;
use crate::io::Buf;
use crate::protocol::Capabilities;

#[derive(Debug)]
pub struct Handshake {
    pub protocol_version: u8,
    pub server_version: Box<str>,
    pub connection_id: u32,
    pub server_capabilities: Capabilities,
    pub server_default_collation: u8,
    pub auth_plugin_name: Box<str>,
    /// The full, reassembled scramble (nonce), with its trailing NUL stripped if present.
    pub auth_plugin_data: Box<[u8]>,
}

impl Handshake {
    pub fn read(mut buf: &[u8]) -> Result<Self, Error> {
        let protocol_version = buf.get_u8()?;

        if protocol_version != 10 {
            return Err(protocol_err!(
                "unsupported handshake protocol version {protocol_version}, expected 10"
            ));
        }

        let server_version = buf.get_str_nul()?.into();
        let connection_id = buf.get_u32::<LittleEndian>()?;

        let mut scramble = Vec::with_capacity(20);
        scramble.extend_from_slice(buf.get_bytes(8)?);

        // filler
        buf.advance(1);

        let capabilities_lo = buf.get_u16::<LittleEndian>()?;
        let mut capabilities = Capabilities::from_bits_truncate(u32::from(capabilities_lo));

        let server_default_collation = buf.get_u8()?;
        let _status = buf.get_u16::<LittleEndian>()?;

        let capabilities_hi = buf.get_u16::<LittleEndian>()?;
        capabilities |= Capabilities::from_bits_truncate(u32::from(capabilities_hi) << 16);

        let auth_plugin_data_len = if capabilities.contains(Capabilities::PLUGIN_AUTH) {
            buf.get_u8()?
        } else {
            buf.advance(1);
            0
        };

        // reserved
        buf.advance(10);

        if capabilities.contains(Capabilities::SECURE_CONNECTION) {
            let len = (auth_plugin_data_len as usize).saturating_sub(8).max(13);
            let rest = buf.get_bytes(len)?;
            // the second part is NUL-terminated; drop the terminator if present
            let end = rest.iter().position(|&b| b == 0).unwrap_or(rest.len());
            scramble.extend_from_slice(&rest[..end]);
        }

        let auth_plugin_name = if capabilities.contains(Capabilities::PLUGIN_AUTH) {
            buf.get_str_nul()?.into()
        } else {
            "".into()
        };

        Ok(Self {
            protocol_version,
            server_version,
            connection_id,
            server_capabilities: capabilities,
            server_default_collation,
            auth_plugin_name,
            auth_plugin_data: scramble.into_boxed_slice(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HANDSHAKE_MYSQL_8_0_18: &[u8] = b"\n8.0.18\x00\x19\x00\x00\x00\x114aB0c\x06g\x00\xff\xff\xff\x02\x00\xff\xc7\x15\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00tL\x03s\x0f[4\rl4. \x00caching_sha2_password\x00";
    const HANDSHAKE_MARIA_DB_10_4_7: &[u8] = b"\n5.5.5-10.4.7-MariaDB-1:10.4.7+maria~bionic\x00\x0b\x00\x00\x00t6L\\j\"dS\x00\xfe\xf7\x08\x02\x00\xff\x81\x15\x00\x00\x00\x00\x00\x00\x07\x00\x00\x00U14Oph9\"<H5n\x00mysql_native_password\x00";

    #[test]
    fn it_reads_a_mysql_8_handshake() {
        let p = Handshake::read(HANDSHAKE_MYSQL_8_0_18).unwrap();

        assert_eq!(p.protocol_version, 10);
        assert_eq!(&*p.server_version, "8.0.18");
        assert_eq!(&*p.auth_plugin_name, "caching_sha2_password");
        assert_eq!(p.auth_plugin_data.len(), 20);
    }

    #[test]
    fn it_reads_a_mariadb_handshake() {
        let p = Handshake::read(HANDSHAKE_MARIA_DB_10_4_7).unwrap();

        assert_eq!(p.protocol_version, 10);
        assert_eq!(&*p.server_version, "5.5.5-10.4.7-MariaDB-1:10.4.7+maria~bionic");
        assert_eq!(&*p.auth_plugin_name, "mysql_native_password");
        assert_eq!(p.auth_plugin_data.len(), 20);
    }
}
