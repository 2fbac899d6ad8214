//! The client's handshake response, sent in reply to the server's initial handshake packet.
//!
//! See <https://mariadb.com/kb/en/connection/#handshake-response-packet>.

use byteorder::LittleEndian;

use crate::io::BufMut;
use crate::protocol::Capabilities;

pub struct HandshakeResponse<'a> {
    pub client_capabilities: Capabilities,
    pub max_packet_size: u32,
    pub client_collation: u8,
    pub username: &'a str,
    pub database: Option<&'a str>,
    pub auth_plugin_name: &'a str,
    pub auth_response: &'a [u8],
}

impl HandshakeResponse<'_> {
    pub fn write(&self, buf: &mut Vec<u8>) {
        buf.put_u32::<LittleEndian>(self.client_capabilities.bits());
        buf.put_u32::<LittleEndian>(self.max_packet_size);
        buf.put_u8(self.client_collation);

        // reserved
        buf.put_bytes(&[0; 23]);

        buf.put_str_nul(self.username);

        // SECURE_CONNECTION is always part of Capabilities::BASE, so the auth response is
        // always length-prefixed by a single byte rather than a bare NUL-terminated string.
        buf.put_u8(self.auth_response.len() as u8);
        buf.put_bytes(self.auth_response);

        if self.client_capabilities.contains(Capabilities::CONNECT_WITH_DB) {
            if let Some(database) = self.database {
                buf.put_str_nul(database);
            }
        }

        if self.client_capabilities.contains(Capabilities::PLUGIN_AUTH) {
            buf.put_str_nul(self.auth_plugin_name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::Buf;

    #[test]
    fn it_encodes_a_handshake_response() {
        let response = HandshakeResponse {
            client_capabilities: Capabilities::BASE | Capabilities::CONNECT_WITH_DB,
            max_packet_size: 0xFF_FF_FF,
            client_collation: 45,
            username: "root",
            database: Some("test"),
            auth_plugin_name: "mysql_native_password",
            auth_response: &[1, 2, 3, 4],
        };

        let mut buf = Vec::new();
        response.write(&mut buf);

        let mut rest: &[u8] = &buf;
        assert_eq!(
            rest.get_u32::<LittleEndian>().unwrap(),
            response.client_capabilities.bits()
        );
        assert_eq!(rest.get_u32::<LittleEndian>().unwrap(), 0xFF_FF_FF);
        assert_eq!(rest.get_u8().unwrap(), 45);

        rest.advance(23);

        assert_eq!(rest.get_str_nul().unwrap(), "root");
        assert_eq!(rest.get_u8().unwrap(), 4);
        assert_eq!(rest.get_bytes(4).unwrap(), &[1, 2, 3, 4]);
        assert_eq!(rest.get_str_nul().unwrap(), "test");
        assert_eq!(rest.get_str_nul().unwrap(), "mysql_native_password");
        assert!(rest.is_empty());
    }
}
