//! Drives a freshly dialed [`Stream`] through the handshake to `idle`.

use std::time::Instant;

use crate::connection::stream::Stream;
use crate::error::Error;
use crate::options::ConnectOptions;
use crate::protocol::{self, Capabilities, ErrPacket, Handshake, HandshakeResponse, OkPacket};

/// Everything learned about the server during the handshake, kept around for the lifetime of
/// the connection.
pub struct ServerInfo {
    pub protocol_version: u8,
    pub server_version: Box<str>,
    pub connection_id: u32,
    pub capability_flags: Capabilities,
    pub charset: u8,
}

pub fn establish(stream: &mut Stream, options: &ConnectOptions, deadline: Option<Instant>) -> Result<ServerInfo, Error> {
    let packet = stream.read_packet(deadline)?;

    if packet.first() == Some(&0xFF) {
        let err = ErrPacket::read(packet)?;
        return Err(Error::Auth(err.error_message));
    }

    let handshake = Handshake::read(packet)?;

    if handshake.auth_plugin_name.as_ref() != protocol::NATIVE_PASSWORD {
        return Err(Error::Auth(
            format!(
                "server requested unsupported authentication plugin {:?}",
                handshake.auth_plugin_name
            )
            .into_boxed_str(),
        ));
    }

    let password = options.password.as_deref().unwrap_or("");
    let auth_response = protocol::scramble(password, &handshake.auth_plugin_data);

    let mut client_capabilities = Capabilities::BASE;
    if options.found_rows {
        client_capabilities |= Capabilities::FOUND_ROWS;
    }
    if options.multi_statements {
        client_capabilities |= Capabilities::MULTI_STATEMENTS;
    }
    if options.database.is_some() {
        client_capabilities |= Capabilities::CONNECT_WITH_DB;
    }

    let response = HandshakeResponse {
        client_capabilities,
        max_packet_size: protocol::MAX_PAYLOAD_LEN as u32,
        client_collation: handshake.server_default_collation,
        username: &options.username,
        database: options.database.as_deref(),
        auth_plugin_name: protocol::NATIVE_PASSWORD,
        auth_response: &auth_response,
    };

    let mut payload = Vec::new();
    response.write(&mut payload);
    stream.write_packet(&payload)?;

    let reply = stream.read_packet(deadline)?;

    match reply.first() {
        Some(0xFF) => {
            let err = ErrPacket::read(reply)?;
            Err(Error::Auth(err.error_message))
        }

        Some(0x00) => {
            OkPacket::read(reply)?;
            stream.reset_sequence();

            Ok(ServerInfo {
                protocol_version: handshake.protocol_version,
                server_version: handshake.server_version,
                connection_id: handshake.connection_id,
                capability_flags: handshake.server_capabilities & client_capabilities,
                charset: handshake.server_default_collation,
            })
        }

        _ => Err(protocol_err!("expected an OK or ERR packet after the handshake response")),
    }
}
