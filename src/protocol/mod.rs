//! The MySQL 4.1+ text wire protocol: packet framing, the connection handshake, command
//! encoding, and result-set decoding.

mod auth;
mod buf_ext;
mod capabilities;
mod column_count;
mod column_def;
mod com_ping;
mod com_query;
mod com_quit;
mod eof;
mod err;
mod field;
mod handshake;
mod handshake_response;
mod ok;
mod packet;
mod row;
mod status;
mod type_id;

pub use auth::{scramble, NATIVE_PASSWORD};
pub use buf_ext::{BufExt, BufMutExt};
pub use capabilities::Capabilities;
pub use column_count::read_column_count;
pub use column_def::ColumnDefinition;
pub use com_ping::COM_PING;
pub use com_query::{encode as encode_com_query, COM_QUERY};
pub use com_quit::COM_QUIT;
pub use eof::EofPacket;
pub use err::ErrPacket;
pub use field::FieldFlags;
pub use handshake::Handshake;
pub use handshake_response::HandshakeResponse;
pub use ok::OkPacket;
pub use packet::{read_packet, read_packet_buf, write_packet, Packet, MAX_PAYLOAD_LEN};
pub use row::read_row;
pub use status::ServerStatus;
pub use type_id::TypeId;
