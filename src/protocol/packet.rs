//! Packet framing: the 4-byte header (3-byte little-endian payload length, 1-byte sequence
//! number) that wraps every message on the wire.
//!
//! See <https://mariadb.com/kb/en/0-packet/>.

use byteorder::LittleEndian;
use std::io::{self, Read, Write};

use crate::io::{Buf, BufMut};

/// The largest payload a single physical packet can carry. A logical message larger than this
/// is split across consecutive packets sharing incrementing sequence numbers, the last one
/// possibly empty.
pub const MAX_PAYLOAD_LEN: usize = 0xFF_FF_FF;

/// A decoded packet: a payload plus the sequence number it carried, mostly so we can echo it
/// back (incremented) on our next write.
pub struct Packet<'a> {
    pub sequence_id: u8,
    pub payload: &'a [u8],
}

/// Reads a single physical packet from `reader` into `buf`, replacing `buf`'s contents.
///
/// Returns the packet's sequence id. Does not handle `>16 MiB` logical message reassembly;
/// callers that need that loop on this themselves (see
/// [`read_packet_buf`][crate::protocol::read_packet_buf]).
pub fn read_packet(reader: &mut impl Read, buf: &mut Vec<u8>) -> io::Result<u8> {
    let mut header = [0_u8; 4];
    reader.read_exact(&mut header)?;

    let mut header_buf: &[u8] = &header;
    let payload_len = header_buf.get_u24::<LittleEndian>()? as usize;
    let sequence_id = header_buf.get_u8()?;

    buf.clear();
    buf.resize(payload_len, 0);
    reader.read_exact(buf)?;

    Ok(sequence_id)
}

/// Reads one logical message, transparently reassembling it if the server split it across
/// multiple `0xFF_FF_FF`-sized physical packets.
///
/// Returns the sequence id of the *last* physical packet read, which is what the next packet
/// we send should continue from.
pub fn read_packet_buf(reader: &mut impl Read, buf: &mut Vec<u8>) -> io::Result<u8> {
    buf.clear();

    let mut chunk = Vec::new();
    let mut sequence_id;

    loop {
        sequence_id = read_packet(reader, &mut chunk)?;
        let full = chunk.len() == MAX_PAYLOAD_LEN;
        buf.extend_from_slice(&chunk);

        if !full {
            break;
        }
    }

    Ok(sequence_id)
}

/// Writes `payload` as one or more physical packets, splitting on [`MAX_PAYLOAD_LEN`]
/// boundaries. `sequence_id` is the id of the first packet; each subsequent chunk (including a
/// trailing zero-length one when `payload.len()` is an exact multiple of [`MAX_PAYLOAD_LEN`])
/// increments it by one.
pub fn write_packet(writer: &mut impl Write, payload: &[u8], mut sequence_id: u8) -> io::Result<u8> {
    let mut chunks = payload.chunks(MAX_PAYLOAD_LEN).peekable();
    let mut wrote_full_chunk = false;

    while let Some(chunk) = chunks.next() {
        wrote_full_chunk = chunk.len() == MAX_PAYLOAD_LEN;

        let mut header = Vec::with_capacity(4);
        header.put_u24::<LittleEndian>(chunk.len() as u32);
        header.put_u8(sequence_id);

        writer.write_all(&header)?;
        writer.write_all(chunk)?;

        sequence_id = sequence_id.wrapping_add(1);
    }

    if payload.is_empty() || wrote_full_chunk {
        let header = [0, 0, 0, sequence_id];
        writer.write_all(&header)?;
        sequence_id = sequence_id.wrapping_add(1);
    }

    Ok(sequence_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_reads_a_single_packet() {
        let wire = [0x03, 0x00, 0x00, 0x00, b'a', b'b', b'c'];
        let mut buf = Vec::new();
        let seq = read_packet(&mut &wire[..], &mut buf).unwrap();

        assert_eq!(seq, 0);
        assert_eq!(buf, b"abc");
    }

    #[test]
    fn it_round_trips_a_small_payload() {
        let mut wire = Vec::new();
        let next_seq = write_packet(&mut wire, b"select 1", 7).unwrap();
        assert_eq!(next_seq, 8);

        let mut buf = Vec::new();
        let seq = read_packet_buf(&mut &wire[..], &mut buf).unwrap();

        assert_eq!(seq, 7);
        assert_eq!(buf, b"select 1");
    }

    #[test]
    fn it_splits_and_reassembles_oversized_payloads() {
        let payload = vec![0x42_u8; MAX_PAYLOAD_LEN + 10];

        let mut wire = Vec::new();
        let next_seq = write_packet(&mut wire, &payload, 0).unwrap();
        assert_eq!(next_seq, 2);

        let mut buf = Vec::new();
        let seq = read_packet_buf(&mut &wire[..], &mut buf).unwrap();

        assert_eq!(seq, 1);
        assert_eq!(buf, payload);
    }

    #[test]
    fn it_terminates_an_exact_multiple_with_a_zero_length_packet() {
        let payload = vec![0x7_u8; MAX_PAYLOAD_LEN];

        let mut wire = Vec::new();
        write_packet(&mut wire, &payload, 0).unwrap();

        // header + payload, then a trailing zero-length header
        assert_eq!(wire.len(), 4 + MAX_PAYLOAD_LEN + 4);
        assert_eq!(&wire[wire.len() - 4..], [0, 0, 0, 1]);
    }
}
