//! Length-encoded integer and string helpers layered on top of [`Buf`]/[`BufMut`].
//!
//! See <https://mariadb.com/kb/en/protocol-data-types/#length-encoded-integers>.

use byteorder::ByteOrder;
use std::io;

use crate::io::{Buf, BufMut};

/// First byte of a length-encoded integer that marks a SQL `NULL` (row context only).
pub const LENENC_NULL: u8 = 0xFB;

/// Decode length-encoded primitives out of a packet payload.
pub trait BufExt<'a> {
    /// Reads a length-encoded integer. Returns `None` if the value is the NULL marker
    /// (`0xFB`); this only makes sense when decoding a row, not a count or id.
    fn get_uint_lenenc<T: ByteOrder>(&mut self) -> io::Result<Option<u64>>;

    /// Reads a length-encoded string. As with [`get_uint_lenenc`][BufExt::get_uint_lenenc],
    /// `None` means the NULL marker was seen in place of a length.
    fn get_str_lenenc<T: ByteOrder>(&mut self) -> io::Result<Option<&'a str>>;

    /// Reads the rest of the buffer as a UTF-8 string.
    fn get_str_eof(&mut self) -> io::Result<&'a str>;
}

impl<'a> BufExt<'a> for &'a [u8] {
    fn get_uint_lenenc<T: ByteOrder>(&mut self) -> io::Result<Option<u64>> {
        Ok(match self.get_u8()? {
            LENENC_NULL => None,
            0xFC => Some(u64::from(self.get_u16::<T>()?)),
            0xFD => Some(u64::from(self.get_u24::<T>()?)),
            0xFE => Some(self.get_u64::<T>()?),
            value => Some(u64::from(value)),
        })
    }

    fn get_str_lenenc<T: ByteOrder>(&mut self) -> io::Result<Option<&'a str>> {
        self.get_uint_lenenc::<T>()?
            .map(move |len| self.get_str(len as usize))
            .transpose()
    }

    fn get_str_eof(&mut self) -> io::Result<&'a str> {
        self.get_str(self.len())
    }
}

/// Encode length-encoded primitives onto a write buffer.
pub trait BufMutExt {
    /// Writes a length-encoded integer, or the NULL marker (`0xFB`) for `None`.
    fn put_uint_lenenc<T: ByteOrder>(&mut self, value: Option<u64>);

    fn put_str_lenenc<T: ByteOrder>(&mut self, val: &str);

    fn put_bytes_lenenc<T: ByteOrder>(&mut self, val: &[u8]);
}

impl BufMutExt for Vec<u8> {
    fn put_uint_lenenc<T: ByteOrder>(&mut self, value: Option<u64>) {
        let Some(value) = value else {
            self.push(LENENC_NULL);
            return;
        };

        if value > 0xFF_FF_FF {
            self.push(0xFE);
            self.put_u64::<T>(value);
        } else if value > u64::from(u16::MAX) {
            self.push(0xFD);
            self.put_u24::<T>(value as u32);
        } else if value > u64::from(u8::MAX) {
            self.push(0xFC);
            self.put_u16::<T>(value as u16);
        } else {
            match value as u8 {
                // a single byte equal to one of the length markers must be re-encoded as a
                // 2-byte length to stay unambiguous on the wire
                0xFB..=0xFF => {
                    self.push(0xFC);
                    self.put_u16::<T>(value as u16);
                }
                byte => self.push(byte),
            }
        }
    }

    fn put_str_lenenc<T: ByteOrder>(&mut self, val: &str) {
        self.put_bytes_lenenc::<T>(val.as_bytes());
    }

    fn put_bytes_lenenc<T: ByteOrder>(&mut self, val: &[u8]) {
        self.put_uint_lenenc::<T>(Some(val.len() as u64));
        self.put_bytes(val);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::LittleEndian;

    #[test]
    fn it_round_trips_lenenc_int_boundaries() {
        let values: &[u64] = &[
            0,
            0xFA,
            0xFB,
            0xFC,
            0xFD,
            0xFE,
            0xFF,
            u16::MAX as u64,
            u16::MAX as u64 + 1,
            0xFF_FF_FF,
            0xFF_FF_FF + 1,
            u64::MAX,
        ];

        for &value in values {
            let mut buf = Vec::new();
            buf.put_uint_lenenc::<LittleEndian>(Some(value));

            let mut slice = &buf[..];
            let decoded = slice.get_uint_lenenc::<LittleEndian>().unwrap();

            assert_eq!(decoded, Some(value), "round trip failed for {value:#x}");
            assert!(slice.is_empty(), "leftover bytes decoding {value:#x}");
        }
    }

    #[test]
    fn it_encodes_null_as_the_lenenc_null_marker() {
        let mut buf = Vec::new();
        buf.put_uint_lenenc::<LittleEndian>(None);
        assert_eq!(buf, vec![LENENC_NULL]);
    }

    #[test]
    fn it_round_trips_lenenc_str() {
        let mut buf = Vec::new();
        buf.put_str_lenenc::<LittleEndian>("hello");

        let mut slice = &buf[..];
        assert_eq!(slice.get_str_lenenc::<LittleEndian>().unwrap(), Some("hello"));
    }
}
