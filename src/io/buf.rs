use byteorder::ByteOrder;
use memchr::memchr;
use std::{io, str};

/// Read primitive MySQL wire types off the front of a byte slice, advancing past what was read.
///
/// Every method panics on a short buffer rather than returning an error: callers are expected
/// to have already validated that a full packet is available (see
/// [`read_packet`][crate::protocol::read_packet]) before decoding its payload.
pub trait Buf<'a> {
    fn advance(&mut self, cnt: usize);

    fn get_u8(&mut self) -> io::Result<u8>;

    fn get_u16<T: ByteOrder>(&mut self) -> io::Result<u16>;

    fn get_u24<T: ByteOrder>(&mut self) -> io::Result<u32>;

    fn get_u32<T: ByteOrder>(&mut self) -> io::Result<u32>;

    /// A 6-byte little-endian unsigned integer, as used for a handful of status fields in the
    /// protocol.
    fn get_u48<T: ByteOrder>(&mut self) -> io::Result<u64>;

    fn get_u64<T: ByteOrder>(&mut self) -> io::Result<u64>;

    fn get_str(&mut self, len: usize) -> io::Result<&'a str>;

    fn get_str_nul(&mut self) -> io::Result<&'a str>;

    fn get_bytes(&mut self, len: usize) -> io::Result<&'a [u8]>;
}

impl<'a> Buf<'a> for &'a [u8] {
    fn advance(&mut self, cnt: usize) {
        *self = &self[cnt..];
    }

    fn get_u8(&mut self) -> io::Result<u8> {
        let val = self[0];
        self.advance(1);

        Ok(val)
    }

    fn get_u16<T: ByteOrder>(&mut self) -> io::Result<u16> {
        let val = T::read_u16(*self);
        self.advance(2);

        Ok(val)
    }

    fn get_u24<T: ByteOrder>(&mut self) -> io::Result<u32> {
        let val = T::read_u24(*self);
        self.advance(3);

        Ok(val)
    }

    fn get_u32<T: ByteOrder>(&mut self) -> io::Result<u32> {
        let val = T::read_u32(*self);
        self.advance(4);

        Ok(val)
    }

    fn get_u48<T: ByteOrder>(&mut self) -> io::Result<u64> {
        let val = T::read_uint(*self, 6);
        self.advance(6);

        Ok(val)
    }

    fn get_u64<T: ByteOrder>(&mut self) -> io::Result<u64> {
        let val = T::read_u64(*self);
        self.advance(8);

        Ok(val)
    }

    fn get_str(&mut self, len: usize) -> io::Result<&'a str> {
        str::from_utf8(self.get_bytes(len)?)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }

    fn get_str_nul(&mut self) -> io::Result<&'a str> {
        let len = memchr(b'\0', *self).ok_or(io::ErrorKind::InvalidData)?;
        let s = &self.get_str(len + 1)?[..len];

        Ok(s)
    }

    fn get_bytes(&mut self, len: usize) -> io::Result<&'a [u8]> {
        let buf = &self[..len];
        self.advance(len);

        Ok(buf)
    }
}
