//! Little-endian primitive readers/writers shared by the protocol codec.

mod buf;
mod buf_mut;

pub use self::{buf::Buf, buf_mut::BufMut};
