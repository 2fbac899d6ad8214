use byteorder::LittleEndian;

use crate::error::Error;
use crate::protocol::BufExt;

/// The lenenc integer that opens a result set response, naming how many column-definition
/// packets follow.
pub fn read_column_count(mut buf: &[u8]) -> Result<u64, Error> {
    Ok(buf.get_uint_lenenc::<LittleEndian>()?.unwrap_or(0))
}
