//! Text-protocol result rows: an ordered sequence of nullable length-encoded strings, one per
//! column.
//!
//! See <https://mariadb.com/kb/en/resultset-row/>.

use byteorder::LittleEndian;

use crate::error::Error;
use crate::protocol::BufExt;

/// Reads one row's worth of column values. Values are owned: the row outlives the packet
/// buffer its bytes were copied out of, once handed to [`Results`][crate::Results].
pub fn read_row(mut buf: &[u8], column_count: usize) -> Result<Vec<Option<Box<str>>>, Error> {
    let mut values = Vec::with_capacity(column_count);

    for _ in 0..column_count {
        let value = buf.get_str_lenenc::<LittleEndian>()?;
        values.push(value.map(Into::into));
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_reads_a_row_with_a_null_value() {
        let payload = [0x01, b'1', 0xFB];
        let row = read_row(&payload, 2).unwrap();

        assert_eq!(row, vec![Some("1".into()), None]);
    }

    #[test]
    fn it_reads_an_all_null_row() {
        let payload = [0xFB, 0xFB, 0xFB];
        let row = read_row(&payload, 3).unwrap();

        assert_eq!(row, vec![None, None, None]);
    }
}
