//! Column-definition packets, one per column in a text-protocol result set.
//!
//! See <https://mariadb.com/kb/en/resultset/#column-definition-packet>.

use byteorder::LittleEndian;

use crate::error::Error;
use crate::io::Buf;
use crate::protocol::{BufExt, FieldFlags, TypeId};

#[derive(Debug, Clone)]
pub struct ColumnDefinition {
    pub schema: Box<str>,
    /// Display name of the table, which may be an alias.
    pub table: Box<str>,
    /// Physical name of the table the column belongs to.
    pub org_table: Box<str>,
    /// Display name of the column, which may be an alias (`SELECT x AS y`).
    pub name: Box<str>,
    /// Physical name of the column.
    pub org_name: Box<str>,
    pub character_set: u16,
    pub column_length: u32,
    pub type_id: TypeId,
    pub flags: FieldFlags,
    pub decimals: u8,
}

impl ColumnDefinition {
    pub fn read(mut buf: &[u8]) -> Result<Self, Error> {
        let catalog = buf.get_str_lenenc::<LittleEndian>()?;

        if catalog != Some("def") {
            return Err(protocol_err!(
                "expected column definition catalog \"def\", received {catalog:?}"
            ));
        }

        let schema = buf.get_str_lenenc::<LittleEndian>()?.unwrap_or("").into();
        let table = buf.get_str_lenenc::<LittleEndian>()?.unwrap_or("").into();
        let org_table = buf.get_str_lenenc::<LittleEndian>()?.unwrap_or("").into();
        let name = buf.get_str_lenenc::<LittleEndian>()?.unwrap_or("").into();
        let org_name = buf.get_str_lenenc::<LittleEndian>()?.unwrap_or("").into();

        let len_fixed_fields = buf.get_uint_lenenc::<LittleEndian>()?.unwrap_or(0);
        if len_fixed_fields != 0x0c {
            return Err(protocol_err!(
                "expected column definition fixed-field length 0x0c, received {len_fixed_fields:#x}"
            ));
        }

        let character_set = buf.get_u16::<LittleEndian>()?;
        let column_length = buf.get_u32::<LittleEndian>()?;
        let type_id = TypeId(buf.get_u8()?);
        let flags = FieldFlags::from_bits_truncate(buf.get_u16::<LittleEndian>()?);
        let decimals = buf.get_u8()?;

        Ok(Self {
            schema,
            table,
            org_table,
            name,
            org_name,
            character_set,
            column_length,
            type_id,
            flags,
            decimals,
        })
    }
}
