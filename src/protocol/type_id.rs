// https://dev.mysql.com/doc/dev/mysql-server/8.0.12/binary__log__types_8h.html
// https://mariadb.com/kb/en/library/resultset/#field-types
//
// Values are carried around as plain text regardless of the column's declared type, so these
// constants only matter for column metadata reported back to callers; the row decoder never
// branches on them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeId(pub u8);

impl TypeId {
    pub const NULL: TypeId = TypeId(6);

    pub const CHAR: TypeId = TypeId(254);
    pub const VAR_CHAR: TypeId = TypeId(253);
    pub const TEXT: TypeId = TypeId(252);

    pub const ENUM: TypeId = TypeId(247);

    pub const TINY_BLOB: TypeId = TypeId(249);
    pub const MEDIUM_BLOB: TypeId = TypeId(250);
    pub const LONG_BLOB: TypeId = TypeId(251);

    pub const TINY_INT: TypeId = TypeId(1);
    pub const SMALL_INT: TypeId = TypeId(2);
    pub const INT: TypeId = TypeId(3);
    pub const BIG_INT: TypeId = TypeId(8);

    pub const FLOAT: TypeId = TypeId(4);
    pub const DOUBLE: TypeId = TypeId(5);
    pub const NEWDECIMAL: TypeId = TypeId(246);

    pub const DATE: TypeId = TypeId(10);
    pub const TIME: TypeId = TypeId(11);
    pub const DATETIME: TypeId = TypeId(12);
    pub const TIMESTAMP: TypeId = TypeId(7);
}

impl Default for TypeId {
    fn default() -> TypeId {
        TypeId::NULL
    }
}
