// Code generated by ddlmaker; DO NOT EDIT.

/// A statement argument, or a column value read back from a row.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}
/// A row value could not be converted into its record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    pub column: &'static str,
}
impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot decode column {:?}", self.column)
    }
}
impl std::error::Error for DecodeError {}
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Option<Self>;
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}
impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            value => T::from_value(value).map(Some),
        }
    }
}
impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Int(i64::from(v))
    }
}
impl FromValue for i8 {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int(n) => Self::try_from(n).ok(),
            Value::UInt(n) => Self::try_from(n).ok(),
            _ => None,
        }
    }
}
impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Int(i64::from(v))
    }
}
impl FromValue for i16 {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int(n) => Self::try_from(n).ok(),
            Value::UInt(n) => Self::try_from(n).ok(),
            _ => None,
        }
    }
}
impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}
impl FromValue for i32 {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int(n) => Self::try_from(n).ok(),
            Value::UInt(n) => Self::try_from(n).ok(),
            _ => None,
        }
    }
}
impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(i64::from(v))
    }
}
impl FromValue for i64 {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int(n) => Self::try_from(n).ok(),
            Value::UInt(n) => Self::try_from(n).ok(),
            _ => None,
        }
    }
}
impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::UInt(u64::from(v))
    }
}
impl FromValue for u8 {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int(n) => Self::try_from(n).ok(),
            Value::UInt(n) => Self::try_from(n).ok(),
            _ => None,
        }
    }
}
impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::UInt(u64::from(v))
    }
}
impl FromValue for u16 {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int(n) => Self::try_from(n).ok(),
            Value::UInt(n) => Self::try_from(n).ok(),
            _ => None,
        }
    }
}
impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::UInt(u64::from(v))
    }
}
impl FromValue for u32 {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int(n) => Self::try_from(n).ok(),
            Value::UInt(n) => Self::try_from(n).ok(),
            _ => None,
        }
    }
}
impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt(u64::from(v))
    }
}
impl FromValue for u64 {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int(n) => Self::try_from(n).ok(),
            Value::UInt(n) => Self::try_from(n).ok(),
            _ => None,
        }
    }
}
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Int(i64::from(v))
    }
}
impl FromValue for bool {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int(n) => Some(n != 0),
            Value::UInt(n) => Some(n != 0),
            _ => None,
        }
    }
}
impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}
impl FromValue for f32 {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(f as f32),
            _ => None,
        }
    }
}
impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}
impl FromValue for f64 {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(f),
            _ => None,
        }
    }
}
impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}
impl FromValue for String {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Text(s) => Some(s),
            Value::Bytes(b) => String::from_utf8(b).ok(),
            _ => None,
        }
    }
}
impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}
impl FromValue for Vec<u8> {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bytes(b) => Some(b),
            Value::Text(s) => Some(s.into_bytes()),
            _ => None,
        }
    }
}
/// Runs a statement that returns no rows.
pub trait Execer {
    type Error;
    fn exec(&mut self, query: &str, args: &[Value]) -> Result<(), Self::Error>;
}
/// Runs a statement that returns exactly one row.
pub trait Queryer {
    type Error: From<DecodeError>;
    fn query_row(
        &mut self,
        query: &str,
        args: &[Value],
    ) -> Result<Vec<Value>, Self::Error>;
}
fn scan<T: FromValue, E: From<DecodeError>>(
    row: &mut std::vec::IntoIter<Value>,
    column: &'static str,
) -> Result<T, E> {
    row.next().and_then(T::from_value).ok_or_else(|| E::from(DecodeError { column }))
}
/// A row of the `user` table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub nick: Option<String>,
}
pub fn insert_user<E: Execer>(execer: &mut E, values: &[User]) -> Result<(), E::Error> {
    const QUERY: &str = "INSERT INTO `user` (`name`, `nick`) VALUES (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?)";
    const HEAD_LEN: usize = 41;
    const TUPLE_LEN: usize = 8;
    const MAX_BATCH: usize = 32;
    const FIELD_COUNT: usize = 2;
    let mut args: Vec<Value> = Vec::with_capacity(
        values.len().min(MAX_BATCH) * FIELD_COUNT,
    );
    for chunk in values.chunks(MAX_BATCH) {
        args.clear();
        for v in chunk {
            args.push(Value::from(v.name.clone()));
            args.push(Value::from(v.nick.clone()));
        }
        execer.exec(&QUERY[..HEAD_LEN + chunk.len() * TUPLE_LEN], &args)?;
    }
    Ok(())
}
pub fn select_user<Q: Queryer>(queryer: &mut Q, id: i64) -> Result<User, Q::Error> {
    let mut row = queryer
        .query_row(
            "SELECT `id`, `name`, `nick` FROM `user` WHERE `id` = ?",
            &[Value::from(id)],
        )?
        .into_iter();
    Ok(User {
        id: scan(&mut row, "id")?,
        name: scan(&mut row, "name")?,
        nick: scan(&mut row, "nick")?,
    })
}
pub fn update_user<E: Execer>(execer: &mut E, value: &User) -> Result<(), E::Error> {
    execer
        .exec(
            "UPDATE `user` SET `name` = ?, `nick` = ? WHERE `id` = ?",
            &[
                Value::from(value.name.clone()),
                Value::from(value.nick.clone()),
                Value::from(value.id.clone()),
            ],
        )
}
/// A row of the `tag` table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tag {
    pub id: u32,
}
pub fn insert_tag<E: Execer>(execer: &mut E, values: &[Tag]) -> Result<(), E::Error> {
    const QUERY: &str = "INSERT INTO `tag` (`id`) VALUES (?), (?), (?), (?), (?), (?), (?), (?), (?), (?), (?), (?), (?), (?), (?), (?), (?), (?), (?), (?), (?), (?), (?), (?), (?), (?), (?), (?), (?), (?), (?), (?)";
    const HEAD_LEN: usize = 30;
    const TUPLE_LEN: usize = 5;
    const MAX_BATCH: usize = 32;
    const FIELD_COUNT: usize = 1;
    let mut args: Vec<Value> = Vec::with_capacity(
        values.len().min(MAX_BATCH) * FIELD_COUNT,
    );
    for chunk in values.chunks(MAX_BATCH) {
        args.clear();
        for v in chunk {
            args.push(Value::from(v.id.clone()));
        }
        execer.exec(&QUERY[..HEAD_LEN + chunk.len() * TUPLE_LEN], &args)?;
    }
    Ok(())
}
pub fn select_tag<Q: Queryer>(queryer: &mut Q, id: u32) -> Result<Tag, Q::Error> {
    let mut row = queryer
        .query_row("SELECT `id` FROM `tag` WHERE `id` = ?", &[Value::from(id)])?
        .into_iter();
    Ok(Tag { id: scan(&mut row, "id")? })
}
pub fn update_tag<E: Execer>(_execer: &mut E, _value: &Tag) -> Result<(), E::Error> {
    Ok(())
}
/// A row of the `pair` table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pair {
    pub a: i32,
    pub b: i32,
    pub v: String,
}
pub fn insert_pair<E: Execer>(execer: &mut E, values: &[Pair]) -> Result<(), E::Error> {
    const QUERY: &str = "INSERT INTO `pair` (`a`, `b`, `v`) VALUES (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?), (?, ?, ?)";
    const HEAD_LEN: usize = 40;
    const TUPLE_LEN: usize = 11;
    const MAX_BATCH: usize = 32;
    const FIELD_COUNT: usize = 3;
    let mut args: Vec<Value> = Vec::with_capacity(
        values.len().min(MAX_BATCH) * FIELD_COUNT,
    );
    for chunk in values.chunks(MAX_BATCH) {
        args.clear();
        for v in chunk {
            args.push(Value::from(v.a.clone()));
            args.push(Value::from(v.b.clone()));
            args.push(Value::from(v.v.clone()));
        }
        execer.exec(&QUERY[..HEAD_LEN + chunk.len() * TUPLE_LEN], &args)?;
    }
    Ok(())
}
pub fn select_pair<Q: Queryer>(
    queryer: &mut Q,
    b: i32,
    a: i32,
) -> Result<Pair, Q::Error> {
    let mut row = queryer
        .query_row(
            "SELECT `a`, `b`, `v` FROM `pair` WHERE `b` = ? AND `a` = ?",
            &[Value::from(b), Value::from(a)],
        )?
        .into_iter();
    Ok(Pair {
        a: scan(&mut row, "a")?,
        b: scan(&mut row, "b")?,
        v: scan(&mut row, "v")?,
    })
}
pub fn update_pair<E: Execer>(execer: &mut E, value: &Pair) -> Result<(), E::Error> {
    execer
        .exec(
            "UPDATE `pair` SET `v` = ? WHERE `b` = ? AND `a` = ?",
            &[
                Value::from(value.v.clone()),
                Value::from(value.b.clone()),
                Value::from(value.a.clone()),
            ],
        )
}
