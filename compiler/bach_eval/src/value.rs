//! Run-time values.
//!
//! Arrays are lazy cons lists whose tails are thunks, so an array may be
//! infinite and only the forced prefix exists. Record fields are thunks as
//! well; reading one field never evaluates its siblings.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::rc::Rc;

use bach_diagnostic::Diagnostic;
use bach_types::{write_key, write_quoted, Name, Type};

use crate::{BindingStack, State, Thunk};

#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Num(f64),
    Str(Rc<str>),
    Arr(ArrValue),
    Obj(ObjValue),
}

/// A lazy array: empty, or a head value and a thunk of the rest.
#[derive(Clone, Default)]
pub struct ArrValue(Option<Rc<Cons>>);

struct Cons {
    head: Value,
    tail: Thunk,
}

/// A record: field name to lazily evaluated field.
#[derive(Clone, Default)]
pub struct ObjValue(Rc<BTreeMap<Name, Thunk>>);

impl Value {
    pub fn str(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }

    /// A short name for the kind of value, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Num(_) => "number",
            Value::Str(_) => "string",
            Value::Arr(_) => "array",
            Value::Obj(_) => "record",
        }
    }

    /// Structural equality, forcing as much of both values as needed.
    #[allow(clippy::float_cmp, reason = "language equality is IEEE equality")]
    pub fn equals(&self, other: &Value) -> Result<bool, Diagnostic> {
        match (self, other) {
            (Value::Null, Value::Null) => Ok(true),
            (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
            (Value::Num(a), Value::Num(b)) => Ok(a == b),
            (Value::Str(a), Value::Str(b)) => Ok(a == b),
            (Value::Arr(a), Value::Arr(b)) => {
                let mut left = a.iter();
                let mut right = b.iter();
                loop {
                    match (left.next().transpose()?, right.next().transpose()?) {
                        (None, None) => return Ok(true),
                        (Some(x), Some(y)) => {
                            if !bach_stack::with_stack(|| x.equals(&y))? {
                                return Ok(false);
                            }
                        }
                        _ => return Ok(false),
                    }
                }
            }
            (Value::Obj(a), Value::Obj(b)) => {
                if a.len() != b.len() || !a.keys().eq(b.keys()) {
                    return Ok(false);
                }
                for ((_, x), (_, y)) in a.fields().zip(b.fields()) {
                    let (x, y) = (x.force_value()?, y.force_value()?);
                    if !bach_stack::with_stack(|| x.equals(&y))? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Whether the value belongs to `ty`. Type variables are looked up in
    /// `bindings`.
    pub fn inhabits(&self, ty: &Type, bindings: &BindingStack) -> Result<bool, Diagnostic> {
        match (ty, self) {
            (Type::Any, _)
            | (Type::Null, Value::Null)
            | (Type::Bool, Value::Bool(_))
            | (Type::Num, Value::Num(_))
            | (Type::Str, Value::Str(_)) => Ok(true),
            (Type::Union(ds), _) => {
                for d in ds.iter() {
                    if self.inhabits(d, bindings)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            (Type::Var(v), _) => {
                if !self.inhabits(&v.bound, bindings)? {
                    return Ok(false);
                }
                match bindings.lookup(&v.name) {
                    Some(bound) => self.inhabits(bound, bindings),
                    None => Ok(true),
                }
            }
            (Type::Arr(elem), Value::Arr(arr)) => {
                if elem.is_any() {
                    return Ok(true);
                }
                for item in arr.iter() {
                    if !bach_stack::with_stack(|| item?.inhabits(elem, bindings))? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            (Type::Nearr(head, tail), Value::Arr(arr)) => {
                let Some((first, rest)) = arr.uncons() else {
                    return Ok(false);
                };
                if !bach_stack::with_stack(|| first.inhabits(head, bindings))? {
                    return Ok(false);
                }
                let rest = rest.force_value()?;
                bach_stack::with_stack(|| rest.inhabits(tail, bindings))
            }
            (Type::Obj(obj), Value::Obj(fields)) => {
                for (key, prop) in &obj.props {
                    let Some(field) = fields.get(key) else {
                        return Ok(false);
                    };
                    let field = field.force_value()?;
                    if !bach_stack::with_stack(|| field.inhabits(prop, bindings))? {
                        return Ok(false);
                    }
                }
                for (key, field) in fields.fields() {
                    if obj.props.contains_key(key) {
                        continue;
                    }
                    if obj.rest.is_void() {
                        return Ok(false);
                    }
                    if obj.rest.is_any() {
                        continue;
                    }
                    let field = field.force_value()?;
                    if !bach_stack::with_stack(|| field.inhabits(&obj.rest, bindings))? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// The literal form of the value, forcing everything inside it.
    pub fn repr(&self) -> Result<String, Diagnostic> {
        let mut out = String::new();
        self.write_repr(&mut out)?;
        Ok(out)
    }

    /// Like [`Value::repr`], except that strings are written raw. Used for
    /// template interpolation.
    pub fn render(&self) -> Result<String, Diagnostic> {
        match self {
            Value::Str(s) => Ok(s.to_string()),
            _ => self.repr(),
        }
    }

    fn write_repr(&self, out: &mut String) -> Result<(), Diagnostic> {
        match self {
            Value::Null => out.push_str("null"),
            Value::Bool(b) => {
                let _ = write!(out, "{b}");
            }
            Value::Num(n) => write_num(out, *n),
            Value::Str(s) => {
                let _ = write_quoted(out, s);
            }
            Value::Arr(arr) => {
                out.push('[');
                for (i, item) in arr.iter().enumerate() {
                    let item = item?;
                    if i > 0 {
                        out.push_str(", ");
                    }
                    bach_stack::with_stack(|| item.write_repr(out))?;
                }
                out.push(']');
            }
            Value::Obj(obj) => {
                out.push('{');
                for (i, (key, field)) in obj.fields().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    let _ = write_key(out, key);
                    out.push_str(": ");
                    let field = field.force_value()?;
                    bach_stack::with_stack(|| field.write_repr(out))?;
                }
                out.push('}');
            }
        }
        Ok(())
    }
}

fn write_num(out: &mut String, n: f64) {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        #[expect(clippy::cast_possible_truncation, reason = "integral and within i64 range")]
        let int = n as i64;
        let _ = write!(out, "{int}");
    } else {
        let _ = write!(out, "{n}");
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Num(n) => {
                let mut s = String::new();
                write_num(&mut s, *n);
                f.write_str(&s)
            }
            Value::Str(s) => write_quoted(f, s),
            Value::Arr(_) => f.write_str("[..]"),
            Value::Obj(_) => f.write_str("{..}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

impl ArrValue {
    pub fn empty() -> Self {
        ArrValue(None)
    }

    pub fn cons(head: Value, tail: Thunk) -> Self {
        ArrValue(Some(Rc::new(Cons { head, tail })))
    }

    /// A fully evaluated array.
    pub fn from_values(values: Vec<Value>) -> Self {
        values.into_iter().rev().fold(ArrValue::empty(), |tail, head| {
            ArrValue::cons(head, Thunk::value(State::of(Value::Arr(tail))))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// The head value and the tail thunk, unless the array is empty.
    pub fn uncons(&self) -> Option<(&Value, &Thunk)> {
        self.0.as_deref().map(|cons| (&cons.head, &cons.tail))
    }

    /// Iterate the elements, forcing each tail only when the next element is
    /// requested.
    pub fn iter(&self) -> ArrIter {
        ArrIter {
            cell: self.0.clone(),
            pending: None,
        }
    }

    /// Force the whole array into a vector.
    pub fn to_vec(&self) -> Result<Vec<Value>, Diagnostic> {
        self.iter().collect()
    }
}

impl Drop for ArrValue {
    // Long fully forced arrays are chains of uniquely owned cells; release
    // them one at a time instead of recursively.
    fn drop(&mut self) {
        let mut cell = self.0.take();
        while let Some(rc) = cell {
            let Ok(cons) = Rc::try_unwrap(rc) else {
                break;
            };
            let Cons { head, tail } = cons;
            drop(head);
            cell = tail.into_unique_arr().and_then(|mut arr| arr.0.take());
        }
    }
}

impl fmt::Debug for ArrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[..]")
    }
}

/// Element iterator over an [`ArrValue`]; see [`ArrValue::iter`].
pub struct ArrIter {
    cell: Option<Rc<Cons>>,
    pending: Option<Thunk>,
}

impl Iterator for ArrIter {
    type Item = Result<Value, Diagnostic>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cell.is_none() {
            let tail = self.pending.take()?;
            match tail.force_arr() {
                Ok(arr) => self.cell.clone_from(&arr.0),
                Err(err) => return Some(Err(err)),
            }
        }
        let cell = self.cell.take()?;
        self.pending = Some(cell.tail.clone());
        Some(Ok(cell.head.clone()))
    }
}

impl ObjValue {
    pub fn new(fields: BTreeMap<Name, Thunk>) -> Self {
        ObjValue(Rc::new(fields))
    }

    /// A record of already evaluated fields.
    pub fn from_values<K: Into<Name>>(fields: impl IntoIterator<Item = (K, Value)>) -> Self {
        ObjValue::new(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), Thunk::value(State::of(v))))
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&Thunk> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Field names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &Name> {
        self.0.keys()
    }

    /// Fields in sorted key order.
    pub fn fields(&self) -> impl Iterator<Item = (&Name, &Thunk)> {
        self.0.iter()
    }
}

impl fmt::Debug for ObjValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}

#[cfg(test)]
mod tests;
