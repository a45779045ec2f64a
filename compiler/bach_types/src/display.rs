//! Human-readable type rendering.

use std::fmt::{self, Write as _};

use crate::Type;

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => f.write_str("Void"),
            Type::Null => f.write_str("Null"),
            Type::Bool => f.write_str("Bool"),
            Type::Num => f.write_str("Num"),
            Type::Str => f.write_str("Str"),
            Type::Any => f.write_str("Any"),
            Type::Arr(e) if e.is_void() => f.write_str("Arr<>"),
            Type::Arr(e) => write!(f, "Arr<{e}...>"),
            Type::Nearr(..) => {
                f.write_str("Arr<")?;
                let mut cur = self;
                let mut first = true;
                loop {
                    if !first {
                        f.write_str(", ")?;
                    }
                    first = false;
                    match cur {
                        Type::Nearr(h, t) => {
                            write!(f, "{h}")?;
                            cur = t;
                            if matches!(&**t, Type::Arr(e) if e.is_void()) {
                                break;
                            }
                        }
                        Type::Arr(e) => {
                            write!(f, "{e}...")?;
                            break;
                        }
                        other => {
                            write!(f, "{other}...")?;
                            break;
                        }
                    }
                }
                f.write_str(">")
            }
            Type::Obj(o) => {
                f.write_str("Obj<")?;
                let mut first = true;
                for (key, ty) in &o.props {
                    if !first {
                        f.write_str(", ")?;
                    }
                    first = false;
                    write_key(f, key)?;
                    write!(f, ": {ty}")?;
                }
                if !o.rest.is_void() {
                    if !first {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", o.rest)?;
                }
                f.write_str(">")
            }
            Type::Union(ds) => {
                for (i, d) in ds.iter().enumerate() {
                    if i > 0 {
                        f.write_char('|')?;
                    }
                    write!(f, "{d}")?;
                }
                Ok(())
            }
            Type::Var(v) if v.bound.is_any() => write!(f, "<{}>", v.name),
            Type::Var(v) => write!(f, "<{} {}>", v.name, v.bound),
        }
    }
}

/// Whether `key` can be written without quotes.
pub fn is_plain_key(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Write a record key, quoting it unless it is a plain identifier.
pub fn write_key(f: &mut impl fmt::Write, key: &str) -> fmt::Result {
    if is_plain_key(key) {
        f.write_str(key)
    } else {
        write_quoted(f, key)
    }
}

/// Write `s` as a double-quoted string literal.
pub fn write_quoted(f: &mut impl fmt::Write, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '{' => f.write_str("{{")?,
            '}' => f.write_str("}}")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}
