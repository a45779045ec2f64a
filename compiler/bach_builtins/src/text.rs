//! String operations.

use bach_eval::Value;
use bach_typeck::BuiltinFuncer;
use bach_types::{Parameter, Type};

use crate::{array, text};

pub(crate) fn register(out: &mut Vec<BuiltinFuncer>) {
    out.push(BuiltinFuncer::value(
        Type::Str,
        "+",
        vec![Parameter::simple(Type::Str)],
        Type::Str,
        |input, args| Ok(Value::str(&format!("{}{}", text(input)?, text(&args[0])?))),
    ));
    out.push(BuiltinFuncer::value(Type::Str, "len", Vec::new(), Type::Num, |input, _| {
        #[expect(clippy::cast_precision_loss, reason = "string lengths fit in f64")]
        let len = text(input)?.chars().count() as f64;
        Ok(Value::Num(len))
    }));
    out.push(BuiltinFuncer::value(
        Type::arr(Type::Str),
        "join",
        vec![Parameter::simple(Type::Str)],
        Type::Str,
        |input, args| {
            let sep = text(&args[0])?;
            let mut out = String::new();
            for (i, item) in array(input)?.iter().enumerate() {
                if i > 0 {
                    out.push_str(&sep);
                }
                out.push_str(&text(&item?)?);
            }
            Ok(Value::str(&out))
        },
    ));
}
