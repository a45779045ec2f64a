//! Arithmetic and ordering.
//!
//! Numbers are IEEE doubles: dividing by zero yields an infinity, not an
//! error.

use bach_diagnostic::Diagnostic;
use bach_eval::Value;
use bach_typeck::BuiltinFuncer;
use bach_types::{Parameter, Type};

use crate::{num, text};

pub(crate) fn register(out: &mut Vec<BuiltinFuncer>) {
    out.push(arith("+", |a, b| a + b));
    out.push(arith("-", |a, b| a - b));
    out.push(arith("*", |a, b| a * b));
    out.push(arith("/", |a, b| a / b));
    out.push(arith("%", |a, b| a % b));

    for (name, holds) in ORDERINGS {
        out.push(ordering(Type::Num, name, move |a, b| {
            let (a, b) = (num(a)?, num(b)?);
            Ok(a.partial_cmp(&b).is_some_and(holds))
        }));
        out.push(ordering(Type::Str, name, move |a, b| {
            Ok(holds(text(a)?.cmp(&text(b)?)))
        }));
    }
}

const ORDERINGS: [(&str, fn(std::cmp::Ordering) -> bool); 4] = [
    ("<", std::cmp::Ordering::is_lt),
    (">", std::cmp::Ordering::is_gt),
    ("<=", std::cmp::Ordering::is_le),
    (">=", std::cmp::Ordering::is_ge),
];

fn arith(name: &'static str, op: fn(f64, f64) -> f64) -> BuiltinFuncer {
    BuiltinFuncer::value(
        Type::Num,
        name,
        vec![Parameter::simple(Type::Num)],
        Type::Num,
        move |input, args| Ok(Value::Num(op(num(input)?, num(&args[0])?))),
    )
}

fn ordering(
    ty: Type,
    name: &'static str,
    holds: impl Fn(&Value, &Value) -> Result<bool, Diagnostic> + 'static,
) -> BuiltinFuncer {
    BuiltinFuncer::value(
        ty.clone(),
        name,
        vec![Parameter::simple(ty)],
        Type::Bool,
        move |input, args| holds(input, &args[0]).map(Value::Bool),
    )
}
