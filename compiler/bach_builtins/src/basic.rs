//! Operations on any value.

use bach_diagnostic::rejected;
use bach_eval::{Outcome, Value};
use bach_typeck::BuiltinFuncer;
use bach_types::{Parameter, Type};

use crate::var;

pub(crate) fn register(out: &mut Vec<BuiltinFuncer>) {
    out.push(BuiltinFuncer::value(var("A"), "id", Vec::new(), var("A"), |input, _| {
        Ok(input.clone())
    }));
    out.push(BuiltinFuncer::action(Type::Any, "drop", Vec::new(), Type::Void, |_, _| {
        Outcome::Drop
    }));
    out.push(BuiltinFuncer::value(Type::Any, "reject", Vec::new(), Type::Void, |input, _| {
        Err(rejected(input.repr()?))
    }));
    out.push(BuiltinFuncer::value(Type::Any, "repr", Vec::new(), Type::Str, |input, _| {
        Ok(Value::str(&input.repr()?))
    }));
    out.push(BuiltinFuncer::value(
        Type::Any,
        "==",
        vec![Parameter::simple(Type::Any)],
        Type::Bool,
        |input, args| input.equals(&args[0]).map(Value::Bool),
    ));
    out.push(BuiltinFuncer::value(
        Type::Any,
        "!=",
        vec![Parameter::simple(Type::Any)],
        Type::Bool,
        |input, args| Ok(Value::Bool(!input.equals(&args[0])?)),
    ));
}
