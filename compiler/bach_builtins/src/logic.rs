//! Boolean connectives. `and` and `or` only evaluate their argument when
//! the input does not already decide the result.

use bach_eval::{Action, Outcome, State, Value};
use bach_typeck::BuiltinFuncer;
use bach_types::{Parameter, Type};

use crate::boolean;

pub(crate) fn register(out: &mut Vec<BuiltinFuncer>) {
    out.push(BuiltinFuncer::value(Type::Bool, "not", Vec::new(), Type::Bool, |input, _| {
        Ok(Value::Bool(!boolean(input)?))
    }));
    out.push(connective("and", false));
    out.push(connective("or", true));
}

/// `for Bool name(Bool) Bool`, returning `decided` without looking at the
/// argument when the input equals it.
fn connective(name: &'static str, decided: bool) -> BuiltinFuncer {
    BuiltinFuncer::action(
        Type::Bool,
        name,
        vec![Parameter::simple(Type::Bool)],
        Type::Bool,
        move |state: &State, args: &[Action]| match boolean(&state.value) {
            Ok(b) if b == decided => Outcome::Value(state.clone()),
            Ok(_) => args[0].call(state.clone(), &[]).force(),
            Err(err) => Outcome::Error(err),
        },
    )
}
