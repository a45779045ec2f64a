//! Arrays and streams.
//!
//! Operations producing arrays hand them out through [`stream`], one
//! element per forced tail, so they work on infinite inputs as long as the
//! consumer stops pulling.

use bach_diagnostic::{unexpected_drop, unexpected_value, Diagnostic, ErrorCode};
use bach_eval::{elements, stream, Action, ArrValue, Outcome, State, Value};
use bach_typeck::BuiltinFuncer;
use bach_types::{Parameter, Type};

use crate::{array, boolean, num, var};

/// A `take`/`drop` count. Infinities are fine, NaN is not.
fn count(value: &Value) -> Result<f64, Diagnostic> {
    let n = num(value)?;
    if n.is_nan() {
        return Err(unexpected_value("NaN").with_message("count must be a number, not NaN"));
    }
    Ok(n)
}

pub(crate) fn register(out: &mut Vec<BuiltinFuncer>) {
    let arr_a = || Type::arr(var("A"));

    out.push(BuiltinFuncer::value(Type::arr(Type::Any), "len", Vec::new(), Type::Num, |input, _| {
        let mut len = 0.0;
        for item in array(input)?.iter() {
            item?;
            len += 1.0;
        }
        Ok(Value::Num(len))
    }));
    out.push(BuiltinFuncer::value(
        arr_a(),
        "+",
        vec![Parameter::simple(Type::arr(var("B")))],
        Type::arr(Type::union([var("A"), var("B")])),
        |input, args| {
            let mut front = elements(&array(input)?);
            let mut back = elements(&array(&args[0])?);
            streamed(move || match front()? {
                Some(item) => Ok(Some(item)),
                None => back(),
            })
        },
    ));
    out.push(BuiltinFuncer::value(
        Type::Any,
        "range",
        vec![Parameter::simple(Type::Num), Parameter::simple(Type::Num)],
        Type::arr(Type::Num),
        |_, args| {
            let (mut next, end) = (num(&args[0])?, num(&args[1])?);
            streamed(move || {
                if next >= end {
                    return Ok(None);
                }
                let item = next;
                next += 1.0;
                Ok(Some(Value::Num(item)))
            })
        },
    ));
    out.push(BuiltinFuncer::value(var("A"), "repeat", Vec::new(), arr_a(), |input, _| {
        let input = input.clone();
        streamed(move || Ok(Some(input.clone())))
    }));
    out.push(BuiltinFuncer::action(
        arr_a(),
        "each",
        vec![Parameter::with_input(var("A"), var("B"))],
        Type::arr(var("B")),
        |state: &State, args: &[Action]| {
            let scope = state.clone();
            let f = args[0].clone();
            pull(state, move |mut items| {
                Box::new(move || loop {
                    let Some(item) = items()? else {
                        return Ok(None);
                    };
                    match f.call(scope.with_value(item), &[]).force() {
                        Outcome::Value(out) => return Ok(Some(out.value)),
                        Outcome::Drop => {}
                        Outcome::Error(err) => return Err(err),
                    }
                })
            })
        },
    ));
    out.push(BuiltinFuncer::action(
        arr_a(),
        "keep",
        vec![Parameter::with_input(var("A"), Type::Bool)],
        arr_a(),
        |state: &State, args: &[Action]| {
            let scope = state.clone();
            let test = args[0].clone();
            pull(state, move |mut items| {
                Box::new(move || loop {
                    let Some(item) = items()? else {
                        return Ok(None);
                    };
                    match test.call(scope.with_value(item.clone()), &[]).force() {
                        Outcome::Value(out) if boolean(&out.value)? => return Ok(Some(item)),
                        Outcome::Value(_) | Outcome::Drop => {}
                        Outcome::Error(err) => return Err(err),
                    }
                })
            })
        },
    ));
    out.push(BuiltinFuncer::value(
        arr_a(),
        "take",
        vec![Parameter::simple(Type::Num)],
        arr_a(),
        |input, args| {
            let mut left = count(&args[0])?;
            let mut items = elements(&array(input)?);
            streamed(move || {
                if left < 1.0 {
                    return Ok(None);
                }
                left -= 1.0;
                items()
            })
        },
    ));
    out.push(BuiltinFuncer::value(
        arr_a(),
        "drop",
        vec![Parameter::simple(Type::Num)],
        arr_a(),
        |input, args| {
            let mut skip = count(&args[0])?;
            let mut items = elements(&array(input)?);
            streamed(move || {
                while skip >= 1.0 {
                    skip -= 1.0;
                    if items()?.is_none() {
                        return Ok(None);
                    }
                }
                items()
            })
        },
    ));
    out.push(BuiltinFuncer::action(
        arr_a(),
        "fold",
        vec![
            Parameter::simple(var("B")),
            Parameter::with_input(var("B"), var("B")).with_params(vec![Parameter::simple(var("A"))]),
        ],
        var("B"),
        |state: &State, args: &[Action]| match fold(state, &args[0], &args[1]) {
            Ok(acc) => Outcome::Value(state.with_value(acc)),
            Err(err) => Outcome::Error(err),
        },
    ));
    out.push(
        BuiltinFuncer::value(
            Type::arr(Type::Any),
            "get",
            vec![Parameter::simple(Type::Num)],
            Type::Any,
            |input, args| index(&array(input)?, &args[0]),
        )
        .with_output_of(|input| input.element_type().unwrap_or(Type::Void)),
    );
    out.push(
        BuiltinFuncer::value(
            Type::any_obj(),
            "get",
            vec![Parameter::simple(Type::Any)],
            Type::Any,
            |input, args| property(input, &args[0]),
        )
        .with_output_of(|input| input.value_types().unwrap_or(Type::Void)),
    );
}

type Producer = Box<dyn FnMut() -> Result<Option<Value>, Diagnostic>>;

/// The first cell of a streamed array. Only the head is computed here.
fn streamed(
    producer: impl FnMut() -> Result<Option<Value>, Diagnostic> + 'static,
) -> Result<Value, Diagnostic> {
    stream(producer).force_value()
}

/// Stream the input array of `state` through `step`, which turns the
/// element producer into the output producer.
fn pull(state: &State, step: impl FnOnce(Producer) -> Producer) -> Outcome {
    let arr = match array(&state.value) {
        Ok(arr) => arr,
        Err(err) => return Outcome::Error(err),
    };
    let items: Producer = Box::new(elements(&arr));
    stream(step(items)).force()
}

/// Left fold; a step that drops leaves the accumulator as it was.
fn fold(state: &State, init: &Action, step: &Action) -> Result<Value, Diagnostic> {
    let mut acc = init.call(state.clone(), &[]).force_value()?;
    for item in array(&state.value)?.iter() {
        let item = Action::constant(item?);
        match step.call(state.with_value(acc.clone()), &[item]).force() {
            Outcome::Value(out) => acc = out.value,
            Outcome::Drop => {}
            Outcome::Error(err) => return Err(err),
        }
    }
    Ok(acc)
}

fn index(arr: &ArrValue, key: &Value) -> Result<Value, Diagnostic> {
    let i = num(key)?;
    if i >= 0.0 && i.fract() == 0.0 {
        let mut left = i;
        for item in arr.iter() {
            let item = item?;
            if left < 1.0 {
                return Ok(item);
            }
            left -= 1.0;
        }
    }
    let shown = key.repr()?;
    Err(Diagnostic::value_error(ErrorCode::NoSuchIndex)
        .with_message(format!("array has no element {shown}"))
        .with_index(shown))
}

/// Numbers and other non-string keys name the property spelled like their
/// literal.
fn property(input: &Value, key: &Value) -> Result<Value, Diagnostic> {
    let Value::Obj(obj) = input else {
        return Err(crate::mismatch("record", input));
    };
    let key = key.render()?;
    match obj.get(&key) {
        Some(field) => match field.force() {
            Outcome::Value(out) => Ok(out.value),
            Outcome::Drop => Err(unexpected_drop()),
            Outcome::Error(err) => Err(err),
        },
        None => Err(Diagnostic::value_error(ErrorCode::NoSuchProperty)
            .with_message(format!("record has no property {key}"))
            .with_index(key)),
    }
}

#[cfg(test)]
mod tests;
