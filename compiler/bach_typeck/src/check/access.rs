//! Getters: `@0`, `@name`.

use bach_diagnostic::{bad_index, no_such_index, no_such_property, Diagnostic, ErrorCode};
use bach_eval::{Action, Thunk, Value};
use bach_ir::{Key, Span};

use super::Checked;
use crate::Shape;

/// Arrays are indexed by position; records by key, where a numeric key
/// names the property spelled that way.
pub(super) fn check_get(key: &Key, span: Span, shape: &Shape) -> Result<Checked, Diagnostic> {
    let ty = &shape.ty;
    let output = match key {
        Key::Index(i) if ty.is_array() => ty
            .index_type(*i)
            .ok_or_else(|| no_such_index(span, ty, *i))?,
        Key::Index(i) if ty.is_record() => {
            let key = i.to_string();
            ty.prop_type(&key)
                .ok_or_else(|| no_such_property(span, ty, &key))?
        }
        Key::Prop(name) if ty.is_record() => ty
            .prop_type(name)
            .ok_or_else(|| no_such_property(span, ty, name))?,
        _ => return Err(bad_index(span, ty)),
    };

    let key = key.clone();
    let action = Action::new(move |state, _| match get(&state.value, &key) {
        Ok(value) => Thunk::value(state.with_value(value)),
        Err(err) => Thunk::error(err.with_span(span)),
    });
    Ok(Checked::keeping(shape.with_type(output), action))
}

fn get(value: &Value, key: &Key) -> Result<Value, Diagnostic> {
    match (value, key) {
        (Value::Arr(arr), Key::Index(i)) => match arr.iter().nth(*i) {
            Some(item) => item,
            None => Err(Diagnostic::value_error(ErrorCode::NoSuchIndex)
                .with_message(format!("array has no element {i}"))
                .with_index(i.to_string())),
        },
        (Value::Obj(obj), key) => {
            let name = match key {
                Key::Prop(name) => name.to_string(),
                Key::Index(i) => i.to_string(),
            };
            match obj.get(&name) {
                Some(field) => field.force_value(),
                None => Err(Diagnostic::value_error(ErrorCode::NoSuchProperty)
                    .with_message(format!("record has no property {key}"))
                    .with_index(name)),
            }
        }
        _ => Err(Diagnostic::value_error(ErrorCode::BadIndex)
            .with_message(format!("cannot get {key} of a {}", value.kind()))
            .with_got_value(value.kind())),
    }
}
