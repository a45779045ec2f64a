//! Definitions.

use std::rc::Rc;

use bach_diagnostic::{function_body_has_wrong_output_type, Diagnostic};
use bach_eval::VarId;
use bach_ir::Def;

use super::{typecheck, Checked};
use crate::funcer::define;
use crate::{DefinitionFuncer, Shape, Signature, VariableFuncer};

/// `for I def name(params) O as body ok`.
///
/// The definition is visible to its own body (recursion) and to everything
/// after it. The value passes through unchanged.
pub(super) fn check_def(def: &Def, shape: &Shape) -> Result<Checked, Diagnostic> {
    let id = VarId::fresh();
    let signature = Signature::new(
        def.input.clone(),
        def.name.clone(),
        def.params.clone(),
        def.output.clone(),
    );
    tracing::debug!(%signature, "definition");
    let funcers = shape
        .funcers
        .push(Rc::new(DefinitionFuncer::new(signature, id)));

    let mut body_funcers = funcers.clone();
    let mut param_ids = Vec::with_capacity(def.params.len());
    for param in &def.params {
        let param_id = VarId::fresh();
        if let Some(name) = &param.name {
            body_funcers =
                body_funcers.push(Rc::new(VariableFuncer::param(param_id, name.clone(), param)));
        }
        param_ids.push(param_id);
    }

    let body = typecheck(&def.body, &Shape::new(def.input.clone(), body_funcers), &[])?;
    if !def.output.subsumes(&body.shape.ty) {
        return Err(function_body_has_wrong_output_type(
            def.body.span,
            &def.name,
            &def.output,
            &body.shape.ty,
        ));
    }

    Ok(Checked::binding(
        Shape::new(shape.ty.clone(), funcers),
        define(id, param_ids, body.action),
    ))
}
