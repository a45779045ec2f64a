//! The typechecking driver.
//!
//! One function per node kind, dispatched from [`typecheck`]:
//! - `literal.rs`: null, booleans, numbers, strings, templates, arrays, records
//! - `call.rs`: calls (through `resolve`)
//! - `def.rs`: definitions
//! - `control.rs`: conditionals, pattern matches, assignments
//! - `access.rs`: getters

mod access;
mod call;
mod control;
mod def;
mod literal;

use bach_diagnostic::{params_not_allowed, Diagnostic};
use bach_eval::Action;
use bach_ir::{Expr, ExprKind};
use bach_types::Parameter;

use crate::Shape;

/// A typechecked expression: its output shape and the action computing it.
#[derive(Clone, Debug)]
pub struct Checked {
    pub shape: Shape,
    pub action: Action,
    /// `action`, with an output scope guaranteed to hold exactly the
    /// variables of `shape`. Needed only when the output scope is used,
    /// that is when the expression binds names for the ones after it.
    scoped: Action,
    /// Whether the expression introduces names visible to its right.
    pub binds: bool,
}

impl Checked {
    /// An expression whose output carries its input scope.
    pub(crate) fn keeping(shape: Shape, action: Action) -> Self {
        Checked {
            shape,
            scoped: action.clone(),
            action,
            binds: false,
        }
    }

    /// An expression that may finish in some other scope (a call into a
    /// definition finishes in the definition's scope).
    pub(crate) fn foreign(shape: Shape, action: Action) -> Self {
        Checked {
            shape,
            scoped: action.in_input_scope(),
            action,
            binds: false,
        }
    }

    /// An expression that extends its input scope.
    pub(crate) fn binding(shape: Shape, action: Action) -> Self {
        Checked {
            shape,
            scoped: action.clone(),
            action,
            binds: true,
        }
    }
}

/// Typecheck `expr` against the input `shape`.
///
/// `supplied` lists parameters the expression's caller will pass at run
/// time; only calls (and compositions ending in one) accept them.
#[tracing::instrument(level = "trace", skip_all, fields(span = ?expr.span, input = %shape.ty))]
pub fn typecheck(expr: &Expr, shape: &Shape, supplied: &[Parameter]) -> Result<Checked, Diagnostic> {
    bach_stack::with_stack(|| typecheck_inner(expr, shape, supplied))
}

fn typecheck_inner(expr: &Expr, shape: &Shape, supplied: &[Parameter]) -> Result<Checked, Diagnostic> {
    let span = expr.span;
    match &expr.kind {
        ExprKind::Compose(left, right) => check_compose(left, right, shape, supplied),
        ExprKind::Call { name, args } => call::check_call(name, args, span, shape, supplied),
        _ if !supplied.is_empty() => Err(params_not_allowed(span)),

        ExprKind::Identity => Ok(Checked::keeping(shape.clone(), Action::identity())),
        ExprKind::Null | ExprKind::Bool(_) | ExprKind::Num(_) | ExprKind::Str(_) => {
            Ok(literal::check_scalar(&expr.kind, shape))
        }
        ExprKind::Template(parts) => literal::check_template(parts, shape),
        ExprKind::Array { elems, rest } => literal::check_array(elems, rest.as_deref(), shape),
        ExprKind::Record(fields) => literal::check_record(fields, shape),
        ExprKind::Def(def) => def::check_def(def, shape),
        ExprKind::If {
            branches,
            otherwise,
        } => control::check_if(branches, otherwise, shape),
        ExprKind::Match(m) => control::check_match(m, span, shape),
        ExprKind::Assign(pattern) => control::check_assign(pattern, shape),
        ExprKind::Get(key) => access::check_get(key, span, shape),
    }
}

/// `left right`: supplied parameters go to the right side, the last one
/// to run.
fn check_compose(
    left: &Expr,
    right: &Expr,
    shape: &Shape,
    supplied: &[Parameter],
) -> Result<Checked, Diagnostic> {
    let left = typecheck(left, shape, &[])?;
    let right = typecheck(right, &left.shape, supplied)?;
    let first = if left.binds {
        &left.scoped
    } else {
        &left.action
    };
    Ok(Checked {
        action: first.then(&right.action, left.binds),
        scoped: first.then(&right.scoped, left.binds),
        binds: left.binds || right.binds,
        shape: right.shape,
    })
}
