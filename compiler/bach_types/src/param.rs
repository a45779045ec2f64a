//! Parameter signatures of higher-order operations.

use std::fmt;

use crate::{Bindings, Name, Type};

/// The signature a function-valued argument must have.
///
/// An argument is itself evaluated against an input of type `input`, may in
/// turn expect `params` from whoever calls it, and produces `output`.
/// A plain value argument is `for Any` with no parameters.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Parameter {
    pub input: Type,
    pub name: Option<Name>,
    pub params: Vec<Parameter>,
    pub output: Type,
}

impl Parameter {
    /// A value parameter: no input requirement, no parameters of its own.
    pub fn simple(output: Type) -> Self {
        Parameter {
            input: Type::Any,
            name: None,
            params: Vec::new(),
            output,
        }
    }

    /// A parameter that receives `input` and produces `output`.
    pub fn with_input(input: Type, output: Type) -> Self {
        Parameter {
            input,
            name: None,
            params: Vec::new(),
            output,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<Name>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: Vec<Parameter>) -> Self {
        self.params = params;
        self
    }

    /// Whether an operation with signature `other` may be passed where
    /// `self` is expected.
    ///
    /// Contravariant in the input type, covariant in the output type and in
    /// the parameters.
    pub fn subsumes(&self, other: &Parameter) -> bool {
        other.input.subsumes(&self.input)
            && self.output.subsumes(&other.output)
            && self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .zip(&other.params)
                .all(|(mine, theirs)| mine.subsumes(theirs))
    }

    #[must_use]
    pub fn instantiate(&self, bindings: &Bindings) -> Parameter {
        Parameter {
            input: self.input.instantiate(bindings),
            name: self.name.clone(),
            params: self
                .params
                .iter()
                .map(|p| p.instantiate(bindings))
                .collect(),
            output: self.output.instantiate(bindings),
        }
    }

    pub(crate) fn collect_vars(&self, out: &mut Vec<Name>) {
        self.input.collect_vars(out);
        for p in &self.params {
            p.collect_vars(out);
        }
        self.output.collect_vars(out);
    }
}

/// Names of all type variables in a signature.
pub fn signature_vars<'a>(
    input: &Type,
    params: impl IntoIterator<Item = &'a Parameter>,
    output: &Type,
) -> Vec<Name> {
    let mut out = Vec::new();
    input.collect_vars(&mut out);
    for p in params {
        p.collect_vars(&mut out);
    }
    output.collect_vars(&mut out);
    out
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.input.is_any() {
            write!(f, "for {} ", self.input)?;
        }
        if let Some(name) = &self.name {
            f.write_str(name)?;
        }
        if !self.params.is_empty() {
            f.write_str("(")?;
            for (i, p) in self.params.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{p}")?;
            }
            f.write_str(")")?;
        }
        if self.name.is_some() || !self.params.is_empty() {
            f.write_str(" ")?;
        }
        write!(f, "{}", self.output)
    }
}
