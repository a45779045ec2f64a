//! Bach IR - source spans and the parsed expression tree.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod span;

pub use ast::{Clause, Def, Expr, ExprKind, Key, Match, Pattern, PatternKind, TemplatePart};
pub use bach_types::Name;
pub use span::Span;
