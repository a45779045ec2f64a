//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.

use std::io::{self, IsTerminal, Write};

use super::DiagnosticEmitter;
use crate::span_utils::{line_text, offset_to_line_col};
use crate::Diagnostic;

/// Terminal emitter with optional color support.
///
/// With the program text attached, diagnostics that carry a span show the
/// offending line with a caret underline.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    source: Option<(String, String)>,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn new(writer: W, colors: bool) -> Self {
        TerminalEmitter {
            writer,
            colors,
            source: None,
        }
    }

    /// Create a terminal emitter for stderr with auto-detected color support.
    pub fn stderr() -> TerminalEmitter<io::Stderr> {
        TerminalEmitter::new(io::stderr(), io::stderr().is_terminal())
    }

    /// Attach the program text (and a display name for it) so spans can be
    /// resolved to lines.
    #[must_use]
    pub fn with_source(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.source = Some((name.into(), text.into()));
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn paint(&mut self, style: &str, text: &str) {
        if self.colors {
            let _ = write!(self.writer, "\x1b[{style}m{text}\x1b[0m");
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: kind [CODE] Name: message
        self.paint("1;31", &diagnostic.kind.to_string());
        self.paint("1", &format!(" [{}] {}", diagnostic.code, diagnostic.code.name()));
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        if let (Some(span), Some((name, text))) = (diagnostic.span, self.source.clone()) {
            let (line, col) = offset_to_line_col(&text, span.start);
            let gutter = " ".repeat(line.to_string().len());
            let _ = writeln!(self.writer, "{gutter}--> {name}:{line}:{col}");
            let _ = writeln!(self.writer, "{gutter} |");
            let snippet = line_text(&text, span);
            let _ = writeln!(self.writer, "{line} | {snippet}");

            let indent = " ".repeat(col.saturating_sub(1) as usize);
            let line_chars = snippet.chars().count();
            let available = line_chars.saturating_sub(col.saturating_sub(1) as usize);
            let width = (text
                .get(span.to_range())
                .map_or(1, |s| s.chars().count()))
            .clamp(1, available.max(1));
            let _ = write!(self.writer, "{gutter} | {indent}");
            self.paint("1;31", &"^".repeat(width));
            let _ = writeln!(self.writer);
        } else if let Some(span) = diagnostic.span {
            let _ = writeln!(self.writer, "  --> {span:?}");
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            self.paint("1", "note");
            let _ = writeln!(self.writer, ": {note}");
        }
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{condition_must_be_bool, unexpected_value};
    use bach_ir::Span;
    use bach_types::Type;
    use pretty_assertions::assert_eq;

    fn render(diag: &Diagnostic, source: Option<&str>) -> String {
        let mut emitter = TerminalEmitter::new(Vec::new(), false);
        if let Some(source) = source {
            emitter = emitter.with_source("<test>", source);
        }
        emitter.emit(diag);
        emitter.flush();
        String::from_utf8_lossy(&emitter.into_inner()).into_owned()
    }

    #[test]
    fn test_caret_under_span() {
        let source = "if 1 then 2 else 3 ok";
        let diag = condition_must_be_bool(Span::new(3, 4), &Type::Num);
        assert_eq!(
            render(&diag, Some(source)),
            "type error [E2005] ConditionMustBeBool: condition produces `Num`, expected `Bool`\n\
             \x20--> <test>:1:4\n\
             \x20 |\n\
             1 | if 1 then 2 else 3 ok\n\
             \x20 |    ^\n"
        );
    }

    #[test]
    fn test_caret_on_later_line() {
        let source = "1\n+\"a\"";
        let diag = condition_must_be_bool(Span::new(2, 6), &Type::Num);
        let out = render(&diag, Some(source));
        assert!(out.contains("--> <test>:2:1"));
        assert!(out.contains("2 | +\"a\""));
        assert!(out.contains("  | ^^^^"));
    }

    #[test]
    fn test_without_span() {
        let diag = unexpected_value("42").with_note("no clause matched");
        assert_eq!(
            render(&diag, Some("1")),
            "value error [E3001] UnexpectedValue: unexpected value 42\n  = note: no clause matched\n"
        );
    }

    #[test]
    fn test_without_source() {
        let diag = condition_must_be_bool(Span::new(3, 4), &Type::Num);
        assert!(render(&diag, None).ends_with("  --> 3..4\n"));
    }

    #[test]
    fn test_colors() {
        let mut emitter = TerminalEmitter::new(Vec::new(), true);
        emitter.emit(&unexpected_value("1"));
        let out = String::from_utf8_lossy(&emitter.into_inner()).into_owned();
        assert!(out.starts_with("\x1b[1;31mvalue error\x1b[0m"));
    }
}
