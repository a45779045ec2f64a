//! Line and column computation for diagnostic output.

use bach_ir::Span;

/// Compute 1-based line number from a byte offset.
pub fn line_from_offset(source: &str, offset: u32) -> u32 {
    let offset = (offset as usize).min(source.len());
    let newlines = source.as_bytes()[..offset]
        .iter()
        .filter(|&&b| b == b'\n')
        .count();
    u32::try_from(newlines).map_or(u32::MAX, |n| n.saturating_add(1))
}

/// Compute 1-based (line, column) from a byte offset.
///
/// The column counts characters, not bytes, from the start of the line.
pub fn offset_to_line_col(source: &str, offset: u32) -> (u32, u32) {
    let offset = (offset as usize).min(source.len());
    let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    let col = source[line_start..offset].chars().count();
    (
        line_from_offset(source, u32::try_from(offset).unwrap_or(u32::MAX)),
        u32::try_from(col).map_or(u32::MAX, |c| c.saturating_add(1)),
    )
}

/// The full text of the line containing the start of `span`, without its
/// line terminator.
pub fn line_text(source: &str, span: Span) -> &str {
    let offset = (span.start as usize).min(source.len());
    let start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    let end = source[offset..]
        .find('\n')
        .map_or(source.len(), |i| offset + i);
    source[start..end].trim_end_matches('\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_from_offset_multiple_lines() {
        let source = "line1\nline2\nline3";
        assert_eq!(line_from_offset(source, 0), 1);
        assert_eq!(line_from_offset(source, 5), 1);
        assert_eq!(line_from_offset(source, 6), 2);
        assert_eq!(line_from_offset(source, 12), 3);
        assert_eq!(line_from_offset(source, 999), 3);
    }

    #[test]
    fn test_offset_to_line_col() {
        let source = "ab\ncdé f";
        assert_eq!(offset_to_line_col(source, 0), (1, 1));
        assert_eq!(offset_to_line_col(source, 4), (2, 2));
        // 'é' is two bytes but one column
        assert_eq!(offset_to_line_col(source, 8), (2, 5));
    }

    #[test]
    fn test_line_text() {
        let source = "first\nsecond line\nthird";
        assert_eq!(line_text(source, Span::new(8, 9)), "second line");
        assert_eq!(line_text(source, Span::new(0, 1)), "first");
        assert_eq!(line_text(source, Span::new(20, 21)), "third");
    }
}
