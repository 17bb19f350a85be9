// crates/text_patch/src/braced_block.rs

use crate::error::PatchError;

/// Removes every brace-delimited block that starts on a line containing
/// `start_marker`.
///
/// The scan is line based: once a line contains the marker, lines are
/// dropped while a running count of `{` minus `}` is accumulated, and the
/// line on which the count returns to zero is dropped as well. A marker line
/// that nets to zero on its own drops just that line.
///
/// Brace characters are counted raw. Braces inside string literals or
/// comments will throw the count off.
///
/// Lines are split on `'\n'` and rejoined the same way, so a trailing newline
/// survives the edit.
pub fn remove_braced_block(text: &str, start_marker: &str) -> Result<String, PatchError> {
    let lines: Vec<&str> = text.split('\n').collect();
    let kept = remove_braced_block_lines(&lines, start_marker)?;
    Ok(kept.join("\n"))
}

/// Line-level form of [`remove_braced_block`].
pub fn remove_braced_block_lines<'a>(
    lines: &[&'a str],
    start_marker: &str,
) -> Result<Vec<&'a str>, PatchError> {
    if start_marker.is_empty() {
        return Err(PatchError::EmptyMarker { which: "start" });
    }

    let mut kept = Vec::with_capacity(lines.len());
    let mut keeping = true;
    let mut depth: isize = 0;
    let mut block_start = 0;

    for (idx, line) in lines.iter().enumerate() {
        if line.contains(start_marker) {
            if keeping {
                block_start = idx + 1;
            }
            keeping = false;
        }
        if keeping {
            kept.push(*line);
            continue;
        }
        depth += net_braces(line);
        if depth == 0 {
            keeping = true;
        }
    }

    if !keeping {
        return Err(PatchError::MalformedBlock {
            marker: start_marker.to_string(),
            start_line: block_start,
            depth,
            origin: None,
        });
    }

    Ok(kept)
}

fn net_braces(line: &str) -> isize {
    line.chars().fold(0, |acc, c| match c {
        '{' => acc + 1,
        '}' => acc - 1,
        _ => acc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_function_block() {
        let lines = ["func f() {", "  doStuff()", "}", "func g() {}"];
        let kept = remove_braced_block_lines(&lines, "func f").unwrap();
        assert_eq!(kept, vec!["func g() {}"]);
    }

    #[test]
    fn test_text_form_preserves_trailing_newline() {
        let text = "import UIKit\n\noverride func touchesBegan() {\n    super.touchesBegan()\n}\n\nfunc other() {}\n";
        let result = remove_braced_block(text, "override func touchesBegan").unwrap();
        assert_eq!(result, "import UIKit\n\n\nfunc other() {}\n");
    }

    #[test]
    fn test_no_marker_returns_input() {
        let text = "a {\n}\n";
        assert_eq!(remove_braced_block(text, "missing").unwrap(), text);
    }

    #[test]
    fn test_nested_braces_counted() {
        let lines = [
            "func f() {",
            "  if x {",
            "    y()",
            "  }",
            "}",
            "after",
        ];
        let kept = remove_braced_block_lines(&lines, "func f").unwrap();
        assert_eq!(kept, vec!["after"]);
    }

    #[test]
    fn test_balanced_marker_line_drops_single_line() {
        // The opening line nets to zero, so only that line goes and the rest stays.
        let lines = ["oneLiner() {}", "  body()", "tail"];
        let kept = remove_braced_block_lines(&lines, "oneLiner").unwrap();
        assert_eq!(kept, vec!["  body()", "tail"]);
    }

    #[test]
    fn test_each_later_marker_starts_new_block() {
        let lines = ["fn a() {", "}", "keep", "fn a() {", "}", "end"];
        let kept = remove_braced_block_lines(&lines, "fn a").unwrap();
        assert_eq!(kept, vec!["keep", "end"]);
    }

    #[test]
    fn test_unterminated_block_is_malformed() {
        let lines = ["keep", "func f() {", "  body()"];
        let err = remove_braced_block_lines(&lines, "func f").unwrap_err();
        assert_eq!(
            err,
            PatchError::MalformedBlock {
                marker: "func f".to_string(),
                start_line: 2,
                depth: 1,
                origin: None,
            }
        );
    }

    #[test]
    fn test_braces_in_strings_are_counted() {
        // Not syntax aware: the "{" inside the literal keeps the block open.
        let lines = ["func f() {", "  print(\"{\")", "}", "}", "after"];
        let kept = remove_braced_block_lines(&lines, "func f").unwrap();
        assert_eq!(kept, vec!["after"]);
    }

    #[test]
    fn test_empty_marker_rejected() {
        assert_eq!(
            remove_braced_block("x", ""),
            Err(PatchError::EmptyMarker { which: "start" })
        );
    }
}
