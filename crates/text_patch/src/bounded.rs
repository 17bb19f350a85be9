// crates/text_patch/src/bounded.rs

use crate::error::PatchError;

/// Number of characters after the insertion point quoted in a `MarkerNotFound` error.
const CONTEXT_CHARS: usize = 40;

/// A pair of literal delimiters framing an editable region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerPair {
    pub start: String,
    pub end: String,
}

impl MarkerPair {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// See [`replace_all_bounded`].
    pub fn replace_all(&self, text: &str, replacement: &str) -> Result<String, PatchError> {
        replace_all_bounded(text, &self.start, &self.end, replacement)
    }

    /// See [`find_bounded`].
    pub fn find<'a>(&self, text: &'a str) -> Option<&'a str> {
        find_bounded(text, &self.start, &self.end)
    }
}

/// Replaces the text strictly between every `start` marker and the next `end`
/// marker with `replacement`, leaving both markers in place.
///
/// Occurrences are visited left to right in one forward pass. After each
/// splice the search resumes right after the inserted replacement, so text
/// produced by a replacement is never matched again and the loop always
/// terminates. `replacement` is inserted verbatim: if it contains `end`, a
/// later search for the same pair will stop early.
///
/// Returns the input unchanged when `start` does not occur. Returns
/// [`PatchError::MarkerNotFound`] when a `start` has no `end` after it.
///
/// # Examples
///
/// ```
/// use text_patch::replace_all_bounded;
///
/// let out = replace_all_bounded("version = '1.0'\nother='x'", "version = '", "'", "2.0").unwrap();
/// assert_eq!(out, "version = '2.0'\nother='x'");
/// ```
pub fn replace_all_bounded(
    text: &str,
    start: &str,
    end: &str,
    replacement: &str,
) -> Result<String, PatchError> {
    replace_bounded_with(text, start, end, |_| Some(replacement.to_string()))
}

/// Like [`replace_all_bounded`], but asks `rewrite` for each region's new
/// contents. `rewrite` receives the region's current contents; returning
/// `None` leaves that region as it is.
///
/// Regions are visited with the same forward cursor as
/// [`replace_all_bounded`], so each occurrence is seen exactly once.
pub fn replace_bounded_with<F>(text: &str, start: &str, end: &str, mut rewrite: F) -> Result<String, PatchError>
where
    F: FnMut(&str) -> Option<String>,
{
    check_markers(start, end)?;

    let mut result = text.to_string();
    let mut cursor = 0;

    while let Some(found) = result[cursor..].find(start) {
        let insertion = cursor + found + start.len();
        let end_idx = match result[insertion..].find(end) {
            Some(rel) => insertion + rel,
            None => {
                return Err(PatchError::MarkerNotFound {
                    marker: end.to_string(),
                    offset: insertion,
                    context: excerpt(&result[insertion..]),
                    origin: None,
                })
            }
        };

        cursor = match rewrite(&result[insertion..end_idx]) {
            Some(replacement) => {
                result.replace_range(insertion..end_idx, &replacement);
                insertion + replacement.len()
            }
            None => end_idx,
        };
    }

    Ok(result)
}

/// Rewrites every value that follows `start` up to the end of its line.
///
/// The line ends at the next `\n` or at the end of the text; a `\r` before
/// the `\n` stays outside the value, so CRLF files keep their line endings.
/// `rewrite` works as in [`replace_bounded_with`].
pub fn replace_line_values_with<F>(text: &str, start: &str, mut rewrite: F) -> Result<String, PatchError>
where
    F: FnMut(&str) -> Option<String>,
{
    if start.is_empty() {
        return Err(PatchError::EmptyMarker { which: "start" });
    }

    let mut result = text.to_string();
    let mut cursor = 0;

    while let Some(found) = result[cursor..].find(start) {
        let insertion = cursor + found + start.len();
        let end_idx = line_value_end(&result, insertion);

        cursor = match rewrite(&result[insertion..end_idx]) {
            Some(replacement) => {
                result.replace_range(insertion..end_idx, &replacement);
                insertion + replacement.len()
            }
            None => end_idx,
        };
    }

    Ok(result)
}

/// Returns the value following the first `start` up to the end of its line,
/// without a trailing `\r`.
pub fn find_line_value<'a>(text: &'a str, start: &str) -> Option<&'a str> {
    if start.is_empty() {
        return None;
    }
    let insertion = text.find(start)? + start.len();
    Some(&text[insertion..line_value_end(text, insertion)])
}

fn line_value_end(text: &str, from: usize) -> usize {
    let line_end = text[from..].find('\n').map(|rel| from + rel).unwrap_or(text.len());
    if text[from..line_end].ends_with('\r') {
        line_end - 1
    } else {
        line_end
    }
}

/// Returns the current contents of the first region bounded by `start` and
/// `end`, or `None` when either marker is missing.
pub fn find_bounded<'a>(text: &'a str, start: &str, end: &str) -> Option<&'a str> {
    if start.is_empty() || end.is_empty() {
        return None;
    }
    let insertion = text.find(start)? + start.len();
    let len = text[insertion..].find(end)?;
    Some(&text[insertion..insertion + len])
}

fn check_markers(start: &str, end: &str) -> Result<(), PatchError> {
    if start.is_empty() {
        return Err(PatchError::EmptyMarker { which: "start" });
    }
    if end.is_empty() {
        return Err(PatchError::EmptyMarker { which: "end" });
    }
    Ok(())
}

fn excerpt(rest: &str) -> String {
    rest.chars().take(CONTEXT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_span_replaced() {
        let text = "version = '1.0'\nother='x'";
        let result = replace_all_bounded(text, "version = '", "'", "2.0").unwrap();
        assert_eq!(result, "version = '2.0'\nother='x'");
    }

    #[test]
    fn test_no_start_marker_returns_input() {
        let text = "nothing to see here";
        let result = replace_all_bounded(text, "version = '", "'", "2.0").unwrap();
        assert_eq!(result, text);
    }

    #[test]
    fn test_every_disjoint_pair_replaced_left_to_right() {
        let text = "a=[1] b=[22] c=[333]";
        let result = replace_all_bounded(text, "=[", "]", "x").unwrap();
        assert_eq!(result, "a=[x] b=[x] c=[x]");
    }

    #[test]
    fn test_empty_replacement_clears_region() {
        let result = replace_all_bounded("<<abc>> <<d>>", "<<", ">>", "").unwrap();
        assert_eq!(result, "<<>> <<>>");
    }

    #[test]
    fn test_end_marker_searched_after_start() {
        // The first quote in the text precedes the start marker and must be ignored.
        let text = "name='app' version='1.0'";
        let result = replace_all_bounded(text, "version='", "'", "2.0").unwrap();
        assert_eq!(result, "name='app' version='2.0'");
    }

    #[test]
    fn test_missing_end_is_error() {
        let err = replace_all_bounded("start_only", "start_only", "NEVER", "x").unwrap_err();
        match err {
            PatchError::MarkerNotFound { marker, offset, context, origin } => {
                assert_eq!(marker, "NEVER");
                assert_eq!(offset, "start_only".len());
                assert_eq!(context, "");
                assert!(origin.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_end_on_second_occurrence_is_error() {
        let text = "v='1' v='2";
        let err = replace_all_bounded(text, "v='", "'", "3").unwrap_err();
        assert!(matches!(err, PatchError::MarkerNotFound { offset: 9, .. }));
    }

    #[test]
    fn test_replacement_containing_start_terminates() {
        let result = replace_all_bounded("k=(old)", "k=(", ")", "k=(nested").unwrap();
        assert_eq!(result, "k=(k=(nested)");
    }

    #[test]
    fn test_empty_markers_rejected() {
        assert_eq!(
            replace_all_bounded("abc", "", "c", "x"),
            Err(PatchError::EmptyMarker { which: "start" })
        );
        assert_eq!(
            replace_all_bounded("abc", "a", "", "x"),
            Err(PatchError::EmptyMarker { which: "end" })
        );
    }

    #[test]
    fn test_idempotent_when_replacement_lacks_start() {
        let text = "platform :ios, '12.0'\nplatform :ios, '11.0'\n";
        let once = replace_all_bounded(text, "platform :ios, '", "'", "13.0").unwrap();
        let twice = replace_all_bounded(&once, "platform :ios, '", "'", "13.0").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_multibyte_text() {
        let text = "título = «viejo» fin";
        let result = replace_all_bounded(text, "«", "»", "nuevo").unwrap();
        assert_eq!(result, "título = «nuevo» fin");
    }

    #[test]
    fn test_find_bounded() {
        assert_eq!(find_bounded("a = '1.2' b", "a = '", "'"), Some("1.2"));
        assert_eq!(find_bounded("a = '1.2", "a = '", "'"), None);
        assert_eq!(find_bounded("nothing", "a = '", "'"), None);
    }

    #[test]
    fn test_marker_pair_helpers() {
        let pair = MarkerPair::new("IPHONEOS_DEPLOYMENT_TARGET = ", ";");
        let text = "IPHONEOS_DEPLOYMENT_TARGET = 12.0;";
        assert_eq!(pair.find(text), Some("12.0"));
        assert_eq!(
            pair.replace_all(text, "13.0").unwrap(),
            "IPHONEOS_DEPLOYMENT_TARGET = 13.0;"
        );
    }

    #[test]
    fn test_replace_bounded_with_per_region() {
        let text = "v='1' v='5' v='2'";
        let result = replace_bounded_with(text, "v='", "'", |current| {
            (current.parse::<u32>().unwrap() < 3).then(|| "3".to_string())
        })
        .unwrap();
        assert_eq!(result, "v='3' v='5' v='3'");
    }

    #[test]
    fn test_replace_bounded_with_missing_end_is_error() {
        let err = replace_bounded_with("v='1' v='2", "v='", "'", |_| None).unwrap_err();
        assert!(matches!(err, PatchError::MarkerNotFound { offset: 9, .. }));
    }

    #[test]
    fn test_line_values_keep_crlf() {
        let text = "a = 1\r\nb = 2\r\na = 3\r\n";
        let result = replace_line_values_with(text, "a = ", |_| Some("9".to_string())).unwrap();
        assert_eq!(result, "a = 9\r\nb = 2\r\na = 9\r\n");
    }

    #[test]
    fn test_line_value_at_end_of_text() {
        let text = "x=1\nurl=old";
        assert_eq!(find_line_value(text, "url="), Some("old"));
        let result = replace_line_values_with(text, "url=", |_| Some("new".to_string())).unwrap();
        assert_eq!(result, "x=1\nurl=new");
    }

    #[test]
    fn test_find_line_value() {
        assert_eq!(find_line_value("a = 1\r\n", "a = "), Some("1"));
        assert_eq!(find_line_value("a = \n", "a = "), Some(""));
        assert_eq!(find_line_value("b = 1\n", "a = "), None);
    }
}
