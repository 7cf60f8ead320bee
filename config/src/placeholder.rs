//! Placeholder detection for paths the user still has to fill in.

/// Trailing comment word marking a line the user must edit (`# UPDATE`).
pub const UPDATE_MARKER: &str = "UPDATE";

/// Substrings that mark a value as a placeholder.
pub const PLACEHOLDER_MARKERS: &[&str] = &["/path/to/", "CHANGEME"];

/// Reports whether a configured value is still a placeholder.
///
/// Empty values, values containing one of [`PLACEHOLDER_MARKERS`] and values
/// wrapped in angle brackets (`<FBMS_ROOT>`) are placeholders.
pub fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return true;
    }
    if value.len() > 2 && value.starts_with('<') && value.ends_with('>') {
        return true;
    }
    PLACEHOLDER_MARKERS.iter().any(|m| value.contains(m))
}

/// A line in raw document text still carrying the `# UPDATE` comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedLine {
    /// 1-based line number.
    pub line: usize,
    /// The key on that line, without indentation.
    pub key: String,
}

/// Finds the lines of `text` that still end with the `# UPDATE` comment.
pub fn marked_lines(text: &str) -> Vec<MarkedLine> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let (content, comment) = split_comment(line)?;
            if comment.split_whitespace().next() != Some(UPDATE_MARKER) {
                return None;
            }
            let key = content.split(':').next()?.trim();
            if key.is_empty() {
                return None;
            }
            Some(MarkedLine {
                line: i + 1,
                key: key.to_string(),
            })
        })
        .collect()
}

/// Splits a line at the start of its YAML comment.
///
/// A `#` only opens a comment at the start of the line or after whitespace,
/// so `/data/run#2` stays part of the value.
fn split_comment(line: &str) -> Option<(&str, &str)> {
    let bytes = line.as_bytes();
    let pos = line
        .char_indices()
        .find(|&(i, c)| c == '#' && (i == 0 || bytes[i - 1].is_ascii_whitespace()))?
        .0;
    Some((&line[..pos], &line[pos + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_placeholder() {
        assert!(is_placeholder(""));
        assert!(is_placeholder("   "));
        assert!(is_placeholder("/path/to/flownet2"));
        assert!(is_placeholder("/data/CHANGEME/davis"));
        assert!(is_placeholder("<FBMS_ROOT>"));

        assert!(!is_placeholder("release/model/joint/"));
        assert!(!is_placeholder("/data/path/davis"));
        assert!(!is_placeholder("<>"));
    }

    #[test]
    fn test_marked_lines() {
        let text = "\
flow:
  flownet2_dir: /path/to/flownet2  # UPDATE
tracker:
  visualize: false
fbms:
  root: /data/fbms # UPDATE
  # UPDATE everything below
";
        let lines = marked_lines(text);
        assert_eq!(
            lines,
            vec![
                MarkedLine {
                    line: 2,
                    key: "flownet2_dir".to_string()
                },
                MarkedLine {
                    line: 6,
                    key: "root".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_marked_lines_hash_inside_value() {
        let text = "\
flow:
  flownet2_dir: /data/run#2/flownet2  # UPDATE
fbms:
  root: /data/#UPDATES/fbms
  eval_dir: /data/eval # UPDATES pending
";
        assert_eq!(
            marked_lines(text),
            vec![MarkedLine {
                line: 2,
                key: "flownet2_dir".to_string()
            }]
        );
    }
}
