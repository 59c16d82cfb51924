use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;
use std::fmt;

/// Recognizes the `name[index]` array form of a raw path segment. The
/// name part is greedy, so `a[0][1]` divides into the key `a[0]` and
/// the index `1`.
static ARRAY_PART: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(.+)\[(\d+)\]$").expect("array segment pattern is valid")
});

/// One step of a divided path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A named key, looked up in an object (or, when it parses as a
    /// number, used as an array index).
    Key(String),
    /// A numeric index from `name[index]` syntax.
    Index(usize),
}

impl Segment {
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Segment::Key(key) => Some(key),
            Segment::Index(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Key(_) => None,
            Segment::Index(index) => Some(*index),
        }
    }

    /// Whether this segment addresses an array position.
    pub fn is_index(&self) -> bool {
        matches!(self, Segment::Index(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "{}", key),
            Segment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// Divided paths are short in practice; eight inline segments covers
/// the deep end of real documents without heap traffic.
pub type Segments = SmallVec<[Segment; 8]>;

/// Divides a path string into an ordered segment list.
///
/// The path is trimmed, then split on `delimiter`. A raw segment of the
/// form `name[digits]` contributes two segments, the key and the index;
/// anything else contributes a single key segment.
///
/// ```rust
/// use dotted_path::{divide_path, Segment};
///
/// let segments = divide_path("c[1].d", ".");
/// assert_eq!(
///     segments.as_slice(),
///     &[
///         Segment::Key("c".to_string()),
///         Segment::Index(1),
///         Segment::Key("d".to_string()),
///     ]
/// );
/// ```
pub fn divide_path(path: &str, delimiter: &str) -> Segments {
    let mut segments = Segments::new();

    for raw in path.trim().split(delimiter) {
        divide_segment(raw, &mut segments);
    }

    segments
}

fn divide_segment(raw: &str, out: &mut Segments) {
    if let Some(captures) = ARRAY_PART.captures(raw) {
        let name = &captures[1];
        if let Ok(index) = captures[2].parse::<usize>() {
            out.push(Segment::Key(name.to_string()));
            out.push(Segment::Index(index));
            return;
        }
    }

    out.push(Segment::Key(raw.to_string()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divide_plain_path() {
        let segments = divide_path("a.b.c", ".");
        assert_eq!(segments.len(), 3);
        assert!(segments.iter().all(|s| matches!(s, Segment::Key(_))));
    }

    #[test]
    fn test_divide_array_segment() {
        let segments = divide_path("c[1]", ".");
        assert_eq!(
            segments.as_slice(),
            &[Segment::Key("c".to_string()), Segment::Index(1)]
        );
    }

    #[test]
    fn test_divide_trims_whitespace() {
        let segments = divide_path("  a.b  ", ".");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].as_key(), Some("a"));
    }

    #[test]
    fn test_divide_custom_delimiter() {
        let segments = divide_path("a/b[2]", "/");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2].as_index(), Some(2));
    }

    #[test]
    fn test_bracket_only_segment_is_a_key() {
        // No name before the bracket, so the raw text stays a key.
        let segments = divide_path("[5]", ".");
        assert_eq!(segments.as_slice(), &[Segment::Key("[5]".to_string())]);
    }

    #[test]
    fn test_double_index_keeps_greedy_name() {
        let segments = divide_path("a[0][1]", ".");
        assert_eq!(
            segments.as_slice(),
            &[Segment::Key("a[0]".to_string()), Segment::Index(1)]
        );
    }
}
