use std::cmp::Ordering;
use std::fmt;

/// One dot-separated piece of a version string.
///
/// Declaration order matters: every numeric segment sorts before every
/// textual one, which keeps the comparison a total order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Segment {
    Numeric(u64),
    Text(String),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Segment::Numeric(0);
        }
        match raw.parse::<u64>() {
            Ok(number) => Segment::Numeric(number),
            Err(_) => Segment::Text(raw.to_string()),
        }
    }
}

static MISSING: Segment = Segment::Numeric(0);

/// Version or build string ordered segment by segment.
///
/// The string is split on `.`. Two numeric segments compare as integers,
/// two textual segments compare lexically, and a numeric segment is always
/// lower than a textual one. A missing or empty segment counts as `0`, so
/// `12.6`, `12.6.` and `12.6.0` are equal.
#[derive(Debug, Clone)]
pub struct DottedVersion {
    raw: String,
    segments: Vec<Segment>,
}

impl DottedVersion {
    pub fn new(raw: &str) -> Self {
        let raw = raw.trim();
        let segments = if raw.is_empty() {
            Vec::new()
        } else {
            raw.split('.').map(Segment::parse).collect()
        };
        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The first `count` dot-separated segments of the original string.
    pub fn truncated(&self, count: usize) -> String {
        self.raw.split('.').take(count).collect::<Vec<_>>().join(".")
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

impl From<&str> for DottedVersion {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for DottedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl Ord for DottedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        for index in 0..len {
            let left = self.segments.get(index).unwrap_or(&MISSING);
            let right = other.segments.get(index).unwrap_or(&MISSING);
            match left.cmp(right) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for DottedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for DottedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DottedVersion {}
