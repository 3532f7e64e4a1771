use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Location {
    /// The file in which the location is found.
    pub file: String,
    /// The line number of the location (1-based).
    pub line: usize,
    /// The column number of the location (1-based).
    pub column: usize,
    /// Byte offset of the location into the source text.
    pub offset: usize,
}

impl Location {
    /// Creates a new `Location`.
    pub fn new(file: String, line: usize, column: usize, offset: usize) -> Self {
        Self { file, line, column, offset }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Span {
    /// The starting location of the span.
    pub start: Location,
    /// The ending location of the span (exclusive).
    pub end: Location,
}

impl Span {
    /// Creates a new `Span` from two `Location`s.
    pub fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// Byte range `[start, end)` covered by the span.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start.offset..self.end.offset
    }

    /// Slice the covered text out of `source`. Returns `None` when the span
    /// does not fall on valid boundaries of `source`.
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.range())
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// `{ line, column }` pair as it appears inside an ESTree `loc` object;
/// lines are 1-based, columns 0-based.
struct LineColumn<'a>(&'a Location);

impl Serialize for LineColumn<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("line", &self.0.line)?;
        map.serialize_entry("column", &self.0.column.saturating_sub(1))?;
        map.end()
    }
}

struct SourceLocation<'a>(&'a Span);

impl Serialize for SourceLocation<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("start", &LineColumn(&self.0.start))?;
        map.serialize_entry("end", &LineColumn(&self.0.end))?;
        map.end()
    }
}

/// Spans serialize in the ESTree position layout:
/// `"start": <offset>, "end": <offset>, "loc": { "start": {..}, "end": {..} }`.
/// The file name is left out; it is constant across a tree.
impl Serialize for Span {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("start", &self.start.offset)?;
        map.serialize_entry("end", &self.end.offset)?;
        map.serialize_entry("loc", &SourceLocation(self))?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(line: usize, column: usize, offset: usize) -> Location {
        Location::new("a.js".into(), line, column, offset)
    }

    #[test]
    fn span_slices_source_by_byte_offsets() {
        let span = Span::new(loc(1, 7, 6), loc(1, 11, 10));
        assert_eq!(span.slice("const x = 5;"), Some("x = "));
        assert_eq!(span.range().len(), 4);
    }

    #[test]
    fn span_serializes_as_estree_positions() {
        let span = Span::new(loc(1, 1, 0), loc(2, 3, 14));
        let json = serde_json::to_value(&span).unwrap();
        assert_eq!(json["start"], 0);
        assert_eq!(json["end"], 14);
        assert_eq!(json["loc"]["end"]["line"], 2);
        assert_eq!(json["loc"]["end"]["column"], 2);
    }
}
