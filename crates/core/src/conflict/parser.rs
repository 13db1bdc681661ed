//! Line-oriented conflict-marker scanner.
//!
//! Splits file content into a sequence of [`Segment`]s: literal text and
//! well-formed [`ConflictRegion`]s. Concatenating the raw text of every
//! segment reproduces the input byte-for-byte, so a caller can rewrite the
//! regions it cares about and pass everything else through untouched.
//!
//! A region is only recognised when its start, separator, and end markers
//! appear in that order. Anything else (a start marker with no end, a nested
//! start marker, an end marker before the separator) is left as literal text.

/// Opening marker; the full start line is `<<<<<<< <ours label>`.
pub const START_MARKER: &str = "<<<<<<<";
/// diff3-style common-ancestor marker.
pub const BASE_MARKER: &str = "|||||||";
/// Separator between the two sides.
pub const SEPARATOR_MARKER: &str = "=======";
/// Closing marker; the full end line is `>>>>>>> <incoming label>`.
pub const END_MARKER: &str = ">>>>>>>";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A single well-formed conflict region, borrowed from the scanned content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictRegion<'a> {
    /// Line number (1-indexed) of the start marker.
    pub start_line: usize,
    /// Line number (1-indexed) of the end marker.
    pub end_line: usize,
    /// Text between the start marker and the separator (or base marker).
    pub ours: &'a str,
    /// Text of the diff3 base section, if the region has one.
    pub base: Option<&'a str>,
    /// Text between the separator and the end marker.
    pub theirs: &'a str,
    /// Label following the end marker (the incoming branch).
    pub end_label: &'a str,
    /// The whole region, markers included.
    pub raw: &'a str,
    /// Whether the end marker line carries a line terminator.
    pub terminated: bool,
}

impl ConflictRegion<'_> {
    /// Number of lines on our side.
    pub fn ours_lines(&self) -> usize {
        self.ours.lines().count()
    }

    /// Number of lines on their side.
    pub fn theirs_lines(&self) -> usize {
        self.theirs.lines().count()
    }
}

/// A piece of scanned content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text outside any well-formed region.
    Text(&'a str),
    /// A well-formed conflict region.
    Region(ConflictRegion<'a>),
}

impl<'a> Segment<'a> {
    /// The exact source text covered by this segment.
    pub fn raw(&self) -> &'a str {
        match self {
            Self::Text(text) => text,
            Self::Region(region) => region.raw,
        }
    }
}

// ---------------------------------------------------------------------------
// Line classification
// ---------------------------------------------------------------------------

/// One physical line of the content.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    /// Byte offset of the first character of the line.
    offset: usize,
    /// The line including its terminator.
    text: &'a str,
    /// The line without `\n` / `\r\n`.
    body: &'a str,
}

impl Line<'_> {
    fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker<'a> {
    /// `<<<<<<< <ours label>`.
    Start,
    /// A start marker carrying some other label.
    ForeignStart,
    Base,
    Separator,
    End(&'a str),
    Plain,
}

fn split_lines(content: &str) -> Vec<Line<'_>> {
    let mut offset = 0;
    content
        .split_inclusive('\n')
        .map(|text| {
            let body = text.strip_suffix('\n').unwrap_or(text);
            let body = body.strip_suffix('\r').unwrap_or(body);
            let line = Line { offset, text, body };
            offset += text.len();
            line
        })
        .collect()
}

fn classify<'a>(body: &'a str, ours_label: &str) -> Marker<'a> {
    if let Some(rest) = body.strip_prefix(START_MARKER) {
        return match rest.strip_prefix(' ') {
            Some(label) if label == ours_label => Marker::Start,
            _ => Marker::ForeignStart,
        };
    }
    if body == BASE_MARKER || body.starts_with("||||||| ") {
        return Marker::Base;
    }
    if body == SEPARATOR_MARKER {
        return Marker::Separator;
    }
    if body == END_MARKER {
        return Marker::End("");
    }
    if let Some(label) = body.strip_prefix(">>>>>>> ") {
        return Marker::End(label);
    }
    Marker::Plain
}

// ---------------------------------------------------------------------------
// Scanning
// ---------------------------------------------------------------------------

/// Returns `true` if any line of `content` is a start marker for `ours_label`.
pub fn has_start_marker(content: &str, ours_label: &str) -> bool {
    split_lines(content)
        .iter()
        .any(|line| classify(line.body, ours_label) == Marker::Start)
}

/// Split `content` into literal text and well-formed conflict regions.
///
/// Only start markers labelled `ours_label` open a region. Regions are matched
/// left to right and never nest: a start marker seen while a region is still
/// open turns the whole enclosing span, up to the end marker that balances
/// the outer start (or the end of input), into literal text.
pub fn parse<'a>(content: &'a str, ours_label: &str) -> Vec<Segment<'a>> {
    let lines = split_lines(content);
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    while i < lines.len() {
        if classify(lines[i].body, ours_label) != Marker::Start {
            i += 1;
            continue;
        }
        match match_region(content, &lines, i, ours_label) {
            Match::Region(region, next) => {
                let region_start = lines[i].offset;
                if text_start < region_start {
                    segments.push(Segment::Text(&content[text_start..region_start]));
                }
                text_start = lines[next - 1].end();
                segments.push(Segment::Region(region));
                i = next;
            }
            // The nested span stays in the pending text.
            Match::Nested(next) => i = next,
            Match::Unclosed => i += 1,
        }
    }

    if text_start < content.len() {
        segments.push(Segment::Text(&content[text_start..]));
    }
    segments
}

/// Result of trying to close a region.
enum Match<'a> {
    /// A well-formed region and the index of the first line after it.
    Region(ConflictRegion<'a>, usize),
    /// Another start marker opened inside the region; the index is the first
    /// line after the balancing end marker, or `lines.len()`.
    Nested(usize),
    /// No end marker, or an end marker before the separator.
    Unclosed,
}

/// Try to close the region opened at `lines[start]`.
fn match_region<'a>(
    content: &'a str,
    lines: &[Line<'a>],
    start: usize,
    ours_label: &str,
) -> Match<'a> {
    let mut base: Option<usize> = None;
    let mut separator: Option<usize> = None;

    for (j, line) in lines.iter().enumerate().skip(start + 1) {
        match classify(line.body, ours_label) {
            Marker::Start | Marker::ForeignStart => {
                return Match::Nested(skip_nested(lines, start, ours_label));
            }
            // Once the separator is seen, further base/separator lines are content.
            Marker::Base if separator.is_none() && base.is_none() => base = Some(j),
            Marker::Separator if separator.is_none() => separator = Some(j),
            Marker::End(label) => {
                let Some(sep) = separator else {
                    return Match::Unclosed;
                };
                let ours_end = lines[base.unwrap_or(sep)].offset;
                let region = ConflictRegion {
                    start_line: start + 1,
                    end_line: j + 1,
                    ours: &content[lines[start].end()..ours_end],
                    base: base.map(|b| &content[lines[b].end()..lines[sep].offset]),
                    theirs: &content[lines[sep].end()..line.offset],
                    end_label: label,
                    raw: &content[lines[start].offset..line.end()],
                    terminated: line.text.ends_with('\n'),
                };
                return Match::Region(region, j + 1);
            }
            _ => {}
        }
    }

    Match::Unclosed
}

/// Index of the first line after the end marker balancing `lines[start]`,
/// counting every start marker as one level of nesting.
fn skip_nested(lines: &[Line<'_>], start: usize, ours_label: &str) -> usize {
    let mut depth = 0usize;
    for (j, line) in lines.iter().enumerate().skip(start) {
        match classify(line.body, ours_label) {
            Marker::Start | Marker::ForeignStart => depth += 1,
            Marker::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return j + 1;
                }
            }
            _ => {}
        }
    }
    lines.len()
}
