use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

// @module: SRT block scanning

// @const: Timing line, e.g. "00:00:01,000 --> 00:00:03,000"
// Arrow tolerates extra dashes and trailing '>' characters.
static TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([^\s>-]+)\s*-{2,}>+\s*([^\s>-]+)").unwrap()
});

/// One timed unit of a transcript, exactly as it appears in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    /// Ordinal written in the file
    pub sequence: usize,

    /// Start timecode, unvalidated
    pub start: String,

    /// End timecode, unvalidated
    pub end: String,

    /// Text payload with its original line breaks
    pub text: String,
}

struct BlockHeader<'a> {
    sequence: usize,
    start: &'a str,
    end: &'a str,
    text_start: usize,
}

/// Scan transcript text into raw blocks, preserving file order.
///
/// A block starts at an ordinal line that is followed (blank lines allowed)
/// by a timing line; its text runs until the next such header or the end of
/// input. Anything before the first header is ignored.
pub fn parse_blocks(content: &str) -> Vec<RawBlock> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let lines: Vec<&str> = content.lines().map(|line| line.trim_end_matches('\r')).collect();

    let mut blocks = Vec::new();
    let mut noise_lines = 0;
    let mut i = 0;

    while i < lines.len() {
        let Some(header) = header_at(&lines, i) else {
            if !lines[i].trim().is_empty() {
                noise_lines += 1;
            }
            i += 1;
            continue;
        };

        let mut end = header.text_start;
        while end < lines.len() && header_at(&lines, end).is_none() {
            end += 1;
        }

        let mut text_lines = &lines[header.text_start..end];
        while let Some((last, rest)) = text_lines.split_last() {
            if !last.trim().is_empty() {
                break;
            }
            text_lines = rest;
        }

        blocks.push(RawBlock {
            sequence: header.sequence,
            start: header.start.to_string(),
            end: header.end.to_string(),
            text: text_lines.join("\n"),
        });

        i = end;
    }

    if noise_lines > 0 {
        debug!("Ignored {} line(s) outside of any subtitle block", noise_lines);
    }

    blocks
}

fn header_at<'a>(lines: &[&'a str], index: usize) -> Option<BlockHeader<'a>> {
    let sequence = parse_ordinal(lines[index])?;

    let timing_index = (index + 1..lines.len()).find(|&j| !lines[j].trim().is_empty())?;
    let caps = TIMING_REGEX.captures(lines[timing_index])?;

    Some(BlockHeader {
        sequence,
        start: caps.get(1)?.as_str(),
        end: caps.get(2)?.as_str(),
        text_start: timing_index + 1,
    })
}

fn parse_ordinal(line: &str) -> Option<usize> {
    let trimmed = line.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}
