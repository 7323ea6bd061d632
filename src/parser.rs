use crate::error::SkipReason;

/// Marker opening and closing the metadata block
pub const DELIMITER: &[u8] = b"---";

/// Byte span between the first two delimiters.
/// `start` is just past the opening delimiter, `end` is where the closing one begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataRegion {
    pub start: usize,
    pub end: usize,
}

/// One line of the metadata region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataLine {
    /// Offset of the first byte of the line
    pub start: usize,
    /// Offset one past the last byte of the line, excluding `\n` or `\r\n`
    pub end: usize,
    /// Offset one past the line terminator, or `end` for the text
    /// sharing a line with the closing delimiter
    pub next: usize,
    /// Key of a `key: value` line
    pub key: Option<String>,
}

/// Find the delimiter in the buffer starting from the given position
/// Returns the absolute position of the delimiter
pub fn find_delimiter(buffer: &[u8], start: usize) -> Option<usize> {
    if start >= buffer.len() {
        return None;
    }

    buffer[start..]
        .windows(DELIMITER.len())
        .position(|w| w == DELIMITER)
        .map(|pos| start + pos)
}

/// Locate the metadata region bounded by the first two delimiters
pub fn locate_metadata(buffer: &[u8]) -> Result<MetadataRegion, SkipReason> {
    let open = find_delimiter(buffer, 0).ok_or(SkipReason::NoMetadataStart)?;
    let start = open + DELIMITER.len();
    let end = find_delimiter(buffer, start).ok_or(SkipReason::NoMetadataEnd)?;

    Ok(MetadataRegion { start, end })
}

/// Extract the key of a `key: value` line
pub fn parse_key(line: &[u8]) -> Option<String> {
    let colon = line.iter().position(|&b| b == b':')?;
    let key = std::str::from_utf8(&line[..colon]).ok()?.trim();

    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }

    Some(key.to_string())
}

/// Split the metadata region into lines.
/// The text sharing a line with the opening delimiter is not part of any line.
/// Text preceding the closing delimiter on its line is a line without a terminator.
pub fn metadata_lines(buffer: &[u8], region: &MetadataRegion) -> Vec<MetadataLine> {
    let mut lines = Vec::new();
    let mut pos = region.start;

    // skip the rest of the opening delimiter's line
    match buffer[pos..region.end].iter().position(|&b| b == b'\n') {
        Some(i) => pos += i + 1,
        None => return lines,
    }

    while pos < region.end {
        let newline = match buffer[pos..region.end].iter().position(|&b| b == b'\n') {
            Some(i) => pos + i,
            // closing delimiter shares this line
            None => {
                lines.push(MetadataLine {
                    start: pos,
                    end: region.end,
                    next: region.end,
                    key: parse_key(&buffer[pos..region.end]),
                });
                break;
            }
        };

        let mut end = newline;
        if end > pos && buffer[end - 1] == b'\r' {
            end -= 1;
        }

        lines.push(MetadataLine {
            start: pos,
            end,
            next: newline + 1,
            key: parse_key(&buffer[pos..end]),
        });

        pos = newline + 1;
    }

    lines
}
