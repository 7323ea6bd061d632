use crate::error::SkipReason;
use crate::parser::{locate_metadata, metadata_lines};

/// Metadata key the slug is stored under
pub const SLUG_KEY: &str = "slug";

/// Result of an idempotent slug update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Splice {
    Changed(Vec<u8>),
    Unchanged,
}

fn slug_line(slug: &str) -> Vec<u8> {
    format!("{}: {}", SLUG_KEY, slug).into_bytes()
}

/// Insert `slug: <slug>` on its own line right before the closing delimiter.
///
/// Everything else is copied byte for byte. This never looks at existing
/// fields, so applying it twice yields two slug lines.
pub fn splice(content: &[u8], slug: &str) -> Result<Vec<u8>, SkipReason> {
    let region = locate_metadata(content)?;
    let line = slug_line(slug);

    let mut out = Vec::with_capacity(content.len() + line.len() + 2);
    out.extend_from_slice(&content[..region.end]);
    out.push(b'\n');
    out.extend_from_slice(&line);
    out.push(b'\n');
    out.extend_from_slice(&content[region.end..]);

    Ok(out)
}

/// Set the slug field so that exactly one `slug: <slug>` line remains.
///
/// An existing slug line is rewritten in place and any later duplicates are
/// dropped. Without one, a new line goes right before the closing delimiter.
pub fn upsert_slug(content: &[u8], slug: &str) -> Result<Splice, SkipReason> {
    let region = locate_metadata(content)?;
    let line = slug_line(slug);

    let existing: Vec<_> = metadata_lines(content, &region)
        .into_iter()
        .filter(|l| l.key.as_deref() == Some(SLUG_KEY))
        .collect();

    if existing.is_empty() {
        let needs_break = region.end > 0 && content[region.end - 1] != b'\n';

        let mut out = Vec::with_capacity(content.len() + line.len() + 2);
        out.extend_from_slice(&content[..region.end]);
        if needs_break {
            out.push(b'\n');
        }
        out.extend_from_slice(&line);
        out.push(b'\n');
        out.extend_from_slice(&content[region.end..]);
        return Ok(Splice::Changed(out));
    }

    if existing.len() == 1 && content[existing[0].start..existing[0].end] == line[..] {
        return Ok(Splice::Unchanged);
    }

    let mut out = Vec::with_capacity(content.len() + line.len());
    let mut cursor = 0;
    for (i, l) in existing.iter().enumerate() {
        out.extend_from_slice(&content[cursor..l.start]);
        if i == 0 {
            out.extend_from_slice(&line);
            cursor = l.end;
        } else {
            cursor = l.next;
        }
    }
    out.extend_from_slice(&content[cursor..]);

    Ok(Splice::Changed(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changed(result: Result<Splice, SkipReason>) -> String {
        match result.unwrap() {
            Splice::Changed(bytes) => String::from_utf8(bytes).unwrap(),
            Splice::Unchanged => panic!("expected content to change"),
        }
    }

    #[test]
    fn test_splice_basic() {
        let out = splice(b"---\ntitle: A\n---\nBody", "my-post").unwrap();
        assert_eq!(out, b"---\ntitle: A\n\nslug: my-post\n---\nBody");
    }

    #[test]
    fn test_splice_round_trip() {
        let original: &[u8] = b"intro\n---\ntitle: A\ndate: 2023-01-01\n---\n\n# Heading\n---\n";
        let out = splice(original, "my-post").unwrap();

        let inserted = b"\nslug: my-post\n";
        let pos = out
            .windows(inserted.len())
            .position(|w| w == inserted)
            .unwrap();
        let mut restored = out[..pos].to_vec();
        restored.extend_from_slice(&out[pos + inserted.len()..]);
        assert_eq!(restored, original);
    }

    #[test]
    fn test_splice_adjacent_delimiters() {
        let out = splice(b"------\nBody", "x").unwrap();
        assert_eq!(out, b"---\nslug: x\n---\nBody");
    }

    #[test]
    fn test_splice_missing_delimiters() {
        assert_eq!(splice(b"no front matter", "x"), Err(SkipReason::NoMetadataStart));
        assert_eq!(splice(b"---\ntitle: A\n", "x"), Err(SkipReason::NoMetadataEnd));
    }

    #[test]
    fn test_splice_is_not_idempotent() {
        let once = splice(b"---\ntitle: A\n---\nBody", "my-post").unwrap();
        let twice = splice(&once, "my-post").unwrap();
        assert_eq!(
            twice,
            b"---\ntitle: A\n\nslug: my-post\n\nslug: my-post\n---\nBody"
        );
    }

    #[test]
    fn test_splice_binary_outside_region() {
        let mut content = b"---\ntitle: A\n---\n".to_vec();
        content.extend_from_slice(&[0x00, 0xff, 0xfe, b'-', b'-']);
        let out = splice(&content, "bin").unwrap();
        assert!(out.ends_with(&[b'-', b'-', b'-', b'\n', 0x00, 0xff, 0xfe, b'-', b'-']));
    }

    #[test]
    fn test_upsert_inserts_when_absent() {
        let out = changed(upsert_slug(b"---\ntitle: A\n---\nBody", "my-post"));
        assert_eq!(out, "---\ntitle: A\nslug: my-post\n---\nBody");
    }

    #[test]
    fn test_upsert_adds_line_break_when_needed() {
        assert_eq!(
            changed(upsert_slug(b"------\nBody", "x")),
            "---\nslug: x\n---\nBody"
        );
        assert_eq!(
            changed(upsert_slug(b"---\ntitle: A---\nBody", "x")),
            "---\ntitle: A\nslug: x\n---\nBody"
        );
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let once = changed(upsert_slug(b"---\ntitle: A\n---\nBody", "my-post"));
        assert_eq!(upsert_slug(once.as_bytes(), "my-post"), Ok(Splice::Unchanged));
    }

    #[test]
    fn test_upsert_replaces_existing_value() {
        let out = changed(upsert_slug(
            b"---\ntitle: A\nslug: old-name\ndate: 2023\n---\nBody",
            "new-name",
        ));
        assert_eq!(out, "---\ntitle: A\nslug: new-name\ndate: 2023\n---\nBody");
    }

    #[test]
    fn test_upsert_normalises_existing_spacing() {
        let out = changed(upsert_slug(b"---\nslug:my-post\r\n---\n", "my-post"));
        assert_eq!(out, "---\nslug: my-post\r\n---\n");
    }

    #[test]
    fn test_upsert_collapses_duplicates() {
        let once = splice(b"---\ntitle: A\n---\nBody", "my-post").unwrap();
        let twice = splice(&once, "my-post").unwrap();

        let out = changed(upsert_slug(&twice, "my-post"));
        assert_eq!(out, "---\ntitle: A\n\nslug: my-post\n\n---\nBody");
        assert_eq!(upsert_slug(out.as_bytes(), "my-post"), Ok(Splice::Unchanged));
    }

    #[test]
    fn test_upsert_accepts_legacy_output() {
        let legacy = splice(b"---\ntitle: A\n---\nBody", "my-post").unwrap();
        assert_eq!(upsert_slug(&legacy, "my-post"), Ok(Splice::Unchanged));
    }

    #[test]
    fn test_upsert_ignores_slug_outside_region() {
        let out = changed(upsert_slug(b"---\ntitle: A\n---\nslug: body text\n", "p"));
        assert_eq!(out, "---\ntitle: A\nslug: p\n---\nslug: body text\n");
    }

    #[test]
    fn test_upsert_slug_on_closing_delimiter_line() {
        assert_eq!(
            upsert_slug(b"---\ntitle: A\nslug: p---\nBody", "p"),
            Ok(Splice::Unchanged)
        );

        let out = changed(upsert_slug(b"---\ntitle: A\nslug: old---\nBody", "p"));
        assert_eq!(out, "---\ntitle: A\nslug: p---\nBody");
        assert_eq!(upsert_slug(out.as_bytes(), "p"), Ok(Splice::Unchanged));
    }

    #[test]
    fn test_upsert_drops_duplicate_on_closing_delimiter_line() {
        let out = changed(upsert_slug(b"---\nslug: p\nslug: p---\n", "p"));
        assert_eq!(out, "---\nslug: p\n---\n");
    }

    #[test]
    fn test_upsert_missing_delimiters() {
        assert_eq!(upsert_slug(b"plain", "x"), Err(SkipReason::NoMetadataStart));
        assert_eq!(upsert_slug(b"---\nplain", "x"), Err(SkipReason::NoMetadataEnd));
    }
}
