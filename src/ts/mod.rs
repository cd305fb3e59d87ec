// SPDX-License-Identifier: PMPL-1.0-or-later

//! Qt Linguist `.ts` catalog format

pub mod reader;
pub mod writer;

pub use reader::{load, parse, parse_bytes};
pub use writer::{save, to_string};

/// How much of a file `sniff` looks at.
const SNIFF_LEN: usize = 64 * 1024;

/// Cheap check that `bytes` look like a Linguist catalog rather than, say,
/// a TypeScript source sharing the `.ts` extension.
///
/// The head is decoded through its byte order mark when there is one, and
/// the XML declaration, comments and doctype before the root are skipped.
pub fn sniff(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(SNIFF_LEN)];
    let text = match encoding_rs::Encoding::for_bom(head) {
        Some((encoding, bom_len)) => encoding.decode_without_bom_handling(&head[bom_len..]).0,
        None => String::from_utf8_lossy(head),
    };
    match skip_prologue(&text) {
        Some(rest) => rest
            .strip_prefix("<TS")
            .and_then(|after| after.chars().next())
            .is_some_and(|c| c.is_whitespace() || c == '>' || c == '/'),
        None => false,
    }
}

/// Everything after the prolog, or `None` if a construct runs past the head.
fn skip_prologue(mut text: &str) -> Option<&str> {
    loop {
        text = text.trim_start_matches('\u{feff}').trim_start();
        let end = if text.starts_with("<?") {
            "?>"
        } else if text.starts_with("<!--") {
            "-->"
        } else if text.starts_with("<!DOCTYPE") {
            ">"
        } else {
            return Some(text);
        };
        let close = text.find(end)?;
        text = &text[close + end.len()..];
    }
}

#[cfg(test)]
mod tests {
    use super::sniff;

    #[test]
    fn sniff_distinguishes_typescript() {
        assert!(sniff(b"<?xml version=\"1.0\"?>\n<!DOCTYPE TS>\n<TS version=\"2.1\">"));
        assert!(sniff(b"<TS version=\"2.1\" language=\"de\">"));
        assert!(!sniff(b"export const TS = 1;\n"));
        assert!(!sniff(b"<?xml version=\"1.0\"?><svg/>"));
        assert!(!sniff(b"<TSX/>"));
    }

    #[test]
    fn sniff_skips_long_leading_comment() {
        let licence = "Copyright notice. ".repeat(100);
        let catalog = format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!-- {} -->\n<!DOCTYPE TS>\n<TS version=\"2.1\">\n</TS>\n",
            licence
        );
        assert!(catalog.len() > 1024);
        assert!(sniff(catalog.as_bytes()));
        assert!(!sniff(b"<!-- never closed <TS version=\"2.1\">"));
    }

    #[test]
    fn sniff_reads_utf16_with_bom() {
        let text = "<?xml version=\"1.0\"?>\n<!DOCTYPE TS>\n<TS version=\"2.1\" language=\"de\">\n</TS>\n";
        let mut bytes = vec![0xFF, 0xFE];
        bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
        assert!(sniff(&bytes));

        let mut big_endian = vec![0xFE, 0xFF];
        big_endian.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
        assert!(sniff(&big_endian));
    }
}
