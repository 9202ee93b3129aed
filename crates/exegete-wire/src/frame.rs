#![forbid(unsafe_code)]

//! Chunk-to-line reassembly for the streaming body.

use bytes::BytesMut;

/// SSE framing prefix. Lines starting with it are unwrapped; plain NDJSON
/// lines pass through unchanged, so both wire forms are accepted.
pub const DATA_PREFIX: &str = "data: ";

/// Turns raw byte chunks into complete LF-terminated lines.
///
/// A trailing partial line is carried between chunks as raw bytes, so a
/// multi-byte UTF-8 sequence split across a chunk boundary decodes correctly
/// once its line completes. Call [`LineDecoder::finish`] when the transfer
/// ends to flush a final unterminated line.
#[derive(Debug, Default)]
pub struct LineDecoder {
    buf: BytesMut,
}

impl LineDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk, in arrival order. Returns the complete lines it closed,
    /// already unwrapped from the `data: ` prefix, with blank lines dropped.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let raw = self.buf.split_to(pos + 1);
            if let Some(line) = clean_line(&raw[..raw.len() - 1]) {
                lines.push(line);
            }
        }
        lines
    }

    /// Flush the carried partial line at end of transfer, if any.
    pub fn finish(&mut self) -> Option<String> {
        if self.buf.is_empty() {
            return None;
        }
        let raw = self.buf.split();
        clean_line(&raw)
    }

    /// Bytes currently carried over, waiting for a line feed.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

fn clean_line(raw: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(raw);
    let line = text.trim_end_matches('\r');
    let line = line.strip_prefix(DATA_PREFIX).unwrap_or(line);
    if line.trim().is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn collect(chunks: &[&[u8]]) -> Vec<String> {
        let mut decoder = LineDecoder::new();
        let mut lines = Vec::new();
        for chunk in chunks {
            lines.extend(decoder.feed(chunk));
        }
        lines.extend(decoder.finish());
        lines
    }

    #[rstest]
    fn single_chunk_single_line() {
        assert_eq!(collect(&[b"{\"a\":1}\n"]), ["{\"a\":1}"]);
    }

    #[rstest]
    fn line_split_across_chunks() {
        assert_eq!(collect(&[b"{\"a\"", b":1}\n"]), ["{\"a\":1}"]);
    }

    #[rstest]
    fn multibyte_char_split_across_chunks() {
        // "é" is 0xC3 0xA9; split between the two bytes.
        let bytes = "{\"t\":\"é\"}\n".as_bytes();
        let (head, tail) = bytes.split_at(7);
        assert_eq!(collect(&[head, tail]), ["{\"t\":\"é\"}"]);
    }

    #[rstest]
    fn sse_prefix_is_stripped() {
        assert_eq!(collect(&[b"data: {\"a\":1}\n"]), ["{\"a\":1}"]);
    }

    #[rstest]
    fn plain_ndjson_passes_through() {
        assert_eq!(
            collect(&[b"{\"a\":1}\ndata: {\"b\":2}\n"]),
            ["{\"a\":1}", "{\"b\":2}"]
        );
    }

    #[rstest]
    fn blank_lines_are_dropped() {
        assert_eq!(collect(&[b"\n\n{\"a\":1}\n\n"]), ["{\"a\":1}"]);
    }

    #[rstest]
    fn crlf_is_tolerated() {
        assert_eq!(collect(&[b"data: {\"a\":1}\r\n"]), ["{\"a\":1}"]);
    }

    #[rstest]
    fn unterminated_tail_flushes_on_finish() {
        let mut decoder = LineDecoder::new();
        assert!(decoder.feed(b"{\"a\":1}\n{\"b\"").len() == 1);
        assert!(decoder.pending() > 0);
        assert_eq!(decoder.finish(), Some("{\"b\"".to_string()));
        assert_eq!(decoder.finish(), None);
    }

    #[rstest]
    fn many_lines_in_one_chunk() {
        let lines = collect(&[b"data: 1\ndata: 2\ndata: 3\n"]);
        assert_eq!(lines, ["1", "2", "3"]);
    }

    #[rstest]
    #[case::byte_at_a_time(1)]
    #[case::tiny_chunks(3)]
    fn chunk_size_does_not_matter(#[case] size: usize) {
        let body = "data: {\"type\":\"comment\",\"message\":\"héllo\"}\n{\"x\":1}\n".as_bytes();
        let chunks: Vec<&[u8]> = body.chunks(size).collect();
        assert_eq!(
            collect(&chunks),
            ["{\"type\":\"comment\",\"message\":\"héllo\"}", "{\"x\":1}"]
        );
    }
}
