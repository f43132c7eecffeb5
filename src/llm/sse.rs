/// Line buffer for a server-sent-events body arriving in arbitrary chunks.
///
/// Bytes are kept until a full line is available, so a multi-byte character
/// or a `data:` line split across two network reads decodes intact.
#[derive(Debug, Default)]
pub struct SseBuffer {
    buffer: Vec<u8>,
}

/// Classification of one SSE line.
#[derive(Debug, PartialEq, Eq)]
pub enum SseLine<'a> {
    /// Payload of a `data:` line.
    Data(&'a str),
    /// The `data: [DONE]` stream terminator.
    Done,
    /// Blank lines, comments and non-data fields.
    Other,
}

impl SseBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub fn push_chunk(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    /// Next complete line without its terminator (`\n` or `\r\n`).
    pub fn next_line(&mut self) -> Option<String> {
        let newline = self.buffer.iter().position(|b| *b == b'\n')?;
        let mut line: Vec<u8> = self.buffer.drain(..=newline).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }

    /// Whatever remains after the body ended without a final newline.
    pub fn finish(self) -> Option<String> {
        if self.buffer.iter().all(u8::is_ascii_whitespace) {
            return None;
        }
        Some(String::from_utf8_lossy(&self.buffer).trim_end().to_string())
    }
}

pub fn parse_sse_line(line: &str) -> SseLine<'_> {
    let Some(payload) = line.strip_prefix("data:") else {
        return SseLine::Other;
    };
    let payload = payload.trim();
    if payload == "[DONE]" {
        SseLine::Done
    } else if payload.is_empty() {
        SseLine::Other
    } else {
        SseLine::Data(payload)
    }
}
