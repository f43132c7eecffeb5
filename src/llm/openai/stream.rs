use super::types::ChatCompletionChunk;
use crate::error::LlmError;
use crate::llm::sse::{SseBuffer, SseLine, parse_sse_line};
use crate::llm::streaming::DeltaStream;
use futures_util::StreamExt;

/// Content delta carried by one `data:` payload, if any.
pub(in crate::llm) fn decode_delta(payload: &str) -> Result<Option<String>, serde_json::Error> {
    let chunk: ChatCompletionChunk = serde_json::from_str(payload)?;
    Ok(chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content))
}

/// Outcome of feeding one line to the decoder.
enum LineOutcome {
    Delta(String),
    Done,
    Skip,
}

fn handle_line(line: &str) -> LineOutcome {
    match parse_sse_line(line) {
        SseLine::Done => LineOutcome::Done,
        SseLine::Other => LineOutcome::Skip,
        SseLine::Data(payload) => match decode_delta(payload) {
            Ok(Some(text)) if !text.is_empty() => LineOutcome::Delta(text),
            Ok(_) => LineOutcome::Skip,
            Err(error) => {
                tracing::warn!(%error, "Skipping malformed stream fragment");
                LineOutcome::Skip
            }
        },
    }
}

/// Turn a `text/event-stream` chat-completions body into content deltas.
///
/// Ends at `data: [DONE]` or at end of body. A body read error is yielded
/// once and ends the stream.
pub(in crate::llm) fn sse_response_to_delta_stream(response: reqwest::Response) -> DeltaStream {
    let mut byte_stream = response.bytes_stream();

    let stream = async_stream::stream! {
        let mut sse_buffer = SseBuffer::new();
        let mut terminated = false;

        'read: while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(chunk) => chunk,
                Err(error) => {
                    yield Err(LlmError::Streaming(error.to_string()));
                    return;
                }
            };
            sse_buffer.push_chunk(&chunk);

            while let Some(line) = sse_buffer.next_line() {
                match handle_line(&line) {
                    LineOutcome::Delta(text) => yield Ok(text),
                    LineOutcome::Done => {
                        terminated = true;
                        break 'read;
                    }
                    LineOutcome::Skip => {}
                }
            }
        }

        if !terminated {
            if let Some(tail) = sse_buffer.finish() {
                match handle_line(&tail) {
                    LineOutcome::Delta(text) => yield Ok(text),
                    LineOutcome::Done => terminated = true,
                    LineOutcome::Skip => {}
                }
            }
            if !terminated {
                tracing::warn!("Stream ended without a [DONE] terminator");
            }
        }
    };

    Box::pin(stream)
}
