use crate::error::LlmError;
use futures_util::Stream;
use std::pin::Pin;

/// Incremental text fragments of one assistant reply, in arrival order.
pub type DeltaStream = Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send + 'static>>;

/// Drain `stream` into a single string, stopping at the first error.
#[cfg(test)]
pub(crate) async fn collect_deltas(mut stream: DeltaStream) -> Result<String, LlmError> {
    use futures_util::StreamExt;

    let mut text = String::new();
    while let Some(delta) = stream.next().await {
        text.push_str(&delta?);
    }
    Ok(text)
}
