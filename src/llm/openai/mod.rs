mod client;
mod stream;
mod types;

pub use client::OpenAiClient;
