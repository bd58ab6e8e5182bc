mod client;
mod envelope;

pub use client::ApiClient;
pub use envelope::{Envelope, decode_envelope, envelope_message};
