//! Gemini LLM provider
//!
//! Adapter for the Google Gemini `generateContent` REST API. The API is
//! stateless, so the session resends the full conversation history on every
//! call and appends each model reply to it.

pub mod gateway;
pub mod session;
pub mod types;

pub use gateway::{API_KEY_ENV, DEFAULT_BASE_URL, GeminiGateway};
pub use session::GeminiSession;
