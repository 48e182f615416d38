//! # crm-advisor
//!
//! Generative strategy advisor for Agency CRM.
//!
//! Answers free-form business questions against a snapshot of dashboard
//! figures and produces marketing creatives from a brief. Backed by the
//! Gemini REST API; the client sits behind the `GenerativeClient` trait so
//! tests run against a mock.

pub mod advisor;
pub mod client;
pub mod context;
pub mod error;

pub use advisor::{Advisor, Creative, FALLBACK_REPLY};
pub use client::{GeminiClient, GenerativeClient, InlineImage};
pub use context::BusinessContext;
pub use error::AdvisorError;
