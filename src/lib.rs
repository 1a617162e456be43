//! Chat Directives — conversational-assistant backend.
//!
//! The core is the directive parser ([`directives`]): it turns a raw chat
//! message like `.alert 10:00 review details -urgent` into a clean text
//! body plus structured variables and flags. The [`router`] dispatches the
//! parsed message to a command, and everything else (LLM wrapper, link
//! titles, shared resources, data models) is supporting surface.

pub mod cache;
pub mod config;
pub mod directives;
pub mod error;
pub mod links;
pub mod llm;
pub mod models;
pub mod router;

pub use directives::{ParseResult, parse_directives};
