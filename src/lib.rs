//! reelsmith library crate.
//!
//! Turns a topic into a short-form video by chaining hosted AI services:
//! captions and prompts from a language model, images and clips from a
//! task API, narration from a text-to-speech API and a final templated
//! render, followed by a webhook notification.

pub mod backend;
pub mod cli;
pub mod config;
pub mod pipeline;
pub mod services;
