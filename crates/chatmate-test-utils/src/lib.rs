//! Shared test utilities for the chatmate workspace.
//!
//! This crate provides standardised fixtures so each crate's tests do not
//! rebuild the same source and destination directories by hand. It is a
//! dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`prompts`]: [`TestPrompts`] fixture with a source and a destination
//!   directory
//! - [`content`]: artifact bodies that do and do not satisfy the content
//!   contract

pub mod content;
pub mod prompts;

pub use content::{chatmode_content, invalid_chatmode_content};
pub use prompts::TestPrompts;
