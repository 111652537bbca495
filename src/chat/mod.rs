//! Chat module — keyword-routed advisory replies over a computed chart.
//!
//! No language understanding happens here: the message is lower-cased and
//! matched against a fixed topic table, and the reply prepends a one-line
//! chart summary. Deterministic given identical inputs.

pub mod composer;

pub use composer::{compose, route, summarize, ChatChart};
