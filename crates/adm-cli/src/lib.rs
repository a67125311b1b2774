//! admiral: command-line front-end for the Admiral orchestration service
//!
//! The binary parses arguments with clap, talks to the service through
//! [`api::AdmiralClient`] and renders results with [`output`].

pub mod api;
pub mod commands;
pub mod output;
pub mod prompt;

#[cfg(test)]
mod test_utils;
