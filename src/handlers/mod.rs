//! Handlers module
//!
//! One submodule per inbound event kind: text commands, inline keyboard
//! callbacks and the inline-query protocol.

pub mod callbacks;
pub mod commands;
pub mod inline;
