//! REPL, CLI, and file I/O for Fieldmend.
//!
//! This crate provides:
//! - [`Repl`] - Interactive command loop
//! - [`Session`] - Dataset, history, and undo state
//! - CSV loading and saving, binary snapshots

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod editor;
pub mod loader;
pub mod repl;
pub mod serialize;
pub mod session;

pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use repl::Repl;
pub use session::Session;
