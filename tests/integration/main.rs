//! End-to-end tests across layers.
//!
//! CSV in, edits and replay through the engine, CSV out.

mod replay_flow;
