//! N fixed-size stacks sharing one backing array, each with an O(1) minimum,
//! plus a small line-oriented command shell to drive them.
pub mod builtin;
pub mod error;
pub mod reader;
pub mod shell;
pub mod stack;
