//! Validation Gateway
//!
//! Scratch files, the validator subprocess runner and the operations built on them.

pub mod engine;
pub mod runner;
pub mod scratch;

pub use engine::{classify_w3c, Gateway};
pub use runner::{run_tool, ToolOutput};
pub use scratch::ScratchFile;
