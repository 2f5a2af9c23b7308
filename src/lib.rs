//! Turn a contacts export into a company tree and summary statistics.
//!
//! The pipeline is `text → parser → contacts → network (tree, summary)`.
//! It is synchronous, holds no state between calls and never fails: input
//! it cannot use shows up as zero counts.

pub mod contact;
pub mod error;
pub mod insights;
pub mod network;
pub mod parser;
pub mod render;
pub mod settings;
pub mod workspace;

pub use contact::Contact;
pub use error::{NetmapError, Result};
pub use network::{Network, NetworkSummary, NetworkTree, PipelineOptions};
pub use parser::{parse_connections, TokenizerPolicy};
pub use workspace::Workspace;
