//! Compilation orchestration and I/O

mod io;
mod pipeline;

pub use io::write_token_listing;
pub use pipeline::{format_tokens, tokenize_file, PipelineError};
