pub mod cli;
pub mod errors;
pub mod exitcode;
pub mod rewriter;
pub mod util;
pub mod walker;

pub use rewriter::{FileOutcome, FileReport, NavRewriter, RunSummary};
pub use walker::html_files;
