use std::path::Path;
use std::process;

use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::output;
use crate::errors::RewriteResult;
use crate::exitcode;
use crate::rewriter::{FileOutcome, NavRewriter, RunSummary};

pub fn execute_command(cli: &Cli) -> RewriteResult<()> {
    match &cli.command {
        Some(Commands::Run { root, dry_run }) => _run(root, *dry_run),
        None => Ok(()),
    }
}

#[instrument]
fn _run(root: &Path, dry_run: bool) -> RewriteResult<()> {
    debug!("root: {:?}, dry_run: {:?}", root, dry_run);
    let rewriter = NavRewriter::with_options(dry_run)?;
    let reports = rewriter.run(root)?;

    for report in &reports {
        match &report.outcome {
            Ok(FileOutcome::Updated) => {
                output::success(&format!("Updated {}", report.path.display()))
            }
            Ok(FileOutcome::WouldUpdate) => {
                output::action("Would update", &report.path.display())
            }
            Ok(FileOutcome::Unchanged) => {
                output::detail(&format!("No match found in {}", report.path.display()))
            }
            Err(e) => output::failure(e),
        }
    }

    let summary = RunSummary::tally(&reports);
    output::info(&format!("Total files updated: {}", summary.updated));
    if summary.failed > 0 {
        output::warning(&format!("{} file(s) could not be processed", summary.failed));
        process::exit(exitcode::IOERR);
    }
    Ok(())
}
