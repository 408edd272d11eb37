use anyhow::{Context, Result};
use clap::Parser;

use git_pr_stack::cli::{run_stack_workflow, StackWorkflowArgs};
use git_pr_stack::config;
use git_pr_stack::git::Git2Repository;
use git_pr_stack::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-pr-stack",
    version,
    about = "Publish each marked segment of a local commit stack as its own branch"
)]
struct Args {
    #[arg(
        long,
        help = "Tag the commits a real run would push instead of pushing them"
    )]
    dry: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let config = config::load_config(None).context("Error loading config")?;

    let repo = Git2Repository::open(".").context("Not in a git repository")?;

    let result = run_stack_workflow(&repo, &StackWorkflowArgs { dry_run: args.dry }, &config)?;

    if result.has_failures() {
        ui::display_status("Finished with errors; see messages above");
    } else {
        ui::display_success(&format!(
            "Done: {} path(s), {} head(s) published",
            result.path_count,
            result.publish.published.len()
        ));
    }

    Ok(())
}
