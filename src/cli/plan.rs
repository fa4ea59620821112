//! Plan command implementation

use crate::cli::output;
use crate::cli::session::start;
use crate::cli::PlanArgs;

/// Handle `strokewatch plan`. Returns whether a plan was rendered.
pub async fn run_plan(args: PlanArgs) -> anyhow::Result<bool> {
    let input = args.input.join(" ");
    let (_config, app) = start(&args.connection)?;

    let submission = app.planner.recommend(&args.kind, &input).await;
    let region = app
        .planner
        .snapshot(&args.kind)
        .ok_or_else(|| anyhow::anyhow!("no display region for planner '{}'", args.kind))?;

    if args.json {
        println!("{}", output::format_region_json(&region)?);
    } else if let Some(line) = output::format_region(&region) {
        println!("{}", line);
    }

    Ok(submission.outcome.is_success())
}
