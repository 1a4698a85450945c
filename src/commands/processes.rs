use super::*;

pub const USAGE: &str = "processes [--json]";
pub const SHORT: &str = "list processes";
pub const LONG: &str = "
Processes lists the app's dynos with their state, time in that state
and command.

Options:

    --json  print the process records as JSON
";

/// List the dynos of an app
#[derive(Parser)]
pub struct Args {
    /// Output in JSON format
    #[clap(long)]
    json: bool,
}

pub async fn command(ctx: &Context, args: Vec<String>) -> Result<Outcome> {
    let args: Args = parse_args(USAGE, &args)?;
    let app = ctx.app()?;

    let processes: Vec<Process> = ctx.client()?.get(&format!("/apps/{app}/ps")).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&processes)?);
        return Ok(Outcome::Completed);
    }

    for line in render(&processes) {
        println!("{line}");
    }
    Ok(Outcome::Completed)
}

fn render(processes: &[Process]) -> Vec<String> {
    let name_width = processes.iter().map(|p| p.process.len()).max().unwrap_or(0);
    let state_width = processes.iter().map(|p| p.state.len()).max().unwrap_or(0);

    processes
        .iter()
        .map(|p| {
            format!(
                "{:<name_width$}  {:<state_width$}  {:>4}  {}",
                p.process,
                p.state,
                format_elapsed(p.elapsed),
                p.command
            )
        })
        .collect()
}

/// Largest whole unit only, e.g. `3h`.
fn format_elapsed(secs: u64) -> String {
    match secs {
        s if s >= 86_400 => format!("{}d", s / 86_400),
        s if s >= 3_600 => format!("{}h", s / 3_600),
        s if s >= 60 => format!("{}m", s / 60),
        s => format!("{s}s"),
    }
}
