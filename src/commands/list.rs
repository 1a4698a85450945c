use super::*;

pub const USAGE: &str = "list [--json]";
pub const SHORT: &str = "list apps";
pub const LONG: &str = "
List prints the names of all apps you have access to, one per line.

Options:

    --json  print the full app records as JSON
";

/// List all apps in your account
#[derive(Parser)]
pub struct Args {
    /// Output in JSON format
    #[clap(long)]
    json: bool,
}

pub async fn command(ctx: &Context, args: Vec<String>) -> Result<Outcome> {
    let args: Args = parse_args(USAGE, &args)?;

    let apps: Vec<App> = ctx.client()?.get("/apps").await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&apps)?);
        return Ok(Outcome::Completed);
    }

    for app in &apps {
        if ctx.app == app.name {
            println!("{}", app.name.purple().bold());
        } else {
            println!("{}", app.name);
        }
    }
    Ok(Outcome::Completed)
}
