use super::*;

pub const USAGE: &str = "environment [--json]";
pub const SHORT: &str = "list config vars";
pub const LONG: &str = "
Environment prints the app's config vars, one NAME=value per line,
sorted by name.

Options:

    --json  print the config vars as a JSON object
";

/// List config vars for an app
#[derive(Parser)]
pub struct Args {
    /// Output in JSON format
    #[clap(long)]
    json: bool,
}

pub async fn command(ctx: &Context, args: Vec<String>) -> Result<Outcome> {
    let args: Args = parse_args(USAGE, &args)?;
    let app = ctx.app()?;

    let vars: ConfigVars = ctx
        .client()?
        .get(&format!("/apps/{app}/config_vars"))
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&vars)?);
        return Ok(Outcome::Completed);
    }

    for (name, value) in &vars {
        println!("{name}={value}");
    }
    Ok(Outcome::Completed)
}
