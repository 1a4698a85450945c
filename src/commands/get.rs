use super::*;

pub const USAGE: &str = "get <name>";
pub const SHORT: &str = "get config var";
pub const LONG: &str = "
Get prints the value of a single config var. If the var is not set,
nothing is printed and hk exits with status 1.
";

/// Get one config var
#[derive(Parser, Debug)]
pub struct Args {
    /// Name of the config var
    name: String,
}

pub async fn command(ctx: &Context, args: Vec<String>) -> Result<Outcome> {
    let args: Args = parse_args(USAGE, &args)?;
    let app = ctx.app()?;

    let vars: ConfigVars = ctx
        .client()?
        .get(&format!("/apps/{app}/config_vars"))
        .await?;

    match vars.get(&args.name) {
        Some(value) => {
            println!("{value}");
            Ok(Outcome::Completed)
        }
        None => Ok(Outcome::Exit(1)),
    }
}
