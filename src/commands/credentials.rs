use url::Url;

use super::*;

pub const USAGE: &str = "credentials";
pub const SHORT: &str = "show credentials";
pub const LONG: &str = "
Credentials prints the login and API key used for the API host,
separated by a space. Credentials come from the API URL when it
embeds them, otherwise from the matching machine in ~/.netrc.
";

/// Show the credentials used for the API
#[derive(Parser)]
pub struct Args {}

pub async fn command(ctx: &Context, args: Vec<String>) -> Result<Outcome> {
    let _args: Args = parse_args(USAGE, &args)?;

    let url = Url::parse(ctx.configs.api_url())
        .with_context(|| format!("Invalid API URL {:?}", ctx.configs.api_url()))?;
    let credential = crate::credentials::resolve(&url, &ctx.configs.netrc_path())?;

    println!("{} {}", credential.login, credential.secret);
    Ok(Outcome::Completed)
}
