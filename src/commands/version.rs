use crate::consts::get_user_agent;

use super::*;

pub const USAGE: &str = "version";
pub const SHORT: &str = "show hk version";
pub const LONG: &str = "Version shows the hk client version string.";

/// Print the client version
#[derive(Parser, Debug)]
pub struct Args {}

pub async fn command(_ctx: &Context, args: Vec<String>) -> Result<Outcome> {
    let _args: Args = parse_args(USAGE, &args)?;
    println!("{}", get_user_agent());
    Ok(Outcome::Completed)
}
