use crate::{
    consts::{CLI_NAME, VERSION},
    updater::{UpdateStatus, Updater},
};

use super::*;

pub const USAGE: &str = "fetch-update";
pub const SHORT: &str = "fetch and apply an update";
pub const LONG: &str = "
Fetch-update checks the update channel right away and, if a newer
build is published, downloads, verifies and installs it in place of
the running binary. hk also does this on its own about once a day.
";

/// Check for and install a newer hk build
#[derive(Parser)]
pub struct Args {}

pub async fn command(ctx: &Context, args: Vec<String>) -> Result<Outcome> {
    let _args: Args = parse_args(USAGE, &args)?;

    let status = Updater::new(&ctx.configs)
        .fetch_and_apply()
        .await
        .context("Update failed")?;

    match status {
        UpdateStatus::UpToDate => {
            println!("{CLI_NAME} is up to date (v{VERSION})");
        }
        UpdateStatus::Updated { from, to } => {
            println!(
                "{} {CLI_NAME} from v{} to v{}",
                "Updated".green().bold(),
                from,
                to.yellow()
            );
        }
    }

    // the update just ran; skip the post-command check
    Ok(Outcome::Exit(0))
}
