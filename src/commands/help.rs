use crate::{consts::CLI_NAME, errors::HkError};

use super::*;

pub const USAGE: &str = "help [command]";
pub const SHORT: &str = "show help";
pub const LONG: &str = "
Help with no arguments lists all commands. With a command name it
shows that command's usage and details.
";

/// Show help for hk or one of its commands
#[derive(Parser)]
pub struct Args {
    /// Command to describe
    topic: Option<String>,
}

pub async fn command(_ctx: &Context, args: Vec<String>) -> Result<Outcome> {
    let args: Args = parse_args(USAGE, &args)?;

    let Some(topic) = args.topic else {
        print!("{}", usage_text());
        return Ok(Outcome::Completed);
    };

    let cmd = find(&topic).ok_or(HkError::UnknownHelpTopic(topic))?;
    println!("{}", help_for(cmd));
    Ok(Outcome::Completed)
}

fn help_for(cmd: &Command) -> String {
    format!(
        "{} {CLI_NAME} {}\n\n{}",
        "Usage:".bold(),
        cmd.usage,
        cmd.long.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_for_command_shows_usage_and_details() {
        colored::control::set_override(false);
        let text = help_for(find("get").unwrap());
        assert!(text.starts_with("Usage: hk get <name>\n\n"));
        assert!(text.contains("exits with status 1"));
    }

    #[tokio::test]
    async fn test_unknown_topic_is_an_error() {
        let ctx = Context::new(Configs::with_home("/nonexistent", None), "");
        let err = command(&ctx, vec!["deploy".into()]).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HkError>(),
            Some(HkError::UnknownHelpTopic(topic)) if topic == "deploy"
        ));
    }

    #[tokio::test]
    async fn test_help_rejects_unknown_flags() {
        let ctx = Context::new(Configs::with_home("/nonexistent", None), "");
        let err = command(&ctx, vec!["--verbose".into()]).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unrecognized argument '--verbose'. See 'hk help help'"
        );
    }
}
