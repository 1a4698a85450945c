pub(super) use crate::{client::*, config::*, consts::NO_APP_SPECIFIED, entities::*};
pub(super) use anyhow::{bail, Context as _, Result};
pub(super) use clap::Parser;
pub(super) use colored::Colorize;

use clap::{
    error::{ContextKind, ContextValue, ErrorKind},
    CommandFactory, FromArgMatches,
};
use futures::future::LocalBoxFuture;

use crate::{consts::CLI_NAME, errors::HkError};

pub mod credentials;
pub mod environment;
pub mod fetch_update;
pub mod get;
pub mod help;
pub mod info;
pub mod list;
pub mod processes;
pub mod version;

commands!(
    credentials,
    environment,
    fetch_update,
    get,
    info,
    list,
    processes,
    version,
    help
);

pub type Handler = for<'a> fn(&'a Context, Vec<String>) -> LocalBoxFuture<'a, Result<Outcome>>;

#[derive(Clone, Copy)]
pub struct Command {
    /// First word is the command name.
    pub usage: &'static str,
    /// One line, shown by `hk help`.
    pub short: &'static str,
    /// Shown by `hk help <command>`.
    pub long: &'static str,
    pub run: Handler,
}

impl Command {
    pub fn name(&self) -> &'static str {
        command_name(self.usage)
    }
}

fn command_name(usage: &str) -> &str {
    match usage.find(' ') {
        Some(i) => &usage[..i],
        None => usage,
    }
}

/// How a handler that did not fail wants the process to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Normal fall-through; post-command maintenance runs.
    Completed,
    /// Terminate right away with this status, skipping maintenance.
    Exit(i32),
}

/// What every handler can see: the global options and the process configuration.
pub struct Context {
    pub configs: Configs,
    pub app: String,
}

impl Context {
    pub fn new(configs: Configs, app: impl Into<String>) -> Self {
        Self {
            configs,
            app: app.into(),
        }
    }

    pub fn client(&self) -> Result<ApiClient> {
        Ok(ApiClient::new(&self.configs)?)
    }

    /// The `-a` app, required by app-scoped commands.
    pub fn app(&self) -> Result<&str> {
        if self.app.is_empty() {
            bail!(NO_APP_SPECIFIED);
        }
        Ok(&self.app)
    }
}

pub fn find(name: &str) -> Option<&'static Command> {
    find_in(COMMANDS, name)
}

/// First exact name match wins.
pub fn find_in<'a>(registry: &'a [Command], name: &str) -> Option<&'a Command> {
    registry.iter().find(|cmd| cmd.name() == name)
}

pub fn usage_text() -> String {
    usage_for(COMMANDS)
}

fn usage_for(registry: &[Command]) -> String {
    let mut text = format!("Usage: {CLI_NAME} [-a app] <command> [options] [arguments]\n\n");
    text.push_str("Commands:\n");
    for cmd in registry {
        text.push_str(&format!("    {:<14} {}\n", cmd.name(), cmd.short));
    }
    text.push_str(&format!("\nRun '{CLI_NAME} help [command]' for details.\n"));
    text
}

/// Parses a command's own arguments in a namespace separate from the global
/// options. Any parse failure is reported against the command named by `usage`.
/// `-h`/`--help` are not flags here; `hk help <command>` covers them.
pub fn parse_args<A: Parser>(usage: &str, args: &[String]) -> Result<A, HkError> {
    let command = command_name(usage);
    A::command()
        .disable_help_flag(true)
        .try_get_matches_from(std::iter::once(command.to_owned()).chain(args.iter().cloned()))
        .and_then(|matches| A::from_arg_matches(&matches))
        .map_err(|err| match (err.kind(), err.get(ContextKind::InvalidArg)) {
            (ErrorKind::UnknownArgument, Some(ContextValue::String(arg))) => {
                HkError::UnrecognizedArgument {
                    arg: arg.clone(),
                    command: command.to_owned(),
                }
            }
            _ => HkError::InvalidArguments(command.to_owned()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_first_usage_word() {
        let cmd = find("get").unwrap();
        assert_eq!(cmd.usage, "get <name>");
        assert_eq!(cmd.name(), "get");
        assert_eq!(find("version").unwrap().name(), "version");
    }

    #[test]
    fn test_every_command_round_trips_through_lookup() {
        for cmd in COMMANDS {
            let found = find(cmd.name()).unwrap();
            assert!(std::ptr::eq(found, cmd), "{}", cmd.name());
        }
    }

    #[test]
    fn test_registry_order_and_uniqueness() {
        let names: Vec<_> = COMMANDS.iter().map(Command::name).collect();
        assert_eq!(
            names,
            [
                "credentials",
                "environment",
                "fetch-update",
                "get",
                "info",
                "list",
                "processes",
                "version",
                "help"
            ]
        );
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len());
    }

    #[test]
    fn test_usage_lists_commands_in_registry_order() {
        let usage = usage_text();
        let positions: Vec<_> = COMMANDS
            .iter()
            .map(|cmd| usage.find(&format!("    {:<14}", cmd.name())).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_listing_follows_any_registration_order() {
        let mut registry: Vec<Command> = COMMANDS.to_vec();
        for shift in 0..registry.len() {
            registry.rotate_left(1);
            if shift % 2 == 1 {
                registry.swap(0, 1);
            }
            let usage = usage_for(&registry);
            let positions: Vec<_> = registry
                .iter()
                .map(|cmd| usage.find(&format!("    {:<14}", cmd.name())).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_first_duplicate_wins() {
        let mut registry: Vec<Command> = COMMANDS.to_vec();
        let mut shadow = *find("list").unwrap();
        shadow.short = "shadowed";
        registry.push(shadow);
        assert_eq!(find_in(&registry, "list").unwrap().short, COMMANDS[5].short);
    }

    #[test]
    fn test_unknown_name_has_no_command() {
        assert!(find("deploy").is_none());
        assert!(find("").is_none());
    }

    #[derive(Parser, Debug)]
    struct Sample {
        #[clap(long)]
        json: bool,
        name: Option<String>,
    }

    #[test]
    fn test_parse_args_uses_its_own_namespace() {
        let parsed: Sample = parse_args("sample", &["--json".into(), "x".into()]).unwrap();
        assert!(parsed.json);
        assert_eq!(parsed.name.as_deref(), Some("x"));

        let err = parse_args::<Sample>("sample", &["-a".into()]).unwrap_err();
        assert!(matches!(
            err,
            HkError::UnrecognizedArgument { ref arg, ref command } if arg == "-a" && command == "sample"
        ));
        assert_eq!(
            err.to_string(),
            "Unrecognized argument '-a'. See 'hk help sample'"
        );
    }

    #[test]
    fn test_parse_args_extra_positional_is_unrecognized() {
        let err = parse_args::<Sample>("sample", &["x".into(), "y".into()]).unwrap_err();
        assert!(matches!(
            err,
            HkError::UnrecognizedArgument { ref arg, ref command } if arg == "y" && command == "sample"
        ));
    }

    #[test]
    fn test_help_flags_are_unrecognized() {
        for flag in ["-h", "--help"] {
            let err = parse_args::<Sample>("sample", &[flag.into()]).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Unrecognized argument '{flag}'. See 'hk help sample'")
            );
        }

        let err = parse_args::<version::Args>(version::USAGE, &["--help".into()]).unwrap_err();
        assert!(matches!(
            err,
            HkError::UnrecognizedArgument { ref arg, ref command } if arg == "--help" && command == "version"
        ));
    }

    #[test]
    fn test_missing_required_value_is_invalid() {
        let err = parse_args::<get::Args>(get::USAGE, &[]).unwrap_err();
        assert!(matches!(err, HkError::InvalidArguments(ref command) if command == "get"));
    }
}
