use anyhow::Result;
use clap::{
    error::{ContextKind, ContextValue},
    Parser,
};

use crate::{
    commands::{self, Command, Context, Outcome, COMMANDS},
    config::Configs,
    errors::HkError,
};

/// Global options. Everything from the first positional on belongs to the command.
#[derive(Parser, Debug)]
#[command(
    name = "hk",
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true
)]
pub struct GlobalArgs {
    /// App to act on
    #[arg(short = 'a', default_value = "")]
    pub app: String,

    /// Print debug logs to stderr
    #[arg(long)]
    pub debug: bool,

    /// Command name followed by its own arguments
    #[arg(trailing_var_arg = true, num_args = 1..)]
    pub command: Vec<String>,
}

impl GlobalArgs {
    pub fn parse_argv<I, T>(argv: I) -> Result<Self, HkError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(argv).map_err(|err| {
            let arg = match err.get(ContextKind::InvalidArg) {
                Some(ContextValue::String(arg)) => arg.clone(),
                _ => err.kind().to_string(),
            };
            HkError::InvalidGlobalOption(arg)
        })
    }
}

/// Work that runs after a command finished normally.
#[allow(async_fn_in_trait)]
pub trait Maintenance {
    async fn run(&self);
}

pub async fn exec_cli(
    global: GlobalArgs,
    configs: Configs,
    maintenance: &impl Maintenance,
) -> Result<Outcome> {
    exec_with(COMMANDS, global, configs, maintenance).await
}

async fn exec_with(
    registry: &[Command],
    global: GlobalArgs,
    configs: Configs,
    maintenance: &impl Maintenance,
) -> Result<Outcome> {
    let ctx = Context::new(configs, global.app);
    let (name, args) = global
        .command
        .split_first()
        .ok_or(HkError::MissingCommand)?;
    let command = commands::find_in(registry, name)
        .ok_or_else(|| HkError::UnknownCommand(name.clone()))?;

    tracing::debug!(command = command.name(), "dispatching");
    let outcome = (command.run)(&ctx, args.to_vec()).await?;

    // Handlers that asked to exit skip maintenance, as do failures above.
    if outcome == Outcome::Completed {
        maintenance.run().await;
    }
    Ok(outcome)
}

/// What the top level writes for a failed run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub stdout: Option<String>,
    pub stderr: String,
}

pub fn report(err: &anyhow::Error) -> Report {
    let mut report = Report {
        stderr: format!("Error: {err:#}\n"),
        ..Default::default()
    };
    if let Some(hk_err) = err.downcast_ref::<HkError>() {
        if let HkError::UnexpectedStatus { response } = hk_err {
            report.stdout = Some(response.clone());
        }
        if hk_err.is_usage() {
            report.stderr.push_str(&commands::usage_text());
        }
    }
    report
}
