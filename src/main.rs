use std::io::Write;

#[macro_use]
mod macros;

mod client;
mod commands;
mod config;
mod consts;
mod credentials;
mod dispatch;
mod entities;
mod errors;
mod logging;
mod netrc;
mod table;
mod updater;

use commands::Outcome;
use config::Configs;
use dispatch::GlobalArgs;
use updater::Updater;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let code = match run().await {
        Ok(Outcome::Completed) => 0,
        Ok(Outcome::Exit(code)) => code,
        Err(e) => {
            let report = dispatch::report(&e);
            if let Some(stdout) = report.stdout {
                println!("{stdout}");
            }
            eprint!("{}", report.stderr);
            1
        }
    };

    let _ = std::io::stdout().flush();
    std::process::exit(code);
}

async fn run() -> anyhow::Result<Outcome> {
    let global = GlobalArgs::parse_argv(std::env::args_os())?;
    logging::init(global.debug);

    let configs = Configs::new()?;
    let updater = Updater::new(&configs);
    dispatch::exec_cli(global, configs, &updater).await
}
