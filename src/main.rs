//! reqkit - command-line HTTP client with saved, named requests
//!
//! Each invocation prepares one request (a literal URL or a saved request),
//! sends it and renders the response to the configured destination.

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

use reqkit::app::{self, ConfigTarget};
use reqkit::cli::{Cli, Command, ConfigCommand, RequestArgs};
use reqkit::config::{ConfigContext, Paths};
use reqkit::constants::LOG_FILE_NAME;
use reqkit::models::HttpMethod;

/// Log to a file in the config directory. Nothing is logged when the
/// directory cannot be created.
fn init_logging(paths: &Paths) -> Option<WorkerGuard> {
    if let Err(e) = paths.ensure_dir() {
        eprintln!("could not create {}: {}", paths.dir().display(), e);
        return None;
    }
    let file_appender = tracing_appender::rolling::never(paths.dir(), LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    Some(guard)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let paths = Paths::new()?;
    let _guard = init_logging(&paths);
    let ctx = ConfigContext::load(paths)?;

    match &cli.command {
        Command::Config(cmd) => run_config(cmd, &ctx),
        command => {
            if let Some((method, args)) = command.request() {
                run_request(method, args, &ctx).await;
            }
            Ok(())
        }
    }
}

/// Request-level failures are reported and end the command without a
/// failing exit status.
async fn run_request(method: HttpMethod, args: &RequestArgs, ctx: &ConfigContext) {
    let spec = match args.to_spec(method) {
        Ok(spec) => spec,
        Err(e) => {
            eprintln!("err reading body file: {}", e);
            return;
        }
    };

    tracing::info!(%method, target = %args.target, "request command");
    if let Err(e) = app::send(spec, ctx).await {
        eprintln!("{}", e);
    }
}

fn run_config(cmd: &ConfigCommand, ctx: &ConfigContext) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Where => print!("{}", app::config_locations(&ctx.paths)),
        ConfigCommand::List => match app::config_contents(&ctx.paths) {
            Ok(contents) => println!("{}", contents),
            Err(e) => println!("{}", e),
        },
        ConfigCommand::Open { target, editor } => {
            app::open_config(ConfigTarget::from(*target), editor.as_deref(), ctx)?
        }
    }
    Ok(())
}
