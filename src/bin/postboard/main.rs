//! postboard: command-line front end for the post store.
//! Drives one `PostStore` per invocation against the configured API and prints JSON.
#![deny(clippy::all, clippy::pedantic)]

mod context;
mod handlers;
mod print;


use std::io;
use std::process;

use postboard::{application::error::AppError, config, infra::telemetry};
use tracing::{Dispatch, Level, dispatcher, error};
use tracing_subscriber::fmt as tracing_fmt;

use context::Ctx;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(error.exit_code());
    }
}

fn report_application_error(error: &AppError) {
    let messages = error.messages();
    if dispatcher::has_been_set() {
        error!(error = %error, chain = ?messages, "application error");
        return;
    }

    // Configuration failed before the subscriber was installed.
    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, chain = ?messages, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;
    telemetry::init(&settings.logging)?;

    let ctx = Ctx::from_settings(&settings)?;
    let mut out = io::stdout().lock();
    handlers::handle(&ctx, cli_args.command, &mut out).await
}
