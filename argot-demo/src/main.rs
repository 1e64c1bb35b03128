use std::{
    env::{self, VarError},
    io,
    process::ExitCode,
};

use anyhow::Context;
use argot::{Parser, Rejection, Requirement, Settings, one_of, range};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Columns to wrap the usage message to, from `ARGOT_DEMO_WIDTH`
fn wrap_width() -> anyhow::Result<Option<usize>> {
    match env::var("ARGOT_DEMO_WIDTH") {
        Err(VarError::NotPresent) => Ok(None),
        Err(err) => Err(err).context("couldn't read ARGOT_DEMO_WIDTH"),
        Ok(width) => width
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("ARGOT_DEMO_WIDTH should be a column count, not {width:?}")),
    }
}

fn build_parser() -> anyhow::Result<Parser> {
    let mut parser = Parser::with_settings(Settings {
        program_name: Some("sample".to_owned()),
        footer: "filename ...".to_owned(),
        wrap_width: wrap_width()?,
        ..Settings::default()
    });

    parser
        .add_option::<String>(
            "host",
            Some('h'),
            "host name",
            Requirement::Mandatory,
            String::new(),
        )?
        .add_option_with(
            "port",
            Some('p'),
            "port number",
            Requirement::Optional,
            80,
            range(1, 65535),
        )?
        .add_option_with(
            "type",
            Some('t'),
            "protocol type",
            Requirement::Optional,
            "http".to_owned(),
            one_of(["http", "https", "ssh", "ftp"].map(String::from)),
        )?
        .add_flag("gzip", None, "gzip when transfer")?
        .add_flag("help", None, "print this message")?;

    Ok(parser)
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let mut parser = build_parser()?;

    let args = env::args_os().map(|arg| arg.to_string_lossy().into_owned());

    if let Err(rejection) = parser.parse_checked(args) {
        debug!(?rejection, "command line rejected");

        return Ok(match rejection {
            Rejection::Help { usage } => {
                eprint!("{usage}");
                ExitCode::SUCCESS
            }
            rejection @ Rejection::Invalid { .. } => {
                eprintln!("{rejection}");
                eprint!("{}", rejection.usage());
                ExitCode::FAILURE
            }
        });
    }

    let kind: String = parser.get("type")?;
    let host: String = parser.get("host")?;
    let port: i32 = parser.get("port")?;

    println!("{kind}://{host}:{port}");

    if parser.exists("gzip")? {
        println!("gzip");
    }

    for item in parser.rest() {
        println!("- {item}");
    }

    Ok(ExitCode::SUCCESS)
}
