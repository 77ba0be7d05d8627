use std::io::Write;

use anyhow::{Context, anyhow};
use clap::Parser;
use hreinn::http::status::{HTTP_1_1, reason_phrase_for};
use hreinn::{Date, Header, Response, Status};
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl Level {
    fn as_level_filter(&self) -> LevelFilter {
        match self {
            Self::Trace => LevelFilter::TRACE,
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warn => LevelFilter::WARN,
            Self::Error => LevelFilter::ERROR,
            Self::Off => LevelFilter::OFF,
        }
    }
}

/// Render an HTTP/1.1 response to stdout.
#[derive(Parser, Debug)]
#[command(name = "hreinn", version, about)]
struct Args {
    #[arg(long, default_value = HTTP_1_1)]
    http_version: String,

    #[arg(long, default_value_t = 200)]
    code: u16,

    /// Reason phrase. Defaults to the registered phrase for the code.
    #[arg(long)]
    reason: Option<String>,

    /// Header field as "Name: value". Repeatable.
    #[arg(short = 'H', long = "header", value_name = "FIELD")]
    headers: Vec<String>,

    #[arg(long, default_value = "")]
    body: String,

    /// Add a Date field with the current time.
    #[arg(long)]
    date: bool,

    /// Add a Content-Length field computed from the body.
    #[arg(long)]
    content_length: bool,

    #[arg(long, value_enum, default_value_t = Level::Warn)]
    log_level: Level,
}

fn parse_field(field: &str) -> anyhow::Result<(&str, &str)> {
    let (name, value) = field
        .split_once(':')
        .ok_or_else(|| anyhow!("Invalid header field: {:?}", field))?;
    Ok((name.trim_ascii(), value.trim_ascii()))
}

fn build_response(args: &Args) -> anyhow::Result<Response> {
    let reason = args
        .reason
        .clone()
        .unwrap_or_else(|| reason_phrase_for(args.code).unwrap_or_default().to_string());
    let status = Status::with_reason(&args.http_version, args.code, reason);

    let header = args
        .headers
        .iter()
        .map(|f| parse_field(f))
        .collect::<anyhow::Result<Header>>()?;

    let mut response = Response::from_parts(status, header, &args.body);
    if args.date {
        response.set_date(Date::now());
    }
    if args.content_length {
        response.set_content_length();
    }
    Ok(response)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level.as_level_filter())
        .with_writer(std::io::stderr)
        .init();

    let response = build_response(&args)?;
    tracing::info!(
        status = %response.status(),
        fields = response.header().len(),
        "rendering response"
    );

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&response.encode())
        .context("Can't write response")?;
    stdout.flush().context("Can't flush stdout")?;
    Ok(())
}
