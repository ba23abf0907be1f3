use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Instant;

use crate::config::{Config, Selection};
use crate::transport::{HttpsTransport, Transport};

mod config;
mod coordinator;
mod error;
mod presenter;
mod record;
mod resolver;
mod transport;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 通过 ident.me 查询本机的公网 IPv4 / IPv6 地址
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 只查询 IPv4
    #[arg(short = '4')]
    ipv4_only: bool,

    /// 只查询 IPv6
    #[arg(short = '6')]
    ipv6_only: bool,

    /// 以 JSON 格式输出
    #[arg(long)]
    json: bool,

    /// 配置文件路径（可选）
    #[arg(short, long)]
    config: Option<String>,
}

impl Args {
    fn selection(&self) -> Result<Selection, &'static str> {
        match (self.ipv4_only, self.ipv6_only) {
            (true, true) => Err("-4 和 -6 不能同时使用"),
            (true, false) => Ok(Selection::V4Only),
            (false, true) => Ok(Selection::V6Only),
            (false, false) => Ok(Selection::Both),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Resolved,
    NothingResolved,
    Usage,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Resolved => ExitCode::SUCCESS,
            Outcome::NothingResolved | Outcome::Usage => ExitCode::FAILURE,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    match run(&args).await {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            eprintln!("错误: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<Outcome, BoxError> {
    let start = Instant::now();

    let selection = match args.selection() {
        Ok(selection) => selection,
        Err(e) => {
            eprintln!("用法错误: {}", e);
            return Ok(Outcome::Usage);
        }
    };

    let config = Config::load(args.config.as_deref())?;
    let transport = HttpsTransport::new(&config)?;

    let mut stdout = io::stdout();
    execute(args.json, selection, &config, &transport, &mut stdout, start).await
}

async fn execute<W: Write>(
    json: bool,
    selection: Selection,
    config: &Config,
    transport: &dyn Transport,
    out: &mut W,
    start: Instant,
) -> Result<Outcome, BoxError> {
    let result = coordinator::resolve_both(
        transport,
        config,
        selection == Selection::V6Only,
        selection == Selection::V4Only,
    )
    .await;

    if json {
        writeln!(out, "{}", presenter::render_json(&result)?)?;
        log::debug!("耗时 {} ms", start.elapsed().as_millis());
    } else {
        write!(out, "{}", presenter::render_text(&result, selection)?)?;
        writeln!(out, "Elapsed time: {} ms", start.elapsed().as_millis())?;
    }
    out.flush()?;

    if result.is_empty() {
        eprintln!("无法获取任何公网地址");
        return Ok(Outcome::NothingResolved);
    }
    Ok(Outcome::Resolved)
}
