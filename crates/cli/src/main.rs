use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use litterwatch_core::config::Config;
use litterwatch_core::query::ViewMode;
use litterwatch_core::report::{ClipPreview, DashboardView};
use litterwatch_core::session::{CredentialGate, Dashboard, SessionGate};
use litterwatch_core::types::{DerivedStats, Status};

#[derive(Parser, Debug)]
#[command(
    name = "litterwatch",
    version,
    about = "Review vehicle litter-detection events"
)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON file with detections; the built-in sample when omitted
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    #[arg(long, global = true, env = "LITTERWATCH_USERNAME", default_value = "")]
    username: String,

    #[arg(
        long,
        global = true,
        env = "LITTERWATCH_PASSWORD",
        default_value = "",
        hide_env_values = true
    )]
    password: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summary counts and average confidence
    Stats,
    /// Detection log, optionally filtered
    List {
        #[arg(long, default_value = "")]
        search: String,

        /// Calendar date, YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Live detections or review history; the config's default_view when omitted
        #[arg(long)]
        view: Option<ViewArg>,

        /// Status change applied before listing, e.g. 2=verified
        #[arg(long = "set", value_parser = parse_status_update)]
        updates: Vec<(u64, Status)>,

        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Clip preview for one detection
    Preview {
        #[arg(long)]
        id: u64,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ViewArg {
    All,
    Reviewed,
}

impl From<ViewArg> for ViewMode {
    fn from(v: ViewArg) -> Self {
        match v {
            ViewArg::All => ViewMode::All,
            ViewArg::Reviewed => ViewMode::Reviewed,
        }
    }
}

#[derive(Debug, Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Markdown,
}

struct Style {
    bold: &'static str,
    dim: &'static str,
    red: &'static str,
    green: &'static str,
    yellow: &'static str,
    blue: &'static str,
    reset: &'static str,
}

const COLOR: Style = Style {
    bold: "\x1b[1m",
    dim: "\x1b[2m",
    red: "\x1b[31m",
    green: "\x1b[32m",
    yellow: "\x1b[33m",
    blue: "\x1b[34m",
    reset: "\x1b[0m",
};

const PLAIN: Style = Style {
    bold: "",
    dim: "",
    red: "",
    green: "",
    yellow: "",
    blue: "",
    reset: "",
};

fn style() -> &'static Style {
    if std::env::var_os("NO_COLOR").is_some() {
        &PLAIN
    } else {
        &COLOR
    }
}

fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "litterwatch=warn,litterwatch_core=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            let s = style();
            eprintln!(
                "{}{red}error:{reset} {:#}",
                s.bold,
                e,
                red = s.red,
                reset = s.reset
            );
            std::process::ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cfg = load_config(cli.config.as_deref());

    let mut gate = CredentialGate::new(cfg.auth.clone());
    if !gate.login(&cli.username, &cli.password) {
        anyhow::bail!("login failed: invalid username or password");
    }

    let records = match litterwatch_core::load_detections(cli.dataset.as_deref(), &cfg) {
        Ok(records) => records,
        Err(e) => {
            gate.end_session();
            return Err(e);
        }
    };
    tracing::debug!(count = records.len(), view = ?cfg.default_view, "detections ready");

    let mut dash = Dashboard::mount(&gate, records).context("no active session")?;
    dash.set_view(cfg.default_view);

    let res = match cli.cmd {
        Commands::Stats => {
            print_stats(&dash.stats());
            Ok(())
        }
        Commands::List {
            search,
            date,
            view,
            updates,
            format,
        } => {
            for (id, status) in updates {
                if !dash.update_status(id, status) {
                    let s = style();
                    eprintln!(
                        "{}{}warning:{} no detection with id {}",
                        s.bold, s.yellow, s.reset, id
                    );
                }
            }
            dash.set_search(search);
            dash.set_date(date);
            if let Some(view) = view {
                dash.set_view(view.into());
            }
            print_view(&dash.view(), &format)
        }
        Commands::Preview { id } => match dash.preview(id) {
            Some(p) => {
                print_preview(&p);
                Ok(())
            }
            None => Err(anyhow::anyhow!("no detection with id {id}")),
        },
    };

    dash.logout(&mut gate);
    res
}

fn parse_status_update(raw: &str) -> Result<(u64, Status), String> {
    let (id, status) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=STATUS, got {raw:?}"))?;
    let id = id
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("invalid id {id:?}: {e}"))?;
    let status = status.trim().parse::<Status>().map_err(|e| e.to_string())?;
    Ok((id, status))
}

fn load_config(path: Option<&Path>) -> Config {
    match path {
        Some(p) => Config::load(p).unwrap_or_else(|e| {
            eprintln!(
                "{}{}warning:{} failed to load config {}: {:#}",
                style().bold,
                style().yellow,
                style().reset,
                p.display(),
                e
            );
            Config::default()
        }),
        None => Config::discover().unwrap_or_default(),
    }
}

fn status_color(status: &str) -> &'static str {
    let s = style();
    match status {
        "VERIFIED" => s.green,
        "PENDING" => s.yellow,
        "REVIEWED" => s.blue,
        _ => s.dim,
    }
}

fn severity_color(severity: &str) -> &'static str {
    let s = style();
    match severity {
        "HIGH" => s.red,
        "MEDIUM" => s.yellow,
        "LOW" => s.green,
        _ => s.dim,
    }
}

fn print_stats(stats: &DerivedStats) {
    // Machine-parseable line on stdout
    println!(
        "total={} verified={} pending={} avg_confidence={:.1}",
        stats.total, stats.verified, stats.pending, stats.avg_confidence_percent
    );
}

fn print_view(view: &DashboardView, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(view).context("serialize view json")?;
            println!("{json}");
        }
        OutputFormat::Markdown => print!("{}", view.to_markdown()),
        OutputFormat::Table => print_table(view),
    }
    Ok(())
}

fn print_table(view: &DashboardView) {
    let s = style();

    print_stats(&view.stats);
    println!();
    println!(
        "{bold}{:<4} {:<10} {:<8} {:<10} {:<20} {:>5} {:<8} {:<9} CLIP{reset}",
        "ID",
        "DATE",
        "TIME",
        "REG",
        "LOCATION",
        "CONF",
        "SEVERITY",
        "STATUS",
        bold = s.bold,
        reset = s.reset
    );
    if view.rows.is_empty() {
        println!("{dim}(no detections){reset}", dim = s.dim, reset = s.reset);
        return;
    }
    for r in &view.rows {
        println!(
            "{:<4} {:<10} {:<8} {:<10} {:<20} {:>4}% {sc}{:<8}{reset} {tc}{:<9}{reset} {dim}{}{reset}",
            r.id,
            r.date,
            r.time,
            r.registration_number,
            r.location,
            r.confidence_percent,
            r.severity,
            r.status,
            r.clip_reference,
            sc = severity_color(&r.severity),
            tc = status_color(&r.status),
            dim = s.dim,
            reset = s.reset
        );
    }
}

fn print_preview(p: &ClipPreview) {
    let s = style();
    println!("clip={}", p.file_name);
    eprintln!(
        "\n  {bold}Detection video clip{reset}  {dim}#{}{reset}",
        p.detection_id,
        bold = s.bold,
        dim = s.dim,
        reset = s.reset
    );
    eprintln!(
        "  {dim}source   {reset}{}",
        p.clip_reference,
        dim = s.dim,
        reset = s.reset
    );
    eprintln!(
        "  {dim}duration {reset}{} seconds | Format: {}\n",
        p.duration_secs,
        p.format,
        dim = s.dim,
        reset = s.reset
    );
}
