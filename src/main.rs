use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use tracing::info;

use brace_prune::{resolve_targets_path, PruneConfig, RemovalReport, TargetKind};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReportFormat {
    None,
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "brace-prune",
    about = "Remove named interface blocks and object entries from a source file",
    version
)]
struct Cli {
    /// File to prune.
    input: PathBuf,

    /// Write the pruned text here instead of stdout.
    #[arg(short, long, conflicts_with = "in_place")]
    output: Option<PathBuf>,

    /// Overwrite the input file.
    #[arg(long)]
    in_place: bool,

    /// Interface block to remove (repeatable).
    #[arg(short, long = "interface", value_name = "NAME")]
    interfaces: Vec<String>,

    /// Object-literal method entry to remove (repeatable).
    #[arg(short, long = "method", value_name = "NAME")]
    methods: Vec<String>,

    /// Field line to remove (repeatable).
    #[arg(short, long = "field", value_name = "NAME")]
    fields: Vec<String>,

    /// Targets file (.json or plain list). Also reads BRACE_PRUNE_TARGETS.
    #[arg(short, long)]
    targets: Option<String>,

    /// Extra keyword that opens an interface-style block, e.g. `type` or `enum`.
    #[arg(long = "keyword", value_name = "KW")]
    keywords: Vec<String>,

    /// How to print the removal report on stderr.
    #[arg(long, value_enum, default_value = "text")]
    report: ReportFormat,

    /// Only print the report; write nothing.
    #[arg(long)]
    dry_run: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn print_report(report: &RemovalReport, format: ReportFormat) -> anyhow::Result<()> {
    let mut err = io::stderr().lock();
    match format {
        ReportFormat::None => {}
        ReportFormat::Text => {
            for r in report.iter() {
                let comment = if r.leading_comment { " (+comment)" } else { "" };
                writeln!(
                    err,
                    "removed {} `{}` lines {}-{}{}",
                    r.kind,
                    r.name,
                    r.start + 1,
                    r.end + 1,
                    comment
                )?;
            }
            writeln!(
                err,
                "{} block(s), {} line(s) removed",
                report.len(),
                report.lines_removed()
            )?;
        }
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut err, report)?;
            writeln!(err)?;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let has_cli_targets =
        !(cli.interfaces.is_empty() && cli.methods.is_empty() && cli.fields.is_empty());
    let mut config = match resolve_targets_path(cli.targets.as_deref(), !has_cli_targets) {
        Some(path) => {
            info!(path = %path.display(), "loading targets");
            PruneConfig::load(&path)
                .with_context(|| format!("failed to load targets from {}", path.display()))?
        }
        None => PruneConfig::default(),
    };
    config.extend_targets(TargetKind::InterfaceBlock, &cli.interfaces);
    config.extend_targets(TargetKind::MethodEntry, &cli.methods);
    config.extend_targets(TargetKind::FieldLine, &cli.fields);
    for kw in cli.keywords {
        if !config.syntax.keywords.contains(&kw) {
            config.syntax.keywords.push(kw);
        }
    }

    if config.targets.is_empty() {
        bail!("no targets given; use -i/-m/-f or --targets");
    }

    let session = config.into_session().context("invalid target set")?;

    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let outcome = session
        .run_text(&text)
        .with_context(|| format!("failed to prune {}", cli.input.display()))?;

    print_report(&outcome.report, cli.report)?;

    if cli.dry_run {
        return Ok(());
    }

    let pruned = outcome.text();
    let destination = if cli.in_place {
        Some(cli.input.clone())
    } else {
        cli.output
    };
    match destination {
        Some(path) => {
            fs::write(&path, pruned)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote pruned output");
        }
        None => {
            io::stdout().lock().write_all(pruned.as_bytes())?;
        }
    }

    Ok(())
}
