use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use git_sv::config::{self, Config};
use git_sv::pipeline::{split_messages, ReleaseOutcome, ReleasePipeline, ReleaseRequest};
use git_sv::template::{MarkdownRenderer, OutputFormatter};
use git_sv::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-sv",
    version,
    about = "Derive the next semantic version and release notes from conventional commits",
    long_about = "Derive the next semantic version and release notes from conventional commits.\n\n\
                  Commit messages are read from stdin, newest first. Separate full messages \
                  with NUL bytes (git log --format=%B%x00), or pass one subject per line."
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[arg(short, long, global = true, help = "Do not print warnings")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct RangeArgs {
    #[arg(long, help = "Latest existing tag the commits follow")]
    current: Option<String>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print the next version
    NextVersion(RangeArgs),

    /// Print the next tag, formatted with the configured pattern
    NextTag(RangeArgs),

    /// Print release notes for the next release
    ReleaseNotes {
        #[command(flatten)]
        range: RangeArgs,

        #[arg(long, help = "Title the notes with this tag instead of the next tag")]
        tag: Option<String>,

        #[arg(long, value_parser = parse_date, help = "Release date (YYYY-MM-DD), defaults to today")]
        date: Option<NaiveDate>,

        #[arg(long, conflicts_with = "date", help = "Leave the release undated")]
        no_date: bool,

        #[arg(long, help = "Print template variables as JSON instead of Markdown")]
        json: bool,
    },
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn read_messages() -> Result<Vec<String>> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read commit messages from stdin")?;
    Ok(split_messages(&input))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = run(args.command, &config, args.quiet) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
    Ok(())
}

fn run(command: Command, config: &Config, quiet: bool) -> Result<()> {
    let pipeline = ReleasePipeline::new(config)?;

    match command {
        Command::NextVersion(range) => {
            let outcome = pipeline.next_release(&request(range, None, None)?)?;
            report(&outcome, quiet);
            println!("{}", outcome.next_version);
        }
        Command::NextTag(range) => {
            let outcome = pipeline.next_release(&request(range, None, None)?)?;
            report(&outcome, quiet);
            println!("{}", outcome.next_tag);
        }
        Command::ReleaseNotes {
            range,
            tag,
            date,
            no_date,
            json,
        } => {
            // Fail on a missing template before reading any input.
            let formatter =
                OutputFormatter::new(MarkdownRenderer::new(), pipeline.processor().table().clone())?;

            let date = if no_date {
                None
            } else {
                Some(date.unwrap_or_else(|| chrono::Local::now().date_naive()))
            };
            let outcome = pipeline.next_release(&request(range, tag, date)?)?;
            report(&outcome, quiet);

            if json {
                let vars = formatter.template_vars(&outcome.note);
                println!("{}", serde_json::to_string_pretty(&vars)?);
            } else {
                print!("{}", formatter.format_release_note(&outcome.note)?);
            }
        }
    }
    Ok(())
}

fn request(range: RangeArgs, tag: Option<String>, date: Option<NaiveDate>) -> Result<ReleaseRequest> {
    Ok(ReleaseRequest {
        current_tag: range.current,
        tag,
        date,
        messages: read_messages()?,
    })
}

fn report(outcome: &ReleaseOutcome, quiet: bool) {
    if quiet {
        return;
    }
    for warning in &outcome.warnings {
        ui::display_boundary_warning(warning);
    }
    let current = outcome.current_version.as_ref().map(ToString::to_string);
    ui::display_status(&ui::version_change_line(
        current.as_deref(),
        &outcome.next_version.to_string(),
        &outcome.bump.to_string(),
    ));
}
