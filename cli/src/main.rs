//! onepage CLI - fit a Markdown resume onto one page

use std::env;
use std::path::{Path, PathBuf};

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use colored::Colorize;

use onepage::{Error, FitConfig, FitOutcome, OnePage};

const EXIT_OK: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_USAGE: i32 = 2;
const EXIT_EXHAUSTED: i32 = 3;

#[derive(Parser, Debug)]
#[command(name = "onepage")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Fit a Markdown resume onto one page as DOCX and PDF", long_about = None)]
struct Cli {
    /// Markdown resume
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Output DOCX file
    #[arg(value_name = "DOCX")]
    docx: PathBuf,

    /// Output PDF file
    #[arg(value_name = "PDF")]
    pdf: PathBuf,

    /// JSON file with formatting profiles and reduction rules
    #[arg(long, value_name = "FILE", env = "ONEPAGE_CONFIG")]
    config: Option<PathBuf>,

    /// LibreOffice binary to convert with
    #[arg(long, value_name = "PATH", env = "ONEPAGE_SOFFICE")]
    soffice: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                println!("{}", Cli::command().render_usage());
                println!("       onepage --help for more information");
                std::process::exit(EXIT_USAGE);
            }
        },
    };

    std::process::exit(run(cli));
}

fn run(cli: Cli) -> i32 {
    let source = absolute(&cli.source);
    let docx = absolute(&cli.docx);
    let pdf = absolute(&cli.pdf);

    if !source.is_file() {
        println!("{}", Error::SourceNotFound(source));
        return EXIT_FAILURE;
    }

    let config = match cli.config.as_deref().map(FitConfig::load).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => return report_error(&e),
    };

    let mut builder = OnePage::new().with_config(config);
    if let Some(soffice) = cli.soffice {
        builder = builder.with_soffice(absolute(&soffice));
    }

    match builder.fit(&source, &docx, &pdf) {
        Ok(outcome) => report_outcome(&outcome, &docx, &pdf),
        Err(e) => report_error(&e),
    }
}

fn report_outcome(outcome: &FitOutcome, docx: &Path, pdf: &Path) -> i32 {
    match outcome {
        FitOutcome::Fitted {
            attempts,
            profile,
            rule: None,
        } => {
            println!(
                "{} 1 page (no trimming, profile {}). Attempts: {}",
                "OK:".green().bold(),
                profile,
                attempts
            );
        }
        FitOutcome::Fitted {
            attempts,
            profile,
            rule: Some(rule),
        } => {
            println!(
                "{} 1 page after trimming rule: {} (profile {}). Attempts: {}",
                "OK:".green().bold(),
                rule,
                profile,
                attempts
            );
        }
        FitOutcome::Exhausted { attempts, pages } => {
            println!(
                "{}",
                "Could not reach 1 page with current rules.".yellow().bold()
            );
            println!(
                "Last output ({} page(s) after {} attempts) was generated anyway:",
                pages, attempts
            );
            println!("  {} {}", "├─".dimmed(), docx.display());
            println!("  {} {}", "└─".dimmed(), pdf.display());
            println!("Consider trimming one more bullet under IT Support Roles.");
            return EXIT_EXHAUSTED;
        }
    }

    println!("  {} {}", "├─".dimmed(), docx.display());
    println!("  {} {}", "└─".dimmed(), pdf.display());
    EXIT_OK
}

fn report_error(e: &Error) -> i32 {
    eprintln!("{}: {}", "Error".red().bold(), e);
    EXIT_FAILURE
}

/// Resolve `path` against the working directory.
fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}
