//! pdf-outline CLI - PDF heading outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf_outline::batch::{output_path_for, FileFailure};
use pdf_outline::{
    resolve_directories, to_json, validate_outline_json, BatchEvent, BatchObserver,
    BatchProcessor, BatchReport, DirectoryCandidates, HeadingLevel, JsonFormat, LogObserver,
    OutlineExtractor, OutlineOptions, OutlineResult,
};

#[derive(Parser)]
#[command(name = "pdf-outline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract title and H1-H3 heading outlines from PDFs", long_about = None)]
struct Cli {
    /// Input PDF file or directory
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output JSON file (for a PDF input) or directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Extraction settings shared by every command.
#[derive(Args, Clone)]
struct Settings {
    /// Output compact JSON
    #[arg(long, global = true)]
    compact: bool,

    /// Process files one at a time
    #[arg(long, global = true)]
    sequential: bool,

    /// Skip unreadable pages instead of failing the document
    #[arg(long, global = true)]
    lenient: bool,

    /// Minimum heading length in characters
    #[arg(long, global = true, default_value_t = pdf_outline::outline::DEFAULT_MIN_HEADING_LENGTH)]
    min_heading_length: usize,

    /// Maximum heading length in characters
    #[arg(long, global = true, default_value_t = pdf_outline::outline::DEFAULT_MAX_HEADING_LENGTH)]
    max_heading_length: usize,
}

impl Settings {
    fn options(&self) -> OutlineOptions {
        let mut options = OutlineOptions::new()
            .with_min_heading_length(self.min_heading_length)
            .with_max_heading_length(self.max_heading_length);
        if self.lenient {
            options = options.lenient();
        }
        if self.sequential {
            options = options.sequential();
        }
        options
    }

    fn format(&self) -> JsonFormat {
        if self.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        }
    }

    fn processor(&self) -> BatchProcessor {
        BatchProcessor::new(OutlineExtractor::new(self.options())).with_format(self.format())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the outline of a single PDF
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Extract outlines of every PDF in a directory
    Batch {
        /// Input directory (defaults to /app/input, then ./data)
        #[arg(value_name = "INPUT_DIR", env = "PDF_OUTLINE_INPUT_DIR")]
        input: Option<PathBuf>,

        /// Output directory (defaults to the input's paired directory)
        #[arg(value_name = "OUTPUT_DIR", env = "PDF_OUTLINE_OUTPUT_DIR")]
        output: Option<PathBuf>,
    },

    /// Validate an outline JSON file
    Check {
        /// Outline JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = cli.settings;

    let result = match cli.command {
        Some(Commands::Extract { input, output }) => {
            cmd_extract(&input, output.as_deref(), &settings)
        }
        Some(Commands::Batch { input, output }) => {
            cmd_batch(input.as_deref(), output.as_deref(), &settings)
        }
        Some(Commands::Check { input }) => cmd_check(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => match cli.input {
            Some(input) if input.is_file() => {
                cmd_extract(&input, cli.output.as_deref(), &settings)
            }
            input => cmd_batch(input.as_deref(), cli.output.as_deref(), &settings),
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let processor = settings.processor();

    match output {
        Some(output) => {
            let output = if output.is_dir() {
                output_path_for(input, output)
            } else {
                output.to_path_buf()
            };
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }

            let outcome = processor.process_file(input, &output)?;
            println!(
                "{} {} -> {} ({} headings)",
                "Extracted".green().bold(),
                input.display(),
                outcome.output.display(),
                outcome.headings
            );
        }
        None => {
            let outline = processor.extractor().extract_file(input);
            println!("{}", to_json(&outline, settings.format())?);
        }
    }

    Ok(())
}

fn cmd_batch(
    input: Option<&Path>,
    output: Option<&Path>,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let (input_dir, output_dir) = match (input, output) {
        (Some(input), Some(output)) => (input.to_path_buf(), output.to_path_buf()),
        (Some(input), None) => (input.to_path_buf(), input.to_path_buf()),
        (None, output) => {
            let resolved = resolve_directories(&DirectoryCandidates::default())?;
            let output = output.map(Path::to_path_buf).unwrap_or(resolved.output);
            (resolved.input, output)
        }
    };
    log::debug!(
        "Batch input {} -> output {}",
        input_dir.display(),
        output_dir.display()
    );

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    let observer = ProgressObserver { pb: pb.clone() };

    let report = settings
        .processor()
        .process_directory(&input_dir, &output_dir, &observer)?;
    pb.finish_and_clear();

    print_report(&report, &output_dir);
    Ok(())
}

/// Drives the progress bar and forwards events to the log.
struct ProgressObserver {
    pb: ProgressBar,
}

impl BatchObserver for ProgressObserver {
    fn on_event(&self, event: &BatchEvent) {
        match event {
            BatchEvent::Started { total, .. } => self.pb.set_length(*total as u64),
            BatchEvent::FileDone(outcome) => {
                self.pb.set_message(
                    outcome
                        .input
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                );
                self.pb.inc(1);
            }
            BatchEvent::FileFailed(_) => self.pb.inc(1),
            _ => {}
        }
        self.pb.suspend(|| LogObserver.on_event(event));
    }
}

fn print_report(report: &BatchReport, output_dir: &Path) {
    if report.total() == 0 {
        println!("{}", "No PDF files found".yellow());
        return;
    }

    let summary = format!(
        "Successfully processed {}/{} files",
        report.success_count(),
        report.total()
    );
    if report.all_succeeded() {
        println!("{}", summary.green().bold());
    } else {
        println!("{}", summary.yellow().bold());
        for FileFailure { input, message, .. } in &report.failed {
            println!("  {} {}: {}", "✗".red(), input.display(), message);
        }
    }
    println!("Output: {}", output_dir.display().to_string().dimmed());
}

fn cmd_check(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let json = fs::read_to_string(input)?;
    validate_outline_json(&json)?;

    let outline: OutlineResult = serde_json::from_str(&json)?;
    println!("{} {}", "Valid".green().bold(), input.display());
    println!("{}: {}", "Title".bold(), outline.title);
    for level in HeadingLevel::ALL {
        println!("{}: {}", level.as_str().bold(), outline.count_level(level));
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdf-outline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF heading outline extraction tool");
    println!();
    println!("License: MIT");
}
