//! olx2pl CLI - OLX course export converter

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use olx2pl::convert::{ProblemArtifacts, ProblemConverter, ANSWER_KEY_FILE, QUESTION_MARKUP_FILE};
use olx2pl::observe::{CompositeObserver, ConversionEvent, ConversionObserver, LogObserver};
use olx2pl::model::Prompt;
use olx2pl::render::select_prompt;
use olx2pl::{
    classify, detect_kind, parse_file, ConversionReport, ConvertOptions, CourseConverter,
    JsonFormat, MarkerCounts, OlxKind, RenderOptions, Verbosity,
};

#[derive(Parser)]
#[command(name = "olx2pl")]
#[command(version)]
#[command(about = "Convert OLX course exports into PrairieLearn questions", long_about = None)]
struct Cli {
    /// Input chapter or problem file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT", env = "OLX2PL_OUTPUT")]
    output: Option<PathBuf>,

    /// Increase log detail (-v for progress, -vv for details)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Submissions after which hints are revealed
    #[arg(long, value_name = "N", env = "OLX2PL_HINT_AFTER", global = true)]
    hint_after: Option<u32>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single problem
    Problem {
        /// Input problem file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory (stdout if not specified)
        #[arg(short, long, value_name = "DIR", env = "OLX2PL_OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Convert a chapter into an assessment
    Chapter {
        /// Input chapter file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output base directory
        #[arg(short, long, value_name = "DIR", env = "OLX2PL_OUTPUT")]
        output: Option<PathBuf>,

        /// Directory holding sequential/, vertical/ and problem/
        #[arg(long, value_name = "DIR")]
        course_root: Option<PathBuf>,

        /// Write a JSON conversion report
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,

        /// Write compact JSON metadata
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input OLX file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

/// Settings shared by every subcommand.
struct Globals {
    verbosity: Verbosity,
    hint_after: Option<u32>,
}

impl Globals {
    fn convert_options(&self) -> ConvertOptions {
        let mut render = RenderOptions::new();
        if let Some(n) = self.hint_after {
            render = render.with_hint_after(n);
        }
        ConvertOptions::new()
            .with_render_options(render)
            .with_verbosity(self.verbosity)
    }
}

fn init_logging(verbosity: Verbosity, quiet: bool) {
    let level = if quiet { "error" } else { verbosity.log_filter() };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let verbosity = Verbosity::from_count(cli.verbose);
    init_logging(verbosity, cli.quiet);

    let globals = Globals {
        verbosity,
        hint_after: cli.hint_after,
    };

    let result = match cli.command {
        Some(Commands::Problem { input, output }) => {
            cmd_problem(&globals, &input, output.as_deref())
        }
        Some(Commands::Chapter {
            input,
            output,
            course_root,
            report,
            compact,
        }) => cmd_chapter(
            &globals,
            &input,
            &output.unwrap_or_else(|| default_output(&input)),
            course_root.as_deref(),
            report.as_deref(),
            compact,
        ),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert according to the detected kind
            if let Some(input) = cli.input {
                cmd_auto(&globals, &input, cli.output)
            } else {
                println!("{}", "Usage: olx2pl <FILE> [OUTPUT]".yellow());
                println!("       olx2pl --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    PathBuf::from(format!("{}_output", stem))
}

fn cmd_auto(
    globals: &Globals,
    input: &Path,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output.unwrap_or_else(|| default_output(input));
    let doc = parse_file(input)?;

    match detect_kind(&doc) {
        OlxKind::Chapter => cmd_chapter(globals, input, &output, None, None, false),
        OlxKind::Problem => cmd_problem(globals, input, Some(&output)),
        kind => Err(format!(
            "{} is a <{}> document; expected a chapter or a problem",
            input.display(),
            kind
        )
        .into()),
    }
}

fn cmd_problem(
    globals: &Globals,
    input: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let converter = ProblemConverter::new(globals.convert_options());
    let mut observer = LogObserver::new(globals.verbosity);
    let result = converter.convert_file(input, &mut observer)?;
    let shape = result.shape;

    match output {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let has_key = result.answer_key.is_some();
            ProblemArtifacts::new(result).write_to(dir, JsonFormat::Pretty)?;

            println!("{} {} ({})", "Converted".green(), input.display(), shape);
            println!("\n{}", "Output files:".green().bold());
            if has_key {
                println!("  {} {}", "├─".dimmed(), QUESTION_MARKUP_FILE);
                println!("  {} {}", "└─".dimmed(), ANSWER_KEY_FILE);
            } else {
                println!("  {} {}", "└─".dimmed(), QUESTION_MARKUP_FILE);
            }
        }
        None => {
            println!("{}", result.question_markup);
            if let Some(key) = result.answer_key {
                println!("{}", format!("# {}", ANSWER_KEY_FILE).dimmed());
                println!("{}", key);
            }
        }
    }

    Ok(())
}

/// Advances a spinner as problems are written or skipped.
struct ProgressObserver<'a> {
    pb: &'a ProgressBar,
}

impl ConversionObserver for ProgressObserver<'_> {
    fn on_event(&mut self, event: &ConversionEvent) {
        match event {
            ConversionEvent::Started { source } => self.pb.set_message(source.clone()),
            ConversionEvent::ProblemWritten { .. } | ConversionEvent::ProblemSkipped { .. } => {
                self.pb.inc(1)
            }
            _ => {}
        }
    }
}

fn cmd_chapter(
    globals: &Globals,
    input: &Path,
    output: &Path,
    course_root: Option<&Path>,
    report_path: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let mut converter = CourseConverter::new(globals.convert_options().with_json_format(format));
    if let Some(root) = course_root {
        converter = converter.with_course_root(root);
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{pos}] {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(120));

    let mut log_observer = LogObserver::new(globals.verbosity);
    let mut progress = ProgressObserver { pb: &pb };
    let mut observer = CompositeObserver::new()
        .with_observer(&mut log_observer)
        .with_observer(&mut progress);

    let report = converter.convert_chapter(input, output, &mut observer);
    pb.finish_and_clear();
    let report = report?;

    print_summary(&report);

    if let Some(path) = report_path {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &report)?;
        println!("{} {}", "Report saved to".green(), path.display());
    }

    Ok(())
}

fn print_summary(report: &ConversionReport) {
    let stats = &report.stats;

    println!("{}", report.title.cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Output".bold(), report.output_dir.display());
    println!("{}: {}", "Zones".bold(), stats.zones);
    println!("{}: {}", "Multiple choice".bold(), stats.multiple_choice);
    println!("{}: {}", "Checkbox".bold(), stats.checkbox);
    println!("{}: {}", "Single numeric".bold(), stats.single_numeric);
    println!("{}: {}", "Numeric with lists".bold(), stats.numeric_with_lists);
    println!("{}: {}", "Numeric freeform".bold(), stats.numeric_freeform);

    if report.is_clean() {
        println!(
            "\n{} {} problems converted",
            "Done!".green().bold(),
            stats.converted()
        );
        return;
    }

    println!(
        "\n{} {} converted, {} skipped",
        "Done with warnings.".yellow().bold(),
        stats.converted(),
        stats.skipped
    );
    for skipped in &report.skipped {
        println!(
            "  {} {}: {}",
            "✗".red(),
            skipped.source.display(),
            skipped.reason
        );
    }
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file(input)?;
    let kind = detect_kind(&doc);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Kind".bold(), kind);
    if let Some(name) = doc.attr("display_name") {
        println!("{}: {}", "Display name".bold(), name);
    }
    println!("{}: {}", "Top-level tags".bold(), doc.child_tags().join(", "));

    if kind != OlxKind::Problem {
        return Ok(());
    }

    println!();
    println!("{}", "Problem Analysis".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    match classify(&doc) {
        Ok(shape) => println!("{}: {}", "Shape".bold(), shape),
        Err(e) => println!("{}: {}", "Shape".bold(), e.to_string().red()),
    }

    let counts = MarkerCounts::of(&doc);
    println!("{}: {}", "Numeric markers".bold(), counts.numeric);
    println!("{}: {}", "Lists".bold(), counts.lists);

    let prompt = match select_prompt(&doc, &RenderOptions::default().prompt_rules) {
        Prompt::Label(_) => "label".to_string(),
        Prompt::Paragraphs(paragraphs) => format!("{} paragraph(s)", paragraphs.len()),
        Prompt::Missing => "missing".yellow().to_string(),
    };
    println!("{}: {}", "Prompt".bold(), prompt);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "olx2pl".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("OLX to PrairieLearn converter");
    println!();
    println!("License: MIT");
}
