//! mcqsplit CLI - multiple-choice question segmentation tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use mcqsplit::render::{self, presentation_name};
use mcqsplit::{
    batch, segment_document, JsonFormat, JsonSource, LineClass, ManifestOptions, PageSelection,
    SegmentOptions, Segmentation, Segmenter, SlideManifest, TextSource,
};

#[derive(Parser)]
#[command(name = "mcqsplit")]
#[command(version)]
#[command(about = "Split multiple-choice exam papers into per-question crop regions", long_about = None)]
struct Cli {
    /// Extractor output (JSON) for one paper
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment one paper
    Split {
        /// Extractor output (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,

        /// Compact JSON output
        #[arg(long)]
        compact: bool,

        /// Auto-advance each question slide after N seconds (manifest only)
        #[arg(short, long, value_name = "N")]
        seconds: Option<u32>,

        /// Rasterization resolution for pixel crops (manifest only)
        #[arg(long, default_value = "200")]
        dpi: u32,

        /// Page range by page index (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Leading pages treated as front matter
        #[arg(long, default_value = "1", value_name = "N")]
        skip: u32,

        /// Fail on the first question whose crop cannot be resolved
        #[arg(long)]
        strict: bool,
    },

    /// Segment every JSON file in a directory
    Batch {
        /// Directory of extractor outputs
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory for slide manifests
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Auto-advance each question slide after N seconds
        #[arg(short, long, value_name = "N")]
        seconds: Option<u32>,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Print how every line was classified
    Trace {
        /// Extractor output (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Leading pages treated as front matter
        #[arg(long, default_value = "1", value_name = "N")]
        skip: u32,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Full segmentation as JSON
    Json,
    /// Human-readable summary
    Text,
    /// Slide manifest for the presentation builder
    Manifest,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Split {
            input,
            output,
            format,
            compact,
            seconds,
            dpi,
            pages,
            skip,
            strict,
        }) => {
            let split = SplitArgs {
                format,
                compact,
                seconds,
                dpi,
                pages,
                skip,
                strict,
            };
            cmd_split(&input, output.as_deref(), &split)
        }
        Some(Commands::Batch {
            input,
            output,
            seconds,
            sequential,
        }) => cmd_batch(&input, output.as_deref(), seconds, sequential),
        Some(Commands::Trace { input, skip }) => cmd_trace(&input, skip),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: split if input is provided
            if let Some(input) = cli.input {
                cmd_split(&input, None, &SplitArgs::default())
            } else {
                println!("{}", "Usage: mcqsplit <FILE>".yellow());
                println!("       mcqsplit --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

struct SplitArgs {
    format: Format,
    compact: bool,
    seconds: Option<u32>,
    dpi: u32,
    pages: Option<String>,
    skip: u32,
    strict: bool,
}

impl Default for SplitArgs {
    fn default() -> Self {
        Self {
            format: Format::Json,
            compact: false,
            seconds: None,
            dpi: 200,
            pages: None,
            skip: 1,
            strict: false,
        }
    }
}

fn cmd_split(
    input: &Path,
    output: Option<&Path>,
    args: &SplitArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = SegmentOptions::new().with_front_matter(args.skip);
    if args.strict {
        options = options.strict();
    }
    if let Some(pages) = &args.pages {
        let selection = PageSelection::parse(pages).map_err(mcqsplit::Error::InvalidPageRange)?;
        options = options.with_pages(selection);
    }

    let doc = JsonSource::open(input)?.load()?;
    let seg = segment_document(&doc, options)?;

    let json_format = if args.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let rendered = match args.format {
        Format::Json => render::to_json(&seg, json_format)?,
        Format::Text => render::to_text(&seg)?,
        Format::Manifest => {
            let manifest = SlideManifest::build(&seg, &manifest_options(args.dpi, args.seconds))?;
            manifest.to_json(json_format)?
        }
    };

    if let Some(path) = output {
        fs::write(path, &rendered)?;
        println!("{} {}", "Saved to".green(), path.display());
        print_summary(&seg);
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: Option<&Path>,
    seconds: Option<u32>,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let name = input.file_name().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_slides", name))
    });
    let manifest_options = manifest_options(200, seconds);
    manifest_options.validate()?;

    fs::create_dir_all(&output_dir)?;
    log::debug!("Writing manifests to {}", output_dir.display());

    let paths = batch::json_files(input)?;
    if paths.is_empty() {
        println!("{} {}", "No JSON files in".yellow(), input.display());
        return Ok(());
    }

    let options = SegmentOptions::new().with_parallel(!sequential);

    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Segmenting...");

    // Segment in chunks so the bar moves while the pool works.
    let chunk = if sequential { 1 } else { chunk_size() };
    let mut items = Vec::with_capacity(paths.len());
    for group in paths.chunks(chunk) {
        items.extend(batch::segment_files(group, &options));
        pb.inc(group.len() as u64);
    }
    pb.finish_with_message("Done!");

    let mut written = 0usize;
    let mut failed = 0usize;
    println!("\n{}", "Results:".green().bold());
    for item in &items {
        let name = item.path.file_name().unwrap_or_default().to_string_lossy();
        match &item.result {
            Ok(seg) => {
                let manifest = SlideManifest::build(seg, &manifest_options)?;
                let stem = item.path.file_stem().unwrap_or_default().to_string_lossy();
                let target = output_dir.join(format!("{}{}", stem, batch::MANIFEST_SUFFIX));
                fs::write(&target, manifest.to_json(JsonFormat::Pretty)?)?;
                written += 1;
                println!(
                    "  {} {} ({} questions, {} failures) -> {}",
                    "✓".green(),
                    name,
                    seg.question_count(),
                    seg.failures.len(),
                    manifest.presentation
                );
            }
            Err(e) => {
                failed += 1;
                println!("  {} {}: {}", "✗".red(), name, e);
            }
        }
    }

    println!();
    println!(
        "{} {} written, {} failed, output in {}",
        "Summary:".bold(),
        written,
        failed,
        output_dir.display()
    );

    Ok(())
}

fn cmd_trace(input: &Path, skip: u32) -> Result<(), Box<dyn std::error::Error>> {
    let doc = JsonSource::open(input)?.load()?;
    let segmenter = Segmenter::new(SegmentOptions::new().with_front_matter(skip));

    println!("{}", "Line Classification".cyan().bold());
    println!("{}", "─".repeat(60).dimmed());

    for traced in segmenter.trace(&doc) {
        let label = match traced.class {
            LineClass::NewQuestion { number, .. } => pad(format!("Q{}", number)).green().bold(),
            LineClass::Choice { weight } => pad(format!("opt+{}", weight)).cyan(),
            LineClass::Body {
                stray_number: Some(n),
            } => pad(format!("body#{}", n)).yellow(),
            LineClass::Body { stray_number: None } => pad("body".to_string()).normal(),
            LineClass::Noise { .. } => pad("noise".to_string()).dimmed(),
        };
        println!(
            "{:>3} {:>7.1}  {} {}",
            traced.page, traced.top, label, traced.text
        );
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "mcqsplit".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Multiple-choice question segmentation tool");
    println!();
    println!("License: MIT");
}

fn manifest_options(dpi: u32, seconds: Option<u32>) -> ManifestOptions {
    let mut options = ManifestOptions::new().with_dpi(dpi);
    if let Some(seconds) = seconds {
        options = options.with_seconds(seconds);
    }
    options
}

fn print_summary(seg: &Segmentation) {
    let name = seg.source.as_deref().map(presentation_name);
    println!(
        "{}: {} questions, {} regions{}",
        "Segmented".bold(),
        seg.question_count(),
        seg.regions.len(),
        name.map(|n| format!(" ({})", n)).unwrap_or_default()
    );
    for failure in &seg.failures {
        println!(
            "  {} Q{} (page {}): {}",
            "!".yellow(),
            failure.number,
            failure.page,
            failure.error
        );
    }
}

fn pad(label: String) -> String {
    format!("{:<8}", label)
}

fn chunk_size() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}
