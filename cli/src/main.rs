//! artpdf CLI - artwork information extraction from PDF catalogs

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use artpdf::{
    render, ArtworkClassifier, ArtworkPdfExtractor, ErrorMode, ExtractOptions, ExtractionReport,
    ImageExtraction, JsonFormat, KeywordRules,
};

const BYTES_PER_MB: u64 = 1024 * 1024;

#[derive(Parser)]
#[command(name = "artpdf")]
#[command(version)]
#[command(
    about = "Extract text, images and artwork information from PDF catalogs",
    long_about = None
)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Settings shared by every command.
#[derive(Args, Clone)]
struct Settings {
    /// Entity model file (JSON lexicon)
    #[arg(long, global = true, value_name = "PATH", env = "ARTPDF_MODEL")]
    model: Option<PathBuf>,

    /// Keyword language for dates and techniques
    #[arg(long, global = true, value_enum, default_value = "en")]
    language: Language,

    /// Stop at the first image that cannot be decoded
    #[arg(long, global = true)]
    strict_images: bool,

    /// Refuse input files larger than this
    #[arg(long, global = true, value_name = "MB", default_value = "50")]
    max_size_mb: u64,
}

impl Settings {
    fn options(&self) -> ExtractOptions {
        let mode = if self.strict_images {
            ErrorMode::Strict
        } else {
            ErrorMode::Lenient
        };
        ExtractOptions::new().with_error_mode(mode)
    }

    fn classifier(&self) -> ArtworkClassifier {
        ArtworkClassifier::from_model_path(self.model.as_deref(), self.language.into())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract everything: text, artwork information, images and an HTML report
    Process {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Extract plain text
    Text {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Identify artists, titles, dates and techniques as JSON
    Classify {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Extract embedded images as PNG files
    Images {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Language {
    /// English keywords (date, year, oil, watercolor...)
    #[value(alias = "english")]
    En,
    /// French keywords (date, année, huile, aquarelle...)
    #[value(alias = "french")]
    Fr,
}

impl From<Language> for KeywordRules {
    fn from(language: Language) -> Self {
        match language {
            Language::En => KeywordRules::english(),
            Language::Fr => KeywordRules::french(),
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let settings = cli.settings;

    let result = match cli.command {
        Some(Commands::Process { input, output }) => {
            cmd_process(&input, output.as_deref(), &settings)
        }
        Some(Commands::Text { input, output }) => cmd_text(&input, output.as_deref(), &settings),
        Some(Commands::Classify {
            input,
            output,
            compact,
        }) => cmd_classify(&input, output.as_deref(), compact, &settings),
        Some(Commands::Images { input, output }) => {
            cmd_images(&input, output.as_deref(), &settings)
        }
        Some(Commands::Info { input }) => cmd_info(&input, &settings),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: process if input is provided
            if let Some(input) = cli.input {
                cmd_process(&input, cli.output.as_deref(), &settings)
            } else {
                println!("{}", "Usage: artpdf <FILE> [OUTPUT]".yellow());
                println!("       artpdf --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Read an input file, enforcing the size limit and the PDF header check.
fn read_upload(input: &Path, max_size_mb: u64) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let size = fs::metadata(input)?.len();
    if size > max_size_mb.saturating_mul(BYTES_PER_MB) {
        return Err(format!(
            "{} is {:.1} MB, over the {} MB limit",
            input.display(),
            size as f64 / BYTES_PER_MB as f64,
            max_size_mb
        )
        .into());
    }

    let data = fs::read(input)?;
    let header = artpdf::sniff_header(&data)
        .map_err(|_| format!("{} is not a PDF file", input.display()))?;
    log::debug!("{}: PDF {} header", input.display(), header.version);
    Ok(data)
}

fn open(
    input: &Path,
    settings: &Settings,
) -> Result<ArtworkPdfExtractor, Box<dyn std::error::Error>> {
    let data = read_upload(input, settings.max_size_mb)?;
    Ok(ArtworkPdfExtractor::from_bytes_with_options(&data, settings.options())?)
}

fn save_or_print(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn print_failures(images: &ImageExtraction) {
    for failure in &images.failures {
        println!(
            "{} image resource {} (page {}, {}): {}",
            "Skipped".yellow(),
            failure.index,
            failure.page,
            failure.name,
            failure.reason
        );
    }
}

fn cmd_process(
    input: &Path,
    output: Option<&Path>,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_artpdf", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(5);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Reading PDF...");
    let extractor = open(input, settings)?;
    pb.inc(1);

    pb.set_message("Loading model...");
    let classifier = settings.classifier();
    pb.inc(1);

    pb.set_message("Extracting text...");
    let text = extractor.extract_text()?;
    fs::write(output_dir.join("text.txt"), &text)?;
    pb.inc(1);

    pb.set_message("Identifying artwork information...");
    let artwork = extractor.identify_artwork_info(&text, &classifier);
    let json = render::to_json(&artwork, JsonFormat::Pretty)?;
    fs::write(output_dir.join("artwork.json"), &json)?;
    pb.inc(1);

    pb.set_message("Extracting images...");
    let images = extractor.extract_images()?;
    render::write_images(&images, output_dir.join("images"))?;

    let report = ExtractionReport {
        metadata: extractor.metadata(),
        text,
        artwork,
        images,
    };
    fs::write(output_dir.join("report.html"), render::to_html(&report)?)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} text.txt", "├─".dimmed());
    println!("  {} artwork.json", "├─".dimmed());
    println!("  {} report.html", "├─".dimmed());
    println!(
        "  {} images/ ({} images)",
        "└─".dimmed(),
        report.images.len()
    );

    if report.artwork.is_unavailable() {
        println!(
            "\n{}",
            "No model loaded: artwork information is unavailable (see --model)".yellow()
        );
    }
    if !report.images.is_complete() {
        println!();
        print_failures(&report.images);
    }

    Ok(())
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = open(input, settings)?;
    let text = extractor.extract_text()?;
    save_or_print(&text, output)
}

fn cmd_classify(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = open(input, settings)?;
    let classifier = settings.classifier();
    let text = extractor.extract_text()?;
    let artwork = extractor.identify_artwork_info(&text, &classifier);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&artwork, format)?;
    save_or_print(&json, output)
}

fn cmd_images(
    input: &Path,
    output: Option<&Path>,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = open(input, settings)?;
    let images = extractor.extract_images()?;

    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));

    for path in render::write_images(&images, &output_dir)? {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        println!("{} {}", "Extracted".green(), name);
    }
    print_failures(&images);

    println!(
        "\n{} {} images extracted",
        "Done!".green().bold(),
        images.len()
    );

    Ok(())
}

fn cmd_info(input: &Path, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = open(input, settings)?;
    let metadata = extractor.metadata();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), metadata.pdf_version);
    println!("{}: {}", "Pages".bold(), metadata.page_count);
    println!(
        "{}: {}",
        "Encrypted".bold(),
        if metadata.encrypted { "Yes" } else { "No" }
    );
    for (label, value) in metadata.info_fields() {
        println!("{}: {}", label.bold(), value);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let text = extractor.extract_text()?;
    let images = extractor.extract_images()?;

    println!("{}: {}", "Words".bold(), text.split_whitespace().count());
    println!("{}: {}", "Characters".bold(), text.chars().count());
    println!("{}: {}", "Images".bold(), images.len());
    if !images.is_complete() {
        println!("{}: {}", "Undecodable images".bold(), images.failures.len());
    }

    let classifier = settings.classifier();
    println!(
        "{}: {}",
        "Model".bold(),
        classifier.model_name().unwrap_or("unavailable")
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "artpdf".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Artwork information extraction from PDF catalogs");
    println!();
    println!("License: MIT");
}
