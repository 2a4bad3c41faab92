//! unfiling CLI - SEC filing parsing tool

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;

use unfiling::{ElementKind, FilingType, JsonFormat, Unfiling, UnfilingResult};

#[derive(Parser)]
#[command(name = "unfiling")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Parse SEC 10-Q/10-K filings to JSON and outlines", long_about = None)]
struct Cli {
    /// Input filing HTML file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Filing form to parse as
    #[arg(long, value_enum, global = true, default_value = "auto")]
    filing_type: FilingForm,

    /// Skip the inline-run pre-merger
    #[arg(long, global = true)]
    no_premerge: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a filing to all outputs (elements, tree, outline)
    Convert {
        /// Input filing HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Output the flat element sequence as JSON
    Elements {
        /// Input filing HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Output the nested document tree as JSON
    Tree {
        /// Input filing HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Output an indented section and title outline
    #[command(alias = "toc")]
    Outline {
        /// Input filing HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show filing information
    Info {
        /// Input filing HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FilingForm {
    /// Detect the form from the document content
    Auto,
    /// Quarterly report
    #[value(name = "10-q")]
    TenQ,
    /// Annual report
    #[value(name = "10-k")]
    TenK,
}

impl FilingForm {
    fn as_option(self) -> Option<FilingType> {
        match self {
            FilingForm::Auto => None,
            FilingForm::TenQ => Some(FilingType::TenQ),
            FilingForm::TenK => Some(FilingType::TenK),
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let parser = build_parser(cli.filing_type, cli.no_premerge);

    let result = match cli.command {
        Some(Commands::Convert { input, output }) => {
            cmd_convert(&parser, &input, output.as_deref())
        }
        Some(Commands::Elements {
            input,
            output,
            compact,
        }) => cmd_elements(&parser, &input, output.as_deref(), compact),
        Some(Commands::Tree {
            input,
            output,
            compact,
        }) => cmd_tree(&parser, &input, output.as_deref(), compact),
        Some(Commands::Outline { input, output }) => {
            cmd_outline(&parser, &input, output.as_deref())
        }
        Some(Commands::Info { input }) => cmd_info(&parser, &input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&parser, &input, cli.output.as_deref())
            } else {
                println!("{}", "Usage: unfiling <FILE> [OUTPUT]".yellow());
                println!("       unfiling --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_parser(form: FilingForm, no_premerge: bool) -> Unfiling {
    let mut parser = Unfiling::new().with_premerge(!no_premerge);
    if let Some(filing_type) = form.as_option() {
        parser = parser.with_filing_type(filing_type);
    }
    parser
}

fn cmd_convert(
    parser: &Unfiling,
    input: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Parsing filing...");
    let result = parser.parse_file(input)?;
    debug!("parsed {} elements", result.elements().len());
    pb.inc(1);

    pb.set_message("Writing elements.json...");
    let elements_json = result.to_json(JsonFormat::Pretty)?;
    fs::write(output_dir.join("elements.json"), &elements_json)?;
    pb.inc(1);

    pb.set_message("Writing tree.json...");
    let tree_json = result.tree_to_json(JsonFormat::Pretty)?;
    fs::write(output_dir.join("tree.json"), &tree_json)?;
    pb.inc(1);

    pb.set_message("Writing outline.txt...");
    let outline = result.to_outline();
    fs::write(output_dir.join("outline.txt"), &outline)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} elements.json", "├─".dimmed());
    println!("  {} tree.json", "├─".dimmed());
    println!("  {} outline.txt", "└─".dimmed());

    Ok(())
}

fn cmd_elements(
    parser: &Unfiling,
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = parser.parse_file(input)?;
    let json = result.to_json(json_format(compact))?;
    write_or_print(output, &json)
}

fn cmd_tree(
    parser: &Unfiling,
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = parser.parse_file(input)?;
    let json = result.tree_to_json(json_format(compact))?;
    write_or_print(output, &json)
}

fn cmd_outline(
    parser: &Unfiling,
    input: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = parser.parse_file(input)?;
    let outline = result.to_outline();
    write_or_print(output, &outline)
}

fn cmd_info(parser: &Unfiling, input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let result = parser.parse_file(input)?;

    println!("{}", "Filing Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Form".bold(), result.filing_type());
    println!("{}: {}", "Elements".bold(), result.elements().len());

    println!();
    println!("{}", "Element Kinds".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (kind, count) in kind_counts(&result) {
        println!("{}: {}", kind.bold(), count);
    }

    println!();
    println!("{}", "Sections".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    let mut found = false;
    for element in result.elements() {
        if let ElementKind::TopSectionTitle { section } = element.kind() {
            println!("{}: {}", section.identifier.bold(), element.text());
            found = true;
        }
    }
    if !found {
        println!("{}", "(none recognized)".dimmed());
    }

    Ok(())
}

fn kind_counts(result: &UnfilingResult) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for element in result.elements() {
        *counts.entry(element.kind().name()).or_insert(0) += 1;
    }
    counts
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unfiling".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("SEC filing parsing tool");
    println!();
    println!(
        "Repository: {}",
        "https://github.com/iyulab/unfiling".dimmed()
    );
    println!("License: MIT");
}
