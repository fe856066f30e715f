//! pdf2docx CLI - PDF to Word conversion tool

use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;

use pdf2docx::{convert_file_with_options, ConvertOptions, LayoutOptions};

#[derive(Parser)]
#[command(name = "pdf2docx")]
#[command(version)]
#[command(about = "Convert PDF documents to Word (.docx)", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output .docx file (defaults to the input name with .docx)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Line-merge factor: runs within font_size * FACTOR of the current
    /// baseline stay on the same line
    #[arg(long, value_name = "FACTOR", default_value = "0.5")]
    line_merge: f32,

    /// Maximum vertical drift for a line segment to count as a rule
    #[arg(long, value_name = "UNITS", default_value = "2.0")]
    segment_flatness: f32,

    /// Maximum rectangle height to count as a rule
    #[arg(long, value_name = "UNITS", default_value = "3.0")]
    bar_thickness: f32,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> pdf2docx::Result<()> {
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(&cli.input));

    let layout = LayoutOptions::new()
        .with_line_merge_factor(cli.line_merge)
        .with_segment_flatness(cli.segment_flatness)
        .with_bar_thickness(cli.bar_thickness);
    let options = ConvertOptions::new().with_layout(layout);

    let summary = convert_file_with_options(&cli.input, &output, &options)?;

    println!(
        "{} {} ({} pages, {} paragraphs)",
        "Converted to".green(),
        output.display(),
        summary.page_count,
        summary.paragraph_count
    );

    Ok(())
}

fn default_output(input: &Path) -> PathBuf {
    input.with_extension("docx")
}
