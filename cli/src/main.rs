//! pdf2dxf CLI - decoded PDF pages to layered DXF

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf2dxf::convert::DEFAULT_PAGE_GAP;
use pdf2dxf::{
    load_document, ConversionReport, ConversionStats, ConvertOptions, LayoutMode, PageSelection,
    Warning,
};

#[derive(Parser)]
#[command(name = "pdf2dxf")]
#[command(version)]
#[command(about = "Convert decoded PDF vector pages to layered DXF drawings", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Decoded page dump (JSON)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output drawing (.dxf or .json); per-page files derive their names from it
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    convert: ConvertArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show page count, sizes and content counts of a page dump
    Info {
        /// Decoded page dump (JSON)
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Print the files a conversion would write, without writing them
    Plan {
        /// Decoded page dump (JSON)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output drawing template
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        #[command(flatten)]
        convert: ConvertArgs,
    },
}

#[derive(Args, Clone)]
struct ConvertArgs {
    /// Pages to convert, 0-based (e.g., "0,2,4-6"); all pages if omitted
    #[arg(long)]
    pages: Option<String>,

    /// Merge all selected pages into a single drawing
    #[arg(long)]
    merge: bool,

    /// Horizontal gap between merged pages
    #[arg(long, env = "PDF2DXF_PAGE_GAP", default_value_t = DEFAULT_PAGE_GAP)]
    gap: f64,

    /// Translate pages on one thread
    #[arg(long)]
    sequential: bool,
}

impl ConvertArgs {
    fn to_options(&self) -> pdf2dxf::Result<ConvertOptions> {
        let pages = match self.pages.as_deref() {
            Some(p) => p.parse::<PageSelection>()?,
            None => PageSelection::All,
        };
        let layout = if self.merge {
            LayoutMode::Merged
        } else {
            LayoutMode::PerPage
        };

        Ok(ConvertOptions::new()
            .with_layout(layout)
            .with_pages(pages)
            .with_page_gap(self.gap)
            .with_parallel(!self.sequential))
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Plan {
            input,
            output,
            convert,
        }) => cmd_plan(&input, &output, &convert),
        None => match (cli.input, cli.output) {
            (Some(input), Some(output)) => cmd_convert(&input, &output, &cli.convert),
            _ => {
                println!("{}", "Usage: pdf2dxf <INPUT> <OUTPUT> [OPTIONS]".yellow());
                println!("       pdf2dxf --help for more information");
                std::process::exit(2);
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    output: &Path,
    args: &ConvertArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.to_options()?;

    let pb = ProgressBar::new(2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Loading pages...");
    let doc = load_document(input)?;
    pb.inc(1);

    pb.set_message("Writing drawings...");
    let report = pdf2dxf::convert_document(&doc, output, &options);
    pb.inc(1);
    pb.finish_and_clear();

    let report = report?;
    print_warnings(&report.warnings);
    print_report(&report);

    Ok(())
}

fn cmd_plan(
    input: &Path,
    output: &Path,
    args: &ConvertArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.to_options()?;
    let doc = load_document(input)?;
    let (plan, warnings) = pdf2dxf::plan_document(&doc, output, &options)?;

    print_warnings(&warnings);

    println!("{} ({})", "Output Plan".cyan().bold(), layout_name(plan.mode));
    println!("{}", "─".repeat(40).dimmed());
    for (i, file) in plan.files.iter().enumerate() {
        let branch = if i + 1 == plan.files.len() {
            "└─"
        } else {
            "├─"
        };
        let pages: Vec<String> = file
            .batches
            .iter()
            .map(|b| format!("{}@{}", b.page_index, b.x_offset))
            .collect();
        println!(
            "  {} {} ({} entities, pages {})",
            branch.dimmed(),
            file.path.display(),
            file.entity_count(),
            pages.join(", ")
        );
    }

    println!();
    print_stats(&plan.stats);
    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), doc.page_count());

    if let Some(ref title) = doc.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = doc.metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref creator) = doc.metadata.creator {
        println!("{}: {}", "Creator".bold(), creator);
    }
    if let Some(ref producer) = doc.metadata.producer {
        println!("{}: {}", "Producer".bold(), producer);
    }

    println!();
    println!("{}", "Pages".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for page in &doc.pages {
        println!(
            "  {:>4}: {} x {} pt, {} commands, {} spans",
            page.index,
            page.width,
            page.height,
            page.commands.len(),
            page.spans.len()
        );
    }

    println!();
    println!("{}: {}", "Commands".bold(), doc.command_count());
    println!("{}: {}", "Text spans".bold(), doc.span_count());

    Ok(())
}

fn layout_name(mode: LayoutMode) -> &'static str {
    match mode {
        LayoutMode::PerPage => "one file per page",
        LayoutMode::Merged => "merged",
    }
}

fn print_warnings(warnings: &[Warning]) {
    for warning in warnings {
        eprintln!("{}: {}", "Warning".yellow().bold(), warning);
    }
}

fn print_report(report: &ConversionReport) {
    println!("{} ({})", "Output files:".green().bold(), layout_name(report.mode));
    for (i, path) in report.files.iter().enumerate() {
        let branch = if i + 1 == report.files.len() {
            "└─"
        } else {
            "├─"
        };
        println!("  {} {}", branch.dimmed(), path.display());
    }

    for failure in &report.failures {
        eprintln!("{}: {}", "Failed".red().bold(), failure);
    }

    println!();
    print_stats(&report.stats);
}

fn print_stats(stats: &ConversionStats) {
    println!(
        "{}: {} pages, {} lines, {} polylines, {} curves, {} texts",
        "Entities".bold(),
        stats.page_count,
        stats.line_count,
        stats.polyline_count,
        stats.curve_count,
        stats.text_count
    );
    if stats.skipped_commands > 0 || stats.skipped_spans > 0 {
        println!(
            "{}: {} unsupported commands, {} empty spans",
            "Skipped".dimmed(),
            stats.skipped_commands,
            stats.skipped_spans
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert_args() {
        let cli = Cli::try_parse_from([
            "pdf2dxf", "in.json", "out.dxf", "--pages", "0,2-3", "--merge", "--gap", "10",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.input, Some(PathBuf::from("in.json")));

        let options = cli.convert.to_options().unwrap();
        assert_eq!(options.layout, LayoutMode::Merged);
        assert_eq!(options.pages, PageSelection::Ranges(vec![0..=0, 2..=3]));
        assert_eq!(options.page_gap, 10.0);
        assert!(options.parallel);
    }

    #[test]
    fn test_parse_plan_subcommand() {
        let cli =
            Cli::try_parse_from(["pdf2dxf", "plan", "in.json", "out.dxf", "--sequential"]).unwrap();
        match cli.command {
            Some(Commands::Plan { convert, .. }) => {
                let options = convert.to_options().unwrap();
                assert!(!options.parallel);
                assert_eq!(options.layout, LayoutMode::PerPage);
            }
            _ => panic!("Expected plan subcommand"),
        }
    }

    #[test]
    fn test_invalid_page_list() {
        let cli = Cli::try_parse_from(["pdf2dxf", "in.json", "out.dxf", "--pages", "x"]).unwrap();
        assert!(cli.convert.to_options().is_err());
    }

    #[test]
    fn test_convert_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("pages.json");
        std::fs::write(
            &input,
            r#"[{"width": 100, "height": 100,
                 "commands": [{"type": "line", "from": {"x": 0, "y": 0}, "to": {"x": 10, "y": 10}}]}]"#,
        )
        .unwrap();
        let output = dir.path().join("out.dxf");
        let args = ConvertArgs {
            pages: None,
            merge: false,
            gap: DEFAULT_PAGE_GAP,
            sequential: true,
        };
        cmd_convert(&input, &output, &args).unwrap();
        assert!(output.exists());
    }
}
