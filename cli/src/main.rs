//! tablemirror CLI - mirror a wiki table into a cloud document

mod google;
mod source;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use tablemirror::parser::DEFAULT_TITLE_ELEMENT_ID;
use tablemirror::{
    plan, render, DocumentSimulator, Error, ErrorMode, HtmlParser, JsonFormat, PairingMode,
    ParseOptions, SyncDriver, WikiPage,
};

use crate::google::GoogleDocs;

#[derive(Parser)]
#[command(name = "tablemirror")]
#[command(version)]
#[command(about = "Mirror a two-column wiki table into a Google document", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the table and print it
    Extract {
        /// Source page (URL or HTML file)
        #[arg(value_name = "SOURCE", env = "TABLEMIRROR_SOURCE")]
        source: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "markdown")]
        format: TableFormat,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Print the batch-update request that rebuilds the table
    Plan {
        /// Source page (URL or HTML file)
        #[arg(value_name = "SOURCE", env = "TABLEMIRROR_SOURCE")]
        source: String,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Extract the table and write it into a Google document
    Sync {
        /// Source page (URL or HTML file)
        #[arg(value_name = "SOURCE", env = "TABLEMIRROR_SOURCE")]
        source: String,

        /// Document title (defaults to the page title)
        #[arg(short, long, env = "TABLEMIRROR_TITLE")]
        title: Option<String>,

        /// OAuth access token with Drive scope
        #[arg(long, env = "GOOGLE_OAUTH_TOKEN", hide_env_values = true)]
        token: String,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct ParseArgs {
    /// How body cells are paired into rows
    #[arg(long, value_enum, default_value = "parity")]
    pairing: Pairing,

    /// Keep going when a bulleted cell has no items
    #[arg(long)]
    lenient: bool,

    /// Keep cell text exactly as in the page
    #[arg(long)]
    raw_text: bool,

    /// Id of the heading holding the page title
    #[arg(long, default_value = DEFAULT_TITLE_ELEMENT_ID)]
    title_id: String,
}

impl ParseArgs {
    fn to_options(&self) -> ParseOptions {
        let error_mode = if self.lenient {
            ErrorMode::Lenient
        } else {
            ErrorMode::Strict
        };
        ParseOptions::new()
            .with_error_mode(error_mode)
            .with_pairing(self.pairing.into())
            .with_normalize_text(!self.raw_text)
            .with_title_element_id(self.title_id.clone())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Pairing {
    /// Running counter over all body cells
    Parity,
    /// Two cells per row: code, description
    PerRow,
}

impl From<Pairing> for PairingMode {
    fn from(pairing: Pairing) -> Self {
        match pairing {
            Pairing::Parity => PairingMode::Parity,
            Pairing::PerRow => PairingMode::PerRow,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TableFormat {
    /// Markdown table
    Markdown,
    /// Tab separated text
    Text,
    /// JSON structure
    Json,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract {
            source,
            format,
            output,
            parse,
        }) => cmd_extract(&source, format, output.as_deref(), &parse),
        Some(Commands::Plan {
            source,
            compact,
            output,
            parse,
        }) => cmd_plan(&source, compact, output.as_deref(), &parse),
        Some(Commands::Sync {
            source,
            title,
            token,
            parse,
        }) => cmd_sync(&source, title.as_deref(), &token, &parse),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: tablemirror <COMMAND> <SOURCE>".yellow());
            println!("       tablemirror --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_page(source: &str, parse: &ParseArgs) -> tablemirror::Result<WikiPage> {
    let data = source::load(source)?;
    HtmlParser::from_bytes_with_options(&data, parse.to_options())?.parse()
}

fn write_output(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_extract(
    source: &str,
    format: TableFormat,
    output: Option<&Path>,
    parse: &ParseArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let page = load_page(source, parse)?;

    let content = match format {
        TableFormat::Markdown => render::page_to_markdown(&page)?,
        TableFormat::Text => render::to_text(&page.table)?,
        TableFormat::Json => render::to_json(&page, JsonFormat::Pretty)?,
    };

    write_output(&content, output)
}

fn cmd_plan(
    source: &str,
    compact: bool,
    output: Option<&Path>,
    parse: &ParseArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let page = load_page(source, parse)?;
    let plan = plan::build_plan(&page.table)?;
    DocumentSimulator::replay(&plan)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = render::to_request_json(&plan, format)?;

    write_output(&json, output)
}

fn cmd_sync(
    source: &str,
    title: Option<&str>,
    token: &str,
    parse: &ParseArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Fetching page...");
    let data = source::load(source)?;
    pb.inc(1);

    pb.set_message("Extracting table...");
    let page = HtmlParser::from_bytes_with_options(&data, parse.to_options())?.parse()?;
    let document_title = page
        .document_title(title)
        .ok_or_else(|| Error::malformed("page has no title; pass --title"))?
        .to_string();
    pb.inc(1);

    pb.set_message("Planning edits...");
    let plan = plan::build_plan(&page.table)?;
    DocumentSimulator::replay(&plan)?;
    pb.inc(1);

    pb.set_message("Updating document...");
    let driver = SyncDriver::new(GoogleDocs::new(token)?);
    let report = driver.sync(&document_title, &plan)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Document updated:".green().bold());
    println!("  {} {}", "├─".dimmed(), document_title);
    println!(
        "  {} {} ({})",
        "├─".dimmed(),
        report.document_id,
        if report.created { "created" } else { "reused" }
    );
    println!(
        "  {} {} rows, {} operations",
        "└─".dimmed(),
        page.table.row_count(),
        report.operation_count
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "tablemirror".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Wiki table to Google document mirroring tool");
    println!();
    println!("License: MIT");
}
