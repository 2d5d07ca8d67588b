use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use grokex_core::{Config, Grok, GrokError};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "grokex")]
#[command(about = "Grokex - named, composable regex patterns")]
#[command(version)]
struct Cli {
    /// Log catalog loading and compilation
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where patterns come from
#[derive(Args)]
struct PatternArgs {
    /// Catalog file or directory to load (repeatable)
    #[arg(short, long = "patterns")]
    patterns: Vec<PathBuf>,

    /// Define a pattern inline as NAME=PATTERN (repeatable)
    #[arg(short, long = "define", value_parser = parse_definition)]
    define: Vec<(String, String)>,

    /// Fail when a catalog reference cannot be resolved
    #[arg(long)]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the regex a pattern expands to
    Expand {
        /// The pattern to expand
        pattern: String,
        #[command(flatten)]
        source: PatternArgs,
    },
    /// Check if pattern matches
    Match {
        /// The pattern
        pattern: String,
        /// The input string
        input: String,
        #[command(flatten)]
        source: PatternArgs,
    },
    /// Extract the named captures of a pattern from input
    Parse {
        /// The pattern
        pattern: String,
        /// The input string
        input: String,
        #[command(flatten)]
        source: PatternArgs,
    },
}

fn parse_definition(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, pattern)| (name.to_string(), pattern.to_string()))
        .ok_or_else(|| format!("expected NAME=PATTERN, got `{raw}`"))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "grokex_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Expand { pattern, source } => cmd_expand(&pattern, &source),
        Commands::Match {
            pattern,
            input,
            source,
        } => cmd_match(&pattern, &input, &source),
        Commands::Parse {
            pattern,
            input,
            source,
        } => cmd_parse(&pattern, &input, &source),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_engine(source: &PatternArgs) -> Result<Grok, GrokError> {
    let config = if source.strict {
        Config::strict()
    } else {
        Config::new()
    };
    let mut grok = Grok::with_config(config);

    if !source.patterns.is_empty() {
        grok.add_patterns_from_paths(&source.patterns)?;
    }
    for (name, pattern) in &source.define {
        grok.add_pattern(name.clone(), pattern.clone());
    }
    Ok(grok)
}

fn cmd_expand(pattern: &str, source: &PatternArgs) -> Result<(), GrokError> {
    let grok = build_engine(source)?;
    let expanded = grok.expand(pattern)?;

    println!("{}", "Expanding pattern...".bold());
    println!("  Input:  {}", pattern.cyan());
    println!();
    println!("{}", "Output:".bold());
    println!("  {}", expanded.green());
    Ok(())
}

fn cmd_match(pattern: &str, input: &str, source: &PatternArgs) -> Result<(), GrokError> {
    let mut grok = build_engine(source)?;
    grok.compile(pattern)?;

    if grok.is_match(input)? {
        println!("{}", "true".green());
        Ok(())
    } else {
        println!("{}", "false".red());
        std::process::exit(1);
    }
}

fn cmd_parse(pattern: &str, input: &str, source: &PatternArgs) -> Result<(), GrokError> {
    let mut grok = build_engine(source)?;
    grok.compile(pattern)?;

    if !grok.is_match(input)? {
        println!("{}", "✗ No match".red());
        std::process::exit(1);
    }

    let mut captures: Vec<_> = grok.captures(input)?.into_iter().collect();
    captures.sort();

    println!("{}", "✓ Match found!".green().bold());
    println!();
    println!("{}", "Captures:".bold());
    for (label, value) in &captures {
        let label = if label.is_empty() { "(match)" } else { label.as_str() };
        println!("  {}: {}", label.cyan(), value.green());
    }
    Ok(())
}
