//! Marten CLI - HTML parsing and debugging tool
//!
//! Parses a file (or an inline string) and prints the resulting tree in the
//! html5lib test format, as JSON, or as the raw token stream.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use marten_common::warning::clear_warnings;
use marten_html::{
    DEFAULT_MAX_DEPTH, HTMLTokenizer, InputStream, ParseOptions, ParseOutput, Token, parse_bytes,
};
use owo_colors::OwoColorize;

/// Marten - browser-compatible HTML tokenizer and tree builder
#[derive(Parser, Debug)]
#[command(name = "marten")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the tree in html5lib format
    marten page.html

    # Parse inline HTML
    marten --html '<p>Hello<b>world'

    # Show the token stream
    marten --tokens page.html

    # Tree as JSON, with every parse issue on stderr
    marten --json --issues page.html
"#)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE", required_unless_present = "html")]
    path: Option<PathBuf>,

    /// Parse HTML string directly instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Print the token stream instead of the tree
    #[arg(short, long)]
    tokens: bool,

    /// Print the tree as JSON
    #[arg(short, long, conflicts_with = "tokens")]
    json: bool,

    /// Print every parse issue to stderr
    #[arg(short, long)]
    issues: bool,

    /// Parse with the scripting flag set (affects <noscript>)
    #[arg(long)]
    scripting: bool,

    /// Decode the input as windows-1252 instead of UTF-8
    #[arg(long)]
    latin1: bool,

    /// Limit for nested elements and active formatting elements
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let bytes = match (&cli.html, &cli.path) {
        (Some(html), _) => html.clone().into_bytes(),
        (None, Some(path)) => {
            fs::read(path).with_context(|| format!("failed to read '{}'", path.display()))?
        }
        (None, None) => bail!("no input file or --html provided"),
    };

    let options = ParseOptions::default()
        .with_utf8(!cli.latin1)
        .with_scripting(cli.scripting)
        .with_max_depth(cli.max_depth);

    if cli.tokens {
        print_tokens(&bytes, &options);
        return Ok(());
    }

    clear_warnings();
    let output = parse_bytes(&bytes, &options);

    if cli.json {
        println!("{}", output.document.to_json()?);
    } else {
        print!("{}", output.document.to_test_format());
    }

    if cli.issues {
        print_issues(&output);
    }

    if let Some(failure) = output.failure {
        eprintln!("{} {failure}", "error:".red().bold());
        std::process::exit(2);
    }
    Ok(())
}

/// Run the tokenizer on its own and print one token per line.
fn print_tokens(bytes: &[u8], options: &ParseOptions) {
    let input = InputStream::from_bytes(bytes, options.is_utf8);
    let mut tokenizer = HTMLTokenizer::new(input).self_driving();
    let tokens: Vec<Token> = tokenizer.by_ref().collect();

    println!("{}", format!("=== HTML Tokens ({}) ===", tokens.len()).bold());
    for (i, token) in tokens.iter().enumerate() {
        println!("  {i:3}: {token}");
    }

    let issues = tokenizer.take_issues();
    if !issues.is_empty() {
        eprintln!();
        for issue in &issues {
            eprintln!("{} {issue}", "warning:".yellow().bold());
        }
    }
}

fn print_issues(output: &ParseOutput) {
    if output.issues.is_empty() {
        eprintln!("{}", "no parse issues".green());
        return;
    }
    eprintln!(
        "{}",
        format!("=== Parse Issues ({}) ===", output.issues.len()).bold()
    );
    for issue in &output.issues {
        eprintln!("  {} {}", issue.position.dimmed(), issue.message.yellow());
    }
}
