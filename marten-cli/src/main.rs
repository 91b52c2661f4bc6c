//! Marten CLI
//!
//! Loads markup from a file, URL, or inline string, then prints the token
//! stream or the assembled tag tree for inspection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use marten_common::loader::{self, Source};
use marten_markup::tokenize;
use marten_tree::{Tree, print_tree};
use owo_colors::OwoColorize;

/// Lenient HTML tokenizer and tag-tree builder.
#[derive(Parser)]
#[command(name = "marten", version, about)]
struct Args {
    /// File path or http(s) URL to load markup from.
    source: Option<String>,

    /// Parse this inline markup string instead of loading a source.
    #[arg(long, conflicts_with = "source")]
    html: Option<String>,

    /// Print the token stream instead of the tag tree.
    #[arg(long)]
    tokens: bool,

    /// Emit JSON instead of plain text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let markup = match (&args.html, &args.source) {
        (Some(inline), _) => inline.clone(),
        (None, Some(source)) => loader::load(&Source::detect(source))
            .with_context(|| format!("failed to load {source}"))?,
        (None, None) => bail!("provide a file path, a URL, or --html '<markup>'"),
    };

    let (tokens, diagnostics) = tokenize(&markup);

    for diagnostic in &diagnostics {
        eprintln!("{}", diagnostic.yellow());
    }

    if args.tokens {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&tokens)?);
        } else {
            for token in &tokens {
                println!("{:<15} {:<6} {token}", token.kind.to_string(), token.position);
            }
        }
        return Ok(());
    }

    let tree = Tree::grow(tokens);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    } else {
        for root in tree.roots() {
            print_tree(&tree, root, 0);
        }
    }

    Ok(())
}
