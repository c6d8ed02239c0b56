use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::collections::HashMap;

use treepath::config::Config;
use treepath::document::Value;
use treepath::file::loader::{load_document_or_stdin, parse_value};
use treepath::file::saver::{render, save_document};
use treepath::file::Format;
use treepath::path::{Path, Segment};
use treepath::template::Bindings;
use treepath::tree::{get_path, merge, set_path, strip_matching_elements};

/// treepath - Read, write, strip and merge values in JSON and YAML documents by path
#[derive(Parser)]
#[command(name = "treepath")]
#[command(version)]
#[command(about = "Path-based queries and edits for JSON and YAML documents", long_about = None)]
struct Cli {
    /// Output format: json or yaml (default from config, then json)
    #[arg(short, long, global = true)]
    format: Option<String>,

    /// Write the resulting document to this file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the segments of a path
    Parse {
        /// Path such as a.b[0]["x"]
        path: String,
    },
    /// Print the value at a path
    Get {
        /// Document to read (- for stdin)
        file: String,
        path: String,
    },
    /// Write a value at a path
    Set {
        /// Document to update (- for stdin)
        file: String,
        path: String,
        /// New value, decoded as JSON when possible and as a string otherwise
        value: String,
        /// Create arrays rather than objects for index segments
        #[arg(long)]
        prefer_arrays: bool,
    },
    /// Remove every element matching one of the patterns
    Strip {
        /// Document to strip (- for stdin)
        file: String,
        /// Path patterns; * matches any single segment
        #[arg(required = true)]
        patterns: Vec<String>,
    },
    /// Deep-merge OVERLAY onto BASE
    Merge {
        base: String,
        overlay: String,
        /// Pattern of arrays to concatenate instead of overlay (repeatable)
        #[arg(long = "concat")]
        concat: Vec<String>,
    },
    /// Expand $name and $(name) placeholders
    Template {
        text: String,
        /// NAME=VALUE substitution (repeatable)
        #[arg(long = "var")]
        vars: Vec<String>,
        /// Document whose paths resolve names not given with --var
        #[arg(long)]
        file: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn parse_required_path(text: &str) -> Result<Path> {
    text.parse::<Path>()
        .with_context(|| format!("Invalid path '{}'", text))
}

fn parse_patterns(texts: &[String]) -> Result<Vec<Path>> {
    texts.iter().map(|text| parse_required_path(text)).collect()
}

fn parse_vars(vars: &[String]) -> Result<HashMap<String, String>> {
    vars.iter()
        .map(|var| match var.split_once('=') {
            Some((name, value)) => Ok((name.to_string(), value.to_string())),
            None => bail!("Invalid --var '{}', expected NAME=VALUE", var),
        })
        .collect()
}

/// Writes a resulting document to `--output` or stdout.
struct Emitter {
    format: Format,
    indent_size: usize,
    output: Option<String>,
}

impl Emitter {
    fn emit(&self, value: Option<Value>) -> Result<()> {
        let value = value.unwrap_or_default();
        match &self.output {
            Some(path) => save_document(path, &value, self.format, self.indent_size),
            None => {
                print!("{}", render(&value, self.format, self.indent_size)?);
                Ok(())
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load();
    let format: Format = cli
        .format
        .as_deref()
        .unwrap_or(&config.output_format)
        .parse()?;
    let emitter = Emitter {
        format,
        indent_size: config.indent_size,
        output: cli.output,
    };

    match cli.command {
        Command::Parse { path } => {
            for segment in parse_required_path(&path)?.iter() {
                match segment {
                    Segment::Index(index) => println!("index {}", index),
                    Segment::Key(key) => println!("key {}", key),
                }
            }
        }
        Command::Get { file, path } => {
            let document = load_document_or_stdin(&file)?;
            let path = parse_required_path(&path)?;
            match get_path(&document, path.as_slice()) {
                Some(value) => emitter.emit(Some(value.clone()))?,
                None => bail!("No value at '{}'", path),
            }
        }
        Command::Set {
            file,
            path,
            value,
            prefer_arrays,
        } => {
            let document = load_document_or_stdin(&file)?;
            let path = parse_required_path(&path)?;
            let prefer_arrays = prefer_arrays || config.prefer_arrays;
            let updated = set_path(Some(document), path.as_slice(), parse_value(&value), prefer_arrays);
            emitter.emit(Some(updated))?;
        }
        Command::Strip { file, patterns } => {
            let document = load_document_or_stdin(&file)?;
            let patterns = parse_patterns(&patterns)?;
            emitter.emit(strip_matching_elements(document, &patterns))?;
        }
        Command::Merge {
            base,
            overlay,
            concat,
        } => {
            let base = load_document_or_stdin(&base)?;
            let overlay = load_document_or_stdin(&overlay)?;
            let mut patterns = config.concat_paths();
            patterns.extend(parse_patterns(&concat)?);
            emitter.emit(merge(Some(base), Some(overlay), &patterns))?;
        }
        Command::Template { text, vars, file } => {
            let vars = parse_vars(&vars)?;
            let document = file.as_deref().map(load_document_or_stdin).transpose()?;
            let expanded = Bindings::new(&vars, document.as_ref()).expand(&text);
            println!("{}", expanded);
        }
    }

    Ok(())
}
