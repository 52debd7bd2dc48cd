use crate::emit::{self, EmitOptions, Indent};
use crate::error::SplitError;
use crate::language;

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use rayon::prelude::*;
use serde_json::{Map, Value};

#[derive(Args, Debug)]
/// Split a combined translation document into one file per language
pub struct SplitArgs {
    #[clap(value_name = "OUTPUT_DIR")]
    /// Directory which receives one <code>.json file per language
    output_dir: PathBuf,

    #[clap(short, long, value_name = "FILE")]
    /// Read the combined document from a file instead of standard input
    input: Option<PathBuf>,

    #[clap(short, long, action=clap::ArgAction::SetTrue, default_value_t = false)]
    /// Create the output directory if it does not exist
    create: bool,

    #[clap(long, value_name = "tab|N", default_value = "tab")]
    /// Indentation for each nesting level
    indent: Indent,

    #[clap(short, long, action=clap::ArgAction::SetTrue, default_value_t = false)]
    /// Sort object keys at every level instead of keeping the input order
    sort_keys: bool,

    #[clap(short, long, action=clap::ArgAction::SetTrue, default_value_t = false)]
    /// Write non-ASCII characters as UTF-8 instead of \u escapes
    unicode: bool,

    #[clap(short, long, action=clap::ArgAction::SetTrue, default_value_t = false)]
    /// Do not show progress
    quiet: bool,
}

impl SplitArgs {
    fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            indent: self.indent,
            ascii_only: !self.unicode,
            sort_keys: self.sort_keys,
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::Object(_) => "object",
        Value::Array(_) => "array",
    }
}

/// Read the whole input from `path`, or from standard input if there is none
fn read_input(path: Option<&Path>) -> Result<String, SplitError> {
    let mut text = String::new();
    match path {
        Some(path) => File::open(path)
            .and_then(|mut file| file.read_to_string(&mut text))
            .map_err(|source| SplitError::ReadFile {
                path: path.to_owned(),
                source,
            })?,
        None => io::stdin()
            .lock()
            .read_to_string(&mut text)
            .map_err(SplitError::Input)?,
    };

    Ok(text)
}

/// Parse the combined document, which must be an object keyed by language code
fn parse_translations(text: &str) -> Result<Map<String, Value>, SplitError> {
    match serde_json::from_str(text)? {
        Value::Object(obj) => Ok(obj),
        other => Err(SplitError::NotAnObject(kind(&other))),
    }
}

fn prepare_output_dir(dir: &Path, create: bool) -> Result<(), SplitError> {
    if dir.is_dir() {
        return Ok(());
    }
    if dir.exists() {
        return Err(SplitError::NotADirectory(dir.to_owned()));
    }
    if !create {
        return Err(SplitError::MissingOutputDir(dir.to_owned()));
    }

    fs::create_dir_all(dir).map_err(|source| SplitError::CreateDir {
        path: dir.to_owned(),
        source,
    })?;
    info!("Created output directory {}", dir.display());

    Ok(())
}

fn write_file(path: &Path, value: &Value, options: &EmitOptions) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    emit::write_document(&mut writer, value, options)?;
    writer.flush()
}

/// Write the translations for a single language into `dir`
fn write_language(
    dir: &Path,
    code: &str,
    value: &Value,
    options: &EmitOptions,
) -> Result<PathBuf, SplitError> {
    let path = dir.join(language::file_name(code));
    if let Err(source) = write_file(&path, value, options) {
        return Err(SplitError::Write { path, source });
    }
    debug!("Wrote {}", path.display());

    Ok(path)
}

/// Write every language in `translations` to its own file, returning the number of files
fn write_translations(
    translations: &Map<String, Value>,
    dir: &Path,
    options: &EmitOptions,
    progress: &ProgressBar,
) -> Result<usize, SplitError> {
    // Each language goes to a separate file so they can be written independently
    let entries: Vec<(&String, &Value)> = translations.iter().collect();
    entries.par_iter().try_for_each(|(code, value)| {
        write_language(dir, code, value, options)?;
        progress.inc(1);
        Ok::<(), SplitError>(())
    })?;

    Ok(entries.len())
}

pub fn split(args: &SplitArgs) -> Result<usize, SplitError> {
    let start = Instant::now();

    // Initialize spinner
    let spinner = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner().with_message("Reading input…")
    };
    spinner.enable_steady_tick(Duration::from_millis(100));

    let text = read_input(args.input.as_deref());
    spinner.finish_and_clear();
    let text = text?;
    debug!("Read {} bytes of input", text.len());

    let translations = parse_translations(&text)?;
    drop(text);

    // Reject unusable codes before anything touches the output directory
    language::validate_all(translations.keys().map(String::as_str))?;
    prepare_output_dir(&args.output_dir, args.create)?;

    if translations.is_empty() {
        warn!("Input contains no languages, nothing was written");
        return Ok(0);
    }

    let progress = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(translations.len() as u64).with_prefix("Writing languages")
    };
    progress.set_style(
        ProgressStyle::with_template("{prefix} [{elapsed_precise}] {bar} {pos:>7}/{len:7}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let written = write_translations(
        &translations,
        &args.output_dir,
        &args.emit_options(),
        &progress,
    );
    progress.finish_and_clear();
    let written = written?;

    info!(
        "Wrote {} language files to {} in {:?}",
        written,
        args.output_dir.display(),
        start.elapsed()
    );

    Ok(written)
}
