//! sheetmark CLI - annotated HTML table conversion tool

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use log::{debug, info};
use sheetmark::prelude::*;
use sheetmark::{directive_fragment, Annotation, LineTerminator};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sheetmark")]
#[command(
    author,
    version,
    about = "Turn data-xls annotated HTML tables into spreadsheets"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that interprets HTML
#[derive(Args, Debug, Clone, Default)]
struct InterpretArgs {
    /// Warn about invalid annotations instead of failing
    #[arg(long)]
    non_strict: bool,

    /// Default number locale for cells without data-xls-number-locale
    #[arg(long)]
    locale: Option<String>,

    /// JSON file with named styles added on top of the presets
    #[arg(long)]
    styles: Option<PathBuf>,

    /// Rename duplicate sheet names instead of keeping them
    #[arg(long)]
    dedupe: bool,

    /// Fail on cells placed inside an earlier row span
    #[arg(long)]
    reject_covered: bool,

    /// Directory for images decoded from data URIs
    #[arg(long)]
    temp_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that HTML files interpret without errors
    Lint {
        /// Input HTML files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        interpret: InterpretArgs,
    },

    /// Convert one sheet to CSV and output to stdout or file
    #[command(alias = "csv")]
    ToCsv {
        /// Input HTML file
        input: PathBuf,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sheet index to convert (0-based, default: 0)
        #[arg(short, long, default_value = "0")]
        sheet: usize,

        /// Field delimiter (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,

        /// Use LF line endings instead of CRLF
        #[arg(long)]
        unix: bool,

        #[command(flatten)]
        interpret: InterpretArgs,
    },

    /// Show the layout of every sheet
    Info {
        /// Input HTML file
        input: PathBuf,

        #[command(flatten)]
        interpret: InterpretArgs,
    },

    /// List all sheets produced from a file
    Sheets {
        /// Input HTML file
        input: PathBuf,

        #[command(flatten)]
        interpret: InterpretArgs,
    },

    /// Print the named styles as JSON
    Styles {
        /// JSON file with named styles added on top of the presets
        #[arg(long)]
        styles: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Lint { inputs, interpret } => lint(&inputs, &interpret),
        Commands::ToCsv {
            input,
            output,
            sheet,
            delimiter,
            unix,
            interpret,
        } => to_csv(&input, output.as_deref(), sheet, delimiter, unix, &interpret),
        Commands::Info { input, interpret } => show_info(&input, &interpret),
        Commands::Sheets { input, interpret } => list_sheets(&input, &interpret),
        Commands::Styles { styles } => dump_styles(styles.as_deref()),
    }
}

impl InterpretArgs {
    fn options(&self) -> InterpretOptions {
        let mut options = InterpretOptions::new()
            .with_strict(!self.non_strict)
            .with_dedupe_sheet_names(self.dedupe);
        if self.reject_covered {
            options = options.with_merge_policy(MergePolicy::Reject);
        }
        if let Some(locale) = &self.locale {
            options = options.with_number_locale(locale.as_str());
        }
        if let Some(dir) = &self.temp_dir {
            options = options.with_temp_dir(dir);
        }
        options
    }

    fn registry(&self) -> Result<StyleRegistry> {
        load_registry(self.styles.as_deref())
    }
}

fn load_registry(path: Option<&Path>) -> Result<StyleRegistry> {
    let Some(path) = path else {
        return Ok(StyleRegistry::new());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read styles from '{}'", path.display()))?;
    let registry = parse_style_overrides(&text)
        .with_context(|| format!("Invalid styles file '{}'", path.display()))?;
    info!("Loaded {} styles from '{}'", registry.len(), path.display());
    Ok(registry)
}

/// Build a registry from `{"name": {"data-xls-bg-color": "FFFF00", ...}}`
///
/// Each entry is a set of style directives, read the same way as on a cell.
fn parse_style_overrides(json: &str) -> Result<StyleRegistry> {
    let raw: BTreeMap<String, BTreeMap<String, String>> = serde_json::from_str(json)?;

    let mut overrides = Vec::with_capacity(raw.len());
    for (name, directives) in raw {
        let mut style = StyleDescriptor::new();
        for (attr, value) in &directives {
            let Some(annotation) = Annotation::from_name(attr) else {
                bail!("style '{}': unknown attribute '{}'", name, attr);
            };
            let Some(fragment) = directive_fragment(annotation, value) else {
                bail!("style '{}': invalid value '{}' for {}", name, value, attr);
            };
            style.merge(&fragment);
        }
        debug!("Style override '{}' with {} directives", name, directives.len());
        overrides.push((name, style));
    }

    Ok(StyleRegistry::with_overrides(overrides))
}

fn convert_file(input: &Path, args: &InterpretArgs) -> Result<Workbook> {
    let html = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read '{}'", input.display()))?;
    let registry = args.registry()?;
    let workbook = convert_html(&html, &args.options(), &registry)
        .with_context(|| format!("Failed to interpret '{}'", input.display()))?;
    Ok(workbook)
}

fn lint(inputs: &[PathBuf], args: &InterpretArgs) -> Result<()> {
    let registry = args.registry()?;
    let options = args.options();

    let mut failed = 0;
    for input in inputs {
        let result = std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read '{}'", input.display()))
            .and_then(|html| Ok(convert_html(&html, &options, &registry)?));

        match result {
            Ok(workbook) => println!(
                "OK    {} ({} sheets)",
                input.display(),
                workbook.sheet_count()
            ),
            Err(e) => {
                failed += 1;
                println!("ERROR {}: {:#}", input.display(), e);
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} files failed", failed, inputs.len());
    }
    Ok(())
}

fn to_csv(
    input: &Path,
    output: Option<&Path>,
    sheet_idx: usize,
    delimiter: char,
    unix: bool,
    args: &InterpretArgs,
) -> Result<()> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be an ASCII character, got '{}'", delimiter);
    }

    let workbook = convert_file(input, args)?;

    let mut options = CsvWriteOptions::default().with_delimiter(delimiter as u8);
    if unix {
        options = options.with_line_terminator(LineTerminator::LF);
    }

    if let Some(output_path) = output {
        let file = std::fs::File::create(output_path)
            .with_context(|| format!("Failed to create '{}'", output_path.display()))?;
        CsvWriter::write_sheet(&workbook, sheet_idx, file, &options)
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        eprintln!("Wrote sheet {} to '{}'", sheet_idx, output_path.display());
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        CsvWriter::write_sheet(&workbook, sheet_idx, &mut handle, &options)
            .context("Failed to write to stdout")?;
        handle.flush().context("Failed to write to stdout")?;
    }

    Ok(())
}

fn show_info(input: &Path, args: &InterpretArgs) -> Result<()> {
    let workbook = convert_file(input, args)?;

    println!("File: {}", input.display());
    println!("Sheets: {}", workbook.sheet_count());

    for (i, sheet) in workbook.worksheets().enumerate() {
        println!();
        println!("  Sheet {}: \"{}\"", i, sheet.name());

        match sheet.used_range() {
            Some(range) => println!(
                "    Used range: {} ({} rows x {} columns)",
                range,
                range.end.row,
                range.end.col
            ),
            None => println!("    Used range: empty"),
        }
        println!("    Merges: {}", sheet.merges().len());
        println!("    Images: {}", sheet.drawings().len());
        if let Some(pane) = sheet.freeze_pane() {
            println!("    Frozen at: {}", pane.top_left());
        }
        if let Some(filter) = sheet.auto_filter() {
            println!("    Autofilter: {}", filter);
        }
    }

    Ok(())
}

fn list_sheets(input: &Path, args: &InterpretArgs) -> Result<()> {
    let workbook = convert_file(input, args)?;

    for (i, name) in workbook.sheet_names().into_iter().enumerate() {
        println!("{}\t{}", i, name);
    }

    Ok(())
}

fn dump_styles(styles: Option<&Path>) -> Result<()> {
    let registry = load_registry(styles)?;
    let json = serde_json::to_string_pretty(registry.all()).context("Failed to serialize styles")?;
    println!("{}", json);
    Ok(())
}
