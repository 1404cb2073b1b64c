//! imgtag: normalize image metadata into a canonical record.
//!
//! Image files carry titles, creators, captions and keyword hierarchies in
//! many different tags and encodings. imgtag reads those raw tags, routes
//! them through a closed field taxonomy and a hierarchical tag tree, and
//! produces one Dublin Core style record per file, ready for YAML or JSON
//! export.
//!
//! # Modules
//!
//! - [`meta`]: Field taxonomy, tag trees, the mapper and the canonical record
//! - [`extract`]: EXIF, XMP and exiftool readers that feed the mapper
//! - [`batch`]: Parallel, order-preserving mapping of many files
//! - [`error`]: Error types for imgtag operations

pub mod batch;
pub mod error;
pub mod extract;
pub mod meta;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;

pub use error::ImgtagError;

use batch::BatchReport;
use meta::{dedup_preserving_order, Field, MetadataRecord, OutputFormat, TagTree};

/// The imgtag CLI application.
#[derive(Parser)]
#[command(name = "imgtag")]
#[command(version, author, about)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Bare paths behave like the `slice` subcommand.
    #[command(flatten)]
    slice: SliceArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Write the metadata of all inputs as one array.
    #[command(alias = "s")]
    Slice(SliceArgs),

    /// Write one metadata file next to each input.
    Each(InputArgs),

    /// Write Hugo front matter listing all inputs.
    #[command(alias = "h")]
    Hugo(HugoArgs),

    /// Normalize raw tag values and print the flattened tags.
    Tags(TagsArgs),
}

/// Where the raw tags come from.
#[derive(clap::Args, Clone, Debug, Default)]
struct InputArgs {
    /// Image files or directories.
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Read tags from an `exiftool -json` dump instead of (or in addition to) images.
    #[arg(long, value_name = "FILE")]
    exiftool: Option<PathBuf>,
}

/// Output format options shared by all subcommands.
#[derive(clap::Args, Clone, Debug, Default)]
struct OutputArgs {
    /// Write JSON instead of YAML.
    #[arg(short, long, global = true, env = "IMGTAG_JSON")]
    json: bool,

    /// Write YAML (the default).
    #[arg(short, long, global = true, conflicts_with = "json")]
    yaml: bool,

    /// Extension for written metadata files, e.g. '.yml'.
    #[arg(short, long, global = true, env = "IMGTAG_EXT")]
    ext: Option<String>,
}

/// Arguments for the slice subcommand.
#[derive(clap::Args, Clone, Debug, Default)]
struct SliceArgs {
    #[command(flatten)]
    inputs: InputArgs,

    /// Output file; the extension is added when missing. '-' writes to stdout.
    #[arg(short, long, default_value = "images")]
    output: PathBuf,
}

/// Arguments for the hugo subcommand.
#[derive(clap::Args, Clone, Debug)]
struct HugoArgs {
    #[command(flatten)]
    inputs: InputArgs,

    /// Title of the post; also names the output file.
    #[arg(short, long)]
    name: String,
}

/// Arguments for the tags subcommand.
#[derive(clap::Args, Clone, Debug)]
struct TagsArgs {
    /// Raw tag values: delimited paths or nested category markup.
    #[arg(required = true)]
    values: Vec<String>,

    /// Field the values belong to.
    #[arg(long, default_value = "Keywords")]
    field: String,

    /// Print the flattened tags as leaf-only category markup.
    #[arg(long)]
    markup: bool,
}

/// Run the imgtag CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), ImgtagError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Slice(args)) => run_slice(args, &cli.output),
        Some(Commands::Each(args)) => run_each(args, &cli.output),
        Some(Commands::Hugo(args)) => run_hugo(args, &cli.output),
        Some(Commands::Tags(args)) => run_tags(args),
        None if has_inputs(&cli.slice.inputs) => run_slice(cli.slice, &cli.output),
        None => {
            println!("imgtag {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Normalize image metadata and keyword hierarchies.");
            println!();
            println!("Run 'imgtag --help' for usage information.");
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    // A logger may already be installed when run() is called from tests.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .try_init();
}

fn has_inputs(inputs: &InputArgs) -> bool {
    !inputs.paths.is_empty() || inputs.exiftool.is_some()
}

/// Extract and map every input, exiftool entries first.
fn load_batch(inputs: &InputArgs) -> Result<BatchReport, ImgtagError> {
    if !has_inputs(inputs) {
        return Err(ImgtagError::NoInput);
    }

    let mut outcomes = Vec::new();
    if let Some(dump) = &inputs.exiftool {
        let values = extract::exiftool::read_exiftool_json(dump)?;
        outcomes.extend(batch::map_batch(&values).outcomes);
    }
    if !inputs.paths.is_empty() {
        let files = extract::collect_inputs(&inputs.paths)?;
        outcomes.extend(batch::map_files(&files).outcomes);
    }

    Ok(BatchReport::new(outcomes))
}

/// Report failed files on stderr and turn them into the exit status.
fn finish(report: &BatchReport) -> Result<(), ImgtagError> {
    if !report.is_ok() {
        eprint!("{}", report);
    }
    report.status()
}

fn output_format(args: &OutputArgs, path: Option<&Path>) -> OutputFormat {
    if let Some(format) = path.and_then(OutputFormat::from_path) {
        return format;
    }
    if args.json && !args.yaml {
        OutputFormat::Json
    } else {
        OutputFormat::Yaml
    }
}

fn output_extension(args: &OutputArgs, format: OutputFormat) -> String {
    match &args.ext {
        Some(ext) if ext.starts_with('.') => ext.clone(),
        Some(ext) => format!(".{ext}"),
        None => format.extension().to_string(),
    }
}

/// Execute the slice subcommand.
fn run_slice(args: SliceArgs, output: &OutputArgs) -> Result<(), ImgtagError> {
    let report = load_batch(&args.inputs)?;
    let records: Vec<&MetadataRecord> = report.records().collect();

    if args.output.as_os_str() == "-" {
        let format = output_format(output, None);
        print!("{}", format.render(&records)?);
        return finish(&report);
    }

    let format = output_format(output, Some(&args.output));
    let path = if OutputFormat::from_path(&args.output).is_some() {
        args.output.clone()
    } else {
        let mut name = args.output.clone().into_os_string();
        name.push(output_extension(output, format));
        PathBuf::from(name)
    };

    format.write(&path, &records)?;
    log::info!("Wrote {} record(s) to {}", records.len(), path.display());
    finish(&report)
}

/// Execute the each subcommand.
fn run_each(args: InputArgs, output: &OutputArgs) -> Result<(), ImgtagError> {
    let report = load_batch(&args)?;
    let format = output_format(output, None);
    let ext = output_extension(output, format);

    let mut write_failures = 0;
    for record in report.records() {
        let path = sidecar_path(Path::new(&record.identifier), &ext);
        match format.write(&path, record) {
            Ok(()) => log::debug!("Wrote {}", path.display()),
            Err(err) => {
                log::error!("{}: {}", record.identifier, err);
                write_failures += 1;
            }
        }
    }

    let status = finish(&report);
    if write_failures > 0 {
        return Err(ImgtagError::BatchFailed {
            failed: report.failed_count() + write_failures,
            total: report.total(),
        });
    }
    status
}

/// `dir/photo.jpg` with `.yaml` gives `dir/photo.yaml`.
fn sidecar_path(image: &Path, ext: &str) -> PathBuf {
    let mut name = image.with_extension("").into_os_string();
    name.push(ext);
    PathBuf::from(name)
}

/// Hugo front matter for a gallery post.
#[derive(Serialize)]
struct HugoFrontMatter<'a> {
    title: &'a str,
    tags: Vec<String>,
    params: HugoParams<'a>,
}

#[derive(Serialize)]
struct HugoParams<'a> {
    images: Vec<&'a MetadataRecord>,
}

/// Execute the hugo subcommand.
fn run_hugo(args: HugoArgs, output: &OutputArgs) -> Result<(), ImgtagError> {
    let report = load_batch(&args.inputs)?;
    let images: Vec<&MetadataRecord> = report.records().collect();
    let tags = dedup_preserving_order(
        images
            .iter()
            .flat_map(|record| record.subject.iter().map(String::as_str)),
    );

    let front_matter = HugoFrontMatter {
        title: &args.name,
        tags,
        params: HugoParams { images },
    };

    let path = PathBuf::from(format!("{}.md", kebab_case(&args.name)));
    let format = output_format(output, None);
    let body = format.render(&front_matter)?;
    let text = match format {
        OutputFormat::Yaml => format!("---\n{body}"),
        OutputFormat::Json => body,
    };
    std::fs::write(&path, text).map_err(ImgtagError::Io)?;
    log::info!("Wrote front matter to {}", path.display());

    finish(&report)
}

/// Lowercase words joined by single dashes.
fn kebab_case(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Execute the tags subcommand.
fn run_tags(args: TagsArgs) -> Result<(), ImgtagError> {
    let field: Field = args
        .field
        .parse()
        .map_err(ImgtagError::UnknownField)?;

    let mut tree = TagTree::new();
    for value in &args.values {
        tree.extend(TagTree::parse(field, value)?);
    }
    let flat = tree.flatten();

    if args.markup {
        println!("{}", TagTree::from_nodes(TagTree::flatten_to_tags(&flat)).to_markup());
    } else {
        for tag in flat {
            println!("{tag}");
        }
    }
    Ok(())
}
