//! ketav - batch structural editor for digitized book markup

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use ketav::export::ArchiveExporter;
use ketav::recipe::Recipe;
use ketav::{Batch, LogKind, read_documents};

#[derive(Parser)]
#[command(name = "ketav")]
#[command(version, about = "Batch structural editor for digitized book markup", long_about = None)]
#[command(after_help = "EXAMPLES:
    ketav -r fix.json scans/            Apply a recipe, write a dated archive
    ketav -r split.json book.html -l    Show the resulting document names
    ketav book.html -p 0                Print the first document")]
struct Cli {
    /// Input files or directories
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// JSON recipe of operations to apply in order
    #[arg(short, long, value_name = "FILE")]
    recipe: Option<PathBuf>,

    /// Directory for the dated archive
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Write the archive to this exact path instead
    #[arg(short, long, value_name = "FILE", conflicts_with = "output")]
    archive: Option<PathBuf>,

    /// List resulting document names without writing an archive
    #[arg(short, long)]
    list: bool,

    /// Print one resulting document without writing an archive
    #[arg(short, long, value_name = "INDEX", conflicts_with = "list")]
    preview: Option<usize>,

    /// Log every step
    #[arg(short, long)]
    verbose: bool,

    /// Suppress the activity summary
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut batch = Batch::new();
    let result = run(&cli, &mut batch);

    if !cli.quiet {
        print_activity(&batch);
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, batch: &mut Batch) -> ketav::Result<()> {
    batch.extend(read_documents(&cli.inputs)?);

    if let Some(path) = &cli.recipe {
        Recipe::load(path)?.run(batch)?;
    }

    if cli.list {
        for (i, doc) in batch.documents().iter().enumerate() {
            println!("{i:>4}  {}", doc.name);
        }
        return Ok(());
    }

    if let Some(index) = cli.preview {
        match batch.get(index) {
            Some(doc) => println!("{}", doc.raw_markup),
            None => eprintln!("no document at index {index} ({} loaded)", batch.len()),
        }
        return Ok(());
    }

    if batch.is_empty() {
        eprintln!("nothing to export");
        return Ok(());
    }

    let exporter = ArchiveExporter::new();
    let path = match &cli.archive {
        Some(path) => {
            exporter.export_to_path(batch.documents(), path)?;
            path.clone()
        }
        None => exporter.export_to_dir(batch.documents(), &cli.output)?,
    };
    if !cli.quiet {
        eprintln!("wrote {} documents to {}", batch.len(), path.display());
    }
    Ok(())
}

/// Oldest entry first, like a terminal transcript.
fn print_activity(batch: &Batch) {
    for entry in batch.log().entries().rev() {
        let marker = match entry.kind {
            LogKind::Info => " ",
            LogKind::Success => "+",
            LogKind::Error => "!",
        };
        eprintln!(
            "[{}] {marker} {}",
            entry.timestamp.format("%H:%M:%S"),
            entry.message
        );
    }
}
