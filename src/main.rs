//! cleandash - find name+size duplicates and Python import relationships.
//!
//! Usage:
//!   cleandash duplicates [PATH]            List files sharing a name and size
//!   cleandash deps [PATH]                  List imports of every .py file
//!   cleandash analyze [PATH]               Both views
//!   cleandash export [PATH] --select 1,3   Write selected duplicates to CSV
//!   cleandash delete [PATH] --select 1,3   Delete selected duplicates
//!   cleandash --help                       Show help

mod prompt;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, bail};
use tracing::Level;

use cleandash_analyze::{
    DependencyAnalyzer, DependencyConfig, DependencyReport, DependencySortKey, DuplicateGrouper,
    DuplicateReport, DuplicateSortKey, FileRecord, LocalDependencyMode,
};
use cleandash_ops::{CsvExporter, DEFAULT_LOG_FILE, DeletionLog, DeletionSession};
use cleandash_scan::{FileScanner, ScanConfig};

#[derive(Parser)]
#[command(
    name = "cleandash",
    version,
    about = "Find duplicate files and Python import relationships",
    long_about = "cleandash scans a directory tree for files that share a name and size, \
                  and lists the imports of every Python source file in it.\n\n\
                  Duplicates are matched by name and size only; file contents are never read."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List files that share a name and size
    Duplicates {
        /// Directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Sort by filename, path, size or last_modified
        #[arg(short, long, default_value = "filename")]
        sort: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List imports and local dependencies of every Python file
    Deps {
        /// Directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Sort by file, imports or local_dependencies
        #[arg(short, long, default_value = "file")]
        sort: String,

        /// Only list local files that are actually imported
        #[arg(long)]
        precise: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show both the duplicate and the dependency listing
    Analyze {
        /// Directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Sort duplicates by filename, path, size or last_modified
        #[arg(short, long, default_value = "filename")]
        sort: String,

        /// Sort dependencies by file, imports or local_dependencies
        #[arg(long, default_value = "file")]
        deps_sort: String,
    },

    /// Export selected duplicates to a CSV file
    Export {
        /// Directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// 1-based positions in the duplicate listing (e.g. "1,3")
        #[arg(long, required = true, value_delimiter = ',')]
        select: Vec<usize>,

        /// Sort used to number the listing
        #[arg(short, long, default_value = "filename")]
        sort: String,

        /// Directory the CSV file is written to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Delete selected duplicates after confirmation
    Delete {
        /// Directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// 1-based positions in the duplicate listing (e.g. "1,3")
        #[arg(long, required = true, value_delimiter = ',')]
        select: Vec<usize>,

        /// Sort used to number the listing
        #[arg(short, long, default_value = "filename")]
        sort: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Deletion log file
        #[arg(long, default_value = DEFAULT_LOG_FILE)]
        log: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Duplicates { path, sort, format } => {
            let report = find_duplicates(&path, DuplicateSortKey::from_name(&sort))?;
            match format {
                OutputFormat::Text => print_duplicates(&report),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
        }
        Command::Deps {
            path,
            sort,
            precise,
            format,
        } => {
            let report = analyze_dependencies(&path, DependencySortKey::from_name(&sort), precise)?;
            match format {
                OutputFormat::Text => print_dependencies(&report),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
        }
        Command::Analyze {
            path,
            sort,
            deps_sort,
        } => {
            let duplicates = find_duplicates(&path, DuplicateSortKey::from_name(&sort))?;
            print_duplicates(&duplicates);
            println!();
            let dependencies =
                analyze_dependencies(&path, DependencySortKey::from_name(&deps_sort), false)?;
            print_dependencies(&dependencies);
        }
        Command::Export {
            path,
            select,
            sort,
            output_dir,
        } => {
            let report = find_duplicates(&path, DuplicateSortKey::from_name(&sort))?;
            let selection = resolve_selection(&report.entries, &select)?;
            let written = CsvExporter::new(output_dir)
                .export(&selection)
                .wrap_err("Export failed")?;
            println!("Data exported to {}", written.display());
        }
        Command::Delete {
            path,
            select,
            sort,
            yes,
            log,
        } => run_delete(&path, &select, DuplicateSortKey::from_name(&sort), yes, log)?,
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn scan_config(path: &Path) -> Result<ScanConfig> {
    let path = path.canonicalize().context("Invalid path")?;
    Ok(ScanConfig::new(path))
}

/// Scan `path` and group duplicates.
fn find_duplicates(path: &Path, sort_key: DuplicateSortKey) -> Result<DuplicateReport> {
    let config = scan_config(path)?;
    eprintln!("Scanning {}...", config.root.display());

    let scan = FileScanner::new().scan(&config).context("Scan failed")?;
    if scan.has_warnings() {
        eprintln!("{} file(s) could not be read and were skipped", scan.warnings.len());
    }

    Ok(DuplicateGrouper::with_sort_key(sort_key).find_duplicates(&scan.records))
}

fn analyze_dependencies(
    path: &Path,
    sort_key: DependencySortKey,
    precise: bool,
) -> Result<DependencyReport> {
    let config = scan_config(path)?;
    let sources = FileScanner::new()
        .source_files(&config)
        .context("Scan failed")?;

    let local_mode = if precise {
        LocalDependencyMode::Imported
    } else {
        LocalDependencyMode::Containment
    };
    let dep_config = DependencyConfig::builder()
        .sort_key(sort_key)
        .local_mode(local_mode)
        .build()?;

    Ok(DependencyAnalyzer::with_config(dep_config).analyze(&sources))
}

/// Map 1-based positions to entries, keeping the order given.
fn resolve_selection(entries: &[FileRecord], positions: &[usize]) -> Result<Vec<FileRecord>> {
    positions
        .iter()
        .map(|&n| match n.checked_sub(1).and_then(|i| entries.get(i)) {
            Some(record) => Ok(record.clone()),
            None => bail!("No entry {n} in the listing ({} entries)", entries.len()),
        })
        .collect()
}

fn run_delete(
    path: &Path,
    positions: &[usize],
    sort_key: DuplicateSortKey,
    yes: bool,
    log: PathBuf,
) -> Result<()> {
    let report = find_duplicates(path, sort_key)?;
    let selection = resolve_selection(&report.entries, positions)?;

    let mut session = DeletionSession::new();
    session.select(selection.iter().map(|r| r.path.clone()).collect());
    session.request_confirmation()?;

    println!("Selected for deletion:");
    for record in &selection {
        println!("   {}  ({})", record.path.display(), record.size_display());
    }

    if !yes && !prompt::confirm("Are you sure you want to delete these files?", Some(false))? {
        session.cancel();
        println!("Nothing deleted.");
        return Ok(());
    }

    let (outcome, refreshed) =
        session.confirm(&DeletionLog::new(log), || find_duplicates(path, sort_key))?;

    println!("{}", outcome.summary());
    println!();
    print_duplicates(&refreshed?);

    Ok(())
}

fn print_duplicates(report: &DuplicateReport) {
    println!("{}", "─".repeat(70));
    println!(" Duplicate Files (by {})", report.sort_key);
    println!("{}", "─".repeat(70));
    println!();

    if !report.has_duplicates() {
        println!(" No duplicate files found.");
        return;
    }

    println!(
        " {} groups, {} files, {} total",
        report.group_count,
        report.entries.len(),
        format_size(report.total_size())
    );
    println!();
    println!(
        " {:>4}  {:<28} {:>10}  {:<19}  Path",
        "#", "Filename", "Size", "Last Modified"
    );
    for (i, record) in report.entries.iter().enumerate() {
        println!(
            " {:>4}  {:<28} {:>10}  {:<19}  {}",
            i + 1,
            truncate(&record.filename, 28),
            record.size_display(),
            record.modified_display(),
            record.path.display()
        );
    }
}

fn print_dependencies(report: &DependencyReport) {
    println!("{}", "─".repeat(70));
    println!(" Python Dependencies (by {})", report.sort_key);
    println!("{}", "─".repeat(70));
    println!();

    if report.records.is_empty() {
        println!(" No Python files analysed.");
    }

    for record in &report.records {
        println!(" {}", record.file.display());
        println!("   imports: {}", record.imports_display());
        println!("   local:   {}", record.local_dependencies_display());
    }

    if !report.skipped.is_empty() {
        println!();
        println!(" Skipped {} file(s):", report.skipped.len());
        for skipped in &report.skipped {
            println!("   {}: {}", skipped.path.display(), skipped.reason);
        }
    }
}

fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 1).collect();
        format!("{head}…")
    }
}
