use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use sedump_core::{TableDef, catalog};
use sedump_sqlite::{LoadReport, Loader};

mod logging;

/// CLI output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Table,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "sedump-import")]
#[command(about = "Stack Exchange XML data-dump to SQLite importer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load the dump files into the database and build indices.
    Import(ImportArgs),
    /// Show per-table row counts for an existing database.
    Status(StatusArgs),
}

#[derive(Debug, Args)]
struct ImportArgs {
    /// Directory containing the dump XML files.
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,
    /// Database file name, created inside the data directory.
    #[arg(long, default_value = "so-dump.db")]
    database: String,
    /// Log file name, written inside the data directory.
    #[arg(long, default_value = "so-import.log")]
    log_file: String,
    /// Comma-separated subset of tables to load (default: all, in catalog order).
    #[arg(long)]
    tables: Option<String>,
    /// Skip the final index pass (for re-runs against an existing database).
    #[arg(long)]
    skip_indices: bool,
}

#[derive(Debug, Args)]
struct StatusArgs {
    /// Directory containing the database file.
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,
    /// Database file name inside the data directory.
    #[arg(long, default_value = "so-dump.db")]
    database: String,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: CliOutputFormat,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Import(args) => run_import(args),
        Command::Status(args) => run_status(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_import(args: ImportArgs) -> Result<(), String> {
    let tables = select_tables(args.tables)?;

    logging::init(&args.data_dir.join(&args.log_file))?;

    let db_path = args.data_dir.join(&args.database);
    tracing::info!(
        "importing {} table(s) from '{}' into '{}'",
        tables.len(),
        args.data_dir.display(),
        db_path.display()
    );
    let conn = rusqlite::Connection::open(&db_path)
        .map_err(|err| format!("Failed to open database '{}': {err}", db_path.display()))?;
    let mut loader = Loader::new(conn);

    let mut reports: Vec<LoadReport> = Vec::with_capacity(tables.len());
    for table in tables {
        let path = resolve_dump_file(&args.data_dir, table);
        println!("Opening {}", path.display());
        let report = loader
            .load_file(table, &path)
            .map_err(|err| format!("Failed to load '{}': {err}", path.display()))?;
        reports.push(report);
    }

    if !args.skip_indices {
        println!("Creating indices...");
        loader
            .create_indices()
            .map_err(|err| err.to_string())?;
    }

    println!("Import complete:");
    for report in &reports {
        println!(
            "  {}: {} inserted, {} skipped",
            report.table, report.inserted, report.skipped
        );
    }

    Ok(())
}

fn run_status(args: StatusArgs) -> Result<(), String> {
    let db_path = args.data_dir.join(&args.database);
    let conn = rusqlite::Connection::open(&db_path)
        .map_err(|err| format!("Failed to open database '{}': {err}", db_path.display()))?;
    let status = Loader::new(conn)
        .status()
        .map_err(|err| format!("Failed to read status: {err}"))?;

    match args.format {
        CliOutputFormat::Json => {
            let json = serde_json::to_string_pretty(&status)
                .map_err(|err| format!("Failed to serialize status: {err}"))?;
            println!("{json}");
        }
        CliOutputFormat::Table => {
            println!("Database: {}", db_path.display());
            for table in &status.tables {
                if table.exists {
                    println!("  {}: {} rows", table.name, table.rows);
                } else {
                    println!("  {}: absent", table.name);
                }
            }
            println!(
                "  posts search index: {}",
                if status.search_index { "yes" } else { "no" }
            );
        }
    }

    Ok(())
}

/// Resolves the tables to process: the whole catalog in enumeration order,
/// or the requested subset. Unknown names are a configuration error.
fn select_tables(raw: Option<String>) -> Result<Vec<&'static TableDef>, String> {
    let requested = parse_csv_list(raw);
    if requested.is_empty() {
        return Ok(catalog::TABLES.iter().collect());
    }
    requested
        .iter()
        .map(|name| {
            catalog::table(&name.to_lowercase())
                .ok_or_else(|| format!("unknown table '{name}' (no catalog entry)"))
        })
        .collect()
}

/// Prefers `<Stem>.xml`, falling back to `<Stem>.xml.gz` when only the
/// compressed file is present.
fn resolve_dump_file(data_dir: &Path, table: &TableDef) -> PathBuf {
    let plain = data_dir.join(table.xml_file());
    if plain.exists() {
        return plain;
    }
    let gzipped = data_dir.join(format!("{}.gz", table.xml_file()));
    if gzipped.exists() { gzipped } else { plain }
}

fn parse_csv_list(raw: Option<String>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{parse_csv_list, select_tables};

    #[test]
    fn test_parse_csv_list_trims_and_drops_empty() {
        let parsed = parse_csv_list(Some(" badges, posts, ,tags ".to_string()));
        assert_eq!(parsed, vec!["badges", "posts", "tags"]);
    }

    #[test]
    fn test_select_tables_defaults_to_full_catalog() {
        let tables = select_tables(None).unwrap();
        assert_eq!(tables.len(), 7);
        assert_eq!(tables[0].name, "badges");
        assert_eq!(tables[6].name, "tags");
    }

    #[test]
    fn test_select_tables_accepts_any_casing() {
        let tables = select_tables(Some("PostLinks,votes".to_string())).unwrap();
        let names: Vec<&str> = tables.iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["postlinks", "votes"]);
    }

    #[test]
    fn test_select_tables_rejects_unknown_names() {
        let err = select_tables(Some("posthistory".to_string())).unwrap_err();
        assert!(err.contains("posthistory"));
    }
}
