//! exif-dump - Print the EXIF metadata of JPEG files.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jpeg_exif::{
    display, Cli, ExifDocument, ExifError, ExifReader, IfdEntry, IfdGroup, OutputFormat,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if let Err(e) = cli.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let reader = ExifReader::with_config(cli.reader_config());
    let mut failed = false;

    for path in &cli.files {
        let result = reader.read_path(path);
        if result.is_err() {
            failed = true;
        }

        match cli.format {
            OutputFormat::Text => print_text(path, &result),
            OutputFormat::Json => print_json(path, &result),
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "jpeg_exif=debug"
    } else {
        "jpeg_exif=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// =============================================================================
// Text Output
// =============================================================================

fn print_text(path: &Path, result: &Result<ExifDocument, ExifError>) {
    println!("{}", path.display());
    println!("─────────────────────────────────");

    let doc = match result {
        Ok(doc) => doc,
        Err(e) => {
            println!("  Error: {}", e);
            println!();
            return;
        }
    };

    if doc.is_empty() {
        println!("  (no tags)");
    }

    for group in doc.groups() {
        println!("[{}]", group.kind());
        for entry in group.entries() {
            println!(
                "  {} = {}",
                display::tag_name(group.kind(), entry.tag_id),
                display::format_value(group.kind(), entry.tag_id, &entry.value)
            );
        }
    }

    if let Some(created_at) = doc.created_at() {
        println!("Created: {}", created_at);
    }
    if let Some(location) = doc.geolocation() {
        println!(
            "Location: {}, {}",
            display::coordinate(location.latitude),
            display::coordinate(location.longitude)
        );
    }

    let errors = doc.entry_errors();
    if !errors.is_empty() {
        println!("Skipped entries:");
        for e in errors {
            println!("  {}", e);
        }
    }
    println!();
}

// =============================================================================
// JSON Output
// =============================================================================

fn print_json(path: &Path, result: &Result<ExifDocument, ExifError>) {
    let json = match result {
        Ok(doc) => {
            let groups: serde_json::Map<String, serde_json::Value> =
                doc.groups().map(group_json).collect();
            let errors: Vec<String> = doc.entry_errors().iter().map(|e| e.to_string()).collect();

            serde_json::json!({
                "file": path.display().to_string(),
                "byte_order": doc.byte_order(),
                "groups": groups,
                "created_at": doc.created_at().map(|t| t.to_string()),
                "geolocation": doc.geolocation(),
                "errors": errors,
            })
        }
        Err(e) => serde_json::json!({
            "file": path.display().to_string(),
            "error": e.to_string(),
        }),
    };

    match serde_json::to_string_pretty(&json) {
        Ok(text) => println!("{}", text),
        Err(e) => error!("Failed to serialize output: {}", e),
    }
}

fn group_json(group: &IfdGroup) -> (String, serde_json::Value) {
    let tags: serde_json::Map<String, serde_json::Value> = group
        .entries()
        .map(|entry| {
            let name = display::tag_name(group.kind(), entry.tag_id);
            (name, tag_json(group, entry))
        })
        .collect();

    (group.kind().to_string(), serde_json::Value::Object(tags))
}

fn tag_json(group: &IfdGroup, entry: &IfdEntry) -> serde_json::Value {
    serde_json::json!({
        "field_type": entry.value_type.to_string(),
        "raw": entry.value,
        "display": display::format_value(group.kind(), entry.tag_id, &entry.value),
    })
}
