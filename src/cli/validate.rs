use crate::models::{Level, LintConfig, Message, ValidationResult};
use crate::models::config::CONFIG_FILENAME;
use crate::validator::{CourseValidator, SchemaStore, ValidateOptions};
use crate::Result;
use anyhow::{bail, Context};
use colored::Colorize;
use std::path::Path;

/// Options for the validate command
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateArgs {
    pub verbose: bool,
    pub json: bool,
}

/// Run validate command with the bundled schemas
pub fn run(dir: &Path, args: ValidateArgs) -> Result<()> {
    run_with_store(dir, SchemaStore::embedded(), args)
}

/// Fail if any schema in the store did not compile
///
/// The returned error wraps the first `SchemaCompileError`; any further
/// defects are printed to stderr.
pub fn ensure_loaded(store: &SchemaStore) -> Result<()> {
    if let Some(defect) = store.defects().first() {
        for other in store.defects().iter().skip(1) {
            eprintln!("{}", format!("Error: {}", other).red());
        }
        return Err(defect.clone()).context("bundled schema is broken");
    }
    Ok(())
}

/// Run validate command against an already compiled store
pub fn run_with_store(dir: &Path, store: SchemaStore, args: ValidateArgs) -> Result<()> {
    // Checked before any course file is read
    ensure_loaded(&store)?;

    let config = LintConfig::load(dir)
        .with_context(|| format!("Failed to load {}", dir.join(CONFIG_FILENAME).display()))?;

    let options = ValidateOptions::new()
        .with_verbose(args.verbose)
        .with_rules(config.lines);
    let result = CourseValidator::with_store(store, options).validate(dir);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(dir, &result);
    }

    if !result.is_valid() {
        bail!("validation failed with {} errors", result.error_count);
    }
    Ok(())
}

fn print_report(dir: &Path, result: &ValidationResult) {
    println!(
        "{}",
        format!("🔍 Validating course: {}", dir.display()).cyan()
    );
    println!("{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());

    for message in &result.messages {
        print_message(message);
    }

    if result.is_valid() {
        println!();
        println!(
            "{}",
            format!(
                "✅ All validations passed! ({} stages checked)",
                result.stage_count
            )
            .green()
            .bold()
        );
        let warnings = result.count_by_level(Level::Warning);
        if warnings > 0 {
            println!("   {} {} warning(s)", "⚠️".yellow(), warnings);
        }
    }
}

fn print_message(message: &Message) {
    let line = message.to_string();
    match message.level {
        Level::Error => println!("{}", line.red()),
        Level::Warning => println!("{}", line.yellow()),
        Level::Info => println!("{}", line.green()),
    }
}
