use crate::generator::ReadmeGenerator;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Run generate command
pub fn run(dir: &Path, output: Option<&Path>, dry_run: bool) -> Result<()> {
    let generator = ReadmeGenerator::new(dir);

    if dry_run {
        print!("{}", generator.generate_readme()?);
        return Ok(());
    }

    println!(
        "{}",
        format!("📝 Generating documentation for {}...", dir.display()).cyan()
    );
    let path = generator.write_readme(output)?;
    println!("{}", format!("✅ Generated {}", path.display()).green());
    Ok(())
}
