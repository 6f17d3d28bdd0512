//! README Generator
//!
//! Renders a course-level README.md from `course.yml` and each stage's
//! `stage.yml`, listing stages in `stage_order` order.

use crate::models::{CourseManifest, StageManifest};
use crate::validator::course::{COURSE_MANIFEST, STAGES_DIR};
use crate::validator::stage::STAGE_MANIFEST;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

pub const OUTPUT_FILENAME: &str = "README.md";

/// Generates README documentation for a course directory
pub struct ReadmeGenerator {
    course_dir: PathBuf,
}

impl ReadmeGenerator {
    pub fn new(course_dir: impl Into<PathBuf>) -> Self {
        Self {
            course_dir: course_dir.into(),
        }
    }

    /// Render the README content
    pub fn generate_readme(&self) -> Result<String> {
        let course = CourseManifest::load(&self.course_dir.join(COURSE_MANIFEST))?;
        let mut out = String::new();

        let title = if course.title.is_empty() {
            &course.slug
        } else {
            &course.title
        };
        writeln!(out, "# {}", title)?;
        writeln!(out)?;

        if let Some(description) = course.description.as_deref().map(str::trim) {
            if !description.is_empty() {
                writeln!(out, "{}", description)?;
                writeln!(out)?;
            }
        }

        let mut facts = Vec::new();
        if let Some(language) = &course.language {
            facts.push(format!("**Language:** {}", language));
        }
        if let Some(difficulty) = &course.difficulty {
            facts.push(format!("**Level:** {}", difficulty));
        }
        if !course.authors.is_empty() {
            facts.push(format!("**Authors:** {}", course.authors.join(", ")));
        }
        if !facts.is_empty() {
            for fact in facts {
                writeln!(out, "- {}", fact)?;
            }
            writeln!(out)?;
        }

        writeln!(out, "## Stages")?;
        writeln!(out)?;
        writeln!(out, "| # | Stage | Title | Difficulty |")?;
        writeln!(out, "|---|-------|-------|------------|")?;

        for (index, slug) in course.stage_order.iter().enumerate() {
            let (title, difficulty) = match self.load_stage(slug)? {
                Some(stage) => (
                    escape_cell(&stage.title),
                    stage.difficulty.unwrap_or_else(|| "-".to_string()),
                ),
                None => ("_(missing)_".to_string(), "-".to_string()),
            };
            writeln!(
                out,
                "| {} | [`{}`]({}/{}/) | {} | {} |",
                index + 1,
                slug,
                STAGES_DIR,
                slug,
                title,
                difficulty
            )?;
        }

        writeln!(out)?;
        writeln!(
            out,
            "_Generated from `{}` by schema-tool. Do not edit by hand._",
            COURSE_MANIFEST
        )?;

        Ok(out)
    }

    /// Write the README, returning the path written
    ///
    /// Defaults to `<course_dir>/README.md` when `output` is `None`.
    pub fn write_readme(&self, output: Option<&Path>) -> Result<PathBuf> {
        let content = self.generate_readme()?;
        let path = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.course_dir.join(OUTPUT_FILENAME));

        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    fn load_stage(&self, slug: &str) -> Result<Option<StageManifest>> {
        let path = self.course_dir.join(STAGES_DIR).join(slug).join(STAGE_MANIFEST);
        if !path.exists() {
            tracing::warn!(stage = %slug, "stage.yml not found, listing as missing");
            return Ok(None);
        }
        StageManifest::load(&path).map(Some)
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
