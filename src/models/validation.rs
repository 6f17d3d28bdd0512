use serde::{Serialize, Serializer};
use std::fmt;

/// Level of a validation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Fails the run
    Error,
    /// Advisory, never affects validity
    Warning,
    /// Passing check, informational only
    Info,
}

impl Level {
    /// Get display symbol for level
    pub fn symbol(&self) -> &'static str {
        match self {
            Level::Error => "❌",
            Level::Warning => "⚠️ ",
            Level::Info => "✅",
        }
    }
}

/// A single message produced during a validation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub level: Level,
    pub text: String,
}

impl Message {
    pub fn new(level: Level, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level.symbol(), self.text)
    }
}

/// Outcome of one full course validation run
///
/// Messages keep discovery order. Validity is derived from the error count,
/// so warnings and info can never flip the verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub error_count: usize,
    pub stage_count: usize,
    pub messages: Vec<Message>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed (no errors)
    pub fn is_valid(&self) -> bool {
        self.error_count == 0
    }

    pub fn add_error(&mut self, text: impl Into<String>) {
        self.error_count += 1;
        self.messages.push(Message::new(Level::Error, text));
    }

    pub fn add_warning(&mut self, text: impl Into<String>) {
        self.messages.push(Message::new(Level::Warning, text));
    }

    pub fn add_info(&mut self, text: impl Into<String>) {
        self.messages.push(Message::new(Level::Info, text));
    }

    /// Count messages at a given level
    pub fn count_by_level(&self, level: Level) -> usize {
        self.messages.iter().filter(|m| m.level == level).count()
    }

    /// Messages rendered with their level prefix
    pub fn lines(&self) -> Vec<String> {
        self.messages.iter().map(|m| m.to_string()).collect()
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct JsonOutput<'a> {
            valid: bool,
            error_count: usize,
            warning_count: usize,
            stage_count: usize,
            messages: &'a [Message],
        }

        JsonOutput {
            valid: self.is_valid(),
            error_count: self.error_count,
            warning_count: self.count_by_level(Level::Warning),
            stage_count: self.stage_count,
            messages: &self.messages,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_errors_affect_validity() {
        let mut result = ValidationResult::new();
        result.add_warning("stages/intro/README.md: 12 lines (recommended: 30-60)");
        result.add_info("course.yml: schema valid");
        assert!(result.is_valid());

        result.add_error("stages/intro/LEARNING.md: missing");
        assert!(!result.is_valid());
        assert_eq!(result.error_count, 1);
        assert_eq!(result.messages.len(), 3);
    }

    #[test]
    fn test_lines_keep_order_and_prefix() {
        let mut result = ValidationResult::new();
        result.add_error("a");
        result.add_warning("b");
        result.add_info("c");
        assert_eq!(result.lines(), vec!["❌ a", "⚠️  b", "✅ c"]);
    }

    #[test]
    fn test_json_output() {
        let mut result = ValidationResult::new();
        result.stage_count = 2;
        result.add_warning("stages/extra: directory exists but not in stage_order");

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["valid"], true);
        assert_eq!(json["stage_count"], 2);
        assert_eq!(json["warning_count"], 1);
        assert_eq!(json["messages"][0]["level"], "warning");
    }
}
