//! Configuration errors

pub mod format;

use std::path::PathBuf;
use thiserror::Error;

pub use format::ErrorFormatter;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unknown configuration format for file: {path}\nSupported formats: .yml, .yaml, .toml, .json")]
    UnknownFormat { path: PathBuf },

    /// Syntax or type error in a config file, with the surrounding lines
    #[error("Failed to parse {format} configuration{location}:\n{message}\n{context}")]
    ParseError {
        format: &'static str,
        location: String,
        message: String,
        context: String,
    },

    #[error("Failed to read configuration file: {path}\n{source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        value: u64,
        min: u64,
        max: u64,
    },

    #[error("{field} must be > {min}, got {value}")]
    InvalidInteger { field: String, value: u64, min: u64 },

    #[error("{field} must be an absolute http:// or https:// URL, got '{value}'")]
    InvalidUrl { field: String, value: String },

    /// `LOCALSEARCH_<SECTION>_<FIELD>` naming a field that doesn't exist
    #[error("Unknown field '{field}' in {section}\n  Valid fields: {options}\n  Hint: {hint}")]
    UnknownField {
        section: String,
        field: String,
        options: String,
        hint: String,
    },

    #[error("Failed to parse environment variable {var}: {message}")]
    EnvVarError { var: String, message: String },

    /// `tunnel_config.json` is malformed or carries no usable URL
    #[error("Invalid endpoint descriptor: {message}")]
    InvalidDescriptor { message: String },

    #[error("Validation error: {field}: {message}")]
    ValidationError { field: String, message: String },
}

impl ConfigError {
    /// Unknown-field error with a "did you mean" hint
    pub fn unknown_field(
        section: impl Into<String>,
        field: impl Into<String>,
        options: &[&str],
    ) -> Self {
        let field = field.into();
        let hint = Self::suggest_option(&field, options);
        Self::UnknownField {
            section: section.into(),
            field,
            options: options.join(", "),
            hint,
        }
    }

    pub fn from_yaml_error(err: serde_yaml::Error, content: &str, path: Option<&str>) -> Self {
        let line = err.location().map(|loc| loc.line());
        Self::parse_error("YAML", err.to_string(), content, path, line, None)
    }

    pub fn from_toml_error(err: toml::de::Error, content: &str, path: Option<&str>) -> Self {
        let line = err
            .span()
            .map(|span| content[..span.start].matches('\n').count() + 1);
        Self::parse_error("TOML", err.message().to_string(), content, path, line, None)
    }

    pub fn from_json_error(err: serde_json::Error, content: &str, path: Option<&str>) -> Self {
        let (line, column) = (err.line(), err.column());
        Self::parse_error("JSON", err.to_string(), content, path, Some(line), Some(column))
    }

    fn parse_error(
        format: &'static str,
        message: String,
        content: &str,
        path: Option<&str>,
        line: Option<usize>,
        column: Option<usize>,
    ) -> Self {
        Self::ParseError {
            format,
            location: path.map(|p| format!(" in {}", p)).unwrap_or_default(),
            message,
            context: line
                .map(|line| context_window(content, line, column))
                .unwrap_or_default(),
        }
    }

    fn suggest_option(input: &str, options: &[&str]) -> String {
        let input_lower = input.to_lowercase();
        let closest = options
            .iter()
            .map(|opt| (opt, Self::distance(&input_lower, &opt.to_lowercase())))
            .min_by_key(|(_, d)| *d);

        match closest {
            Some((opt, d)) if d <= 3 => format!("Did you mean '{}'?", opt),
            _ => "Check the variable name".to_string(),
        }
    }

    /// Levenshtein distance over chars
    fn distance(a: &str, b: &str) -> usize {
        let a_chars: Vec<char> = a.chars().collect();
        let b_chars: Vec<char> = b.chars().collect();
        let mut prev_row: Vec<usize> = (0..=b_chars.len()).collect();

        for (i, a_char) in a_chars.iter().enumerate() {
            let mut curr_row = vec![i + 1];
            for (j, b_char) in b_chars.iter().enumerate() {
                let cost = usize::from(a_char != b_char);
                let best = (curr_row[j] + 1)
                    .min(prev_row[j + 1] + 1)
                    .min(prev_row[j] + cost);
                curr_row.push(best);
            }
            prev_row = curr_row;
        }

        prev_row.last().copied().unwrap_or(0)
    }
}

/// Render lines around `line_num` (1-based) with a marker on the offending line
fn context_window(content: &str, line_num: usize, col_num: Option<usize>) -> String {
    let lines: Vec<&str> = content.lines().collect();
    if line_num == 0 || line_num > lines.len() {
        return String::new();
    }

    let start = line_num.saturating_sub(2);
    let end = (line_num + 1).min(lines.len());

    lines[start..end]
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let num = start + i + 1;
            if num != line_num {
                return format!("  {:3} | {}", num, line);
            }
            let mut marked = format!("→ {:3} | {}", num, line);
            if let Some(col) = col_num.filter(|c| *c > 0) {
                marked.push_str(&format!("\n      {}^", " ".repeat(col - 1)));
            }
            marked
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_field_suggests_close_match() {
        let err = ConfigError::unknown_field("defaults", "top_kk", &["top_k", "llm_model"]);
        assert!(err.to_string().contains("Did you mean 'top_k'?"));
    }

    #[test]
    fn test_unknown_field_without_close_match() {
        let err = ConfigError::unknown_field("defaults", "zzzzzzzz", &["top_k"]);
        assert!(err.to_string().contains("Check the variable name"));
    }

    #[test]
    fn test_json_context_marks_line() {
        let content = "{\n  \"server\": {\n    \"base_url\": \n}";
        let err = serde_json::from_str::<serde_json::Value>(content).unwrap_err();
        let formatted = ConfigError::from_json_error(err, content, Some("x.json")).to_string();
        assert!(formatted.contains(" in x.json"));
        assert!(formatted.contains("→"));
    }
}
