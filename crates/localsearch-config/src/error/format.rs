//! Terminal rendering of [`ConfigError`]

use crate::error::ConfigError;
use std::fmt;
use yansi::Paint;

pub struct ErrorFormatter {
    error: ConfigError,
    use_colors: bool,
}

impl ErrorFormatter {
    /// Colors are used when stderr is a terminal and `NO_COLOR` is unset
    pub fn new(error: ConfigError) -> Self {
        Self {
            error,
            use_colors: supports_color(),
        }
    }

    pub fn format(&self) -> String {
        if !self.use_colors {
            return self.error.to_string();
        }

        let cross = "✗".red().bold();
        match &self.error {
            ConfigError::UnknownField {
                section,
                field,
                options,
                hint,
            } => format!(
                "{} Unknown field {} in {}\n  {}: {}\n  {}: {}",
                cross,
                format!("'{}'", field).yellow(),
                section.cyan(),
                "Valid fields".bold(),
                options,
                "Hint".bold(),
                hint.green()
            ),
            ConfigError::OutOfRange {
                field,
                value,
                min,
                max,
            } => format!(
                "{} {} must be between {} and {}, got {}",
                cross,
                field.cyan(),
                min.green(),
                max.green(),
                value.red()
            ),
            ConfigError::InvalidUrl { field, value } => format!(
                "{} {} needs an absolute http(s) URL, got {}",
                cross,
                field.cyan(),
                format!("'{}'", value).yellow()
            ),
            ConfigError::InvalidDescriptor { message } => {
                format!("{} Endpoint descriptor rejected: {}", cross, message.yellow())
            }
            ConfigError::ParseError {
                format,
                location,
                message,
                context,
            } => format!(
                "{} Invalid {} configuration{}\n{}\n{}",
                cross,
                format.bold(),
                location.cyan(),
                message,
                context.dim()
            ),
            ConfigError::ValidationError { field, message } => {
                format!("{} {}: {}", cross, field.cyan(), message)
            }
            ConfigError::FileNotFound { path } => format!(
                "{} Configuration file not found: {}",
                cross,
                path.display().to_string().yellow()
            ),
            other => format!("{} {}", cross, other),
        }
    }
}

fn supports_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stderr)
}

impl fmt::Display for ErrorFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}
