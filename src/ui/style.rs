use console::style;
use std::fmt::Display;

/// Green bold: success checkmarks, completed tasks
pub fn success<D: Display>(text: D) -> String {
    style(text).green().bold().to_string()
}

/// White bold: panel titles, section headers
pub fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

/// Dim: status labels, secondary text, decorative lines
pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// Yellow: warnings, loading indicators
pub fn yellow<D: Display>(text: D) -> String {
    style(text).yellow().to_string()
}

/// Cyan bold: step numbers, bullet points, speaker labels
pub fn accent<D: Display>(text: D) -> String {
    style(text).cyan().bold().to_string()
}

/// Cyan underlined: URLs, links
pub fn url<D: Display>(text: D) -> String {
    style(text).cyan().underlined().to_string()
}
