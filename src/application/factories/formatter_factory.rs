use crate::adapters::outbound::formatters::{JsonFormatter, TableFormatter};
use crate::ports::outbound::ListingFormatter;

/// Formatter type enumeration for factory pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatterType {
    /// Operator-facing table; `color` dims incompatible rows
    Table { color: bool },
    /// Machine-readable document for `--list`
    Json,
}

/// Factory for creating product listing formatters
///
/// Keeps the choice of formatter adapter out of the use cases and the CLI.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified type
    ///
    /// # Examples
    /// ```
    /// use macos_fetch::application::factories::{FormatterFactory, FormatterType};
    ///
    /// let formatter = FormatterFactory::create(FormatterType::Json);
    /// ```
    pub fn create(formatter_type: FormatterType) -> Box<dyn ListingFormatter> {
        match formatter_type {
            FormatterType::Table { color } => Box::new(TableFormatter::new(color)),
            FormatterType::Json => Box::new(JsonFormatter::new()),
        }
    }

    /// Formatter type for a run: `--list` is machine-readable, everything
    /// else is a table.
    pub fn for_listing(list_mode: bool, color: bool) -> FormatterType {
        if list_mode {
            FormatterType::Json
        } else {
            FormatterType::Table { color }
        }
    }
}
