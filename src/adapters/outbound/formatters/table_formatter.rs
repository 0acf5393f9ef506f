use crate::application::read_models::{ProductListing, ProductRow};
use crate::installer_media::domain::{IpswEntry, RepoItem, UNKNOWN};
use crate::ports::outbound::ListingFormatter;
use crate::shared::Result;
use owo_colors::OwoColorize;

/// TableFormatter adapter: fixed-width tables for the terminal
///
/// Incompatible products stay in the table, annotated with the reason, and
/// are dimmed when color output is enabled.
pub struct TableFormatter {
    color: bool,
}

impl TableFormatter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn product_line(&self, row: &ProductRow) -> String {
        let line = format!(
            "{:>2} {:>14} {:>10} {:>8} {:>11}  {}",
            row.index, row.product_key, row.version, row.build, row.post_date, row.title
        );
        if row.verdict.is_compatible() {
            return line;
        }
        let line = format!("{}  ({})", line, row.verdict);
        if self.color {
            line.dimmed().to_string()
        } else {
            line
        }
    }

    /// Table of restore images, numbered from 1.
    pub fn format_ipsws(&self, entries: &[IpswEntry]) -> String {
        let mut output = format!(
            "{:>2}  {:>16} {:>10} {:>8} {:>11}\n",
            "#", "Model", "Version", "Build", "Checksum"
        );
        for (position, entry) in entries.iter().enumerate() {
            output.push_str(&format!(
                "{:>2}  {:>16} {:>10} {:>8} {:>11}\n",
                position + 1,
                entry.model,
                entry.product_version.as_deref().unwrap_or(UNKNOWN),
                entry.build_version.as_deref().unwrap_or(UNKNOWN),
                entry.short_checksum()
            ));
        }
        output
    }

    /// Summary of repo items that ship bundle-style packages, sorted by name.
    pub fn format_bundle_report(&self, items: &[RepoItem]) -> String {
        let mut sorted: Vec<&RepoItem> = items.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));

        let mut output = format!("Found {} items with bundle-style pkgs.\n", items.len());
        for item in sorted {
            output.push_str(&format!("{}\n    {}\n", item.display_name(), item.location));
        }
        output
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ListingFormatter for TableFormatter {
    fn format(&self, listing: &ProductListing) -> Result<String> {
        let header = format!(
            "{:>2} {:>14} {:>10} {:>8} {:>11}  {}",
            "#", "ProductID", "Version", "Build", "Post Date", "Title"
        );
        let mut output = if self.color {
            header.bold().to_string()
        } else {
            header
        };
        output.push('\n');
        for row in &listing.products {
            output.push_str(&self.product_line(row));
            output.push('\n');
        }
        Ok(output)
    }
}
