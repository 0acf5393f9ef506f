use crate::application::read_models::ProductListing;
use crate::shared::Result;

/// ListingFormatter port for rendering a product listing
///
/// Implementations produce either the operator-facing table or a
/// machine-readable document.
pub trait ListingFormatter {
    /// Formats the listing
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, listing: &ProductListing) -> Result<String>;
}
