//! Read models for CQRS-lite pattern
//!
//! View-optimized structs that flatten domain data for listings.

pub mod product_listing;

pub use product_listing::{ProductListing, ProductRow};
