/// Installer media domain: catalog model, product resolution and
/// compatibility rules, plus the services that replicate and parse the
/// vendor feeds.
pub mod domain;
pub mod policies;
pub mod services;
