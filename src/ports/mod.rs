/// Ports module defining interfaces for hexagonal architecture
///
/// The application core only talks to the outside world (curl, hdiutil,
/// installer, the console) through the outbound ports defined here.
pub mod outbound;
