/// Ports module defining interfaces for hexagonal architecture
///
/// Only outbound (driven) ports exist here: the infrastructure seams the
/// application core talks through.
pub mod outbound;
