//! Race catalog use cases.

mod race_resolver;

pub use race_resolver::RaceResolver;
