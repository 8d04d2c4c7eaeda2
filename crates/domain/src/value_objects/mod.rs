//! Value objects - Immutable objects defined by their attributes

mod attribute;

pub use attribute::Attribute;
