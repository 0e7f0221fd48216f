pub mod fixtures;
pub mod vaa_builder;

pub use fixtures::*;
pub use vaa_builder::VaaBuilder;
