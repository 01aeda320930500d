pub mod names;

pub use names::NameGenerator;
