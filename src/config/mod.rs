pub mod schema;

pub use schema::{GeneratorConfig, TwinConfig};
