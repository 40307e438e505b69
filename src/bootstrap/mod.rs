//! Startup wiring: storage backends, schema and seed data.

mod backends;
mod error;
mod schema;
mod seed;

pub use backends::Backends;
pub use error::BootstrapError;
pub use schema::{SCHEMA_SQL, apply_schema, connect};
pub use seed::{
    DEFAULT_SEED_YAML, SeedPlan, SeedReport, SeedTaskType, SeedUser, apply_seed_plan,
    load_seed_plan,
};

#[cfg(test)]
mod tests;
