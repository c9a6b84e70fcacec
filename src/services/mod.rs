// Service exports
pub mod pool;
pub mod synthetic;

pub use pool::{load_request, parse_request, read_request};
pub use synthetic::{ensure_activity_coverage, generate_population, ACTIVITIES};
