pub mod logging;

pub use logging::{default_level, init_logging};
