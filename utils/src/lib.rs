pub mod cli;
pub mod logging;

pub use cli::CommonConfig;
pub use logging::init_tracing;
