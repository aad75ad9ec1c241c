pub mod deps;
pub mod disk_space;
pub mod logger;
pub mod process;

pub use deps::Dependencies;
pub use logger::init_logging;
