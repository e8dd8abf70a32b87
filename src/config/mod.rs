mod loader;

pub use loader::{
    Config, EntryConfig, EntryFallback, ExtractionConfig, NamingConfig, ReportConfig,
};
