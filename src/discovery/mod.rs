mod file_finder;

pub use file_finder::{AssetFile, AssetKind, AssetStats, FileFinder};
