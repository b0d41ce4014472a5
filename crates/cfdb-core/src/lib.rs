pub mod config;
pub mod folder;
pub mod hosting;
pub mod outcome;
pub mod path;

pub use config::{ConfigError, PublishConfig};
pub use folder::FolderName;
pub use hosting::HostingSite;
pub use outcome::{DerivedUrls, PublishResult};
pub use path::check_relative_path;
