use actix_web::web::Bytes;
use thiserror::Error;

use cfdb_core::folder::current_millis;
use cfdb_core::hosting::LOGO_FILE;
use cfdb_core::{FolderName, HostingSite, PublishResult};
use cfdb_pack::{extract_zip, ArchiveError};
use cfdb_publish::{publish_target, ContentPublisher, PublishError, PublishTarget};

pub const DEFAULT_DISPLAY_NAME: &str = "game";

#[derive(Clone, Debug, Default)]
pub struct UploadRequest {
    pub display_name: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub archive: Option<Bytes>,
    pub logo: Option<Bytes>,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{0}")]
    MissingInput(&'static str),
    #[error(transparent)]
    Archive(#[from] ArchiveError),
    #[error(transparent)]
    Publish(#[from] PublishError),
    #[error("upload worker failed: {0}")]
    Worker(String),
}

/// Unpacks one uploaded archive and commits its files, in archive order,
/// under a fresh folder.
///
/// Publishing is strictly sequential and stops at the first failure; files
/// committed before that point stay in the repository.
pub struct UploadService<P> {
    publisher: P,
    site: HostingSite,
    require_logo: bool,
    clock: fn() -> u64,
}

impl<P: ContentPublisher> UploadService<P> {
    pub fn new(publisher: P, site: HostingSite) -> Self {
        Self {
            publisher,
            site,
            require_logo: false,
            clock: current_millis,
        }
    }

    pub fn require_logo(mut self, required: bool) -> Self {
        self.require_logo = required;
        self
    }

    pub fn with_clock(mut self, clock: fn() -> u64) -> Self {
        self.clock = clock;
        self
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub fn publish_upload(&self, request: UploadRequest) -> Result<PublishResult, UploadError> {
        let archive = request
            .archive
            .ok_or(UploadError::MissingInput("ZIP file is required."))?;
        if self.require_logo && request.logo.is_none() {
            return Err(UploadError::MissingInput("ZIP and logo are required."));
        }

        let display_name = request
            .display_name
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());
        let folder = FolderName::derive(&display_name, (self.clock)());
        log::debug!(
            "upload '{}' by {} ({} bytes of description)",
            display_name,
            request.author.as_deref().unwrap_or("Unknown"),
            request.description.as_deref().map_or(0, str::len)
        );

        let entries = extract_zip(&archive)?;
        log::info!("uploading {} files to {}", entries.len(), folder);

        let mut published = 0;
        for entry in entries {
            let target = PublishTarget::new(folder.join(&entry.path), entry.content);
            publish_target(&self.publisher, &target)?;
            published += 1;
        }

        let with_logo = match request.logo {
            Some(logo) => {
                let target = PublishTarget::new(folder.join(LOGO_FILE), logo.to_vec());
                publish_target(&self.publisher, &target)?;
                published += 1;
                true
            }
            None => false,
        };

        let result = PublishResult::new(&self.site, folder, published, with_logo);
        log::info!("upload done: {}", result.derived_urls.index);
        Ok(result)
    }
}
