use serde::Serialize;

use crate::folder::FolderName;
use crate::hosting::HostingSite;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DerivedUrls {
    pub index: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
}

/// Outcome of one fully successful upload. Not persisted anywhere.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResult {
    pub folder_name: FolderName,
    pub published_count: usize,
    pub derived_urls: DerivedUrls,
}

impl PublishResult {
    pub fn new(
        site: &HostingSite,
        folder_name: FolderName,
        published_count: usize,
        with_asset: bool,
    ) -> Self {
        let derived_urls = DerivedUrls {
            index: site.index_url(&folder_name),
            asset: with_asset.then(|| site.asset_url(&folder_name)),
        };
        Self {
            folder_name,
            published_count,
            derived_urls,
        }
    }
}
