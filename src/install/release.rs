use serde::Deserialize;

use crate::Result;

/// The release index's record of the latest published release.
///
/// Only the fields the installer needs are deserialized; everything else in
/// the response is ignored.
#[derive(Debug, Deserialize)]
pub struct Release {
    pub tag_name: String,
    pub assets: Vec<Asset>,
}

/// One downloadable file attached to a release.
#[derive(Clone, Debug, Deserialize)]
pub struct Asset {
    pub name: String,
    pub browser_download_url: String,
}

impl Release {
    pub fn from_json(body: &str) -> Result<Release> {
        Ok(serde_json::from_str(body)?)
    }

    /// The first asset whose name contains `platform` and ends with `suffix`.
    pub fn asset_for(&self, platform: &str, suffix: &str) -> Option<&Asset> {
        self.assets
            .iter()
            .find(|asset| asset.name.contains(platform) && asset.name.ends_with(suffix))
    }
}
