use crate::cache::{is_cached, CacheLayout};
use crate::{HttpFetcher, LegacyManifestProvider, ProviderConfig, ProviderError};
use modcat_schema::{parse_legacy_file, LegacyManifest, OsTag, ReleaseVersion, SourceMap};

/// Legacy manifest provider backed by HTTP and the local cache.
///
/// Cache-first: a manifest downloaded once is reused for every later call,
/// online or offline. The remote file lives at `<base_url><file name>` where
/// the base URL comes from the version's entry in the [`SourceMap`].
pub struct HttpLegacyProvider {
    layout: CacheLayout,
    fetcher: HttpFetcher,
}

impl HttpLegacyProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            layout: CacheLayout::new(&config.cache_dir),
            fetcher: HttpFetcher::new(config.auth_token.clone()),
        }
    }

    pub fn layout(&self) -> &CacheLayout {
        &self.layout
    }

    fn download(
        &self,
        version: &ReleaseVersion,
        sources: &SourceMap,
        os: OsTag,
    ) -> Result<(), ProviderError> {
        let base_url = sources
            .base_url(version)
            .ok_or_else(|| ProviderError::unavailable(version, "no base URL in source map"))?;
        let url = format!("{base_url}{}", CacheLayout::legacy_file_name(version, os));
        let body = self
            .fetcher
            .get(&url)
            .map_err(|e| ProviderError::unavailable(version, e))?;
        CacheLayout::write_atomic(&self.layout.legacy_path(version, os), &body)?;
        tracing::info!("downloaded legacy manifest for {version} ({os})");
        Ok(())
    }
}

impl LegacyManifestProvider for HttpLegacyProvider {
    fn load(
        &self,
        version: &ReleaseVersion,
        sources: &SourceMap,
        os: OsTag,
        offline: bool,
    ) -> Result<LegacyManifest, ProviderError> {
        let path = self.layout.legacy_path(version, os);
        if is_cached(&path) {
            tracing::debug!("legacy manifest cache hit: {}", path.display());
        } else if offline {
            return Err(ProviderError::unavailable(
                version,
                format!("offline and no cached legacy manifest at {}", path.display()),
            ));
        } else {
            tracing::debug!("legacy manifest cache miss: {}", path.display());
            self.download(version, sources, os)?;
        }
        Ok(parse_legacy_file(&path)?)
    }
}
