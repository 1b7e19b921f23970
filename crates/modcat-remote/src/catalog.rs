use crate::cache::{is_cached, CacheLayout};
use crate::{CatalogManifestProvider, HttpFetcher, ProviderConfig, ProviderError};
use modcat_schema::{CatalogIndex, CatalogRecord, OsTag, ReleaseVersion};

/// Catalog provider backed by the catalog service's per-OS release index.
///
/// [`refresh`](CatalogManifestProvider::refresh) downloads the whole index
/// for an OS in a single request; [`load`](CatalogManifestProvider::load)
/// reads a version's modules out of the cached copy.
pub struct HttpCatalogProvider {
    layout: CacheLayout,
    fetcher: HttpFetcher,
    catalog_url: String,
}

impl HttpCatalogProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            layout: CacheLayout::new(&config.cache_dir),
            fetcher: HttpFetcher::new(config.auth_token.clone()),
            catalog_url: config.catalog_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn layout(&self) -> &CacheLayout {
        &self.layout
    }

    fn index_url(&self, os: OsTag) -> String {
        format!("{}/{}", self.catalog_url, CacheLayout::catalog_file_name(os))
    }
}

impl CatalogManifestProvider for HttpCatalogProvider {
    fn refresh(&self, os: OsTag) -> Result<(), ProviderError> {
        let url = self.index_url(os);
        let body = self.fetcher.get(&url)?;
        // Refuse to overwrite a good cache with something that does not parse.
        let index = CatalogIndex::from_bytes(&body)?;
        CacheLayout::write_atomic(&self.layout.catalog_path(os), &body)?;
        tracing::info!(
            "refreshed catalog index for {os} ({} releases)",
            index.versions().len()
        );
        Ok(())
    }

    fn load(
        &self,
        version: &ReleaseVersion,
        os: OsTag,
        offline: bool,
    ) -> Result<Vec<CatalogRecord>, ProviderError> {
        if !offline {
            self.refresh(os)
                .map_err(|e| ProviderError::unavailable(version, e))?;
        }

        let path = self.layout.catalog_path(os);
        if !is_cached(&path) {
            return Err(ProviderError::unavailable(
                version,
                format!("no cached catalog index at {}", path.display()),
            ));
        }
        let index = CatalogIndex::from_file(&path)
            .map_err(|e| ProviderError::unavailable(version, e))?;
        let modules = index.modules_for(version);
        if modules.is_empty() {
            tracing::debug!("catalog lists no modules for {version} ({os})");
        }
        Ok(modules.to_vec())
    }
}
