use super::{json_pretty, spin_fail, spin_ok, spinner, EXIT_SUCCESS};
use modcat_remote::{CatalogManifestProvider, HttpCatalogProvider, ProviderConfig};
use modcat_schema::OsTag;

pub fn run(config: &ProviderConfig, os: OsTag, json: bool) -> Result<u8, String> {
    let provider = HttpCatalogProvider::new(config);

    let pb = (!json).then(|| spinner("refreshing catalog…"));
    let result = provider.refresh(os);
    if let Some(pb) = &pb {
        match &result {
            Ok(()) => spin_ok(pb, "catalog refreshed"),
            Err(_) => spin_fail(pb, "catalog refresh failed"),
        }
    }
    result.map_err(|e| e.to_string())?;

    let path = provider.layout().catalog_path(os);
    if json {
        let payload = serde_json::json!({
            "os": os,
            "index": path.display().to_string(),
        });
        println!("{}", json_pretty(&payload)?);
    } else {
        println!("catalog index for {os} written to {}", path.display());
    }
    Ok(EXIT_SUCCESS)
}
