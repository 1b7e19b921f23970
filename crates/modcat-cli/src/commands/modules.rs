use super::{
    format_size, json_pretty, spin_fail, spin_ok, spinner, EXIT_MANIFEST_UNAVAILABLE, EXIT_SUCCESS,
};
use console::Style;
use modcat_core::{ModuleCatalogResolver, ModulesByVersion, ResolveOptions, VersionSelection};
use modcat_remote::{HttpCatalogProvider, HttpLegacyProvider, ProviderConfig};
use modcat_schema::{ModuleDescriptor, OsTag, ReleaseVersion, SourceMap};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// JSON view of a descriptor with sizes already converted to bytes.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ModuleView<'a> {
    id: &'a str,
    name: Option<&'a str>,
    description: Option<&'a str>,
    url: Option<&'a str>,
    download_size_bytes: Option<u64>,
    installed_size_bytes: Option<u64>,
    checksum: Option<&'a str>,
}

impl<'a> ModuleView<'a> {
    fn new(module: &'a ModuleDescriptor, os: OsTag) -> Self {
        Self {
            id: module.id().as_str(),
            name: module.name(),
            description: module.description(),
            url: module.url(),
            download_size_bytes: module.download_size_bytes(os),
            installed_size_bytes: module.installed_size_bytes(os),
            checksum: module.checksum(),
        }
    }
}

pub fn run(
    config: &ProviderConfig,
    versions: &[String],
    sources_path: &Path,
    options: ResolveOptions,
    json: bool,
) -> Result<u8, String> {
    let sources = SourceMap::load(sources_path)
        .map_err(|e| format!("config: source map {}: {e}", sources_path.display()))?;

    let selection = match versions {
        [single] => VersionSelection::from(ReleaseVersion::from(single.as_str())),
        many => VersionSelection::from(
            many.iter()
                .map(|v| ReleaseVersion::from(v.as_str()))
                .collect::<Vec<_>>(),
        ),
    };

    tracing::debug!(
        "resolving {} version(s) for {}, offline={}, cache at {}",
        versions.len(),
        options.os,
        options.offline,
        config.cache_dir.display()
    );

    let legacy = HttpLegacyProvider::new(config);
    let catalog = HttpCatalogProvider::new(config);
    let resolver = ModuleCatalogResolver::new(&legacy, &catalog);

    let pb = (!json).then(|| spinner("resolving modules…"));
    let result = resolver.load_modules(&selection, &sources, options);
    if let Some(pb) = &pb {
        match &result {
            Ok(_) => spin_ok(pb, "modules resolved"),
            Err(_) => spin_fail(pb, "resolution failed"),
        }
    }
    let resolved = match result {
        Ok(resolved) => resolved,
        Err(e) if e.is_manifest_unavailable() => {
            eprintln!("error: {e}");
            return Ok(EXIT_MANIFEST_UNAVAILABLE);
        }
        Err(e) => return Err(e.to_string()),
    };

    if json {
        print_json(&resolved, options.os)?;
    } else {
        print_table(&resolved, options.os);
    }
    Ok(EXIT_SUCCESS)
}

fn print_json(resolved: &ModulesByVersion, os: OsTag) -> Result<(), String> {
    let payload: BTreeMap<&str, Vec<ModuleView<'_>>> = resolved
        .iter()
        .map(|(version, modules)| {
            let views = modules.iter().map(|m| ModuleView::new(m, os)).collect();
            (version.as_str(), views)
        })
        .collect();
    println!("{}", json_pretty(&payload)?);
    Ok(())
}

fn print_table(resolved: &ModulesByVersion, os: OsTag) {
    let heading = Style::new().bold();
    for (version, modules) in resolved {
        println!("{}", heading.apply_to(format!("{version} ({os})")));
        if modules.is_empty() {
            println!("  no modules found");
            continue;
        }
        println!(
            "  {:<24} {:<32} {:>12} {:>12} URL",
            "ID", "NAME", "DOWNLOAD", "INSTALLED"
        );
        for module in modules {
            println!(
                "  {:<24} {:<32} {:>12} {:>12} {}",
                module.id().as_str(),
                module.name().unwrap_or(""),
                format_size(module.download_size_bytes(os)),
                format_size(module.installed_size_bytes(os)),
                module.url().unwrap_or("-"),
            );
        }
    }
}
