//! Static build: every enumerated page, written to disk.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── routes.json                         # Every route, enumeration order
//! ├── sitemap.xml                         # Every URL with hreflang alternates
//! ├── .build-manifest.json                # Content hashes (see crate::cache)
//! ├── compare/lago/
//! │   ├── index.json                      # PageDescriptor
//! │   └── head.html                       # Rendered <head> tags
//! ├── glossary/proration/...
//! ├── services/usage-based-billing/for-saas/...
//! ├── es/compare/lago/...
//! └── pt/...
//! ```
//!
//! Page directories mirror the public URL path, so the host can serve or
//! import them without a lookup table.
//!
//! Descriptors are rendered in parallel on the global rayon pool. Output is
//! sorted by path before anything is written, so the manifest and the set
//! of written files are identical across runs and thread counts.

use crate::cache::{self, BuildManifest, CacheStats};
use crate::context::SeoContext;
use crate::page::{self, PageError};
use crate::render;
use crate::routes::{self, Route};
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

pub const ROUTES_FILE: &str = "routes.json";
pub const SITEMAP_FILE: &str = "sitemap.xml";
pub const DESCRIPTOR_FILE: &str = "index.json";
pub const HEAD_FILE: &str = "head.html";

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Page(#[from] PageError),
    #[error("sitemap XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// One file to write, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: String,
    pub contents: String,
}

/// What a build did.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub pages: usize,
    pub stats: CacheStats,
    pub written: Vec<String>,
    pub removed: Vec<String>,
}

/// Output directory of a page, relative, e.g. `es/compare/lago`.
pub fn page_dir(route: &Route) -> String {
    route.locale_path().trim_start_matches('/').to_string()
}

/// Descriptor and `<head>` for one route.
pub fn page_artifacts(ctx: &SeoContext, route: &Route) -> Result<Vec<Artifact>, EmitError> {
    let page = page::resolve(ctx, route)?;
    let dir = page_dir(route);
    let mut descriptor = serde_json::to_string_pretty(&page)?;
    descriptor.push('\n');

    Ok(vec![
        Artifact {
            path: format!("{dir}/{DESCRIPTOR_FILE}"),
            contents: descriptor,
        },
        Artifact {
            path: format!("{dir}/{HEAD_FILE}"),
            contents: render::head(&page).into_string(),
        },
    ])
}

/// Site-wide files: the route list and the sitemap.
pub fn site_artifacts(ctx: &SeoContext, routes: &[Route]) -> Result<Vec<Artifact>, EmitError> {
    let mut listing = serde_json::to_string_pretty(routes)?;
    listing.push('\n');
    Ok(vec![
        Artifact {
            path: ROUTES_FILE.to_string(),
            contents: listing,
        },
        Artifact {
            path: SITEMAP_FILE.to_string(),
            contents: render::sitemap(ctx, routes)?,
        },
    ])
}

/// Every artifact for `routes`, sorted by path.
pub fn render_all(ctx: &SeoContext, routes: &[Route]) -> Result<Vec<Artifact>, EmitError> {
    let per_page: Vec<Vec<Artifact>> = routes
        .par_iter()
        .map(|route| page_artifacts(ctx, route))
        .collect::<Result<_, _>>()?;

    let mut artifacts: Vec<Artifact> = per_page.into_iter().flatten().collect();
    artifacts.extend(site_artifacts(ctx, routes)?);
    artifacts.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(artifacts)
}

/// Render every enumerated page into `output_dir`.
///
/// With `use_cache`, files whose contents hash the same as in the previous
/// manifest are left untouched. Files the previous build wrote that this
/// one doesn't are deleted either way, along with the directories that
/// leaves empty. Nothing the manifest doesn't list is touched.
pub fn build(
    ctx: &SeoContext,
    output_dir: &Path,
    use_cache: bool,
) -> Result<BuildReport, EmitError> {
    fs::create_dir_all(output_dir)?;

    let previous = BuildManifest::load(output_dir);
    let routes = routes::all_routes(ctx.catalog);
    tracing::info!(pages = routes.len(), "rendering pages");
    let artifacts = render_all(ctx, &routes)?;

    let mut report = BuildReport {
        pages: routes.len(),
        ..Default::default()
    };
    let mut next = BuildManifest::empty().with_revision(env!("CONTENT_REVISION"));

    for artifact in artifacts {
        let hash = cache::hash_bytes(artifact.contents.as_bytes());
        if use_cache && previous.is_fresh(&artifact.path, &hash, output_dir) {
            report.stats.skip();
        } else {
            let target = output_dir.join(&artifact.path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, &artifact.contents)?;
            report.stats.write();
            report.written.push(artifact.path.clone());
        }
        next.insert(artifact.path, hash);
    }

    for stale in previous.stale_paths(&next) {
        let target = output_dir.join(stale);
        match fs::remove_file(&target) {
            Ok(()) => {
                tracing::debug!(path = stale, "removed stale output");
                report.stats.remove();
                report.removed.push(stale.to_string());
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        remove_empty_parents(output_dir, &target)?;
    }

    next.save(output_dir)?;
    Ok(report)
}

/// Remove the directories a pruned file leaves empty, walking up from
/// `file` and stopping at `root` or at the first non-empty directory.
fn remove_empty_parents(root: &Path, file: &Path) -> io::Result<()> {
    let mut dir = file.parent();
    while let Some(current) = dir {
        if current == root || !current.starts_with(root) {
            break;
        }
        match fs::read_dir(current).map(|mut entries| entries.next().is_none()) {
            Ok(true) => fs::remove_dir(current)?,
            Ok(false) => break,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        dir = current.parent();
    }
    Ok(())
}
