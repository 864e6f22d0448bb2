use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};

use crate::Site;

pub const STYLESHEET: &str = include_str!("../assets/site.css");

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to copy assets from '{path}': {source}")]
    Assets { path: PathBuf, source: io::Error },
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub pages_written: usize,
    pub assets_copied: usize,
}

/// Writes the whole site as static files: `index.html`, one `<id>/index.html` per event,
/// `404.html`, the stylesheet, and a copy of `assets_dir` when given.
pub fn export_site(
    site: &Site,
    out_dir: &Path,
    assets_dir: Option<&Path>,
) -> Result<ExportReport, ExportError> {
    let mut report = ExportReport::default();

    if let Some(assets) = assets_dir {
        let assets_error = |source| ExportError::Assets {
            path: assets.to_path_buf(),
            source,
        };
        fs::create_dir_all(out_dir).map_err(|source| ExportError::Write {
            path: out_dir.to_path_buf(),
            source,
        })?;
        ensure_outside(assets, out_dir).map_err(assets_error)?;
        report.assets_copied = copy_dir(assets, out_dir).map_err(assets_error)?;
    }

    write_file(&out_dir.join("index.html"), &site.render_index())?;
    report.pages_written += 1;

    for id in site.catalog().ids() {
        let page = site.render_event(id.as_str());
        write_file(&out_dir.join(id.as_str()).join("index.html"), &page.html)?;
        debug!(event = %id, "exported event page");
        report.pages_written += 1;
    }

    write_file(&out_dir.join("404.html"), &site.render_not_found())?;
    report.pages_written += 1;

    let stylesheet = site.settings().stylesheet_path.trim_start_matches('/');
    if !stylesheet.is_empty() && !stylesheet.contains("://") {
        write_file(&out_dir.join(stylesheet), STYLESHEET)?;
    }

    info!(
        out_dir = %out_dir.display(),
        pages = report.pages_written,
        assets = report.assets_copied,
        "static site exported"
    );
    Ok(report)
}

fn write_file(path: &Path, contents: &str) -> Result<(), ExportError> {
    let result = match path.parent() {
        Some(parent) => fs::create_dir_all(parent).and_then(|_| fs::write(path, contents)),
        None => fs::write(path, contents),
    };
    result.map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Copying into a directory nested in the source would keep finding its own output.
fn ensure_outside(assets: &Path, out_dir: &Path) -> io::Result<()> {
    let assets = fs::canonicalize(assets)?;
    let out_dir = fs::canonicalize(out_dir)?;
    if out_dir.starts_with(&assets) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "output directory '{}' is inside the assets directory",
                out_dir.display()
            ),
        ));
    }
    Ok(())
}

fn copy_dir(from: &Path, to: &Path) -> io::Result<usize> {
    fs::create_dir_all(to)?;
    let mut copied = 0;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copied += copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}
