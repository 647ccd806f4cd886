//! Writing fetched packages to disk.
//!
//! File name is the addon name lowercased with spaces turned into `_`, plus
//! `.xpi`, sanitized for the filesystem. Content goes to `<final>.part` first
//! and is renamed into place once fully written and synced.

use crate::fetch::PackageBytes;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const PACKAGE_EXTENSION: &str = ".xpi";

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Stem used when the addon name sanitizes to nothing.
const DEFAULT_STEM: &str = "addon";

/// Derives `<stem>.xpi` for an addon name.
///
/// - `package_filename("uBlock Origin")` → `"ublock_origin.xpi"`
/// - `package_filename("../..")` → `"addon.xpi"`
pub fn package_filename(addon_name: &str) -> String {
    let stem = addon_name.to_lowercase().replace(' ', "_");
    let sanitized = sanitize_stem(&stem, 255 - PACKAGE_EXTENSION.len());
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        format!("{}{}", DEFAULT_STEM, PACKAGE_EXTENSION)
    } else {
        format!("{}{}", sanitized, PACKAGE_EXTENSION)
    }
}

/// Replaces NUL, `/`, `\`, whitespace and control characters with `_`,
/// collapses runs of `_`, trims dots and underscores from both ends and caps
/// the length at `max_len` bytes on a char boundary.
fn sanitize_stem(name: &str, max_len: usize) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        let replacement = if c == '/' || c == '\\' || c.is_control() || c.is_whitespace() {
            '_'
        } else {
            c
        };

        if replacement == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(replacement);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');

    let mut take = trimmed.len().min(max_len);
    while take > 0 && !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].to_string()
}

/// Path for the temp file: appends `.part` to the final path.
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Writes `package` to `dir/<package_filename(addon_name)>`, replacing any
/// existing file. Returns the final path.
pub fn save_package(dir: &Path, addon_name: &str, package: &PackageBytes) -> Result<PathBuf> {
    let final_path = dir.join(package_filename(addon_name));
    let part = temp_path(&final_path);
    tracing::debug!("saving addon {:?} to {}", addon_name, final_path.display());

    let write_part = || -> Result<()> {
        let mut f = fs::File::create(&part)
            .with_context(|| format!("failed to create temp file: {}", part.display()))?;
        f.write_all(package.as_bytes())
            .with_context(|| format!("write {}", part.display()))?;
        f.sync_all().context("fsync failed")?;
        fs::rename(&part, &final_path).with_context(|| {
            format!("rename {} -> {}", part.display(), final_path.display())
        })?;
        Ok(())
    };

    if let Err(e) = write_part() {
        let _ = fs::remove_file(&part);
        return Err(e);
    }

    tracing::info!(
        bytes = package.len(),
        "saved {}",
        final_path.display()
    );
    Ok(final_path)
}
