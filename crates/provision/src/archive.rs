//! Generic list/extract capability over tool distribution archives.
//!
//! Tool archives are assumed to contain exactly one top-level directory
//! whose name is not predictable from the version string alone; the
//! listing pass discovers it without extracting. Anything else (zero or
//! multiple top-level entries, unreadable container) is treated as an
//! unreadable archive rather than guessed at.

use flate2::read::GzDecoder;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::{Component, Path};
use tracing::{debug, trace};

use crate::{Error, Result};

/// Supported archive containers, detected by file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Zip,
    TarGz,
}

fn container_for(archive: &Path) -> Result<Container> {
    let name = archive
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    if name.ends_with(".zip") {
        Ok(Container::Zip)
    } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
        Ok(Container::TarGz)
    } else {
        Err(Error::archive_unreadable(
            archive,
            format!("unsupported archive format '{name}'"),
        ))
    }
}

/// Determine the archive's single top-level entry name via a
/// list-contents pass, without extracting.
///
/// # Errors
///
/// Returns [`Error::ArchiveUnreadable`] if the container cannot be
/// listed or does not hold exactly one top-level entry.
pub fn top_level_dir(archive: &Path) -> Result<String> {
    let tops = match container_for(archive)? {
        Container::Zip => list_zip_top_levels(archive)?,
        Container::TarGz => list_tar_top_levels(archive)?,
    };

    trace!(?archive, ?tops, "Listed archive top-level entries");

    if tops.len() != 1 {
        return Err(Error::archive_unreadable(
            archive,
            format!("expected exactly one top-level entry, found {}", tops.len()),
        ));
    }
    // len() == 1 checked above
    Ok(tops.into_iter().next().unwrap_or_default())
}

fn list_zip_top_levels(archive: &Path) -> Result<BTreeSet<String>> {
    let file = File::open(archive)?;
    let zip = zip::ZipArchive::new(file)
        .map_err(|e| Error::archive_unreadable(archive, e.to_string()))?;

    let mut tops = BTreeSet::new();
    for name in zip.file_names() {
        if let Some(top) = first_component(Path::new(name)) {
            tops.insert(top);
        }
    }
    Ok(tops)
}

fn list_tar_top_levels(archive: &Path) -> Result<BTreeSet<String>> {
    let file = File::open(archive)?;
    let decoder = GzDecoder::new(file);
    let mut tar = tar::Archive::new(decoder);

    let mut tops = BTreeSet::new();
    let entries = tar
        .entries()
        .map_err(|e| Error::archive_unreadable(archive, e.to_string()))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::archive_unreadable(archive, e.to_string()))?;
        let path = entry
            .path()
            .map_err(|e| Error::archive_unreadable(archive, e.to_string()))?;
        if let Some(top) = first_component(&path) {
            tops.insert(top);
        }
    }
    Ok(tops)
}

fn first_component(path: &Path) -> Option<String> {
    path.components().find_map(|c| match c {
        Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
        _ => None,
    })
}

/// Fully extract the archive under `dest`, preserving relative
/// structure and unix permission bits.
///
/// # Errors
///
/// Returns [`Error::ExtractionFailed`] if extraction fails partway
/// through; the caller is responsible for discarding `dest`.
pub fn extract(archive: &Path, dest: &Path) -> Result<()> {
    debug!(?archive, ?dest, "Extracting archive");
    match container_for(archive)? {
        Container::Zip => extract_zip(archive, dest),
        Container::TarGz => extract_tar(archive, dest),
    }
}

fn extract_zip(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file)
        .map_err(|e| Error::archive_unreadable(archive, e.to_string()))?;

    std::fs::create_dir_all(dest)?;

    for i in 0..zip.len() {
        let mut entry = zip
            .by_index(i)
            .map_err(|e| Error::extraction_failed(archive, e.to_string()))?;

        // Entries with unsafe paths (absolute, parent traversal) are skipped.
        let Some(relative) = entry.enclosed_name() else {
            continue;
        };
        let outpath = dest.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&outpath)?;
        } else {
            if let Some(parent) = outpath.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut content = Vec::new();
            entry
                .read_to_end(&mut content)
                .map_err(|e| Error::extraction_failed(archive, e.to_string()))?;
            std::fs::write(&outpath, &content)?;

            #[cfg(unix)]
            if let Some(mode) = entry.unix_mode() {
                use std::os::unix::fs::PermissionsExt;
                let mut perms = std::fs::metadata(&outpath)?.permissions();
                perms.set_mode(mode);
                std::fs::set_permissions(&outpath, perms)?;
            }
        }
    }

    Ok(())
}

fn extract_tar(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive)?;
    let decoder = GzDecoder::new(file);
    let mut tar = tar::Archive::new(decoder);
    tar.set_preserve_permissions(true);

    std::fs::create_dir_all(dest)?;
    tar.unpack(dest)
        .map_err(|e| Error::extraction_failed(archive, e.to_string()))?;
    Ok(())
}
