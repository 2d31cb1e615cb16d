//! Bundle assembly for Central Portal uploads.
//!
//! Writes every artefact of a set into a zip archive laid out as a Maven
//! repository, followed by its MD5, SHA-1, SHA-256 and SHA-512 sidecars.
//! Entries carry a fixed timestamp and fixed options, so identical input
//! produces a byte-identical archive.

use crate::artefact::{ArtefactFile, ArtefactSet, Coordinate};
use crate::checksum::digest_file_all;
use crate::naming::{BundleName, EntryName};
use log::{debug, info};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Errors arising while writing a bundle.
#[derive(Debug, Error)]
pub enum BundleError {
    /// An artefact could not be read or hashed.
    #[error("failed to read artefact {}", .path.display())]
    ReadArtefact {
        /// Path of the artefact.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing the archive file failed.
    #[error("I/O error while writing bundle: {0}")]
    Io(#[from] io::Error),

    /// The zip container could not be written.
    #[error("zip error while writing bundle: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Build the bundle for `set` inside `scratch_dir`.
///
/// The archive is named after the coordinate (see [`BundleName`]). An
/// existing file of that name is replaced. If writing fails, the partial
/// archive is removed.
///
/// # Errors
///
/// Returns [`BundleError::ReadArtefact`] if an artefact cannot be read, or
/// [`BundleError::Io`] / [`BundleError::Zip`] if the archive cannot be
/// written.
pub fn build_bundle(set: &ArtefactSet, scratch_dir: &Path) -> Result<PathBuf, BundleError> {
    let coordinate = set.coordinate();
    let bundle_path = scratch_dir.join(BundleName::new(coordinate).filename());
    info!(
        "Creating bundle for {coordinate} at {}",
        bundle_path.display()
    );

    if let Err(err) = write_bundle(set, &bundle_path) {
        if let Err(cleanup) = fs::remove_file(&bundle_path) {
            debug!(
                "Could not remove partial bundle {}: {cleanup}",
                bundle_path.display()
            );
        }
        return Err(err);
    }

    info!("Bundle created.");
    Ok(bundle_path)
}

fn write_bundle(set: &ArtefactSet, bundle_path: &Path) -> Result<(), BundleError> {
    let file = fs::File::create(bundle_path)?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    for artefact in set.artefacts() {
        write_artefact(&mut zip, set.coordinate(), artefact)?;
    }
    zip.finish()?.flush()?;
    Ok(())
}

/// Write one artefact and its checksum sidecars.
fn write_artefact<W: Write + io::Seek>(
    zip: &mut ZipWriter<W>,
    coordinate: &Coordinate,
    artefact: &ArtefactFile,
) -> Result<(), BundleError> {
    let path = artefact.path();
    let read_error = |source| BundleError::ReadArtefact {
        path: path.to_path_buf(),
        source,
    };

    let checksums = digest_file_all(path).map_err(read_error)?;
    let entry = EntryName::new(coordinate, artefact.classifier(), artefact.extension());

    start_entry(zip, &entry)?;
    let mut source = fs::File::open(path).map_err(read_error)?;
    io::copy(&mut source, zip).map_err(read_error)?;

    for digest in checksums.iter() {
        start_entry(zip, &entry.sidecar(digest.algorithm()))?;
        zip.write_all(digest.as_str().as_bytes())?;
    }
    Ok(())
}

fn start_entry<W: Write + io::Seek>(
    zip: &mut ZipWriter<W>,
    entry: &EntryName<'_>,
) -> Result<(), BundleError> {
    let name = entry.to_string();
    debug!("Adding {name} to bundle.");
    zip.start_file(name, entry_options())?;
    Ok(())
}

/// Options shared by every entry; the fixed timestamp keeps builds
/// reproducible.
fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644)
}

#[cfg(test)]
#[path = "bundle_tests.rs"]
mod tests;
