use base64::Engine;
use sha2::{Digest, Sha384, Sha512};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

pub struct StoreManager;

impl StoreManager {
    /// Unpack a gzipped npm tarball into `dest`. A single top-level directory
    /// (npm's `package/`) is stripped. An existing `dest` is left untouched.
    pub fn unpack_tarball(dest: &Path, tarball_bytes: &[u8]) -> io::Result<PathBuf> {
        if dest.exists() {
            return Ok(dest.to_path_buf());
        }

        let parent = dest.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        // Stage next to the destination so the final move stays on one filesystem.
        let temp_dir = tempfile::Builder::new()
            .prefix(".hey-unpack-")
            .tempdir_in(parent)?;
        let tar = flate2::read::GzDecoder::new(tarball_bytes);
        let mut archive = tar::Archive::new(tar);
        archive.unpack(temp_dir.path())?;

        let entries: Vec<_> = fs::read_dir(temp_dir.path())?.collect::<Result<Vec<_>, _>>()?;

        let extracted_package_dir = match entries.as_slice() {
            [only] if only.file_type()?.is_dir() => only.path(),
            _ => temp_dir.path().to_path_buf(),
        };

        if dest.exists() {
            return Ok(dest.to_path_buf());
        }

        if fs::rename(&extracted_package_dir, dest).is_err() {
            fs::create_dir_all(dest)?;
            fs_extra::dir::copy(
                &extracted_package_dir,
                dest,
                &fs_extra::dir::CopyOptions::new()
                    .overwrite(true)
                    .content_only(true),
            )
            .map_err(io::Error::other)?;
        }

        Ok(dest.to_path_buf())
    }

    /// Verify bytes against an SRI string such as `sha512-<base64>`.
    pub fn verify_integrity(bytes: &[u8], sri: &str) -> bool {
        let sri = sri.trim();
        let Some((algo, rest)) = sri.split_once('-') else {
            return false;
        };
        let digest_b64 = rest.split_once('?').map_or(rest, |(d, _)| d);
        let Ok(expected) = base64::engine::general_purpose::STANDARD.decode(digest_b64.as_bytes())
        else {
            return false;
        };

        match algo.to_lowercase().as_str() {
            "sha512" => Sha512::digest(bytes).as_slice() == expected.as_slice(),
            "sha384" => Sha384::digest(bytes).as_slice() == expected.as_slice(),
            _ => false,
        }
    }
}

pub fn unpack_tarball(dest: &Path, tarball_bytes: &[u8]) -> io::Result<PathBuf> {
    StoreManager::unpack_tarball(dest, tarball_bytes)
}

pub fn verify_integrity(bytes: &[u8], sri: &str) -> bool {
    StoreManager::verify_integrity(bytes, sri)
}
