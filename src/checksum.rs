//! Streaming file digests for repository checksum sidecars.
//!
//! Maven repositories expect `.md5`, `.sha1`, `.sha256` and `.sha512`
//! files next to every artefact. MD5 and SHA-1 are here because the layout
//! requires them, not for their cryptographic strength.

use sha2::digest::DynDigest;
use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Read buffer size for hashing.
const CHUNK_SIZE: usize = 8192;

/// A digest algorithm used for checksum sidecars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecksumAlgorithm {
    /// MD5, 128-bit.
    Md5,
    /// SHA-1, 160-bit.
    Sha1,
    /// SHA-256.
    Sha256,
    /// SHA-512.
    Sha512,
}

/// Names and sizes for one algorithm.
struct AlgorithmInfo {
    display_name: &'static str,
    sidecar_extension: &'static str,
    hex_len: usize,
}

const MD5_INFO: AlgorithmInfo = AlgorithmInfo {
    display_name: "MD5",
    sidecar_extension: "md5",
    hex_len: 32,
};

const SHA1_INFO: AlgorithmInfo = AlgorithmInfo {
    display_name: "SHA-1",
    sidecar_extension: "sha1",
    hex_len: 40,
};

const SHA256_INFO: AlgorithmInfo = AlgorithmInfo {
    display_name: "SHA-256",
    sidecar_extension: "sha256",
    hex_len: 64,
};

const SHA512_INFO: AlgorithmInfo = AlgorithmInfo {
    display_name: "SHA-512",
    sidecar_extension: "sha512",
    hex_len: 128,
};

impl ChecksumAlgorithm {
    /// Every algorithm, in the order sidecars are written.
    pub const ALL: [Self; 4] = [Self::Md5, Self::Sha1, Self::Sha256, Self::Sha512];

    const fn info(self) -> &'static AlgorithmInfo {
        match self {
            Self::Md5 => &MD5_INFO,
            Self::Sha1 => &SHA1_INFO,
            Self::Sha256 => &SHA256_INFO,
            Self::Sha512 => &SHA512_INFO,
        }
    }

    /// Return the conventional name, e.g. `SHA-256`.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        self.info().display_name
    }

    /// Return the sidecar file extension, e.g. `sha256`.
    ///
    /// # Examples
    ///
    /// ```
    /// use central_publisher::checksum::ChecksumAlgorithm;
    ///
    /// assert_eq!(ChecksumAlgorithm::Sha256.sidecar_extension(), "sha256");
    /// assert_eq!(ChecksumAlgorithm::Sha1.sidecar_extension(), "sha1");
    /// ```
    #[must_use]
    pub const fn sidecar_extension(self) -> &'static str {
        self.info().sidecar_extension
    }

    /// Return the length of a hex-encoded digest.
    #[must_use]
    pub const fn hex_len(self) -> usize {
        self.info().hex_len
    }

    fn new_hasher(self) -> Box<dyn DynDigest> {
        match self {
            Self::Md5 => Box::new(md5::Md5::default()),
            Self::Sha1 => Box::new(sha1::Sha1::default()),
            Self::Sha256 => Box::new(sha2::Sha256::default()),
            Self::Sha512 => Box::new(sha2::Sha512::default()),
        }
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A lowercase hex digest tagged with its algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexDigest {
    algorithm: ChecksumAlgorithm,
    hex: String,
}

impl HexDigest {
    /// Return the algorithm that produced this digest.
    #[must_use]
    pub const fn algorithm(&self) -> ChecksumAlgorithm {
        self.algorithm
    }

    /// Return the digest as a hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.hex
    }
}

impl AsRef<str> for HexDigest {
    fn as_ref(&self) -> &str {
        &self.hex
    }
}

impl fmt::Display for HexDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

/// Digests of one file for every [`ChecksumAlgorithm`], in
/// [`ChecksumAlgorithm::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChecksums(Vec<HexDigest>);

impl FileChecksums {
    /// Iterate over the digests in sidecar order.
    pub fn iter(&self) -> impl Iterator<Item = &HexDigest> {
        self.0.iter()
    }

    /// Return the digest for `algorithm`.
    #[must_use]
    pub fn get(&self, algorithm: ChecksumAlgorithm) -> Option<&HexDigest> {
        self.0.iter().find(|digest| digest.algorithm == algorithm)
    }
}

/// Compute the digest of the file at `path`.
///
/// # Errors
///
/// Returns the underlying I/O error if the file cannot be opened or read.
///
/// # Examples
///
/// ```
/// use central_publisher::checksum::{ChecksumAlgorithm, digest_file};
///
/// let file = tempfile::NamedTempFile::new().unwrap();
/// let digest = digest_file(ChecksumAlgorithm::Md5, file.path()).unwrap();
/// assert_eq!(digest.as_str(), "d41d8cd98f00b204e9800998ecf8427e");
/// ```
pub fn digest_file(algorithm: ChecksumAlgorithm, path: &Path) -> io::Result<HexDigest> {
    let mut digests = digest_with(path, &[algorithm])?;
    digests.pop().ok_or_else(|| io::Error::other("no digest produced"))
}

/// Compute every sidecar digest of the file at `path` in one read.
///
/// # Errors
///
/// Returns the underlying I/O error if the file cannot be opened or read.
pub fn digest_file_all(path: &Path) -> io::Result<FileChecksums> {
    digest_with(path, &ChecksumAlgorithm::ALL).map(FileChecksums)
}

/// Stream the file once through one hasher per algorithm.
fn digest_with(path: &Path, algorithms: &[ChecksumAlgorithm]) -> io::Result<Vec<HexDigest>> {
    let mut hashers: Vec<_> = algorithms.iter().map(|alg| alg.new_hasher()).collect();
    let mut file = fs::File::open(path)?;
    let mut buffer = [0u8; CHUNK_SIZE];
    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        let chunk = buffer.get(..bytes_read).unwrap_or_default();
        for hasher in &mut hashers {
            hasher.update(chunk);
        }
    }
    Ok(algorithms
        .iter()
        .zip(hashers)
        .map(|(&algorithm, hasher)| HexDigest {
            algorithm,
            hex: hex::encode(hasher.finalize()),
        })
        .collect())
}
