use std::fs::File;
use std::io::Read;
use std::path::Path;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha256};
use tracing::debug;
use crate::error::Result;

/// Computes a binary digest over a file's contents
pub trait Digester: Send + Sync {
    /// Algorithm label as used in CSP/SRI values, e.g. "sha256"
    fn algorithm(&self) -> &'static str;
    fn digest(&self, path: &Path) -> Result<Vec<u8>>;
}

/// SHA-256, read in 1MB chunks
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Digester;

impl Digester for Sha256Digester {
    fn algorithm(&self) -> &'static str {
        "sha256"
    }

    fn digest(&self, path: &Path) -> Result<Vec<u8>> {
        let mut file = File::open(path)?;
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; 1024 * 1024];

        loop {
            let bytes_read = file.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }
        Ok(hasher.finalize().to_vec())
    }
}

/// Hex and base64 renderings of a file digest.
///
/// Nothing is cached: every call re-reads the file, so a document that is
/// still being written hashes to its current contents.
pub struct IntegrityComputer {
    digester: Box<dyn Digester>,
}

impl IntegrityComputer {
    pub fn new(digester: Box<dyn Digester>) -> Self {
        Self { digester }
    }

    pub fn algorithm(&self) -> &'static str {
        self.digester.algorithm()
    }

    /// Lowercase hex digest, used as the manifest checksum
    pub fn hash_hex(&self, path: &Path) -> Result<String> {
        let digest = self.digester.digest(path)?;
        let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
        debug!("{} {} = {}", self.algorithm(), path.display(), hex);
        Ok(hex)
    }

    /// Standard base64 digest, used for CSP and `integrity` attributes
    pub fn hash_base64(&self, path: &Path) -> Result<String> {
        Ok(STANDARD.encode(self.digester.digest(path)?))
    }

    /// `<algorithm>-<base64>` source expression
    pub fn csp_source(&self, hash_b64: &str) -> String {
        format!("{}-{}", self.algorithm(), hash_b64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn known_digests() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("abc.txt");
        fs::write(&path, b"abc").unwrap();

        let integrity = IntegrityComputer::new(Box::new(Sha256Digester));
        assert_eq!(
            integrity.hash_hex(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        let b64 = integrity.hash_base64(&path).unwrap();
        assert_eq!(b64, "ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0=");
        assert_eq!(integrity.csp_source(&b64), format!("sha256-{}", b64));
    }

    #[test]
    fn growing_file_is_rehashed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fonts.css");
        fs::write(&path, b"a").unwrap();

        let integrity = IntegrityComputer::new(Box::new(Sha256Digester));
        let before = integrity.hash_hex(&path).unwrap();
        fs::write(&path, b"ab").unwrap();
        assert_ne!(before, integrity.hash_hex(&path).unwrap());
    }

    #[test]
    fn missing_file_is_an_error() {
        let integrity = IntegrityComputer::new(Box::new(Sha256Digester));
        assert!(integrity.hash_hex(Path::new("/nonexistent/fonts.css")).is_err());
    }
}
