//! Plain-text encodings of SHMWW keys and signature corpora.
//!
//! All objects use whitespace-separated `0`/`1` tokens, row-major:
//! - public key: `H` ((n-k) x n) followed by `S` ((n-k) x k'),
//! - secret key: `E` (k' x n),
//! - signature corpus: one response `z` (n bits) per line.
//!
//! A sample directory holds one file of each kind per instance, named
//! `PARA-<id>pk`, `PARA-<id>sigs` and `PARA-<id>sk`.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use shmww_algorithms::code::text::{write_matrix, write_vector, BitReader};
use shmww_algorithms::BinaryVector;
use shmww_api::error::ResultExt;
use shmww_api::Result;
use shmww_params::ParameterSet;

use super::{ShmwwPublicKey, ShmwwSecretKey, ShmwwSignature};

/// Paths of the key and corpus files of one instance
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleFiles {
    root: PathBuf,
}

impl SampleFiles {
    /// Files for instance `id` inside `dir`
    pub fn new<P: AsRef<Path>>(dir: P, id: u32) -> Self {
        Self {
            root: dir.as_ref().join(format!("PARA-{}", id)),
        }
    }

    fn with_suffix(&self, suffix: &str) -> PathBuf {
        let mut name = self.root.clone().into_os_string();
        name.push(suffix);
        PathBuf::from(name)
    }

    /// Public key file
    pub fn public_key(&self) -> PathBuf {
        self.with_suffix("pk")
    }

    /// Signature corpus file
    pub fn signatures(&self) -> PathBuf {
        self.with_suffix("sigs")
    }

    /// Secret key file
    pub fn secret_key(&self) -> PathBuf {
        self.with_suffix("sk")
    }
}

/// Decode a public key
pub fn read_public_key<R: BufRead>(
    reader: &mut BitReader<R>,
    params: &ParameterSet,
) -> Result<ShmwwPublicKey> {
    let rows = params.syndrome_len();
    let h = reader.read_matrix("public key H", rows, params.n)?;
    let s = reader.read_matrix("public key S", rows, params.k_prime)?;
    ShmwwPublicKey::from_parts(params, h, s)
}

/// Decode a secret key
pub fn read_secret_key<R: BufRead>(
    reader: &mut BitReader<R>,
    params: &ParameterSet,
) -> Result<ShmwwSecretKey> {
    let e = reader.read_matrix("secret key E", params.k_prime, params.n)?;
    ShmwwSecretKey::from_matrix(params, e)
}

/// Decode the next response of a corpus
pub fn read_response<R: BufRead>(
    reader: &mut BitReader<R>,
    params: &ParameterSet,
) -> Result<BinaryVector> {
    Ok(reader.read_vector("signature corpus", params.n)?)
}

/// Encode a public key
pub fn write_public_key<W: Write>(out: &mut W, pk: &ShmwwPublicKey) -> std::io::Result<()> {
    write_matrix(out, pk.h())?;
    write_matrix(out, pk.s())
}

/// Encode a secret key
pub fn write_secret_key<W: Write>(out: &mut W, sk: &ShmwwSecretKey) -> std::io::Result<()> {
    write_matrix(out, sk.e())
}

/// Append a signature to a corpus; only the response is stored
pub fn write_response<W: Write>(out: &mut W, sig: &ShmwwSignature) -> std::io::Result<()> {
    write_vector(out, sig.z())
}

/// Open a file for token reading
pub fn open<P: AsRef<Path>>(path: P) -> Result<BitReader<BufReader<File>>> {
    let path = path.as_ref();
    let file = File::open(path).with_path(path)?;
    Ok(BitReader::new(BufReader::new(file)))
}

/// Create (or truncate) a file for writing
pub fn create<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
    let path = path.as_ref();
    let file = File::create(path).with_path(path)?;
    Ok(BufWriter::new(file))
}

/// Read a public key file
pub fn load_public_key<P: AsRef<Path>>(path: P, params: &ParameterSet) -> Result<ShmwwPublicKey> {
    let path = path.as_ref();
    read_public_key(&mut open(path)?, params).map_err(|e| e.in_file(path))
}

/// Read a secret key file
pub fn load_secret_key<P: AsRef<Path>>(path: P, params: &ParameterSet) -> Result<ShmwwSecretKey> {
    let path = path.as_ref();
    read_secret_key(&mut open(path)?, params).map_err(|e| e.in_file(path))
}

/// Write a public key file
pub fn store_public_key<P: AsRef<Path>>(path: P, pk: &ShmwwPublicKey) -> Result<()> {
    let path = path.as_ref();
    let mut out = create(path)?;
    write_public_key(&mut out, pk).with_path(path)?;
    out.flush().with_path(path)
}

/// Write a secret key file
pub fn store_secret_key<P: AsRef<Path>>(path: P, sk: &ShmwwSecretKey) -> Result<()> {
    let path = path.as_ref();
    let mut out = create(path)?;
    write_secret_key(&mut out, sk).with_path(path)?;
    out.flush().with_path(path)
}
