//! Signature-scheme trait consumed by the cryptanalysis
//!
//! The attack only needs a scheme that can produce key pairs and signatures
//! whose responses leak the secret key's structure; this trait is the seam
//! between the scheme simulator and the attack drivers.

use crate::Result;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// Core trait for the signature schemes under analysis
///
/// Unlike a production signing API the challenge is sampled directly by
/// `sign`, so no message is taken: the simulator mirrors the identification
/// scheme underneath the signature and the attack never looks at messages.
pub trait Signature {
    /// Public key type for this scheme
    type PublicKey: Clone;

    /// Secret key type - must be zeroizable
    type SecretKey: Zeroize + Clone;

    /// Signature data type
    type SignatureData: Clone;

    /// Returns the name of this scheme instance
    fn name(&self) -> &'static str;

    /// Generate a new key pair using the provided RNG
    fn keypair<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
    ) -> Result<(Self::PublicKey, Self::SecretKey)>;

    /// Produce a fresh signature
    fn sign<R: CryptoRng + RngCore>(
        &self,
        public_key: &Self::PublicKey,
        secret_key: &Self::SecretKey,
        rng: &mut R,
    ) -> Result<Self::SignatureData>;

    /// Verify a signature against a public key
    ///
    /// Returns `Err(Error::Verification(..))` naming the failed check.
    fn verify(&self, signature: &Self::SignatureData, public_key: &Self::PublicKey) -> Result<()>;
}
