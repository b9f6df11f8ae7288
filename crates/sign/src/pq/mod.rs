pub mod shmww;

pub use shmww::{SampleFiles, Shmww, ShmwwPublicKey, ShmwwSecretKey, ShmwwSignature};
