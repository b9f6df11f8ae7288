//! Constants for post-quantum cryptographic algorithms

pub mod shmww;
