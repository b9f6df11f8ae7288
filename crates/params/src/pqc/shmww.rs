//! Constants for the SHMWW code-based signature scheme
//!
//! A SHMWW instance is described by the code length `n`, the code dimension
//! `k`, the block structure (`l` blocks of length `n'` carrying a `k'`
//! dimensional identity part each) and the two sampling weights used by the
//! signer. The parity-check matrix has `n - k` rows, which is also the size
//! of every information set tried by the recovery search.

use shmww_api::{Error, Result};

/// Structure containing the parameters of a SHMWW instance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParameterSet {
    /// Code length
    pub n: usize,

    /// Code dimension
    pub k: usize,

    /// Gilbert-Varshamov distance bound, maximum weight of a response
    pub d_gv: usize,

    /// Number of repeated blocks
    pub l: usize,

    /// Sub-block length
    pub n_prime: usize,

    /// Sub-block dimension, also the number of rows of the secret key
    pub k_prime: usize,

    /// Challenge weight
    pub w1: usize,

    /// Masking-noise weight
    pub w2: usize,

    /// Claimed security level in bits
    pub secu: usize,
}

/// SHMWW PARA-1 parameters (80-bit security)
pub const PARA_1: ParameterSet = ParameterSet {
    n: 4096,
    k: 539,
    d_gv: 1191,
    l: 4,
    n_prime: 1024,
    k_prime: 890,
    w1: 31,
    w2: 531,
    secu: 80,
};

/// SHMWW PARA-2 parameters (128-bit security)
pub const PARA_2: ParameterSet = ParameterSet {
    n: 8192,
    k: 1065,
    d_gv: 2383,
    l: 8,
    n_prime: 1024,
    k_prime: 880,
    w1: 53,
    w2: 807,
    secu: 128,
};

impl ParameterSet {
    /// Build and validate a custom parameter set
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        n: usize,
        k: usize,
        d_gv: usize,
        l: usize,
        n_prime: usize,
        k_prime: usize,
        w1: usize,
        w2: usize,
        secu: usize,
    ) -> Result<Self> {
        let params = Self {
            n,
            k,
            d_gv,
            l,
            n_prime,
            k_prime,
            w1,
            w2,
            secu,
        };
        params.validate()?;
        Ok(params)
    }

    /// Look up a published instance: 1 selects PARA-1, 2 selects PARA-2
    pub fn from_instance(id: u32) -> Result<Self> {
        match id {
            1 => Ok(PARA_1),
            2 => Ok(PARA_2),
            _ => Err(Error::UnknownParameterSet { id }),
        }
    }

    /// Human-readable instance name
    pub fn name(&self) -> &'static str {
        if *self == PARA_1 {
            "PARA-1"
        } else if *self == PARA_2 {
            "PARA-2"
        } else {
            "custom"
        }
    }

    /// Check that every field is positive and the block structure fits
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("n", self.n),
            ("k", self.k),
            ("d_gv", self.d_gv),
            ("l", self.l),
            ("n_prime", self.n_prime),
            ("k_prime", self.k_prime),
            ("w1", self.w1),
            ("w2", self.w2),
            ("secu", self.secu),
        ];
        for (name, value) in fields {
            if value == 0 {
                return Err(Error::param(name, "must be strictly positive"));
            }
        }
        if self.k >= self.n {
            return Err(Error::param(
                "k",
                format!("code dimension {} must be below the length {}", self.k, self.n),
            ));
        }
        if self.k_prime > self.n_prime {
            return Err(Error::param(
                "k_prime",
                format!("{} exceeds the sub-block length {}", self.k_prime, self.n_prime),
            ));
        }
        match self.l.checked_mul(self.n_prime) {
            Some(total) if total <= self.n => {}
            _ => {
                return Err(Error::param(
                    "l",
                    format!("{} blocks of {} columns do not fit in {}", self.l, self.n_prime, self.n),
                ))
            }
        }
        if self.w1 > self.k_prime {
            return Err(Error::param(
                "w1",
                format!("challenge weight {} exceeds k' = {}", self.w1, self.k_prime),
            ));
        }
        if self.w2 > self.n {
            return Err(Error::param(
                "w2",
                format!("noise weight {} exceeds n = {}", self.w2, self.n),
            ));
        }
        Ok(())
    }

    /// Number of parity-check rows, `n - k`
    #[inline]
    pub fn syndrome_len(&self) -> usize {
        self.n - self.k
    }

    /// Largest admissible weight of a recovered secret-key row, `l * (n' - k')`
    #[inline]
    pub fn max_row_weight(&self) -> usize {
        self.l * (self.n_prime - self.k_prime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn published_instances_are_valid() {
        PARA_1.validate().unwrap();
        PARA_2.validate().unwrap();
        assert_eq!(PARA_1.syndrome_len(), 3557);
        assert_eq!(PARA_1.max_row_weight(), 536);
        assert_eq!(PARA_2.max_row_weight(), 1152);
    }

    #[test]
    fn instance_lookup() {
        assert_eq!(ParameterSet::from_instance(1).unwrap(), PARA_1);
        assert_eq!(ParameterSet::from_instance(2).unwrap().secu, 128);
        assert_eq!(PARA_2.name(), "PARA-2");
    }

    #[test]
    fn unknown_instance_is_rejected() {
        for id in [0, 3, 80] {
            match ParameterSet::from_instance(id) {
                Err(Error::UnknownParameterSet { id: got }) => assert_eq!(got, id),
                other => panic!("expected an unknown-instance error, got {other:?}"),
            }
        }
    }

    #[test]
    fn degenerate_sets_are_rejected() {
        assert!(ParameterSet::new(0, 0, 0, 0, 0, 0, 0, 0, 0).is_err());
        // k' larger than n'
        assert!(ParameterSet::new(64, 16, 32, 2, 16, 20, 2, 4, 8).is_err());
        // blocks overflow the code length
        assert!(ParameterSet::new(64, 16, 32, 5, 16, 8, 2, 4, 8).is_err());
        // challenge heavier than k'
        assert!(ParameterSet::new(64, 16, 32, 2, 16, 8, 9, 4, 8).is_err());
    }

    #[test]
    fn custom_set_round_trips_through_new() {
        let toy = ParameterSet::new(192, 32, 96, 2, 96, 81, 3, 8, 16).unwrap();
        assert_eq!(toy.name(), "custom");
        assert_eq!(toy.syndrome_len(), 160);
        assert_eq!(toy.max_row_weight(), 30);
    }
}
