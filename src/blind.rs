//! Blinded values and the oblivious equality test
//!
//! A secret value `x` is blinded under a fresh random salt `r` as
//!
//! ```text
//! h1 = public_value^r mod p
//! h2 = generator^(x + r) mod p
//! ```
//!
//! Two blinded pairs can then be compared by anyone holding the secret
//! exponent `k`, without recovering either secret: with `a = blind(x, r)` and
//! `b = blind(y, s)`,
//!
//! ```text
//! left  = a.h2^k * b.h1 mod p  =  g^(k*(x + r + s))
//! right = b.h2^k * a.h1 mod p  =  g^(k*(y + s + r))
//! ```
//!
//! so `left == right` exactly when `x ≡ y (mod ord(generator))`; the salts
//! cancel. Fresh salts keep two blindings of the same secret unlinkable to an
//! observer without `k`; reusing a salt weakens unlinkability but never
//! equality correctness.

use crate::group::GroupParameters;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One blinded secret: the pair `(h1, h2)` described in the module docs
///
/// Carries no identity beyond its two integers; the only meaningful
/// comparison is [`matches`]. Structural equality of two pairs says nothing
/// about the underlying secrets (equal secrets under different salts produce
/// different pairs).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindedPair {
    h1: BigUint,
    h2: BigUint,
}

impl BlindedPair {
    /// Short hex rendering of both halves, for diagnostics
    pub fn short(&self) -> String {
        fn head(v: &BigUint) -> String {
            let hex = v.to_str_radix(16);
            hex.chars().take(8).collect()
        }
        format!("({}.., {}..)", head(&self.h1), head(&self.h2))
    }
}

impl fmt::Debug for BlindedPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlindedPair{}", self.short())
    }
}

/// Blind a secret value under a salt
///
/// The salt must be drawn fresh per call (see
/// [`GroupParameters::random_salt`]); the caller supplies it so tests can be
/// deterministic.
pub fn blind(secret: &BigUint, salt: &BigUint, params: &GroupParameters) -> BlindedPair {
    let p = params.modulus();
    let h1 = params.public_value().modpow(salt, p);
    let h2 = params.generator().modpow(&(secret + salt), p);
    BlindedPair { h1, h2 }
}

/// Oblivious equality test: true iff the secrets under `a` and `b` are
/// congruent mod the generator's order
///
/// Costs two modular exponentiations. Requires the secret exponent, so only
/// the parameter holder can evaluate it.
pub fn matches(a: &BlindedPair, b: &BlindedPair, params: &GroupParameters) -> bool {
    let p = params.modulus();
    let k = params.secret_exponent();
    let left = a.h2.modpow(k, p) * &b.h1 % p;
    let right = b.h2.modpow(k, p) * &a.h1 % p;
    left == right
}

/// Derive the secret value for a name segment: the BLAKE3 digest of the
/// segment bytes, read as a big-endian integer
///
/// Equal segments always derive equal secrets; distinct segments only
/// coincide mod the generator's order with negligible probability at
/// real-world modulus sizes.
pub fn segment_secret(segment: &str) -> BigUint {
    let digest = blake3::hash(segment.as_bytes());
    BigUint::from_bytes_be(digest.as_bytes())
}
