//! Shared group parameters for the blinding protocol
//!
//! All blinding and matching happens in the multiplicative group mod a large
//! prime. Every participant of one index shares the same modulus, generator,
//! and key pair; the parameters never change after construction.

use crate::{Error, Result};
use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The 2048-bit MODP prime from RFC 3526 (group 14), usable as a
/// ready-made modulus when no externally agreed prime is available.
pub const RFC3526_MODP_2048: &str = "\
FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD129024E088A67CC74\
020BBEA63B139B22514A08798E3404DDEF9519B3CD3A431B302B0A6DF25F1437\
4FE1356D6D51C245E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED\
EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3DC2007CB8A163BF05\
98DA48361C55D39A69163FA8FD24CF5F83655D23DCA3AD961C62F356208552BB\
9ED529077096966D670C354E4ABC9804F1746C08CA18217C32905E462E36CE3B\
E39E772C180E86039B2783A2EC07A28FB5C55DF06F4C52C9DE2BCBF695581718\
3995497CEA956AE515D2261898FA051015728E5A8AACAA68FFFFFFFFFFFFFFFF";

/// The shared algebraic setting for one index: a prime modulus, a generator,
/// and a secret/public key pair
///
/// `public_value = generator^secret_exponent mod modulus`. The secret
/// exponent is what makes `matches` possible; it is held locally and never
/// appears in any blinded output.
#[derive(Clone, Serialize, Deserialize)]
pub struct GroupParameters {
    modulus: BigUint,
    generator: BigUint,
    secret_exponent: BigUint,
    public_value: BigUint,
}

impl GroupParameters {
    /// Generate parameters for the given prime modulus, drawing the
    /// generator and secret exponent uniformly from `[1, modulus)`
    ///
    /// The modulus is assumed prime; primality is the caller's problem.
    pub fn generate(modulus: BigUint, rng: &mut impl Rng) -> Result<Self> {
        Self::check_modulus(&modulus)?;
        let one = BigUint::one();
        let generator = rng.gen_biguint_range(&one, &modulus);
        let secret_exponent = rng.gen_biguint_range(&one, &modulus);
        Self::from_parts(modulus, generator, secret_exponent)
    }

    /// Build parameters from an externally agreed modulus, generator, and
    /// secret exponent, computing the public value
    pub fn from_parts(
        modulus: BigUint,
        generator: BigUint,
        secret_exponent: BigUint,
    ) -> Result<Self> {
        Self::check_modulus(&modulus)?;
        let public_value = generator.modpow(&secret_exponent, &modulus);
        Ok(GroupParameters {
            modulus,
            generator,
            secret_exponent,
            public_value,
        })
    }

    fn check_modulus(modulus: &BigUint) -> Result<()> {
        if *modulus < BigUint::from(2u32) {
            return Err(Error::InvalidModulus(format!(
                "modulus must be at least 2, got {}",
                modulus
            )));
        }
        Ok(())
    }

    /// The prime modulus
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// The group generator
    pub fn generator(&self) -> &BigUint {
        &self.generator
    }

    /// The secret exponent (required for `matches`, never transmitted)
    pub fn secret_exponent(&self) -> &BigUint {
        &self.secret_exponent
    }

    /// The public value `generator^secret_exponent mod modulus`
    pub fn public_value(&self) -> &BigUint {
        &self.public_value
    }

    /// Draw a fresh random salt in `[1, modulus)`
    pub fn random_salt(&self, rng: &mut impl Rng) -> BigUint {
        rng.gen_biguint_range(&BigUint::one(), &self.modulus)
    }

    /// Bit length of the modulus
    pub fn modulus_bits(&self) -> u64 {
        self.modulus.bits()
    }
}

impl fmt::Debug for GroupParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The secret exponent stays out of debug output.
        f.debug_struct("GroupParameters")
            .field("modulus_bits", &self.modulus.bits())
            .field("generator", &self.generator)
            .field("public_value", &self.public_value)
            .finish_non_exhaustive()
    }
}

/// Parse a hex-encoded modulus such as [`RFC3526_MODP_2048`]
pub fn parse_modulus_hex(hex: &str) -> Result<BigUint> {
    BigUint::parse_bytes(hex.as_bytes(), 16)
        .ok_or_else(|| Error::InvalidModulus(format!("not a hex integer: {:?}", hex)))
}
