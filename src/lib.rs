//! # veiltrie
//!
//! A privacy-preserving hierarchical name index.
//!
//! veiltrie stores small item sets under path-like names while keeping every
//! name component hidden from anyone who only observes the index structure.
//! Equality between name components is decided by a blinded commutative
//! comparison built on modular exponentiation in a prime-order group, so an
//! edge label and a probe value can be confirmed equal without either
//! underlying secret being exposed.
//!
//! ## Core Concepts
//!
//! - **Group parameters**: a shared prime modulus, generator, and key pair
//! - **Blinded pairs**: secrets blinded under fresh salts, comparable only
//!   through the oblivious equality test
//! - **Cumulative prefix segments**: each trie level commits the full name
//!   prefix observed so far, making longest-prefix matching plain descent
//! - **Level registry**: per-depth node references so a lookup can resume
//!   matching partway along an established path
//!
//! ## Example
//!
//! ```ignore
//! use veiltrie::{parse_modulus_hex, GroupParameters, Index, RFC3526_MODP_2048};
//!
//! let mut rng = rand::thread_rng();
//! let modulus = parse_modulus_hex(RFC3526_MODP_2048)?;
//! let params = GroupParameters::generate(modulus, &mut rng)?;
//!
//! let mut index = Index::new(params);
//! index.add_item("/video/cats/1080p", 42, &mut rng)?;
//! assert!(index.lookup("/video/cats/1080p", 0, &mut rng)?.is_some());
//! ```

pub mod blind;
pub mod group;
pub mod name;
pub mod trie;

mod error;
mod index;

pub use blind::{blind, matches, segment_secret, BlindedPair};
pub use error::{Error, Result};
pub use group::{parse_modulus_hex, GroupParameters, RFC3526_MODP_2048};
pub use index::{Index, InstrumentHook};
pub use name::prefix_segments;
