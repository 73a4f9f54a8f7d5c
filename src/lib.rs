//! Implementation of the Type-and-Identity-Based Proxy Re-Encryption scheme of Ibraimi, Tang,
//! Hartel and Jonker ([paper]).
//!
//! # ⚠️ Warning: Cryptographic Hazmat ☣️
//!
//! This crate is made for playing around with proxy re-encryption and for prototyping of
//! applications and protocols using it. It has *not* been audited, it is *not* battle tested, and
//! *nobody* claims it to be secure.
//!
//! Use it at **your own risk** and if you know what you are doing!
//!
//! # Introduction
//!
//! In identity based proxy re-encryption, a trusted authority issues secret keys bound to
//! identity strings. An identity encrypts data to itself under a *type* (a [`Tag`]), for example
//! "cardiology" for a medical record. Later, the identity can hand a re-encryption key to a
//! semi-trusted proxy, which transforms all ciphertexts of that type into ciphertexts for another
//! identity. The proxy learns neither the plaintext nor any secret key, and ciphertexts of other
//! types stay out of its reach.
//!
//! Re-encryption is single hop: a re-encrypted ciphertext cannot be re-encrypted again.
//!
//! # Crate Structure
//!
//! The [`pre`] submodule contains the scheme itself, as [`pre::Pre`] (parameter and key
//! generation), [`pre::PreCrypt`] (tagged encryption), [`pre::PlainCrypt`] (plain identity
//! encryption) and [`pre::PreDelegate`] (delegation and re-encryption). Those methods work
//! directly on the group elements, as they are defined in the paper. The value types live in
//! [`types`].
//!
//! To aid in using those algorithms, a higher-level wrapper is provided in the [`hybrid`]
//! submodule, mainly in the [`hybrid::HybridPre`] struct. This allows you to deal with bytes
//! instead of group elements.
//!
//! # Limitations
//!
//! The scheme carries no integrity protection. Decrypting with the secret key of the wrong
//! identity does not fail, it returns a wrong group element (or garbage bytes in the [`hybrid`]
//! layer). Applications that need to detect this have to authenticate the payload themselves.
//!
//! The algorithms in this crate are implemented on top of
//! [`bls12_381_plus`](https://crates.io/crates/bls12_381_plus). The paper describes the scheme in
//! a symmetric pairing; here the public parameters live in G1 while identity hashes and secret
//! keys live in G2.
//!
//! [paper]: https://doi.org/10.1007/978-3-642-02824-3_2
pub mod error;
pub mod hybrid;
mod oracle;
pub mod pre;
pub mod types;

pub use types::{
    Ciphertext, DomainParameters, MasterSecret, PlainCiphertext, ReencryptedCiphertext,
    ReencryptionKey, SecretKey, Tag, TaggedCiphertext,
};

use sha3::{Digest, Sha3_256};

/// A trait to provide byte-level access to objects.
pub trait ByteAccess {
    /// Provides access to the bytes.
    ///
    /// Unlike [`AsRef`], there are no statements made about the performance of this operation.
    /// This operation will allocate a fresh vector, and the byte representation may or may not
    /// have to be computed first.
    fn bytes(&self) -> Vec<u8>;

    /// Provide a short fingerprint of the bytes.
    ///
    /// This can be used to "summarize" long keys when displaying them, to still provide
    /// distinguishing features but to not print out the whole key.
    ///
    /// By default, this method hashes the [`ByteAccess::bytes`] representation with SHA3-256 and
    /// formats the first 8 bytes of the digest as a hex string, so the fingerprint of a secret
    /// does not reveal the secret.
    fn fingerprint(&self) -> String {
        hex::encode(&Sha3_256::digest(self.bytes())[..8])
    }
}
