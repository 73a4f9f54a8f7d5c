//! Low-level implementation of the proxy re-encryption primitives.
//!
//! The structs and traits in this module implement the scheme in the way that it is defined in
//! the paper. For a higher-level interface, refer to the [`hybrid`][super::hybrid] module.
//!
//! To make this module more flexible, all methods that use randomness only use the [`Rng`] bound,
//! not [`CryptoRng`][rand::CryptoRng]. This does not mean that you should use them with insecure
//! randomness, but rather that you need to take care when using these low-level primitives! A
//! failing random number generator is reported as [`Error::Randomness`][crate::error::Error],
//! the operation never continues with weaker randomness.
//!
//! # Roles
//!
//! * The *authority* runs [`Pre::setup`] once and hands out secret keys with
//!   [`Pre::generate_key`].
//! * The *delegator* encrypts to itself with [`PreCrypt::encrypt`] and authorizes a delegatee with
//!   [`PreDelegate::generate_reencryption_key`].
//! * The *proxy* only holds the public parameters and re-encryption keys, and runs
//!   [`PreDelegate::reencrypt`].
//! * The *delegatee* decrypts the transformed ciphertext with [`PreCrypt::decrypt`].
use super::error::Result;

use rand::Rng;

mod tipre;
pub use self::tipre::{IbraimiTangHartelJonker, DEFAULT_DOMAIN};
pub(crate) use self::tipre::random_message;

/// Main trait for identity based proxy re-encryption schemes.
///
/// This trait defines the basic functionality, namely the setup of the system and the generation
/// of secret keys for identities.
///
/// Note that this trait represents a scheme *algorithm*, the parameters of a deployment are
/// returned by [`Pre::setup`] and passed into every operation.
pub trait Pre {
    /// Type of the public parameters.
    type Parameters;
    /// Type of the master secret of the authority.
    type MasterSecret;
    /// Type of the secret key of a single identity.
    type SecretKey;

    /// Set the system up.
    ///
    /// This method outputs the master secret and the public parameters.
    fn setup<R: Rng>(&self, rng: R) -> Result<(Self::MasterSecret, Self::Parameters)>;

    /// Generate the key for the given identity.
    ///
    /// This is deterministic: the same master secret and identity always result in the same key.
    ///
    /// Parameters:
    ///
    /// * `master` - The master secret.
    /// * `identity` - The identity string.
    fn generate_key(&self, master: &Self::MasterSecret, identity: &[u8])
        -> Result<Self::SecretKey>;
}

/// Methods to encrypt to oneself under a tag, and to decrypt.
pub trait PreCrypt: Pre {
    /// Type of the messages that can be encrypted.
    type Message;
    /// Type of the tag that ciphertexts are bound to.
    type Tag;
    /// Type of the ciphertexts that [`PreCrypt::encrypt`] creates.
    type TaggedCiphertext;
    /// Type of the ciphertexts that [`PreCrypt::decrypt`] accepts.
    type Ciphertext;

    /// Encrypt a message for the given identity, under the given tag.
    ///
    /// The `key` must be the secret key of `identity`. This is not checked, a mismatching key
    /// results in a ciphertext that nobody can decrypt.
    ///
    /// Parameters:
    ///
    /// * `rng` - The randomness to use.
    /// * `params` - The public parameters.
    /// * `identity` - The identity of the encrypting party.
    /// * `message` - The actual message.
    /// * `key` - The secret key of `identity`.
    /// * `tag` - The tag of the ciphertext.
    fn encrypt<R: Rng>(
        &self,
        rng: R,
        params: &Self::Parameters,
        identity: &[u8],
        message: &Self::Message,
        key: &Self::SecretKey,
        tag: &Self::Tag,
    ) -> Result<Self::TaggedCiphertext>;

    /// Decrypt a message given the secret key.
    ///
    /// Decrypting with the key of an identity that the ciphertext was not meant for is not
    /// detected, the result is simply a wrong message.
    fn decrypt(
        &self,
        params: &Self::Parameters,
        key: &Self::SecretKey,
        ciphertext: &Self::Ciphertext,
    ) -> Result<Self::Message>;
}

/// Methods for plain identity based encryption.
///
/// Unlike [`PreCrypt::encrypt`], plain encryption needs no secret key, only the identity of the
/// recipient. The scheme uses it to seal blinding values inside re-encryption keys.
pub trait PlainCrypt: PreCrypt {
    /// Type of the plain ciphertexts.
    type PlainCiphertext;

    /// Encrypt a message for the given identity.
    ///
    /// Parameters:
    ///
    /// * `rng` - The randomness to use.
    /// * `params` - The public parameters.
    /// * `message` - The actual message.
    /// * `identity` - The identity for which to encrypt the message.
    fn encrypt_plain<R: Rng>(
        &self,
        rng: R,
        params: &Self::Parameters,
        message: &Self::Message,
        identity: &[u8],
    ) -> Result<Self::PlainCiphertext>;

    /// Decrypt a plain ciphertext given the secret key.
    fn decrypt_plain(
        &self,
        params: &Self::Parameters,
        key: &Self::SecretKey,
        ciphertext: &Self::PlainCiphertext,
    ) -> Result<Self::Message>;
}

/// Methods for delegation.
pub trait PreDelegate: PreCrypt {
    /// Type of the re-encryption key that is given to the proxy.
    type ReencryptionKey;
    /// Type of the ciphertexts that [`PreDelegate::reencrypt`] creates.
    type ReencryptedCiphertext;

    /// Generates a re-encryption key.
    ///
    /// The key allows a proxy to transform ciphertexts that the owner of `key` created under
    /// `tag` into ciphertexts for `delegatee`. Every call uses fresh randomness.
    ///
    /// Parameters:
    ///
    /// * `rng` - The randomness to use.
    /// * `params` - The public parameters.
    /// * `key` - The secret key of the delegator.
    /// * `delegatee` - The identity that should be able to decrypt.
    /// * `tag` - The tag of the ciphertexts that may be transformed.
    fn generate_reencryption_key<R: Rng>(
        &self,
        rng: R,
        params: &Self::Parameters,
        key: &Self::SecretKey,
        delegatee: &[u8],
        tag: &Self::Tag,
    ) -> Result<Self::ReencryptionKey>;

    /// Transforms a ciphertext of the delegator into a ciphertext of the delegatee.
    ///
    /// This only needs public values and can be run by the proxy.
    fn reencrypt(
        &self,
        params: &Self::Parameters,
        reencryption_key: &Self::ReencryptionKey,
        ciphertext: &Self::TaggedCiphertext,
    ) -> Result<Self::ReencryptedCiphertext>;
}
