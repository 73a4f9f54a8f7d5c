//! High-level wrapper around the proxy re-encryption operations.
//!
//! Usually, people don't communicate by sending each other group elements. Therefore, we provide
//! this opinionated and easier-to-use wrapper over the raw operations of [`pre`][super::pre].
//!
//! The main struct is [`HybridPre`]. The main differences to the low-level operations are:
//!
//! * Encapsulated keys are random target group elements, hashed to `[u8; 16]` (128 Bit) using
//!   SHA3 to make it easy to use them in other cryptographic primitives.
//! * Encryption and decryption is realized by using hybrid encryption, using the tagged
//!   encryption of the scheme for the key and AES (counter mode) for the payload. This allows you
//!   to encrypt byte sequences instead of group elements.
//! * Re-encryption works on the encrypted byte sequences. Only the key part is transformed, the
//!   encrypted payload is passed through unchanged.
//! * The methods in this module are restricted to [`CryptoRng`] random generators to enforce the
//!   use of cryptographically secure algorithms.
//!
//! Note that there is no authentication of the payload: decrypting with the wrong secret key
//! returns garbage instead of an error.
use super::{
    error::{Error, Result},
    pre::{random_message, IbraimiTangHartelJonker, PlainCrypt, Pre, PreCrypt, PreDelegate},
    types::{Ciphertext, DomainParameters, MasterSecret, ReencryptionKey, SecretKey, Tag},
    ByteAccess,
};

use aes::cipher::{KeyIvInit, StreamCipher};
use bls12_381_plus::Gt;
use rand::{CryptoRng, Rng};
use sha3::{Digest, Sha3_256};
use tracing::debug;

type AesCtr = ctr::Ctr64LE<aes::Aes128>;
static IV: [u8; 16] = [0; 16];

fn hash_from_curve(element: Gt) -> [u8; 16] {
    let mut result = [0; 16];
    result.copy_from_slice(&Sha3_256::digest(element.to_bytes())[..16]);
    result
}

fn apply_keystream(key: [u8; 16], buffer: &mut [u8]) {
    let mut cipher = AesCtr::new(&key.into(), &IV.into());
    cipher.apply_keystream(buffer);
}

fn unpack(envelope: &[u8]) -> Result<(Ciphertext, Vec<u8>)> {
    bincode::deserialize(envelope).map_err(|_| Error::Malformed)
}

fn pack(ciphertext: &Ciphertext, payload: &[u8]) -> Vec<u8> {
    bincode::serialize(&(ciphertext, payload)).expect("Serialization failed")
}

/// High-level implementation of the proxy re-encryption operations.
///
/// This struct internally uses [`IbraimiTangHartelJonker`] to provide key encapsulation and
/// hybrid encryption of byte sequences.
///
/// For more information about the differences to [`Pre`], see the [module-level][self]
/// documentation.
#[derive(Clone, Copy, Debug, Default)]
pub struct HybridPre {
    scheme: IbraimiTangHartelJonker,
}

impl HybridPre {
    /// Create a new [`HybridPre`] using the default domain.
    pub fn new() -> HybridPre {
        Self::wrap(IbraimiTangHartelJonker::new())
    }

    /// Wraps an existing scheme context.
    ///
    /// The resulting [`HybridPre`] uses the same domain separation as the wrapped context.
    pub fn wrap(scheme: IbraimiTangHartelJonker) -> HybridPre {
        Self { scheme }
    }

    /// Access to the wrapped low-level scheme.
    pub fn scheme(&self) -> &IbraimiTangHartelJonker {
        &self.scheme
    }

    /// Sets up the system parameters.
    ///
    /// This operation will return the master secret and the public parameters.
    pub fn setup<R: Rng + CryptoRng>(&self, rng: R) -> Result<(MasterSecret, DomainParameters)> {
        let (master, params) = self.scheme.setup(rng)?;
        debug!(params = %params.fingerprint(), "Set up new domain parameters");
        Ok((master, params))
    }

    /// Generates the secret key for an identity using the master secret.
    pub fn generate_key<I: AsRef<[u8]>>(
        &self,
        master: &MasterSecret,
        identity: I,
    ) -> Result<SecretKey> {
        self.scheme.generate_key(master, identity.as_ref())
    }

    /// Derives the tag for a human readable type label.
    pub fn tag<L: AsRef<[u8]>>(&self, label: L) -> Tag {
        self.scheme.tag(label.as_ref())
    }

    /// Encapsulate a key for the given identity, under the given tag.
    ///
    /// This returns the key and its encapsulation. The encapsulation can be re-encrypted by a
    /// proxy, in which case the delegatee decapsulates the same key.
    ///
    /// Parameters:
    ///
    /// * `rng` - The randomness to use.
    /// * `params` - The public parameters of the system.
    /// * `identity` - The identity of the encrypting party.
    /// * `key` - The secret key of `identity`.
    /// * `tag` - The tag of the encapsulation.
    pub fn encapsulate<I: AsRef<[u8]>, R: Rng + CryptoRng>(
        &self,
        mut rng: R,
        params: &DomainParameters,
        identity: I,
        key: &SecretKey,
        tag: &Tag,
    ) -> Result<([u8; 16], Ciphertext)> {
        let element = random_message(&mut rng)?;
        let encapsulation =
            self.scheme
                .encrypt(&mut rng, params, identity.as_ref(), &element, key, tag)?;
        Ok((hash_from_curve(element), encapsulation.into()))
    }

    /// Decapsulate the given key.
    ///
    /// This accepts original and re-encrypted encapsulations. If the correct secret key is given,
    /// this will return the same key that the corresponding [`HybridPre::encapsulate`] call also
    /// returned.
    pub fn decapsulate(
        &self,
        params: &DomainParameters,
        key: &SecretKey,
        encapsulation: &Ciphertext,
    ) -> Result<[u8; 16]> {
        let element = self.scheme.decrypt(params, key, encapsulation)?;
        Ok(hash_from_curve(element))
    }

    /// Encrypt the given byte sequence to oneself, under the given tag.
    ///
    /// Note that the resulting ciphertext is longer than the payload, as some space is needed for
    /// the encapsulated key. The key is automatically prepended to the encrypted payload.
    ///
    /// Parameters:
    ///
    /// * `rng` - The randomness to use.
    /// * `params` - The public parameters of the system.
    /// * `identity` - The identity of the encrypting party.
    /// * `key` - The secret key of `identity`.
    /// * `tag` - The tag of the ciphertext.
    /// * `payload` - Payload to encrypt.
    pub fn encrypt<I: AsRef<[u8]>, R: Rng + CryptoRng>(
        &self,
        rng: R,
        params: &DomainParameters,
        identity: I,
        key: &SecretKey,
        tag: &Tag,
        payload: &[u8],
    ) -> Result<Vec<u8>> {
        let (symmetric_key, encapsulation) = self.encapsulate(rng, params, identity, key, tag)?;
        let mut buffer = Vec::from(payload);
        apply_keystream(symmetric_key, &mut buffer);
        debug!(
            encapsulation = %encapsulation.fingerprint(),
            length = buffer.len(),
            "Encrypted payload"
        );
        Ok(pack(&encapsulation, &buffer))
    }

    /// Generates a re-encryption key for the given delegatee.
    ///
    /// The key is meant to be handed to the proxy, see [`HybridPre::reencrypt`].
    pub fn generate_reencryption_key<I: AsRef<[u8]>, R: Rng + CryptoRng>(
        &self,
        rng: R,
        params: &DomainParameters,
        key: &SecretKey,
        delegatee: I,
        tag: &Tag,
    ) -> Result<ReencryptionKey> {
        self.scheme
            .generate_reencryption_key(rng, params, key, delegatee.as_ref(), tag)
    }

    /// Re-encrypt a ciphertext, as previously returned by [`HybridPre::encrypt`].
    ///
    /// This is the operation of the proxy, it only needs public values. Ciphertexts that were
    /// already re-encrypted are rejected.
    pub fn reencrypt(
        &self,
        params: &DomainParameters,
        reencryption_key: &ReencryptionKey,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        let (encapsulation, buffer) = unpack(ciphertext)?;
        let Ciphertext::Tagged(encapsulation) = encapsulation else {
            return Err(Error::InvalidCiphertextVariant {
                expected: "tagged",
                found: encapsulation.variant(),
            });
        };
        let reencrypted: Ciphertext = self
            .scheme
            .reencrypt(params, reencryption_key, &encapsulation)?
            .into();
        debug!(
            reencryption_key = %reencryption_key.fingerprint(),
            encapsulation = %reencrypted.fingerprint(),
            "Re-encrypted payload"
        );
        Ok(pack(&reencrypted, &buffer))
    }

    /// Decrypt the given ciphertext.
    ///
    /// Both original and re-encrypted ciphertexts are accepted. Returns the payload.
    pub fn decrypt(
        &self,
        params: &DomainParameters,
        key: &SecretKey,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        let (encapsulation, mut buffer) = unpack(ciphertext)?;
        let symmetric_key = self.decapsulate(params, key, &encapsulation)?;
        apply_keystream(symmetric_key, &mut buffer);
        Ok(buffer)
    }

    /// Seal a byte sequence for an identity without any delegation capabilities.
    ///
    /// Unlike [`HybridPre::encrypt`], this needs no secret key. The result can be opened with
    /// [`HybridPre::open`], but not re-encrypted.
    pub fn seal<I: AsRef<[u8]>, R: Rng + CryptoRng>(
        &self,
        mut rng: R,
        params: &DomainParameters,
        identity: I,
        payload: &[u8],
    ) -> Result<Vec<u8>> {
        let element = random_message(&mut rng)?;
        let encapsulation: Ciphertext = self
            .scheme
            .encrypt_plain(&mut rng, params, &element, identity.as_ref())?
            .into();
        let mut buffer = Vec::from(payload);
        apply_keystream(hash_from_curve(element), &mut buffer);
        Ok(pack(&encapsulation, &buffer))
    }

    /// Open a byte sequence that was sealed with [`HybridPre::seal`].
    pub fn open(&self, params: &DomainParameters, key: &SecretKey, sealed: &[u8]) -> Result<Vec<u8>> {
        let (encapsulation, mut buffer) = unpack(sealed)?;
        let Ciphertext::Plain(encapsulation) = encapsulation else {
            return Err(Error::InvalidCiphertextVariant {
                expected: "plain",
                found: encapsulation.variant(),
            });
        };
        let element = self.scheme.decrypt_plain(params, key, &encapsulation)?;
        apply_keystream(hash_from_curve(element), &mut buffer);
        Ok(buffer)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_encrypt_decrypt() {
        let mut rng = rand::thread_rng();
        let pre = HybridPre::new();
        let (master, params) = pre.setup(&mut rng).unwrap();
        let key = pre.generate_key(&master, "Alice").unwrap();
        let tag = pre.tag("cardiology");
        let message = b"Hello, world!";
        let ciphertext = pre
            .encrypt(&mut rng, &params, "Alice", &key, &tag, message)
            .unwrap();
        let decryption = pre.decrypt(&params, &key, &ciphertext).unwrap();
        assert_eq!(message.as_slice(), decryption.as_slice());
    }

    #[test]
    fn test_reencrypt_decrypt() {
        let mut rng = rand::thread_rng();
        let pre = HybridPre::new();
        let (master, params) = pre.setup(&mut rng).unwrap();
        let alice = pre.generate_key(&master, "Alice").unwrap();
        let bob = pre.generate_key(&master, "Bob").unwrap();
        let tag = pre.tag("cardiology");
        let message = b"Blood pressure 120/80";
        let ciphertext = pre
            .encrypt(&mut rng, &params, "Alice", &alice, &tag, message)
            .unwrap();
        let reencryption_key = pre
            .generate_reencryption_key(&mut rng, &params, &alice, "Bob", &tag)
            .unwrap();
        let reencrypted = pre.reencrypt(&params, &reencryption_key, &ciphertext).unwrap();
        let decryption = pre.decrypt(&params, &bob, &reencrypted).unwrap();
        assert_eq!(message.as_slice(), decryption.as_slice());
    }

    #[test]
    fn test_encapsulate_decapsulate() {
        let mut rng = rand::thread_rng();
        let pre = HybridPre::new();
        let (master, params) = pre.setup(&mut rng).unwrap();
        let key = pre.generate_key(&master, "Alice").unwrap();
        let tag = pre.tag("x");
        let (generated_key, encapsulation) = pre
            .encapsulate(&mut rng, &params, "Alice", &key, &tag)
            .unwrap();
        let decapsulated_key = pre.decapsulate(&params, &key, &encapsulation).unwrap();
        assert_eq!(generated_key, decapsulated_key);
    }

    #[test]
    fn test_reencrypt_twice() {
        let mut rng = rand::thread_rng();
        let pre = HybridPre::new();
        let (master, params) = pre.setup(&mut rng).unwrap();
        let alice = pre.generate_key(&master, "Alice").unwrap();
        let bob = pre.generate_key(&master, "Bob").unwrap();
        let tag = pre.tag("x");
        let ciphertext = pre
            .encrypt(&mut rng, &params, "Alice", &alice, &tag, b"payload")
            .unwrap();
        let alice_to_bob = pre
            .generate_reencryption_key(&mut rng, &params, &alice, "Bob", &tag)
            .unwrap();
        let bob_to_carol = pre
            .generate_reencryption_key(&mut rng, &params, &bob, "Carol", &tag)
            .unwrap();
        let reencrypted = pre.reencrypt(&params, &alice_to_bob, &ciphertext).unwrap();
        assert!(matches!(
            pre.reencrypt(&params, &bob_to_carol, &reencrypted),
            Err(Error::InvalidCiphertextVariant {
                found: "reencrypted",
                ..
            })
        ));
    }

    #[test]
    fn test_reencrypt_wrong_tag() {
        let mut rng = rand::thread_rng();
        let pre = HybridPre::new();
        let (master, params) = pre.setup(&mut rng).unwrap();
        let alice = pre.generate_key(&master, "Alice").unwrap();
        let ciphertext = pre
            .encrypt(&mut rng, &params, "Alice", &alice, &pre.tag("a"), b"payload")
            .unwrap();
        let reencryption_key = pre
            .generate_reencryption_key(&mut rng, &params, &alice, "Bob", &pre.tag("b"))
            .unwrap();
        assert!(matches!(
            pre.reencrypt(&params, &reencryption_key, &ciphertext),
            Err(Error::TagMismatch)
        ));
    }

    #[test]
    fn test_seal_open() {
        let mut rng = rand::thread_rng();
        let pre = HybridPre::new();
        let (master, params) = pre.setup(&mut rng).unwrap();
        let key = pre.generate_key(&master, "Bob").unwrap();
        let sealed = pre.seal(&mut rng, &params, "Bob", b"for bob").unwrap();
        assert_eq!(pre.open(&params, &key, &sealed).unwrap(), b"for bob");
        assert!(matches!(
            pre.decrypt(&params, &key, &sealed),
            Err(Error::InvalidCiphertextVariant { found: "plain", .. })
        ));
    }

    #[test]
    fn test_decrypt_wrong_key() {
        let mut rng = rand::thread_rng();
        let pre = HybridPre::new();
        let (master, params) = pre.setup(&mut rng).unwrap();
        let alice = pre.generate_key(&master, "Alice").unwrap();
        let bob = pre.generate_key(&master, "Bob").unwrap();
        let message = b"a message long enough to not collide";
        let ciphertext = pre
            .encrypt(&mut rng, &params, "Alice", &alice, &pre.tag("x"), message)
            .unwrap();
        let decryption = pre.decrypt(&params, &bob, &ciphertext).unwrap();
        assert_ne!(message.as_slice(), decryption.as_slice());
    }

    #[test]
    fn test_malformed() {
        let mut rng = rand::thread_rng();
        let pre = HybridPre::new();
        let (master, params) = pre.setup(&mut rng).unwrap();
        let key = pre.generate_key(&master, "Alice").unwrap();
        assert!(matches!(
            pre.decrypt(&params, &key, b"garbage"),
            Err(Error::Malformed)
        ));
    }
}
