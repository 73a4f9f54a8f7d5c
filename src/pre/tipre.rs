use super::{Pre, PlainCrypt, PreCrypt, PreDelegate};
use crate::{
    error::{Error, Result},
    oracle,
    types::{
        Ciphertext, DomainParameters, MasterSecret, PlainCiphertext, ReencryptedCiphertext,
        ReencryptionKey, SecretKey, Tag, TaggedCiphertext,
    },
};

use bls12_381_plus::{group::Group, pairing, G1Projective, G2Affine, Gt, Scalar};
use rand::Rng;
use tracing::warn;

/// Domain prefix used by [`IbraimiTangHartelJonker::new`].
pub const DEFAULT_DOMAIN: &[u8] = b"TIPRE-BLS12381-V01-";

pub(crate) fn random_scalar<R: Rng>(mut rng: R) -> Result<Scalar> {
    let mut bytes = [0; 48];
    rng.try_fill_bytes(&mut bytes)?;
    Ok(Scalar::from_okm(&bytes))
}

/// Samples a uniformly random target group element.
pub(crate) fn random_message<R: Rng>(rng: R) -> Result<Gt> {
    Ok(Gt::generator() * random_scalar(rng)?)
}

/// The type-and-identity-based proxy re-encryption scheme.
///
/// The struct only carries the domain prefix that separates the hashes of one deployment from
/// another. It is cheap to copy and can be shared freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IbraimiTangHartelJonker {
    domain: &'static [u8],
}

impl IbraimiTangHartelJonker {
    pub fn new() -> Self {
        Self::with_domain(DEFAULT_DOMAIN)
    }

    /// Creates a context whose hash functions are separated by the given domain prefix.
    ///
    /// Keys, tags and ciphertexts of contexts with different domains are not compatible.
    pub fn with_domain(domain: &'static [u8]) -> Self {
        Self { domain }
    }

    pub fn domain(&self) -> &'static [u8] {
        self.domain
    }

    /// Derives the tag for a human readable type label.
    pub fn tag(&self, label: &[u8]) -> Tag {
        Tag(oracle::hash_label(self.domain, label))
    }

    /// Samples a fresh random tag.
    pub fn random_tag<R: Rng>(&self, rng: R) -> Result<Tag> {
        Ok(Tag(random_scalar(rng)?))
    }

    fn identity_point(&self, identity: &[u8]) -> G2Affine {
        oracle::hash_identity(self.domain, identity)
    }

    fn key_tag_scalar(&self, key: &SecretKey, tag: &Tag) -> Scalar {
        oracle::hash_key_tag(self.domain, &key.0, &tag.0)
    }
}

impl Default for IbraimiTangHartelJonker {
    fn default() -> Self {
        Self::new()
    }
}

impl Pre for IbraimiTangHartelJonker {
    type Parameters = DomainParameters;
    type MasterSecret = MasterSecret;
    type SecretKey = SecretKey;

    fn setup<R: Rng>(&self, mut rng: R) -> Result<(Self::MasterSecret, Self::Parameters)> {
        let s = random_scalar(&mut rng)?;
        let g = G1Projective::generator() * random_scalar(&mut rng)?;
        Ok((
            MasterSecret(s),
            DomainParameters {
                g: g.into(),
                g_s: (g * s).into(),
            },
        ))
    }

    fn generate_key(
        &self,
        master: &Self::MasterSecret,
        identity: &[u8],
    ) -> Result<Self::SecretKey> {
        Ok(SecretKey((self.identity_point(identity) * master.0).into()))
    }
}

impl PreCrypt for IbraimiTangHartelJonker {
    type Message = Gt;
    type Tag = Tag;
    type TaggedCiphertext = TaggedCiphertext;
    type Ciphertext = Ciphertext;

    fn encrypt<R: Rng>(
        &self,
        rng: R,
        params: &Self::Parameters,
        identity: &[u8],
        message: &Self::Message,
        key: &Self::SecretKey,
        tag: &Self::Tag,
    ) -> Result<Self::TaggedCiphertext> {
        let r = random_scalar(rng)?;
        let h = self.key_tag_scalar(key, tag);
        Ok(TaggedCiphertext {
            c1: (params.g * r).into(),
            c2: *message + pairing(&params.g_s, &self.identity_point(identity)) * (r * h),
            tag: *tag,
        })
    }

    fn decrypt(
        &self,
        params: &Self::Parameters,
        key: &Self::SecretKey,
        ciphertext: &Self::Ciphertext,
    ) -> Result<Self::Message> {
        match ciphertext {
            Ciphertext::Tagged(c) => {
                let h = self.key_tag_scalar(key, &c.tag);
                Ok(c.c2 - pairing(&c.c1, &key.0) * h)
            }
            Ciphertext::Reencrypted(c) => {
                let blinding = self.decrypt_plain(params, key, &c.c3)?;
                Ok(c.c2 - pairing(&c.c1, &oracle::hash_blinding(self.domain, &blinding)))
            }
            Ciphertext::Plain(_) => Err(Error::InvalidCiphertextVariant {
                expected: "tagged or reencrypted",
                found: ciphertext.variant(),
            }),
        }
    }
}

impl PlainCrypt for IbraimiTangHartelJonker {
    type PlainCiphertext = PlainCiphertext;

    fn encrypt_plain<R: Rng>(
        &self,
        rng: R,
        params: &Self::Parameters,
        message: &Self::Message,
        identity: &[u8],
    ) -> Result<Self::PlainCiphertext> {
        let r = random_scalar(rng)?;
        Ok(PlainCiphertext {
            c1: (params.g * r).into(),
            c2: *message + pairing(&params.g_s, &self.identity_point(identity)) * r,
        })
    }

    fn decrypt_plain(
        &self,
        _: &Self::Parameters,
        key: &Self::SecretKey,
        ciphertext: &Self::PlainCiphertext,
    ) -> Result<Self::Message> {
        Ok(ciphertext.c2 - pairing(&ciphertext.c1, &key.0))
    }
}

impl PreDelegate for IbraimiTangHartelJonker {
    type ReencryptionKey = ReencryptionKey;
    type ReencryptedCiphertext = ReencryptedCiphertext;

    fn generate_reencryption_key<R: Rng>(
        &self,
        mut rng: R,
        params: &Self::Parameters,
        key: &Self::SecretKey,
        delegatee: &[u8],
        tag: &Self::Tag,
    ) -> Result<Self::ReencryptionKey> {
        let blinding = random_message(&mut rng)?;
        let h = self.key_tag_scalar(key, tag);
        Ok(ReencryptionKey {
            tag: *tag,
            r2: (key.0 * (-h) + oracle::hash_blinding(self.domain, &blinding)).into(),
            r3: self.encrypt_plain(&mut rng, params, &blinding, delegatee)?,
        })
    }

    fn reencrypt(
        &self,
        _: &Self::Parameters,
        reencryption_key: &Self::ReencryptionKey,
        ciphertext: &Self::TaggedCiphertext,
    ) -> Result<Self::ReencryptedCiphertext> {
        if ciphertext.tag != reencryption_key.tag {
            warn!("Refusing to re-encrypt a ciphertext under a key for a different tag");
            return Err(Error::TagMismatch);
        }

        Ok(ReencryptedCiphertext {
            c1: ciphertext.c1,
            c2: ciphertext.c2 + pairing(&ciphertext.c1, &reencryption_key.r2),
            c3: reencryption_key.r3,
        })
    }
}
