//! Value types of the scheme.
//!
//! All values are immutable once constructed. Keys and ciphertexts can be serialized with `serde`
//! to store or transmit them; [`Ciphertext::to_bytes`] and [`ReencryptionKey::to_bytes`] provide
//! the canonical `bincode` encoding.
//!
//! Note that the debug output of the opaque types does not print the inner values. Instead, a
//! short fingerprint is shown (see [`ByteAccess::fingerprint`]), which keeps secrets out of logs
//! and keeps the output readable.
use crate::{
    error::{Error, Result},
    ByteAccess,
};

use std::fmt::{self, Debug};

use bls12_381_plus::{G1Affine, G2Affine, Gt, Scalar};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

macro_rules! opaque {
    ($($name:ident),* $(,)?) => {
        $(
            impl ByteAccess for $name {
                fn bytes(&self) -> Vec<u8> {
                    bincode::serialize(self).expect("Serialization failed")
                }
            }

            impl Debug for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_tuple(stringify!($name))
                        .field(&self.fingerprint())
                        .finish()
                }
            }
        )*
    };
}

opaque!(
    DomainParameters,
    MasterSecret,
    SecretKey,
    PlainCiphertext,
    TaggedCiphertext,
    ReencryptedCiphertext,
    Ciphertext,
    ReencryptionKey,
);

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    bincode::deserialize(bytes).map_err(|_| Error::Malformed)
}

/// The public parameters `(g, g^s)` of a deployment.
///
/// Created once by the authority and shared with every participant.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct DomainParameters {
    pub(crate) g: G1Affine,
    pub(crate) g_s: G1Affine,
}

impl DomainParameters {
    /// The generator `g`.
    pub fn generator(&self) -> &G1Affine {
        &self.g
    }

    /// The generator raised to the master secret, `g^s`.
    pub fn generator_s(&self) -> &G1Affine {
        &self.g_s
    }
}

/// The master secret `s` of the authority.
///
/// Whoever holds this value can derive the secret key of every identity.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MasterSecret(pub(crate) Scalar);

/// The secret key `H1(ID)^s` of a single identity.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SecretKey(pub(crate) G2Affine);

impl SecretKey {
    pub fn as_element(&self) -> &G2Affine {
        &self.0
    }
}

/// The type of a ciphertext.
///
/// Re-encryption keys are bound to a tag and only transform ciphertexts carrying the same tag.
/// Tags are public.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tag(pub(crate) Scalar);

impl Tag {
    pub fn as_scalar(&self) -> &Scalar {
        &self.0
    }
}

impl From<Scalar> for Tag {
    fn from(value: Scalar) -> Self {
        Self(value)
    }
}

/// Ciphertext of the plain identity encryption, `(g^r, m · e(g^s, H1(ID))^r)`.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PlainCiphertext {
    pub(crate) c1: G1Affine,
    pub(crate) c2: Gt,
}

impl PlainCiphertext {
    pub fn c1(&self) -> &G1Affine {
        &self.c1
    }

    pub fn c2(&self) -> &Gt {
        &self.c2
    }
}

/// Ciphertext that an identity encrypted to itself under a tag.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct TaggedCiphertext {
    pub(crate) c1: G1Affine,
    pub(crate) c2: Gt,
    pub(crate) tag: Tag,
}

impl TaggedCiphertext {
    pub fn c1(&self) -> &G1Affine {
        &self.c1
    }

    pub fn c2(&self) -> &Gt {
        &self.c2
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }
}

/// Ciphertext produced by the proxy, decryptable by the delegatee.
///
/// `c1` is carried over from the [`TaggedCiphertext`], `c2` is the transformed target group
/// element and `c3` seals the blinding value for the delegatee.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ReencryptedCiphertext {
    pub(crate) c1: G1Affine,
    pub(crate) c2: Gt,
    pub(crate) c3: PlainCiphertext,
}

impl ReencryptedCiphertext {
    pub fn c1(&self) -> &G1Affine {
        &self.c1
    }

    pub fn c2(&self) -> &Gt {
        &self.c2
    }

    pub fn c3(&self) -> &PlainCiphertext {
        &self.c3
    }
}

/// Any ciphertext of the scheme.
///
/// The serialized form starts with the variant (`plain`, `tagged` or `reencrypted`), followed by
/// the fields of that variant.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Ciphertext {
    Plain(PlainCiphertext),
    Tagged(TaggedCiphertext),
    Reencrypted(ReencryptedCiphertext),
}

impl Ciphertext {
    /// Name of the variant, as it appears in the serialized form.
    pub fn variant(&self) -> &'static str {
        match self {
            Ciphertext::Plain(_) => "plain",
            Ciphertext::Tagged(_) => "tagged",
            Ciphertext::Reencrypted(_) => "reencrypted",
        }
    }

    /// The canonical byte encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes()
    }

    /// Parses the canonical byte encoding.
    ///
    /// Unknown variants and truncated input are rejected with [`Error::Malformed`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        decode(bytes)
    }
}

impl From<PlainCiphertext> for Ciphertext {
    fn from(value: PlainCiphertext) -> Self {
        Ciphertext::Plain(value)
    }
}

impl From<TaggedCiphertext> for Ciphertext {
    fn from(value: TaggedCiphertext) -> Self {
        Ciphertext::Tagged(value)
    }
}

impl From<ReencryptedCiphertext> for Ciphertext {
    fn from(value: ReencryptedCiphertext) -> Self {
        Ciphertext::Reencrypted(value)
    }
}

/// Delegation token that lets a proxy transform tagged ciphertexts of the delegator into
/// ciphertexts of the delegatee.
///
/// The token does not contain the delegator's secret key: `r2` masks it with the hash of a fresh
/// blinding value, and the blinding value is only readable by the delegatee (`r3`).
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ReencryptionKey {
    pub(crate) tag: Tag,
    pub(crate) r2: G2Affine,
    pub(crate) r3: PlainCiphertext,
}

impl ReencryptionKey {
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn r2(&self) -> &G2Affine {
        &self.r2
    }

    pub fn r3(&self) -> &PlainCiphertext {
        &self.r3
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        decode(bytes)
    }
}
