//! Hash functions that the scheme models as random oracles.
//!
//! Every hash is domain separated by the context's domain prefix followed by a fixed label, so two
//! contexts with different domains never share a hash output.
use bls12_381_plus::{ff::PrimeField, G2Affine, G2Projective, Gt, Scalar};
use elliptic_curve::hash2curve::ExpandMsgXmd;
use sha2::Sha256;
use sha3::{Digest, Sha3_256};

const IDENTITY_LABEL: &[u8] = b"H1-IDENTITY_BLS12381G2_XMD:SHA-256_SSWU_RO_";
const BLINDING_LABEL: &[u8] = b"H1-BLINDING_BLS12381G2_XMD:SHA-256_SSWU_RO_";
const KEY_TAG_LABEL: &[u8] = b"H2-KEY-TAG";
const TYPE_LABEL: &[u8] = b"TYPE-LABEL";

fn dst(domain: &[u8], label: &[u8]) -> Vec<u8> {
    [domain, label].concat()
}

fn hash_to_scalar(hasher: Sha3_256) -> Scalar {
    let mut bytes = [0; 48];
    bytes[..32].copy_from_slice(&hasher.finalize());
    Scalar::from_okm(&bytes)
}

/// `H1` on identities: maps an identity string into G2.
pub(crate) fn hash_identity(domain: &[u8], identity: &[u8]) -> G2Affine {
    G2Projective::hash::<ExpandMsgXmd<Sha256>>(identity, &dst(domain, IDENTITY_LABEL)).into()
}

/// `H1` on blinding values: maps a target group element into G2.
pub(crate) fn hash_blinding(domain: &[u8], blinding: &Gt) -> G2Affine {
    G2Projective::hash::<ExpandMsgXmd<Sha256>>(&blinding.to_bytes(), &dst(domain, BLINDING_LABEL))
        .into()
}

/// `H2`: maps a secret key and a tag to a scalar.
pub(crate) fn hash_key_tag(domain: &[u8], key: &G2Affine, tag: &Scalar) -> Scalar {
    let mut hasher = Sha3_256::new();
    hasher.update(dst(domain, KEY_TAG_LABEL));
    hasher.update(key.to_compressed());
    hasher.update(tag.to_repr());
    hash_to_scalar(hasher)
}

/// Maps a human readable type label to a tag scalar.
pub(crate) fn hash_label(domain: &[u8], label: &[u8]) -> Scalar {
    let mut hasher = Sha3_256::new();
    hasher.update(dst(domain, TYPE_LABEL));
    hasher.update(label);
    hash_to_scalar(hasher)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn identity_hash_is_deterministic() {
        assert_eq!(
            hash_identity(b"a", b"Alice"),
            hash_identity(b"a", b"Alice")
        );
        assert_ne!(hash_identity(b"a", b"Alice"), hash_identity(b"a", b"Bob"));
    }

    #[test]
    fn domains_are_separated() {
        assert_ne!(hash_identity(b"a", b"Alice"), hash_identity(b"b", b"Alice"));
        assert_ne!(hash_label(b"a", b"cardiology"), hash_label(b"b", b"cardiology"));
    }

    #[test]
    fn key_tag_hash_binds_both_inputs() {
        let key = hash_identity(b"a", b"Alice");
        let other = hash_identity(b"a", b"Bob");
        let tag = Scalar::from(7u32);
        assert_eq!(hash_key_tag(b"a", &key, &tag), hash_key_tag(b"a", &key, &tag));
        assert_ne!(
            hash_key_tag(b"a", &key, &tag),
            hash_key_tag(b"a", &key, &Scalar::from(8u32))
        );
        assert_ne!(hash_key_tag(b"a", &key, &tag), hash_key_tag(b"a", &other, &tag));
    }
}
