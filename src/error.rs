use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Expected a {expected} ciphertext, got a {found} ciphertext")]
    InvalidCiphertextVariant {
        expected: &'static str,
        found: &'static str,
    },
    #[error("The re-encryption key was generated for a different tag than the ciphertext")]
    TagMismatch,
    #[error("The randomness source failed")]
    Randomness(#[from] rand::Error),
    #[error("The supplied value was malformed")]
    Malformed,
}

pub type Result<V, E=Error> = std::result::Result<V, E>;
