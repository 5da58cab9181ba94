//! Password hashing with Argon2id and a fixed, configured salt.
//!
//! Parameters: 1 pass, 64 MiB of memory, 4 lanes, 32-byte output. Because the
//! salt is static, hashing the same password twice yields the same PHC string.
//! Verification recomputes the digest and compares it in constant time through
//! argon2's `PasswordVerifier`.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, ParamsBuilder, Version,
};
use lazy_static::lazy_static;

const T_COST: u32 = 1;
const M_COST_KIB: u32 = 64 * 1024;
const P_COST: u32 = 4;
const OUTPUT_LEN: usize = 32;

lazy_static! {
    /// 8 to 128 characters, no control characters.
    static ref PASSWORD_REGEX: regex::Regex =
        regex::Regex::new(r"^[^\p{Cc}]{8,128}$").unwrap();
}

pub fn is_password_valid(password: &str) -> bool {
    PASSWORD_REGEX.is_match(password)
}

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// The plaintext does not meet the password policy.
    #[error("password does not meet the length/character policy")]
    InvalidInput,

    /// The password does not match the stored digest.
    #[error("password does not match")]
    Mismatch,

    /// The stored digest is not a valid PHC string.
    #[error("invalid password hash format: {0}")]
    InvalidHash(String),

    #[error("failed to hash password: {0}")]
    Hash(String),
}

#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
    salt: SaltString,
}

impl std::fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialHasher").finish_non_exhaustive()
    }
}

impl CredentialHasher {
    /// `salt` must be at least 8 bytes.
    pub fn new(salt: &str) -> Result<Self, PasswordError> {
        let salt = SaltString::encode_b64(salt.as_bytes())
            .map_err(|e| PasswordError::Hash(format!("Invalid salt: {}", e)))?;

        let params = ParamsBuilder::new()
            .m_cost(M_COST_KIB)
            .t_cost(T_COST)
            .p_cost(P_COST)
            .output_len(OUTPUT_LEN)
            .build()
            .map_err(|e| PasswordError::Hash(format!("Invalid parameters: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            salt,
        })
    }

    /// Hashes `password` into a PHC string; rejects passwords failing the policy.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if !is_password_valid(password) {
            return Err(PasswordError::InvalidInput);
        }

        let digest = self
            .argon2
            .hash_password(password.as_bytes(), &self.salt)
            .map_err(|e| PasswordError::Hash(e.to_string()))?;

        Ok(digest.to_string())
    }

    pub fn verify(&self, digest: &str, password: &str) -> Result<(), PasswordError> {
        let parsed = PasswordHash::new(digest)
            .map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(()),
            Err(argon2::password_hash::Error::Password) => Err(PasswordError::Mismatch),
            Err(e) => Err(PasswordError::InvalidHash(e.to_string())),
        }
    }
}
