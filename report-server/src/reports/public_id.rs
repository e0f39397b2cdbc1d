//! Public tracking identifier generation
//!
//! A public id is the only credential a reporter ever holds, so it must be
//! unguessable: 26 symbols drawn from a 32-character alphabet give 130 bits
//! of entropy from the OS CSPRNG. The token embeds no timestamp, sequence
//! number, or store-internal value; uniqueness is enforced by the store at
//! insertion time.

use ring::rand::{SecureRandom, SystemRandom};

use super::error::{ReportError, ReportResult};

/// Prefix makes the handle self-describing on printed receipts
pub const PUBLIC_ID_PREFIX: &str = "RPT-";

/// 26 symbols × 5 bits = 130 bits of effective randomness
const TOKEN_LEN: usize = 26;

/// Crockford-style alphabet: no I/L/O/U, so ids survive hand transcription.
/// 32 symbols exactly, so masking a byte to 5 bits stays uniform.
const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Generates public tracking identifiers
#[derive(Debug)]
pub struct PublicIdGenerator {
    rng: SystemRandom,
}

impl PublicIdGenerator {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }

    /// Generate a fresh candidate id
    pub fn generate(&self) -> ReportResult<String> {
        let mut bytes = [0u8; TOKEN_LEN];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| ReportError::EntropyUnavailable)?;

        let mut id = String::with_capacity(PUBLIC_ID_PREFIX.len() + TOKEN_LEN);
        id.push_str(PUBLIC_ID_PREFIX);
        for byte in bytes {
            id.push(ALPHABET[(byte & 0x1f) as usize] as char);
        }
        Ok(id)
    }
}

impl Default for PublicIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
