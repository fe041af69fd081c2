//! Random credential generator.

use rand::Rng;
use rand::distributions::Slice;

use crate::domain::ports::CredentialGenerator;
use crate::domain::{CredentialKind, Credentials};

const ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Draws lowercase base-36 credentials from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCredentialGenerator;

fn draw(len: usize) -> String {
    let Ok(alphabet) = Slice::new(ALPHABET.as_slice()) else {
        return String::new();
    };
    rand::thread_rng()
        .sample_iter(alphabet)
        .take(len)
        .map(|&byte| char::from(byte))
        .collect()
}

impl CredentialGenerator for RandomCredentialGenerator {
    fn generate(&self, kind: CredentialKind) -> Credentials {
        Credentials::new(
            format!("{}{}", kind.username_prefix(), draw(kind.suffix_len())),
            draw(kind.password_len()),
        )
    }
}
