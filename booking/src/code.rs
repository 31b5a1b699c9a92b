//! Display code shown next to the booking form.
//!
//! The visitor retypes the code to submit. It only deters trivial scripted
//! submissions: the code lives entirely on the client side, so it is not a
//! security boundary.

use rand::Rng;

/// Characters a code is drawn from: upper-case letters and digits without the
/// easily confused `I`, `O`, `0` and `1`.
pub const CODE_ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Length of the codes shown on the form
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// The currently displayed code
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayCode(String);

impl DisplayCode {
    /// Draws `length` characters independently and uniformly from [`CODE_ALPHABET`]
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, length: usize) -> Self {
        let code = (0..length)
            .map(|_| char::from(CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())]))
            .collect();
        Self(code)
    }

    /// Wraps an existing code (tests and scripted sources)
    #[must_use]
    pub fn from_static(code: &str) -> Self {
        Self(code.to_string())
    }

    /// The code as displayed
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `entered` matches after trimming and upper-casing
    #[must_use]
    pub fn accepts(&self, entered: &str) -> bool {
        entered.trim().to_uppercase() == self.0
    }
}

impl std::fmt::Display for DisplayCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of fresh display codes
///
/// Injected through the environment so tests can script the codes.
pub trait CodeSource: Send + Sync {
    /// Produce the next code, replacing whatever was displayed before
    fn next_code(&self) -> DisplayCode;
}

/// Production code source backed by the thread-local RNG
#[derive(Debug, Clone, Copy)]
pub struct RandomCodeSource {
    length: usize,
}

impl RandomCodeSource {
    /// Creates a source producing codes of `length` characters
    #[must_use]
    pub const fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomCodeSource {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl CodeSource for RandomCodeSource {
    fn next_code(&self) -> DisplayCode {
        DisplayCode::generate(&mut rand::thread_rng(), self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn alphabet_has_no_lookalikes() {
        assert_eq!(CODE_ALPHABET.len(), 32);
        for ch in [b'I', b'O', b'0', b'1'] {
            assert!(!CODE_ALPHABET.contains(&ch));
        }
    }

    #[test]
    fn random_source_uses_configured_length() {
        let code = RandomCodeSource::new(8).next_code();
        assert_eq!(code.as_str().len(), 8);
        assert_eq!(RandomCodeSource::default().next_code().as_str().len(), 6);
    }

    #[test]
    fn accepts_trimmed_lowercase_entry() {
        let code = DisplayCode::from_static("AB3K9Z");
        assert!(code.accepts("AB3K9Z"));
        assert!(code.accepts("  ab3k9z \n"));
        assert!(!code.accepts(""));
        assert!(!code.accepts("AB3K9"));
        assert!(!code.accepts("AB 3K9Z"));
    }

    #[test]
    fn same_seed_same_code() {
        let a = DisplayCode::generate(&mut StdRng::seed_from_u64(7), 6);
        let b = DisplayCode::generate(&mut StdRng::seed_from_u64(7), 6);
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn generated_codes_have_requested_length_and_alphabet(seed in any::<u64>(), length in 0usize..32) {
            let code = DisplayCode::generate(&mut StdRng::seed_from_u64(seed), length);
            prop_assert_eq!(code.as_str().len(), length);
            prop_assert!(code.as_str().bytes().all(|b| CODE_ALPHABET.contains(&b)));
            prop_assert!(code.accepts(&code.as_str().to_lowercase()));
        }
    }
}
