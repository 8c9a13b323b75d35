use std::{
    fmt::{self, Display},
    str::FromStr,
};

use sha2::{Digest as _, Sha256};

/// A 256-bit seed that fully determines a generated puzzle.
///
/// Seeds are written as 64 lowercase hexadecimal digits.
///
/// # Examples
///
/// ```
/// use std::str::FromStr as _;
///
/// use solverbench_generator::PuzzleSeed;
///
/// let text = "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1";
/// let seed = PuzzleSeed::from_str(text)?;
/// assert_eq!(seed.to_string(), text);
///
/// // Derived seeds are stable and distinct per label and index.
/// assert_eq!(seed.derive("Easy", 0), seed.derive("Easy", 0));
/// assert_ne!(seed.derive("Easy", 0), seed.derive("Easy", 1));
/// # Ok::<(), solverbench_generator::PuzzleSeedError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PuzzleSeed([u8; 32]);

/// Errors returned when parsing a [`PuzzleSeed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PuzzleSeedError {
    /// The text does not have exactly 64 characters.
    #[display("seed must be 64 hex digits, found {len} characters")]
    InvalidLength {
        /// Length of the rejected text.
        len: usize,
    },
    /// The text contains a non-hexadecimal character.
    #[display("invalid hex digit {ch:?} in seed")]
    InvalidHexDigit {
        /// The offending character.
        ch: char,
    },
}

impl PuzzleSeed {
    /// Creates a seed from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates a seed from the operating system's randomness source.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Returns the raw bytes of the seed.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Derives a child seed for the given label and index.
    ///
    /// The child is the SHA-256 digest of this seed, the label and the index,
    /// so a single run seed reproduces every trial instance of a benchmark.
    #[must_use]
    pub fn derive(&self, label: &str, index: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(self.0);
        hasher.update(label.as_bytes());
        hasher.update([0]);
        hasher.update(index.to_le_bytes());
        Self(hasher.finalize().into())
    }
}

impl Display for PuzzleSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for PuzzleSeed {
    type Err = PuzzleSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .chars()
            .map(|ch| {
                ch.to_digit(16)
                    .ok_or(PuzzleSeedError::InvalidHexDigit { ch })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if digits.len() != 64 {
            return Err(PuzzleSeedError::InvalidLength { len: digits.len() });
        }
        let mut bytes = [0; 32];
        for (byte, pair) in bytes.iter_mut().zip(digits.chunks_exact(2)) {
            // Each digit is below 16, so the pair fits in a byte.
            #[expect(clippy::cast_possible_truncation)]
            let value = (pair[0] * 16 + pair[1]) as u8;
            *byte = value;
        }
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let text = "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";
        let seed = PuzzleSeed::from_str(text).unwrap();
        assert_eq!(seed.as_bytes()[0], 0x12);
        assert_eq!(seed.as_bytes()[7], 0xef);
        assert_eq!(seed.to_string(), text);

        let upper = PuzzleSeed::from_str(&text.to_uppercase()).unwrap();
        assert_eq!(upper, seed);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            PuzzleSeed::from_str("abc"),
            Err(PuzzleSeedError::InvalidLength { len: 3 })
        );
        let bad = format!("{}g", "0".repeat(63));
        assert_eq!(
            PuzzleSeed::from_str(&bad),
            Err(PuzzleSeedError::InvalidHexDigit { ch: 'g' })
        );
    }

    #[test]
    fn test_derive_depends_on_label() {
        let seed = PuzzleSeed::from_bytes([7; 32]);
        assert_ne!(seed.derive("Easy", 0), seed.derive("Hard", 0));
        assert_ne!(seed.derive("Easy", 0), seed);
    }
}
