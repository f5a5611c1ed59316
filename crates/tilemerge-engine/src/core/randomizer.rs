use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::InvalidSeedError;

/// Characters a seed may contain.
pub const SEED_CHARS: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of characters in a seed.
pub const SEED_LEN: usize = 8;

/// Shareable identity of a reproducible game.
///
/// A seed is 8 characters drawn from `0-9` and `A-Z`. It is usually shown with a
/// space after the fourth character (`ABCD EFGH`), and any whitespace is ignored
/// when parsing. Visually ambiguous characters are treated as equal when the
/// seed is folded into generator state: `O` behaves like `0`, `E` like `3`, and
/// `L` like `1`.
///
/// # Example
///
/// ```
/// use tilemerge_engine::Seed;
///
/// let seed: Seed = "ABCD 1234".parse().unwrap();
/// assert_eq!(seed.as_str(), "ABCD1234");
/// assert_eq!(format!("{seed:#}"), "ABCD 1234");
///
/// assert!("abcd1234".parse::<Seed>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed([u8; SEED_LEN]);

fn is_seed_char(c: u8) -> bool {
    c.is_ascii_digit() || c.is_ascii_uppercase()
}

fn simplify(c: u8) -> u8 {
    match c {
        b'O' => b'0',
        b'E' => b'3',
        b'L' => b'1',
        c => c,
    }
}

impl Seed {
    /// Validates `seed` exactly as given (no whitespace stripping).
    pub fn new(seed: &str) -> Result<Self, InvalidSeedError> {
        let bytes: [u8; SEED_LEN] = seed
            .as_bytes()
            .try_into()
            .map_err(|_| InvalidSeedError::new(seed))?;
        if !bytes.iter().copied().all(is_seed_char) {
            return Err(InvalidSeedError::new(seed));
        }
        Ok(Self(bytes))
    }

    /// Returns whether `seed` is a well-formed seed.
    ///
    /// Whitespace must already be stripped.
    #[must_use]
    pub fn is_valid(seed: &str) -> bool {
        seed.len() == SEED_LEN && seed.bytes().all(is_seed_char)
    }

    /// Draws a fresh seed from the thread-local entropy source.
    #[must_use]
    pub fn random() -> Self {
        rand::rng().random()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).expect("seed characters are ASCII")
    }

    /// Folds the simplified characters into the 64-bit generator seed.
    ///
    /// Every character lands in its own byte, so seeds that differ after
    /// simplification always produce different generator state.
    #[must_use]
    pub fn fold(self) -> u64 {
        self.0
            .iter()
            .fold(0, |acc, &c| (acc << 8) | u64::from(simplify(c)))
    }
}

impl FromStr for Seed {
    type Err = InvalidSeedError;

    /// Parses a seed, ignoring surrounding quotes and all whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped: String = s
            .trim()
            .trim_matches(|c| c == '"' || c == '\'')
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        Self::new(&stripped)
    }
}

impl fmt::Display for Seed {
    /// Plain form is `ABCD1234`; the alternate form (`{:#}`) is `ABCD 1234`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.as_str();
        if f.alternate() {
            let (head, tail) = s.split_at(SEED_LEN / 2);
            write!(f, "{head} {tail}")
        } else {
            f.write_str(s)
        }
    }
}

impl Serialize for Seed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `Seed` values with `rng.random()`.
impl Distribution<Seed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Seed {
        let chars = SEED_CHARS.as_bytes();
        Seed(std::array::from_fn(|_| {
            chars[rng.random_range(0..chars.len())]
        }))
    }
}

/// Seeded source of uniform draws in `[0, 1)`.
///
/// Two randomizers built from the same [`Seed`] yield identical sequences, which
/// is what makes a game reproducible from its seed string.
///
/// # Example
///
/// ```
/// use tilemerge_engine::{Randomizer, Seed};
///
/// let seed: Seed = "2048 GAME".parse().unwrap();
/// let mut a = Randomizer::new(seed);
/// let mut b = Randomizer::new(seed);
///
/// for _ in 0..10 {
///     let draw = a.next_f64();
///     assert!((0.0..1.0).contains(&draw));
///     assert_eq!(draw.to_bits(), b.next_f64().to_bits());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Randomizer {
    seed: Seed,
    rng: Pcg32,
}

impl Randomizer {
    #[must_use]
    pub fn new(seed: Seed) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed.fold()),
        }
    }

    #[must_use]
    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// Returns the next draw in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.rng.random()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draws(seed: &str, n: usize) -> Vec<u64> {
        let mut randomizer = Randomizer::new(seed.parse().unwrap());
        (0..n).map(|_| randomizer.next_f64().to_bits()).collect()
    }

    #[test]
    fn test_same_seed_same_sequence() {
        for seed in ["00000000", "ZZZZZZZZ", "ABCD1234", "9X8Y7W6V"] {
            assert_eq!(draws(seed, 1000), draws(seed, 1000), "seed {seed}");
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        assert_ne!(draws("ABCD1234", 16), draws("ABCD1235", 16));
        // Only the first character differs.
        assert_ne!(draws("ABCD1234", 16), draws("BBCD1234", 16));
    }

    #[test]
    fn test_ambiguous_characters_collapse() {
        assert_eq!(draws("OOOO0000", 32), draws("00000000", 32));
        assert_eq!(draws("EEEE3333", 32), draws("33333333", 32));
        assert_eq!(draws("LLLL1111", 32), draws("11111111", 32));
    }

    #[test]
    fn test_draws_stay_in_unit_interval() {
        let mut randomizer = Randomizer::new("RANGE123".parse().unwrap());
        for _ in 0..10_000 {
            let draw = randomizer.next_f64();
            assert!((0.0..1.0).contains(&draw), "draw {draw} out of range");
        }
    }

    #[test]
    fn test_is_valid_rejects_wrong_length() {
        assert!(!Seed::is_valid(""));
        assert!(!Seed::is_valid("ABC1234"));
        assert!(!Seed::is_valid("ABCD12345"));
        assert!(Seed::is_valid("ABCD1234"));
    }

    #[test]
    fn test_is_valid_rejects_bad_alphabet() {
        assert!(!Seed::is_valid("abcd1234"));
        assert!(!Seed::is_valid("ABCD-234"));
        assert!(!Seed::is_valid("ABCD 234"));
        assert!(!Seed::is_valid("ABCDÉ23"));
    }

    #[test]
    fn test_new_does_not_strip_whitespace() {
        assert!(Seed::new("ABCD 1234").is_err());
        assert_eq!(
            Seed::new("ABCD 1234").unwrap_err().seed(),
            "ABCD 1234"
        );
    }

    #[test]
    fn test_parse_strips_whitespace_and_quotes() {
        let expected = Seed::new("ABCD1234").unwrap();
        assert_eq!("ABCD 1234".parse::<Seed>().unwrap(), expected);
        assert_eq!(" \"ABCD 1234\" ".parse::<Seed>().unwrap(), expected);
        assert_eq!("'AB CD\t12 34'".parse::<Seed>().unwrap(), expected);
    }

    #[test]
    fn test_random_seed_is_valid() {
        for _ in 0..100 {
            let seed = Seed::random();
            assert!(Seed::is_valid(seed.as_str()), "{seed}");
        }
    }

    #[test]
    fn test_display_forms() {
        let seed = Seed::new("WXYZ0987").unwrap();
        assert_eq!(seed.to_string(), "WXYZ0987");
        assert_eq!(format!("{seed:#}"), "WXYZ 0987");
    }

    #[test]
    fn test_fold_keeps_every_character() {
        let seed = Seed::new("12345678").unwrap();
        assert_eq!(seed.fold(), u64::from_be_bytes(*b"12345678"));
    }

    mod seed_serialization {
        use super::*;

        #[test]
        fn test_serializes_as_plain_string() {
            let seed = Seed::new("ABCD1234").unwrap();
            assert_eq!(serde_json::to_string(&seed).unwrap(), "\"ABCD1234\"");
        }

        #[test]
        fn test_roundtrip_preserves_sequence() {
            let seed = Seed::random();
            let json = serde_json::to_string(&seed).unwrap();
            let restored: Seed = serde_json::from_str(&json).unwrap();
            assert_eq!(seed, restored);

            let mut a = Randomizer::new(seed);
            let mut b = Randomizer::new(restored);
            for _ in 0..20 {
                assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
            }
        }

        #[test]
        fn test_error_invalid_seed() {
            let result: Result<Seed, _> = serde_json::from_str("\"abcd1234\"");
            let err_msg = result.unwrap_err().to_string();
            assert!(err_msg.contains("invalid seed"), "{err_msg}");
        }
    }
}
