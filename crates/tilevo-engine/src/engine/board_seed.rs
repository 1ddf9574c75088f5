use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ParseSeedError;

/// Seed for a board's tile-spawning random source.
///
/// This is a 128-bit seed. Two boards created from the same seed and driven
/// with the same moves spawn the same tiles in the same cells, which makes
/// whole training runs reproducible.
///
/// Seeds are written as 32-character hex strings, both in `Display`/`FromStr`
/// and in serialized form.
///
/// # Example
///
/// ```
/// use tilevo_engine::{Board, BoardConfig, BoardSeed};
/// use rand::Rng as _;
///
/// let seed: BoardSeed = rand::rng().random();
/// let a = Board::new(BoardConfig::default(), seed).unwrap();
/// let b = Board::new(BoardConfig::default(), seed).unwrap();
/// assert_eq!(a.values(), b.values());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSeed([u8; 16]);

impl BoardSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Creates the random source this seed describes.
    #[must_use]
    pub fn rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for BoardSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for BoardSeed {
    type Err = ParseSeedError;

    fn from_str(hex_str: &str) -> Result<Self, Self::Err> {
        if hex_str.len() != 32 {
            return Err(ParseSeedError::InvalidLength { len: hex_str.len() });
        }
        let num = u128::from_str_radix(hex_str, 16)
            .map_err(|_| ParseSeedError::InvalidHex {
                input: hex_str.to_owned(),
            })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for BoardSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BoardSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `BoardSeed` values with `rng.random()`.
impl Distribution<BoardSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BoardSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        BoardSeed(seed)
    }
}
