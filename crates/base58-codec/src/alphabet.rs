use core::fmt;

use crate::error::AlphabetError;

/// Number of symbols in a Base58 alphabet.
pub const RADIX: usize = 58;

/// The Bitcoin alphabet. Omits `0`, `O`, `I` and `l`.
pub const BITCOIN_SYMBOLS: &[u8; RADIX] =
    b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Marks bytes that are not part of the alphabet.
const INVALID: u8 = 255;

/// Reverse table for [`BITCOIN_SYMBOLS`].
const BITCOIN_DIGITS: [u8; 256] = [
    255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
    255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
    255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 0, 1, 2, 3, 4, 5, 6, 7, 8, 255, 255,
    255, 255, 255, 255, 255, 9, 10, 11, 12, 13, 14, 15, 16, 255, 17, 18, 19, 20, 21, 255, 22, 23,
    24, 25, 26, 27, 28, 29, 30, 31, 32, 255, 255, 255, 255, 255, 255, 33, 34, 35, 36, 37, 38, 39,
    40, 41, 42, 43, 255, 44, 45, 46, 47, 48, 49, 50, 51, 52, 53, 54, 55, 56, 57, 255, 255, 255,
    255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
    255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
    255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
    255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
    255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
    255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
    255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
];

/// A Base58 alphabet: 58 distinct byte symbols and the reverse
/// lookup table derived from them.
///
/// Position `i` holds the symbol for digit `i`, so `symbols()[0]` is
/// the zero symbol written for each leading zero byte.
#[derive(Clone, Eq, PartialEq)]
pub struct Alphabet {
    symbols: [u8; RADIX],
    /// Digit value for each byte, or [`INVALID`].
    digits: [u8; 256],
}

impl Alphabet {
    /// The Bitcoin alphabet.
    pub const BITCOIN: Self = Self {
        symbols: *BITCOIN_SYMBOLS,
        digits: BITCOIN_DIGITS,
    };

    /// Builds an alphabet from `symbols`.
    ///
    /// `symbols` must be exactly 58 distinct bytes.
    pub fn new(symbols: &[u8]) -> Result<Self, AlphabetError> {
        let symbols: &[u8; RADIX] = symbols
            .try_into()
            .map_err(|_| AlphabetError::InvalidLength { len: symbols.len() })?;

        let mut digits = [INVALID; 256];
        for (index, &symbol) in symbols.iter().enumerate() {
            let slot = &mut digits[usize::from(symbol)];
            if *slot != INVALID {
                return Err(AlphabetError::DuplicateSymbol {
                    symbol,
                    first: usize::from(*slot),
                    second: index,
                });
            }
            // `index < RADIX`, so it fits.
            *slot = index as u8;
        }
        Ok(Self {
            symbols: *symbols,
            digits,
        })
    }

    /// Returns the symbols in digit order.
    #[inline]
    pub fn symbols(&self) -> &[u8; RADIX] {
        &self.symbols
    }

    /// Returns the symbol for `digit`.
    ///
    /// # Panics
    ///
    /// Panics if `digit >= 58`.
    #[inline]
    pub fn symbol(&self, digit: u8) -> u8 {
        self.symbols[usize::from(digit)]
    }

    /// Returns the digit value of `symbol`, or `None` if `symbol` is
    /// not in the alphabet.
    #[inline]
    pub fn digit(&self, symbol: u8) -> Option<u8> {
        match self.digits[usize::from(symbol)] {
            INVALID => None,
            d => Some(d),
        }
    }

    /// Returns the symbol for digit zero.
    #[inline]
    pub fn zero(&self) -> u8 {
        self.symbols[0]
    }

    /// Reports whether every symbol is ASCII.
    #[inline]
    pub fn is_ascii(&self) -> bool {
        self.symbols.is_ascii()
    }
}

impl Default for Alphabet {
    #[inline]
    fn default() -> Self {
        Self::BITCOIN
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Alphabet")
            .field(&format_args!("\"{}\"", self.symbols.escape_ascii()))
            .finish()
    }
}
