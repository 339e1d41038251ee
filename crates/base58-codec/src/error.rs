/// The alphabet could not be used to build a [`Codec`][crate::Codec].
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum AlphabetError {
    /// The alphabet did not contain exactly 58 symbols.
    #[error("alphabet must be 58 symbols, got {len}")]
    InvalidLength {
        /// Length of the rejected alphabet.
        len: usize,
    },
    /// A symbol appeared more than once.
    #[error("symbol {symbol:#04x} appears at indexes {first} and {second}")]
    DuplicateSymbol {
        /// The repeated symbol.
        symbol: u8,
        /// Index of its first occurrence.
        first: usize,
        /// Index of its second occurrence.
        second: usize,
    },
}

/// The Base58 could not be decoded.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// The input contained a symbol outside the alphabet.
    #[error("invalid character {symbol:#04x} at index {index}")]
    InvalidCharacter {
        /// The offending byte.
        symbol: u8,
        /// Its index in the input.
        index: usize,
    },
    /// The output buffer passed to `decode_into` was too small.
    #[error("output buffer too small, need {needed} bytes")]
    BufferTooSmall {
        /// Length of the decoded value.
        needed: usize,
    },
}

/// The input could not be encoded into the output buffer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum EncodeError {
    /// The output buffer passed to `encode_into` was too small.
    #[error("output buffer too small, need {needed} bytes")]
    BufferTooSmall {
        /// Length of the encoded value.
        needed: usize,
    },
}
