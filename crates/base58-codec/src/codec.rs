use alloc::{string::String, vec::Vec};
use core::iter;

use tracing::debug;

use crate::{
    alphabet::{Alphabet, RADIX},
    arith,
    error::{AlphabetError, DecodeError, EncodeError},
};

/// Radix of the encoded form.
const B58: u32 = RADIX as u32;
/// Radix of the decoded form.
const B256: u32 = 256;

/// The Bitcoin codec, shared by the free functions.
static BITCOIN: Codec = Codec::BITCOIN;

/// Returns an upper bound on the encoded length of `n` bytes.
///
/// Each byte needs `log(256)/log(58) ~= 1.366` symbols.
pub const fn max_encoded_len(n: usize) -> usize {
    (n.saturating_mul(138) / 100).saturating_add(1)
}

/// Returns an upper bound on the decoded length of `n` symbols.
pub const fn max_decoded_len(n: usize) -> usize {
    n
}

/// Implemented by types that can encode themselves as Base58.
pub trait ToBase58 {
    /// Encodes itself as a Base58 string using the Bitcoin alphabet.
    fn to_base58(&self) -> String;
}

impl ToBase58 for [u8] {
    fn to_base58(&self) -> String {
        Codec::bitcoin().encode(self)
    }
}

impl<const N: usize> ToBase58 for [u8; N] {
    fn to_base58(&self) -> String {
        self[..].to_base58()
    }
}

impl ToBase58 for Vec<u8> {
    fn to_base58(&self) -> String {
        self[..].to_base58()
    }
}

/// Encodes and decodes Base58 with a particular [`Alphabet`].
///
/// A `Codec` is immutable once built and can be shared freely
/// between threads.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Codec {
    alphabet: Alphabet,
}

impl Codec {
    /// The codec for the Bitcoin alphabet.
    pub const BITCOIN: Self = Self {
        alphabet: Alphabet::BITCOIN,
    };

    /// Creates a codec from 58 distinct byte symbols.
    pub fn new(symbols: impl AsRef<[u8]>) -> Result<Self, AlphabetError> {
        let alphabet = Alphabet::new(symbols.as_ref()).inspect_err(|err| {
            debug!(%err, "rejected base58 alphabet");
        })?;
        Ok(Self { alphabet })
    }

    /// Returns the shared codec for the Bitcoin alphabet.
    #[inline]
    pub fn bitcoin() -> &'static Self {
        &BITCOIN
    }

    /// Returns the codec's alphabet.
    #[inline]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Encodes `input`, returning the symbols as bytes.
    pub fn encode_to_vec(&self, input: impl AsRef<[u8]>) -> Vec<u8> {
        let input = input.as_ref();
        let zeros = arith::leading(input, 0);

        let mut number = input[zeros..].to_vec();
        let mut out = Vec::with_capacity(max_encoded_len(input.len()));
        arith::rebase(&mut number, B256, B58, &mut out);
        out.extend(iter::repeat_n(0, zeros));
        out.reverse();

        for d in &mut out {
            *d = self.alphabet.symbol(*d);
        }
        out
    }

    /// Encodes `input` as a Base58 string.
    ///
    /// Each symbol becomes the `char` with the same value, so symbols
    /// above `0x7f` are rendered as Latin-1 and take two bytes in the
    /// string. Use [`decode_str`][Self::decode_str] to reverse it, or
    /// [`encode_to_vec`][Self::encode_to_vec] for the raw symbols.
    pub fn encode(&self, input: impl AsRef<[u8]>) -> String {
        self.encode_to_vec(input)
            .into_iter()
            .map(char::from)
            .collect()
    }

    /// Encodes `input` into `output`, returning the number of bytes
    /// written.
    ///
    /// `output` must hold the entire encoding; [`max_encoded_len`]
    /// is always enough. On error the contents of `output` are
    /// unspecified.
    pub fn encode_into(
        &self,
        input: impl AsRef<[u8]>,
        output: &mut [u8],
    ) -> Result<usize, EncodeError> {
        let encoded = self.encode_to_vec(input);
        let dst = output
            .get_mut(..encoded.len())
            .ok_or(EncodeError::BufferTooSmall {
                needed: encoded.len(),
            })?;
        dst.copy_from_slice(&encoded);
        Ok(encoded.len())
    }

    /// Decodes `input`.
    ///
    /// Fails without output if any symbol is not in the alphabet.
    pub fn decode(&self, input: impl AsRef<[u8]>) -> Result<Vec<u8>, DecodeError> {
        let input = input.as_ref();
        let mut digits = input
            .iter()
            .enumerate()
            .map(|(index, &symbol)| {
                self.alphabet
                    .digit(symbol)
                    .ok_or(DecodeError::InvalidCharacter { symbol, index })
            })
            .collect::<Result<Vec<u8>, _>>()?;
        let zeros = arith::leading(&digits, 0);

        let mut out = Vec::with_capacity(max_decoded_len(input.len()));
        arith::rebase(&mut digits, B58, B256, &mut out);
        out.extend(iter::repeat_n(0, zeros));
        out.reverse();
        Ok(out)
    }

    /// Decodes the string `s`, the inverse of [`encode`][Self::encode].
    ///
    /// Each `char` is taken as one symbol, so error indexes count
    /// chars rather than bytes.
    pub fn decode_str(&self, s: &str) -> Result<Vec<u8>, DecodeError> {
        if s.is_ascii() {
            return self.decode(s);
        }
        let symbols = s
            .chars()
            .enumerate()
            .map(|(index, c)| {
                u8::try_from(c).map_err(|_| DecodeError::InvalidCharacter {
                    // The char's leading UTF-8 byte.
                    symbol: c.encode_utf8(&mut [0; 4]).as_bytes()[0],
                    index,
                })
            })
            .collect::<Result<Vec<u8>, _>>()?;
        self.decode(symbols)
    }

    /// Decodes `input` into `output`, returning the number of bytes
    /// written.
    ///
    /// [`max_decoded_len`] is always enough. On error the contents of
    /// `output` are unspecified.
    pub fn decode_into(
        &self,
        input: impl AsRef<[u8]>,
        output: &mut [u8],
    ) -> Result<usize, DecodeError> {
        let decoded = self.decode(input)?;
        let dst = output
            .get_mut(..decoded.len())
            .ok_or(DecodeError::BufferTooSmall {
                needed: decoded.len(),
            })?;
        dst.copy_from_slice(&decoded);
        Ok(decoded.len())
    }
}

impl From<Alphabet> for Codec {
    #[inline]
    fn from(alphabet: Alphabet) -> Self {
        Self { alphabet }
    }
}

/// Encodes `input` with the Bitcoin alphabet.
pub fn encode(input: impl AsRef<[u8]>) -> String {
    Codec::bitcoin().encode(input)
}

/// Encodes `input` into `output` with the Bitcoin alphabet.
pub fn encode_into(input: impl AsRef<[u8]>, output: &mut [u8]) -> Result<usize, EncodeError> {
    Codec::bitcoin().encode_into(input, output)
}

/// Decodes `input` with the Bitcoin alphabet.
pub fn decode(input: impl AsRef<[u8]>) -> Result<Vec<u8>, DecodeError> {
    Codec::bitcoin().decode(input)
}

/// Decodes `input` into `output` with the Bitcoin alphabet.
pub fn decode_into(input: impl AsRef<[u8]>, output: &mut [u8]) -> Result<usize, DecodeError> {
    Codec::bitcoin().decode_into(input, output)
}

#[cfg(test)]
mod test {
    #![allow(clippy::panic, clippy::unwrap_used)]

    use std::io::Read;

    use flate2::bufread::GzDecoder;
    use proptest::prelude::*;
    use serde::{Deserialize, Serialize};
    use test_log::test;

    use super::*;
    use crate::alphabet::BITCOIN_SYMBOLS;

    const PAIRS: &[(&[u8], &str)] = &[
        (b"", ""),
        (b"\x14\xfb\x9c\x03\xd9\x7e", "BT2vGYLD"),
        (b"\x14\xfb\x9c\x03", "Y7GPC"),
        (b"su", "9nc"),
        (b"sure", "3xB2TW"),
        (b"sure.", "E2XFRyo"),
        (b"leasure.", "K8aUZhGUNaR"),
        (b"a", "2g"),
        (b"bbb", "a3gV"),
        (b"hello world", "StV1DL6CwTryKyV"),
        (b"simply a long string", "2cFupjhnEsSn59qHXstmK2ffpLv2"),
        (
            b"Twas brillig, and the slithy toves",
            "2ukVBARx4fMCUZXaHR1XvNbb3HgzmGYFEEThDa86tN2q8oU",
        ),
        (b"\x00", "1"),
        (b"\x00\x00\x01", "112"),
        (b"\x00\x00\x00\xff", "1115Q"),
        (&[0; 10], "1111111111"),
    ];

    #[test]
    fn test_encode() {
        for (i, (input, want)) in PAIRS.iter().enumerate() {
            assert_eq!(Codec::bitcoin().encode(input), *want, "{i}");
            assert_eq!(encode(input), *want, "{i}");
            assert_eq!(input.to_base58(), *want, "{i}");
        }
    }

    #[test]
    fn test_decode() {
        for (i, (want, input)) in PAIRS.iter().enumerate() {
            assert_eq!(Codec::bitcoin().decode_str(input).unwrap(), *want, "{i}");
            assert_eq!(decode(input).unwrap(), *want, "{i}");
        }
    }

    #[test]
    fn test_empty() {
        assert_eq!(encode(b""), "");
        assert_eq!(decode("").unwrap(), b"");
        assert_eq!(decode(b"").unwrap(), b"");
    }

    #[test]
    fn test_all_zero() {
        for n in 0..20 {
            let got = encode(vec![0u8; n]);
            assert_eq!(got, "1".repeat(n));
            assert_eq!(decode(&got).unwrap(), vec![0u8; n]);
        }
    }

    #[test]
    fn test_invalid_character() {
        for (input, symbol, index) in [
            ("0", b'0', 0),
            ("3xB2TWO", b'O', 6),
            ("11I", b'I', 2),
            ("abl1", b'l', 2),
            ("3x B2", b' ', 2),
            ("3xB2TW\n", b'\n', 6),
        ] {
            assert_eq!(
                decode(input),
                Err(DecodeError::InvalidCharacter { symbol, index }),
                "{input:?}"
            );
        }
        assert_eq!(
            decode([b'2', 0xff]),
            Err(DecodeError::InvalidCharacter {
                symbol: 0xff,
                index: 1
            })
        );
    }

    #[test]
    fn test_every_byte_value() {
        let all: Vec<u8> = (0..=255).collect();
        let encoded = encode(&all);
        assert_eq!(arith::leading(encoded.as_bytes(), b'1'), 1);
        assert_eq!(decode(&encoded).unwrap(), all);

        let mut rev = all.clone();
        rev.reverse();
        assert_eq!(decode(encode(&rev)).unwrap(), rev);
    }

    #[test]
    fn test_encode_into() {
        let mut buf = [0u8; 16];
        let n = encode_into(b"sure", &mut buf).unwrap();
        assert_eq!(&buf[..n], b"3xB2TW");

        let mut buf = [0u8; 5];
        assert_eq!(
            encode_into(b"sure", &mut buf),
            Err(EncodeError::BufferTooSmall { needed: 6 })
        );

        let mut buf: [u8; 0] = [];
        assert_eq!(encode_into(b"", &mut buf), Ok(0));
    }

    #[test]
    fn test_decode_into() {
        let mut buf = [0u8; 16];
        let n = decode_into("K8aUZhGUNaR", &mut buf).unwrap();
        assert_eq!(&buf[..n], b"leasure.");

        let mut buf = [0u8; 3];
        assert_eq!(
            decode_into("3xB2TW", &mut buf),
            Err(DecodeError::BufferTooSmall { needed: 4 })
        );
        assert_eq!(
            decode_into("3x0", &mut buf),
            Err(DecodeError::InvalidCharacter {
                symbol: b'0',
                index: 2
            })
        );
    }

    #[test]
    fn test_max_len() {
        for (input, encoded) in PAIRS {
            assert!(encoded.len() <= max_encoded_len(input.len()), "{encoded}");
            assert!(input.len() <= max_decoded_len(encoded.len()), "{encoded}");
        }
        let max = [0xffu8; 256];
        assert!(encode(max).len() <= max_encoded_len(max.len()));
    }

    #[test]
    fn test_custom_alphabet() {
        let mut reversed = *BITCOIN_SYMBOLS;
        reversed.reverse();
        let codec = Codec::new(reversed).unwrap();

        let got = codec.encode(b"sure");
        assert_eq!(got, "x3pyYV");
        assert_ne!(got, encode(b"sure"));
        assert_eq!(codec.decode(&got).unwrap(), b"sure");

        // Leading zeros use the alphabet's own zero symbol.
        assert_eq!(codec.encode([0u8, 0]), "zz");
        assert_eq!(codec.decode("zz").unwrap(), [0u8, 0]);
    }

    #[test]
    fn test_high_byte_alphabet() {
        let symbols: Vec<u8> = (0xc6..=0xff).collect();
        let codec = Codec::new(&symbols).unwrap();

        let raw = codec.encode_to_vec(b"\0sure");
        assert_eq!(raw.len(), 7);
        assert_eq!(raw[0], 0xc6);
        assert!(raw.iter().all(|&b| b >= 0xc6));
        assert_eq!(codec.decode(&raw).unwrap(), b"\0sure");

        let s = codec.encode(b"\0sure");
        assert_eq!(s.chars().count(), raw.len());
        assert!(s.chars().zip(&raw).all(|(c, &b)| c == char::from(b)));
        assert_eq!(codec.decode_str(&s).unwrap(), b"\0sure");

        assert_eq!(
            codec.decode_str("\u{c6}1"),
            Err(DecodeError::InvalidCharacter {
                symbol: b'1',
                index: 1
            })
        );
        assert_eq!(
            codec.decode_str("\u{c6}\u{2603}"),
            Err(DecodeError::InvalidCharacter {
                symbol: 0xe2,
                index: 1
            })
        );
    }

    #[test]
    fn test_shared_between_threads() {
        let mut reversed = *BITCOIN_SYMBOLS;
        reversed.reverse();
        let custom = Codec::new(reversed).unwrap();

        std::thread::scope(|s| {
            for (i, (input, want)) in PAIRS.iter().enumerate() {
                let custom = &custom;
                s.spawn(move || {
                    assert_eq!(Codec::bitcoin().encode(input), *want, "{i}");
                    let encoded = custom.encode(input);
                    assert_eq!(custom.decode(&encoded).unwrap(), *input, "{i}");
                });
            }
        });
    }

    #[test]
    fn test_new_rejects_bad_alphabets() {
        assert_eq!(
            Codec::new(&BITCOIN_SYMBOLS[1..]),
            Err(AlphabetError::InvalidLength { len: 57 })
        );
        assert_eq!(
            Codec::new("123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz0"),
            Err(AlphabetError::InvalidLength { len: 59 })
        );
        assert_eq!(
            Codec::new("1123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxy"),
            Err(AlphabetError::DuplicateSymbol {
                symbol: b'1',
                first: 0,
                second: 1,
            })
        );
        assert_eq!(Codec::new(BITCOIN_SYMBOLS), Ok(Codec::BITCOIN));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DecodeError::InvalidCharacter {
                symbol: b'0',
                index: 3
            }
            .to_string(),
            "invalid character 0x30 at index 3"
        );
        assert_eq!(
            AlphabetError::InvalidLength { len: 10 }.to_string(),
            "alphabet must be 58 symbols, got 10"
        );
    }

    #[derive(Serialize, Deserialize, Debug)]
    struct TestCase {
        input: String,
        output: String,
    }

    #[test]
    fn test_bitcoin_vectors() {
        const TEST_CASES: &[u8] = include_bytes!("../testdata/bitcoin.json.gz");
        let tests: Vec<TestCase> = serde_json::from_slice(
            &GzDecoder::new(TEST_CASES)
                .bytes()
                .collect::<Result<Vec<_>, _>>()
                .unwrap(),
        )
        .unwrap();
        assert!(!tests.is_empty());
        for (i, tc) in tests.iter().enumerate() {
            let input = hex::decode(&tc.input).unwrap_or_else(|err| panic!("{i}: {err}"));

            let got = encode(&input);
            assert_eq!(got, tc.output, "{i}");

            let got = decode(&got).unwrap_or_else(|err| panic!("{i}: {err}"));
            assert_eq!(got, input, "{i}");
        }
    }

    fn alphabets() -> impl Strategy<Value = Codec> {
        Just(BITCOIN_SYMBOLS.to_vec())
            .prop_shuffle()
            .prop_map(|symbols| Codec::new(symbols).unwrap())
    }

    proptest! {
        #[test]
        fn proptest_round_trip(data in prop::collection::vec(any::<u8>(), 0..128)) {
            let encoded = encode(&data);
            prop_assert_eq!(decode(&encoded).unwrap(), data);
        }

        #[test]
        fn proptest_leading_zeros(zeros in 0usize..16, rest in prop::collection::vec(1u8..=255, 0..32)) {
            let mut data = vec![0u8; zeros];
            data.extend(&rest);
            let encoded = encode(&data);
            prop_assert_eq!(arith::leading(encoded.as_bytes(), b'1'), zeros);
            let decoded = decode(&encoded).unwrap();
            prop_assert_eq!(arith::leading(&decoded, 0), zeros);
            prop_assert_eq!(decoded, data);
        }

        #[test]
        fn proptest_custom_alphabet(codec in alphabets(), data in prop::collection::vec(any::<u8>(), 0..64)) {
            let encoded = codec.encode(&data);
            prop_assert!(encoded.bytes().all(|c| codec.alphabet().digit(c).is_some()));
            prop_assert_eq!(codec.decode(&encoded).unwrap(), data);
        }
    }
}
