use std::fmt;

use rand::RngCore;

use crate::util::take_len;

use super::ParseResult;

/// The 32 byte random nonce of a hello message.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Random(pub [u8; 32]);

impl Random {
    /// Draw a fresh random from `rng`.
    pub fn new<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0; 32];
        rng.fill_bytes(&mut bytes);
        Random(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn parse(input: &[u8]) -> ParseResult<'_, Random> {
        let (input, data) = take_len("random", 32, input)?;
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(data);
        Ok((input, Random(bytes)))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) {
        output.extend_from_slice(&self.0);
    }
}

impl From<[u8; 32]> for Random {
    fn from(value: [u8; 32]) -> Self {
        Random(value)
    }
}

impl fmt::Debug for Random {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for Random {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Random(")?;
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DATA: &[u8] = &[
        0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F,
        0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1A, 0x1B, 0x1C, 0x1D, 0x1E,
        0x1F, 0x20,
    ];

    #[test]
    fn random_parse() {
        let (rest, parsed) = Random::parse(DATA).unwrap();
        assert!(rest.is_empty());
        assert_eq!(&parsed.0[..], DATA);

        let mut serialized = Vec::new();
        parsed.serialize(&mut serialized);
        assert_eq!(serialized, DATA);
    }

    #[test]
    fn random_short() {
        assert!(Random::parse(&DATA[..31]).is_err());
    }

    #[test]
    fn random_from_rng_is_deterministic() {
        let a = Random::new(&mut StdRng::seed_from_u64(12345));
        let b = Random::new(&mut StdRng::seed_from_u64(12345));
        let c = Random::new(&mut StdRng::seed_from_u64(54321));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
