use std::fmt;
use std::ops::Deref;

use rand::RngCore;

use crate::util::length_u8;

use super::ParseResult;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct InvalidLength(&'static str, IdType, usize);

impl fmt::Debug for InvalidLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl std::error::Error for InvalidLength {}

impl fmt::Display for InvalidLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.1 {
            IdType::Variable(min, max) => write!(
                f,
                "Incorrect variable ID ({}) length: {} <= {} <= {}",
                self.0, min, self.2, max,
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdType {
    Variable(usize, usize),
}

macro_rules! var_array {
    ($name:ident, $min:expr, $max:expr) => {
        #[derive(Clone, Copy)]
        pub struct $name([u8; $max], usize);

        impl $name {
            pub fn try_new(data: &[u8]) -> Result<Self, InvalidLength> {
                #[allow(unused_comparisons)]
                if data.len() < $min || data.len() > $max {
                    return Err(InvalidLength(
                        stringify!($name),
                        IdType::Variable($min, $max),
                        data.len(),
                    ));
                }
                let mut array = [0; $max];
                array[..data.len()].copy_from_slice(data);
                Ok($name(array, data.len()))
            }

            pub fn empty() -> Self {
                $name([0; $max], 0)
            }

            /// Fill `len` bytes from the given random source.
            pub fn random<R: RngCore + ?Sized>(len: usize, rng: &mut R) -> Result<Self, InvalidLength> {
                #[allow(unused_comparisons)]
                if len < $min || len > $max {
                    return Err(InvalidLength(
                        stringify!($name),
                        IdType::Variable($min, $max),
                        len,
                    ));
                }
                let mut arr = [0; $max];
                rng.fill_bytes(&mut arr[..len]);
                Ok(Self(arr, len))
            }

            pub fn parse(input: &[u8]) -> ParseResult<'_, Self> {
                // a u8 prefix never exceeds the 255 byte capacity
                let (rest, data) = length_u8(stringify!($name), input)?;
                let mut array = [0; $max];
                array[..data.len()].copy_from_slice(data);
                Ok((rest, $name(array, data.len())))
            }

            pub fn serialize(&self, output: &mut Vec<u8>) {
                // the length is bounded by $max, which fits in the u8 prefix
                output.push(self.1 as u8);
                output.extend_from_slice(self);
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::empty()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:02x?})", stringify!($name), &self.0[..self.1])
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.deref() == other.deref()
            }
        }

        impl Eq for $name {}

        impl Deref for $name {
            type Target = [u8];

            fn deref(&self) -> &Self::Target {
                &self.0[..self.1]
            }
        }

        impl<'a> TryFrom<&'a [u8]> for $name {
            type Error = InvalidLength;

            fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
                Self::try_new(value)
            }
        }
    };
}

var_array!(SessionId, 0, 255);

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn session_id_roundtrip() {
        let id = SessionId::try_new(&[0xAA; 32]).unwrap();

        let mut serialized = Vec::new();
        id.serialize(&mut serialized);
        assert_eq!(serialized.len(), 33);
        assert_eq!(serialized[0], 32);

        let (rest, parsed) = SessionId::parse(&serialized).unwrap();
        assert!(rest.is_empty());
        assert_eq!(parsed, id);
    }

    #[test]
    fn session_id_max() {
        assert!(SessionId::try_new(&[0; 255]).is_ok());
        assert!(SessionId::try_new(&[0; 256]).is_err());

        let mut message = vec![0xFF];
        message.extend_from_slice(&[0x11; 255]);
        let (rest, parsed) = SessionId::parse(&message).unwrap();
        assert!(rest.is_empty());
        assert_eq!(parsed.len(), 255);
    }

    #[test]
    fn session_id_truncated() {
        let message = [0x05, 0x01, 0x02];
        assert!(SessionId::parse(&message).is_err());
    }

    #[test]
    fn session_id_random() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = SessionId::random(32, &mut rng).unwrap();
        assert_eq!(id.len(), 32);
        assert!(SessionId::random(256, &mut rng).is_err());
    }
}
