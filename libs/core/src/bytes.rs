use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Arbitrary byte string carried as `0x`-prefixed hex on the wire
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Bytes {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl FromStr for Bytes {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.len() % 2 == 1 {
            // Odd-length hex is accepted with an implicit leading zero
            return Ok(Self(hex::decode(format!("0{digits}"))?));
        }
        Ok(Self(hex::decode(digits)?))
    }
}

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl Serialize for Bytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Bytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_prefix() {
        assert_eq!("0xdeadbeef".parse::<Bytes>().unwrap().0, vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!("deadbeef".parse::<Bytes>().unwrap().0, vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!("0xabc".parse::<Bytes>().unwrap().0, vec![0x0a, 0xbc]);
        assert!("0x".parse::<Bytes>().unwrap().is_empty());
    }

    #[test]
    fn rejects_non_hex() {
        assert!(matches!("0xzz".parse::<Bytes>(), Err(Error::Hex(_))));
    }

    #[test]
    fn serializes_as_prefixed_hex() {
        let bytes = Bytes(vec![0x01, 0xff]);
        assert_eq!(serde_json::to_string(&bytes).unwrap(), r#""0x01ff""#);

        let back: Bytes = serde_json::from_str(r#""0x01ff""#).unwrap();
        assert_eq!(back, bytes);
    }
}
