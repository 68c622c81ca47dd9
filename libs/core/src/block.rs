use std::fmt;
use std::str::FromStr;

use primitive_types::H256;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Block reference by height or by symbolic tag
///
/// Tags serialize as their lowercase names; concrete heights serialize as
/// `0x`-prefixed hex quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockNumber {
    Earliest,
    #[default]
    Latest,
    Pending,
    Number(u64),
}

impl BlockNumber {
    /// Symbolic name of the tag, `None` for concrete heights
    pub fn as_tag(&self) -> Option<&'static str> {
        match self {
            Self::Earliest => Some("earliest"),
            Self::Latest => Some("latest"),
            Self::Pending => Some("pending"),
            Self::Number(_) => None,
        }
    }
}

impl From<u64> for BlockNumber {
    fn from(number: u64) -> Self {
        Self::Number(number)
    }
}

impl fmt::Display for BlockNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number:#x}"),
            tag => f.write_str(tag.as_tag().unwrap_or_default()),
        }
    }
}

impl FromStr for BlockNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "earliest" => Ok(Self::Earliest),
            "latest" => Ok(Self::Latest),
            "pending" => Ok(Self::Pending),
            _ => {
                let digits = s
                    .strip_prefix("0x")
                    .ok_or_else(|| Error::InvalidBlockNumber(s.to_string()))?;
                u64::from_str_radix(digits, 16)
                    .map(Self::Number)
                    .map_err(|_| Error::InvalidBlockNumber(s.to_string()))
            }
        }
    }
}

impl Serialize for BlockNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BlockNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(u64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => s.parse().map_err(de::Error::custom),
            Repr::Number(number) => Ok(Self::Number(number)),
        }
    }
}

/// Block reference as accepted by `eth_*` methods: a height/tag or an
/// EIP-1898 object naming either a number or a hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockNumberOrHash {
    pub block_number: Option<BlockNumber>,
    pub block_hash: Option<H256>,
}

impl From<BlockNumber> for BlockNumberOrHash {
    fn from(number: BlockNumber) -> Self {
        Self {
            block_number: Some(number),
            block_hash: None,
        }
    }
}

impl From<H256> for BlockNumberOrHash {
    fn from(hash: H256) -> Self {
        Self {
            block_number: None,
            block_hash: Some(hash),
        }
    }
}

impl<'de> Deserialize<'de> for BlockNumberOrHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(BlockNumber),
            #[serde(rename_all = "camelCase")]
            Object {
                block_number: Option<BlockNumber>,
                block_hash: Option<H256>,
            },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(number) => Ok(number.into()),
            Repr::Object {
                block_number: None,
                block_hash: None,
            } => Err(de::Error::custom("expected blockNumber or blockHash")),
            Repr::Object {
                block_number,
                block_hash,
            } => Ok(Self {
                block_number,
                block_hash,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(json!("earliest"), BlockNumber::Earliest)]
    #[case(json!("latest"), BlockNumber::Latest)]
    #[case(json!("pending"), BlockNumber::Pending)]
    #[case(json!("0x1b4"), BlockNumber::Number(436))]
    #[case(json!(436), BlockNumber::Number(436))]
    fn block_number_from_json(#[case] input: serde_json::Value, #[case] expected: BlockNumber) {
        let parsed: BlockNumber = serde_json::from_value(input).unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn block_number_rejects_garbage() {
        assert!(serde_json::from_value::<BlockNumber>(json!("safe-ish")).is_err());
        assert!(serde_json::from_value::<BlockNumber>(json!("436")).is_err());
        assert!(serde_json::from_value::<BlockNumber>(json!(true)).is_err());
    }

    #[test]
    fn block_number_serializes_tags_and_hex() {
        assert_eq!(serde_json::to_value(BlockNumber::Latest).unwrap(), json!("latest"));
        assert_eq!(serde_json::to_value(BlockNumber::Earliest).unwrap(), json!("earliest"));
        assert_eq!(serde_json::to_value(BlockNumber::Pending).unwrap(), json!("pending"));
        assert_eq!(serde_json::to_value(BlockNumber::Number(436)).unwrap(), json!("0x1b4"));
    }

    #[test]
    fn block_number_or_hash_accepts_every_form() {
        let tag: BlockNumberOrHash = serde_json::from_value(json!("pending")).unwrap();
        assert_eq!(tag, BlockNumber::Pending.into());

        let object: BlockNumberOrHash =
            serde_json::from_value(json!({ "blockNumber": "0x10" })).unwrap();
        assert_eq!(object.block_number, Some(BlockNumber::Number(16)));

        let hash = H256::repeat_byte(0xab);
        let by_hash: BlockNumberOrHash =
            serde_json::from_value(json!({ "blockHash": hash })).unwrap();
        assert_eq!(by_hash, hash.into());
    }

    #[test]
    fn block_number_or_hash_rejects_empty_object() {
        assert!(serde_json::from_value::<BlockNumberOrHash>(json!({})).is_err());
    }
}
