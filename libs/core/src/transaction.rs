use primitive_types::{H160, U256};
use serde::{Deserialize, Serialize};

use crate::bytes::Bytes;

/// Message call parameters for `eth_call` / `eth_estimateGas`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionForCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<H160>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<H160>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<U256>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<U256>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,

    #[serde(default, alias = "input", skip_serializing_if = "Option::is_none")]
    pub data: Option<Bytes>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn omits_absent_fields() {
        let tx = TransactionForCall {
            to: Some(H160::repeat_byte(0x11)),
            data: Some(Bytes(vec![0xca, 0xfe])),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&tx).unwrap(),
            json!({
                "to": "0x1111111111111111111111111111111111111111",
                "data": "0xcafe",
            })
        );
    }

    #[test]
    fn accepts_input_alias_and_camel_case() {
        let tx: TransactionForCall = serde_json::from_value(json!({
            "from": "0x2222222222222222222222222222222222222222",
            "gasPrice": "0x3b9aca00",
            "input": "0x01",
        }))
        .unwrap();

        assert_eq!(tx.from, Some(H160::repeat_byte(0x22)));
        assert_eq!(tx.gas_price, Some(U256::from(1_000_000_000u64)));
        assert_eq!(tx.data, Some(Bytes(vec![0x01])));
    }

    #[test]
    fn rejects_non_object() {
        assert!(serde_json::from_value::<TransactionForCall>(json!("0x00")).is_err());
    }
}
