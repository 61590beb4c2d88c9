

use ethers::types::{Address, Bytes, U256};

use serde::{Serialize, Serializer};


/// One positional json-rpc parameter. A closed set of variants instead of
/// loose json values so a malformed call shape fails at compile time.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EthParameter {

    Address(Address),
    Quantity(U256),
    BlockTag(BlockTag),
    Data(Bytes),
    Bool(bool),
    String(String)

}


/// Block selector for methods that take a block position argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {

    Latest,
    Earliest,
    Pending,
    Number(u64)

}

impl Serialize for BlockTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {

        match self {
            Self::Latest => serializer.serialize_str("latest"),
            Self::Earliest => serializer.serialize_str("earliest"),
            Self::Pending => serializer.serialize_str("pending"),

            //quantities go over the wire as minimal hex
            Self::Number(block_number) => serializer.serialize_str(&format!("{:#x}", block_number)),
        }

    }
}


impl From<Address> for EthParameter {
    fn from(address: Address) -> Self {
        Self::Address(address)
    }
}

impl From<U256> for EthParameter {
    fn from(quantity: U256) -> Self {
        Self::Quantity(quantity)
    }
}

impl From<BlockTag> for EthParameter {
    fn from(tag: BlockTag) -> Self {
        Self::BlockTag(tag)
    }
}

impl From<Bytes> for EthParameter {
    fn from(data: Bytes) -> Self {
        Self::Data(data)
    }
}

impl From<bool> for EthParameter {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<&str> for EthParameter {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use std::str::FromStr;

    #[test]
    fn address_serializes_as_prefixed_hex() {

        let address = Address::from_str("0xdC726D36a2f1864D592fF8d420710cd2C3D350aa").unwrap();
        let param = EthParameter::from(address);

        assert_eq!(
            serde_json::to_string(&param).unwrap(),
            "\"0xdc726d36a2f1864d592ff8d420710cd2c3d350aa\""
        );

    }

    #[test]
    fn quantity_serializes_as_minimal_hex() {

        let param = EthParameter::from(U256::from(1_000_000u64));
        assert_eq!(serde_json::to_string(&param).unwrap(), "\"0xf4240\"");

        let param = EthParameter::from(U256::zero());
        assert_eq!(serde_json::to_string(&param).unwrap(), "\"0x0\"");

    }

    #[test]
    fn block_tags_serialize_per_the_rpc_convention() {

        assert_eq!(serde_json::to_string(&BlockTag::Latest).unwrap(), "\"latest\"");
        assert_eq!(serde_json::to_string(&BlockTag::Earliest).unwrap(), "\"earliest\"");
        assert_eq!(serde_json::to_string(&BlockTag::Pending).unwrap(), "\"pending\"");
        assert_eq!(serde_json::to_string(&BlockTag::Number(4382418)).unwrap(), "\"0x42dfd2\"");

    }

    #[test]
    fn data_bool_and_string_serialize_natively() {

        let param = EthParameter::from(Bytes::from(vec![0xde, 0xad, 0xbe, 0xef]));
        assert_eq!(serde_json::to_string(&param).unwrap(), "\"0xdeadbeef\"");

        let param = EthParameter::from(true);
        assert_eq!(serde_json::to_string(&param).unwrap(), "true");

        let param = EthParameter::from("pending");
        assert_eq!(serde_json::to_string(&param).unwrap(), "\"pending\"");

    }

    #[test]
    fn params_serialize_as_an_ordered_array() {

        let address = Address::from_str("0x4590383ae832ebdfb262d750ee81361e690cfc9c").unwrap();

        let params = vec![
            EthParameter::from(address),
            EthParameter::from(BlockTag::Latest),
        ];

        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            "[\"0x4590383ae832ebdfb262d750ee81361e690cfc9c\",\"latest\"]"
        );

    }

}
