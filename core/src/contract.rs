use std::path::Path;

use alloy_dyn_abi::{DynSolValue, JsonAbiExt};
use alloy_json_abi::JsonAbi;
use alloy_primitives::{Address, Bytes};
use serde::Deserialize;

use crate::errors::ContractError;

/// The fields this tool consumes from a compiled-contract build artifact.
/// Everything else in the artifact (bytecode, link references) is ignored.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    pub abi: JsonAbi,
}

pub fn load_artifact(path: impl AsRef<Path>) -> Result<ContractArtifact, ContractError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| ContractError::ArtifactRead {
        path: path.display().to_string(),
        source: e,
    })?;

    serde_json::from_str(&json).map_err(|e| ContractError::ArtifactParse {
        path: path.display().to_string(),
        source: e,
    })
}

/// A deployed ERC-721 contract exposing `mintNFT(address,string)`.
pub struct NftContract {
    pub address: Address,
    abi: JsonAbi,
}

impl NftContract {
    pub fn new(abi: JsonAbi, address: Address) -> Self {
        Self { address, abi }
    }

    /// ABI-encodes `mintNFT(recipient, token_uri)`: four selector bytes
    /// followed by the encoded arguments.
    pub fn mint_nft_call(&self, recipient: Address, token_uri: &str) -> Result<Bytes, ContractError> {
        let function = self
            .abi
            .function("mintNFT")
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| ContractError::UnknownFunction(String::from("mintNFT")))?;

        let call_data = function.abi_encode_input(&[
            DynSolValue::Address(recipient),
            DynSolValue::String(token_uri.to_string()),
        ])?;

        Ok(call_data.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::keccak256;
    use std::io::Write;

    const MINT_ABI: &str = r#"{
        "contractName": "MyNFT",
        "abi": [
            {
                "inputs": [
                    { "internalType": "address", "name": "recipient", "type": "address" },
                    { "internalType": "string", "name": "tokenURI", "type": "string" }
                ],
                "name": "mintNFT",
                "outputs": [{ "internalType": "uint256", "name": "", "type": "uint256" }],
                "stateMutability": "nonpayable",
                "type": "function"
            }
        ]
    }"#;

    fn test_contract() -> NftContract {
        let artifact: ContractArtifact = serde_json::from_str(MINT_ABI).unwrap();
        NftContract::new(
            artifact.abi,
            "0x0ce4BC80e29512373BcFBA31CdB0e756332f1acB".parse().unwrap(),
        )
    }

    #[test]
    fn call_data_decodes_back_to_the_mint_arguments() {
        let contract = test_contract();
        let recipient: Address = "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23".parse().unwrap();
        let token_uri = "https://gateway.pinata.cloud/ipfs/QmWxxGP7v7q7mrTkrfE11P8y45XpFV34ec9WthoHG6tmiJ";

        let call_data = contract.mint_nft_call(recipient, token_uri).unwrap();

        let selector = &keccak256(b"mintNFT(address,string)")[..4];
        assert_eq!(&call_data[..4], selector);

        let function = contract.abi.function("mintNFT").unwrap().first().unwrap();
        let decoded = function.abi_decode_input(&call_data[4..]).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0], DynSolValue::Address(recipient));
        assert_eq!(decoded[1], DynSolValue::String(token_uri.to_string()));
    }

    #[test]
    fn missing_mint_function_is_reported() {
        let abi: JsonAbi = serde_json::from_str("[]").unwrap();
        let contract = NftContract::new(abi, Address::ZERO);

        let result = contract.mint_nft_call(Address::ZERO, "ipfs://x");
        assert!(matches!(result, Err(ContractError::UnknownFunction(_))));
    }

    #[test]
    fn artifact_loads_from_disk_and_reports_bad_paths() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINT_ABI.as_bytes()).unwrap();

        let artifact = load_artifact(file.path()).unwrap();
        assert_eq!(artifact.contract_name, "MyNFT");
        assert!(artifact.abi.function("mintNFT").is_some());

        let missing = load_artifact("does/not/exist.json");
        assert!(matches!(missing, Err(ContractError::ArtifactRead { .. })));
    }
}
