use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable {0}.")]
    MissingVar(&'static str),
    #[error("Invalid value for {var}: {reason}.")]
    InvalidVar { var: &'static str, reason: String },
    #[error("PRIVATE_KEY does not belong to PUBLIC_KEY {0}.")]
    KeyMismatch(alloy_primitives::Address),
}

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("Could not read contract artifact at {path}: {source}.")]
    ArtifactRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Could not parse contract artifact at {path}: {source}.")]
    ArtifactParse {
        path: String,
        source: serde_json::Error,
    },
    #[error("Function {0} not found in the contract ABI.")]
    UnknownFunction(String),
    #[error("Call data encoding failed: {0}.")]
    Encode(#[from] alloy_dyn_abi::Error),
}
