use std::env;

use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;

use crate::errors::ConfigError;

/// Credentials and endpoint for one minting run, read from the environment.
#[derive(Clone)]
pub struct MinterConfig {
    pub api_url: String,
    //TODO: Safer strategy to load the private key so it is not accidentally revealed.
    pub private_key: String,
    pub public_key: Address,
}

impl MinterConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = require_var("API_URL")?;
        let private_key = require_var("PRIVATE_KEY")?;
        let public_key = require_var("PUBLIC_KEY")?
            .parse::<Address>()
            .map_err(|e| ConfigError::InvalidVar {
                var: "PUBLIC_KEY",
                reason: e.to_string(),
            })?;

        Ok(Self {
            api_url,
            private_key,
            public_key,
        })
    }

    pub fn signer(&self) -> Result<PrivateKeySigner, ConfigError> {
        self.private_key
            .parse()
            .map_err(|e: alloy_signer_local::LocalSignerError| ConfigError::InvalidVar {
                var: "PRIVATE_KEY",
                reason: e.to_string(),
            })
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}
