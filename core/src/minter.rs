use alloy_consensus::{SignableTransaction, TxEip1559, TxEnvelope};
use alloy_eips::eip2718::Encodable2718;
use alloy_eips::eip2930::AccessList;
use alloy_primitives::{Address, Bytes, TxKind, B256, U256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use anyhow::anyhow;
use tracing::info;

use ethereum::ethereum::TransactionReceipt;
use ethereum::service::{EthProvider, EthServiceConfig};

use crate::config::MinterConfig;
use crate::contract::NftContract;
use crate::errors::ConfigError;

pub const GAS_LIMIT: u64 = 500_000;
pub const MAX_PRIORITY_FEE_PER_GAS: u128 = 2_999_999_987;

/// Everything needed to assemble one mint transaction. Built once,
/// consumed by signing, then discarded.
pub struct MintTransactionParams {
    pub chain_id: u64,
    pub nonce: u64,
    pub gas_limit: u64,
    pub max_fee_per_gas: u128,
    pub max_priority_fee_per_gas: u128,
    pub contract_address: Address,
    pub call_data: Bytes,
}

pub struct SignedMintTransaction {
    pub tx_hash: B256,
    pub raw: Vec<u8>,
}

pub fn build_mint_transaction(params: MintTransactionParams) -> TxEip1559 {
    TxEip1559 {
        chain_id: params.chain_id,
        nonce: params.nonce,
        gas_limit: params.gas_limit,
        max_fee_per_gas: params.max_fee_per_gas,
        max_priority_fee_per_gas: params.max_priority_fee_per_gas,
        to: TxKind::Call(params.contract_address),
        value: U256::ZERO,
        access_list: AccessList::default(),
        input: params.call_data,
    }
}

/// Signs the transaction and produces the EIP-2718 envelope bytes a node
/// accepts on `eth_sendRawTransaction`.
pub fn sign_transaction(
    signer: &PrivateKeySigner,
    transaction: TxEip1559,
) -> Result<SignedMintTransaction, alloy_signer::Error> {
    let signature = signer.sign_hash_sync(&transaction.signature_hash())?;
    let signed = transaction.into_signed(signature);
    let tx_hash = *signed.hash();
    let envelope = TxEnvelope::from(signed);

    Ok(SignedMintTransaction {
        tx_hash,
        raw: envelope.encoded_2718(),
    })
}

// Twice the latest base fee keeps the transaction includable for several
// blocks even if the base fee climbs every block.
pub fn compute_max_fee_per_gas(base_fee: u128, max_priority_fee_per_gas: u128) -> u128 {
    base_fee * 2 + max_priority_fee_per_gas
}

pub struct Minter {
    provider: EthProvider,
    signer: PrivateKeySigner,
    sender: Address,
    contract: NftContract,
}

impl Minter {
    pub fn new(config: &MinterConfig, contract: NftContract) -> Result<Self, ConfigError> {
        let signer = config.signer()?;
        if signer.address() != config.public_key {
            return Err(ConfigError::KeyMismatch(config.public_key));
        }

        let provider = EthProvider::new(EthServiceConfig {
            rpc_url: config.api_url.clone(),
        });

        Ok(Self {
            provider,
            signer,
            sender: config.public_key,
            contract,
        })
    }

    /// Mints one token: fetch nonce, price the transaction, sign,
    /// broadcast, and wait for the receipt. Every step is awaited before
    /// the next; the first failure propagates out.
    pub async fn mint_nft(&self, token_uri: &str) -> Result<TransactionReceipt, anyhow::Error> {
        let nonce = self
            .provider
            .get_transaction_count(self.sender, "latest")
            .await?;
        let chain_id = self.provider.chain_id().await?;

        let header = self.provider.latest_block().await?;
        let base_fee = match header.base_fee_per_gas {
            Some(base) => u128::try_from(base).map_err(|e| anyhow!("{:?}", e))?,
            None => {
                return Err(anyhow!(
                    "Node reported no base fee; cannot price an EIP-1559 transaction."
                ))
            }
        };

        let call_data = self.contract.mint_nft_call(self.sender, token_uri)?;
        let transaction = build_mint_transaction(MintTransactionParams {
            chain_id,
            nonce,
            gas_limit: GAS_LIMIT,
            max_fee_per_gas: compute_max_fee_per_gas(base_fee, MAX_PRIORITY_FEE_PER_GAS),
            max_priority_fee_per_gas: MAX_PRIORITY_FEE_PER_GAS,
            contract_address: self.contract.address,
            call_data,
        });
        let signed = sign_transaction(&self.signer, transaction)?;

        info!(
            "Submitting mint transaction {} with nonce {}",
            &signed.tx_hash, nonce
        );
        let tx_hash = self.provider.send_raw_transaction(&signed.raw).await?;

        self.provider.wait_for_receipt(tx_hash).await
    }
}
