use anyhow::Result;
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::EnvFilter;

use minter_core::config::MinterConfig;
use minter_core::contract::{load_artifact, NftContract};
use minter_core::minter::Minter;
use minter_core::Address;

const CONTRACT_ADDRESS: &str = "0x0ce4BC80e29512373BcFBA31CdB0e756332f1acB";
const DEFAULT_TOKEN_URI: &str =
    "https://gateway.pinata.cloud/ipfs/QmWxxGP7v7q7mrTkrfE11P8y45XpFV34ec9WthoHG6tmiJ";

#[derive(StructOpt, Debug)]
#[structopt(name = "mint_nft", about = "Mints one token on the deployed MyNFT contract.")]
struct Opt {
    /// Metadata URI for the minted token.
    token_uri: Option<String>,

    /// Path to the compiled contract artifact.
    #[structopt(long, default_value = "artifacts/MyNFT.json")]
    artifact: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let opt = Opt::from_args();
    let token_uri = opt.token_uri.unwrap_or_else(|| String::from(DEFAULT_TOKEN_URI));

    let config = MinterConfig::from_env()?;
    let artifact = load_artifact(&opt.artifact)?;
    info!("Loaded artifact for contract {}", &artifact.contract_name);

    let contract = NftContract::new(artifact.abi, CONTRACT_ADDRESS.parse::<Address>()?);
    let minter = Minter::new(&config, contract)?;

    let receipt = minter.mint_nft(&token_uri).await?;

    println!(
        "Transaction receipt: {}",
        serde_json::to_string_pretty(&receipt)?
    );

    Ok(())
}
