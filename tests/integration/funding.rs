//! Funding providers against local faucet and RPC servers

use anyhow::Result;
use program_fixtures::errors::FundingError;
use program_fixtures::funding::aptos::OCTAS_PER_APT;
use program_fixtures::funding::solana::LAMPORTS_PER_SOL;
use program_fixtures::funding::{
    fund_nodes, AptosFaucetProvider, ChainFamily, FundingProvider, Node, SolanaAirdropProvider,
    SuiFaucetProvider,
};
use serde_json::{json, Value};

use crate::common::MockServer;

fn airdrop_ok() -> (u16, Vec<u8>) {
    let body = json!({ "jsonrpc": "2.0", "result": "5VERv8NMvzbJMEkV8xnrLkEaWRt", "id": 1 });
    (200, body.to_string().into_bytes())
}

#[tokio::test]
async fn test_solana_airdrop_request() -> Result<()> {
    let server = MockServer::start(vec![airdrop_ok()]);
    let provider = SolanaAirdropProvider::new(&server.base_url, 5)?;
    let node = Node::new("node-0").with_key(ChainFamily::Solana, "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin");

    provider.fund(&node, 1000 * LAMPORTS_PER_SOL).await?;

    let requests = server.finish();
    assert_eq!(requests[0].method, "POST");
    let body: Value = serde_json::from_str(&requests[0].body)?;
    assert_eq!(body["method"], "requestAirdrop");
    assert_eq!(
        body["params"],
        json!([
            "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin",
            1_000_000_000_000u64,
            { "commitment": "confirmed" }
        ])
    );
    Ok(())
}

#[tokio::test]
async fn test_solana_rpc_error_surfaces() -> Result<()> {
    let body = json!({
        "jsonrpc": "2.0",
        "error": { "code": -32600, "message": "airdrop request limit reached" },
        "id": 1
    });
    let server = MockServer::start(vec![(200, body.to_string().into_bytes())]);
    let provider = SolanaAirdropProvider::new(&server.base_url, 5)?;

    let result = provider.fund_address("recipient", 1).await;

    match result {
        Err(FundingError::Rpc { code, message }) => {
            assert_eq!(code, -32600);
            assert_eq!(message, "airdrop request limit reached");
        }
        other => panic!("expected Rpc error, got {:?}", other),
    }
    server.finish();
    Ok(())
}

#[tokio::test]
async fn test_aptos_faucet_mint() -> Result<()> {
    let server = MockServer::start(vec![(200, b"[\"0xabc\"]".to_vec())]);
    let provider = AptosFaucetProvider::new(format!("{}/", server.base_url), 5)?;
    let node = Node::new("node-0").with_key(ChainFamily::Aptos, "0x1a2b");

    provider.fund(&node, 100 * OCTAS_PER_APT).await?;

    let requests = server.finish();
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].url, "/mint?amount=10000000000&address=0x1a2b");
    Ok(())
}

#[tokio::test]
async fn test_sui_faucet_request_body() -> Result<()> {
    let server = MockServer::start(vec![(201, b"{}".to_vec())]);
    let provider = SuiFaucetProvider::new(&server.base_url, 5)?;

    provider.fund_address("0xsui", 0).await?;

    let requests = server.finish();
    assert_eq!(requests[0].url, "/gas");
    let body: Value = serde_json::from_str(&requests[0].body)?;
    assert_eq!(body, json!({ "FixedAmountRequest": { "recipient": "0xsui" } }));
    Ok(())
}

#[tokio::test]
async fn test_faucet_rejection() -> Result<()> {
    let server = MockServer::start(vec![(429, b"slow down".to_vec())]);
    let provider = SuiFaucetProvider::new(&server.base_url, 5)?;

    let result = provider.fund_address("0xsui", 0).await;

    assert!(matches!(result, Err(FundingError::Rejected { status: 429, .. })));
    server.finish();
    Ok(())
}

#[tokio::test]
async fn test_fund_nodes_stops_at_misconfigured_node() -> Result<()> {
    // Only the first node reaches the server
    let server = MockServer::start(vec![airdrop_ok()]);
    let provider = SolanaAirdropProvider::new(&server.base_url, 5)?;
    let nodes = vec![
        Node::new("node-0").with_key(ChainFamily::Solana, "key-0"),
        Node::new("node-1")
            .with_key(ChainFamily::Solana, "key-1a")
            .with_key(ChainFamily::Solana, "key-1b"),
        Node::new("node-2").with_key(ChainFamily::Solana, "key-2"),
    ];

    let result = fund_nodes(&provider, &nodes, LAMPORTS_PER_SOL).await;

    match result {
        Err(FundingError::KeyCount { node, count, .. }) => {
            assert_eq!(node, "node-1");
            assert_eq!(count, 2);
        }
        other => panic!("expected KeyCount error, got {:?}", other),
    }
    assert_eq!(server.finish().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_fund_nodes_funds_every_node() -> Result<()> {
    let server = MockServer::start(vec![airdrop_ok(), airdrop_ok()]);
    let provider = SolanaAirdropProvider::new(&server.base_url, 5)?;
    let nodes = vec![
        Node::new("node-0").with_key(ChainFamily::Solana, "key-0"),
        Node::new("node-1").with_key(ChainFamily::Solana, "key-1"),
    ];

    fund_nodes(&provider, &nodes, LAMPORTS_PER_SOL).await?;

    let recipients: Vec<String> = server
        .finish()
        .iter()
        .map(|r| serde_json::from_str::<Value>(&r.body).unwrap()["params"][0].to_string())
        .collect();
    assert_eq!(recipients, vec!["\"key-0\"", "\"key-1\""]);
    Ok(())
}
