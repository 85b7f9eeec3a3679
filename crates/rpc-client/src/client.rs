//! JSON-RPC client for the ledger node.
//!
//! The node is a black-box collaborator: we submit a signed transaction and
//! read back the execution effects, or resolve an object id to its current
//! (id, version, digest) reference for use as a call argument. Calls are
//! single-shot and sequential; a failed call surfaces immediately.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use chain_core::{Address, ObjectRef, SignedTransaction};

use crate::error::RpcError;

/// Outcome of a submitted transaction, as reported by the node's effects.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub digest: String,
    pub success: bool,
    /// The node's failure description when `success` is false.
    pub error: Option<String>,
}

/// HTTP JSON-RPC 2.0 client.
#[derive(Debug, Clone)]
pub struct LedgerRpc {
    http: reqwest::Client,
    url: String,
}

impl LedgerRpc {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Submit a signed transaction and wait for local execution effects.
    pub async fn submit(&self, tx: &SignedTransaction) -> Result<ExecutionResult, RpcError> {
        info!(url = %self.url, "submitting transaction");

        let result = self
            .call(
                "sui_executeTransactionBlock",
                json!([
                    tx.tx_base64(),
                    [tx.signature_base64()],
                    { "showEffects": true },
                    "WaitForLocalExecution",
                ]),
            )
            .await?;

        parse_execution(result)
    }

    /// Resolve an object id to its current reference.
    pub async fn object_ref(&self, id: &Address) -> Result<ObjectRef, RpcError> {
        debug!(object = %id, "resolving object reference");

        let result = self
            .call("sui_getObject", json!([id.to_hex(), {}]))
            .await?;

        parse_object_ref(id, result)
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self.http.post(&self.url).json(&body).send().await?;
        let envelope: Value = response.error_for_status()?.json().await?;
        unwrap_result(envelope)
    }
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// Split a JSON-RPC envelope into its result, surfacing node errors.
fn unwrap_result(mut envelope: Value) -> Result<Value, RpcError> {
    if let Some(error) = envelope.get_mut("error").filter(|e| !e.is_null()) {
        let body: RpcErrorBody = serde_json::from_value(error.take())
            .map_err(|e| RpcError::MalformedResponse(format!("error body: {e}")))?;
        return Err(RpcError::Node {
            code: body.code,
            message: body.message,
        });
    }

    match envelope.get_mut("result") {
        Some(result) => Ok(result.take()),
        None => Err(RpcError::MalformedResponse(
            "neither result nor error present".into(),
        )),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecuteResult {
    digest: String,
    effects: Option<TransactionEffects>,
}

#[derive(Deserialize)]
struct TransactionEffects {
    status: EffectsStatus,
}

#[derive(Deserialize)]
struct EffectsStatus {
    status: String,
    error: Option<String>,
}

fn parse_execution(result: Value) -> Result<ExecutionResult, RpcError> {
    let parsed: ExecuteResult = serde_json::from_value(result)
        .map_err(|e| RpcError::MalformedResponse(format!("execution result: {e}")))?;

    let effects = parsed.effects.ok_or_else(|| {
        RpcError::MalformedResponse("execution result missing effects".into())
    })?;

    Ok(ExecutionResult {
        digest: parsed.digest,
        success: effects.status.status == "success",
        error: effects.status.error,
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectResult {
    data: Option<ObjectData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectData {
    object_id: String,
    version: String,
    digest: String,
}

fn parse_object_ref(requested: &Address, result: Value) -> Result<ObjectRef, RpcError> {
    let parsed: ObjectResult = serde_json::from_value(result)
        .map_err(|e| RpcError::MalformedResponse(format!("object result: {e}")))?;

    let data = parsed
        .data
        .ok_or_else(|| RpcError::ObjectNotFound(requested.to_hex()))?;

    let id = Address::from_hex(&data.object_id)
        .map_err(|e| RpcError::MalformedResponse(format!("object id: {e}")))?;

    let version: u64 = data
        .version
        .parse()
        .map_err(|e| RpcError::MalformedResponse(format!("object version: {e}")))?;

    let digest_bytes = bs58::decode(&data.digest)
        .into_vec()
        .map_err(|e| RpcError::MalformedResponse(format!("object digest: {e}")))?;
    let digest: [u8; 32] = digest_bytes.try_into().map_err(|v: Vec<u8>| {
        RpcError::MalformedResponse(format!("object digest: expected 32 bytes, got {}", v.len()))
    })?;

    Ok(ObjectRef::new(id, version, digest))
}
