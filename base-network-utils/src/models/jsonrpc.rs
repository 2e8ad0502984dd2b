use alloy::primitives::{hex, Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// JSON-RPC invalid params
pub const INVALID_PARAMS: i32 = -32602;
/// JSON-RPC internal error
pub const INTERNAL_ERROR: i32 = -32603;
/// Implementation-defined server error
pub const SERVER_ERROR: i32 = -32000;

/// JSON-RPC 2.0 request with generic parameters
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest<T> {
    /// Protocol version, must be "2.0"
    pub jsonrpc: String,
    pub method: String,
    pub params: T,
    pub id: serde_json::Value,
}

impl<T> JsonRpcRequest<Vec<T>> {
    /// Check version and method name and return the first positional param
    pub fn first_param(&self, expected_method: &str) -> Result<&T, JsonRpcError> {
        if self.jsonrpc != "2.0" {
            return Err(JsonRpcError::invalid_params(
                self.id.clone(),
                "Invalid JSON-RPC version. Expected 2.0".to_string(),
            ));
        }
        if self.method != expected_method {
            return Err(JsonRpcError::invalid_params(
                self.id.clone(),
                format!("Unsupported method: {}", self.method),
            ));
        }
        self.params.first().ok_or_else(|| {
            JsonRpcError::invalid_params(
                self.id.clone(),
                "Missing transaction parameters".to_string(),
            )
        })
    }
}

/// JSON-RPC 2.0 successful response
#[derive(Debug, Serialize)]
pub struct JsonRpcSuccess<T> {
    pub jsonrpc: String,
    /// Echoes the request id
    pub id: serde_json::Value,
    pub result: T,
}

impl<T> JsonRpcSuccess<T> {
    pub fn new(id: serde_json::Value, result: T) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result,
        }
    }
}

/// JSON-RPC 2.0 error response
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub jsonrpc: String,
    pub id: serde_json::Value,
    pub error: JsonRpcErrorDetail,
}

/// Error object inside a [`JsonRpcError`]
#[derive(Debug, Serialize)]
pub struct JsonRpcErrorDetail {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    fn new(id: serde_json::Value, code: i32, message: String, data: Option<serde_json::Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            error: JsonRpcErrorDetail {
                code,
                message,
                data,
            },
        }
    }

    pub fn invalid_params(id: serde_json::Value, message: String) -> Self {
        Self::new(id, INVALID_PARAMS, message, None)
    }

    pub fn internal_error(id: serde_json::Value, message: String) -> Self {
        Self::new(id, INTERNAL_ERROR, message, None)
    }

    /// Server error with a machine-readable code in `data`
    pub fn server_error(id: serde_json::Value, message: String, error_code: &str) -> Self {
        Self::new(
            id,
            SERVER_ERROR,
            message,
            Some(serde_json::Value::String(error_code.to_string())),
        )
    }
}

/// Transaction object carried in `params[0]` of the transaction endpoints
///
/// Mirrors the call object of `eth_estimateGas` / `eth_sendTransaction`. All
/// quantities are 0x-prefixed hex strings.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionParams {
    #[serde(default)]
    pub from: Option<String>,

    /// Absent for contract creation
    #[serde(default)]
    pub to: Option<String>,

    /// Gas limit
    #[serde(default)]
    pub gas: Option<String>,

    /// Legacy gas price
    #[serde(default, rename = "gasPrice")]
    pub gas_price: Option<String>,

    #[serde(default, rename = "maxFeePerGas")]
    pub max_fee_per_gas: Option<String>,

    #[serde(default, rename = "maxPriorityFeePerGas")]
    pub max_priority_fee_per_gas: Option<String>,

    /// Value in wei
    #[serde(default)]
    pub value: Option<String>,

    /// Call data, accepted as either "data" or "input"
    #[serde(default, rename = "data", alias = "input")]
    pub input: Option<String>,

    #[serde(default)]
    pub nonce: Option<String>,

    #[serde(default, rename = "chainId")]
    pub chain_id: Option<String>,
}

fn strip_hex_prefix<'a>(value: &'a str, what: &str) -> Result<&'a str, String> {
    value
        .strip_prefix("0x")
        .ok_or_else(|| format!("{what} must start with 0x"))
}

/// Parse a 0x-prefixed, 20-byte hex address
pub fn parse_hex_address(value: &str) -> Result<Address, String> {
    strip_hex_prefix(value, "Address")?;
    Address::from_str(value).map_err(|e| format!("Invalid address: {e}"))
}

/// Parse a 0x-prefixed hex quantity into a `U256`
pub fn parse_hex_u256(value: &str) -> Result<U256, String> {
    let digits = strip_hex_prefix(value, "Hex value")?;
    U256::from_str_radix(digits, 16).map_err(|e| format!("Invalid hex value: {e}"))
}

/// Parse a 0x-prefixed hex quantity into a `u64`
pub fn parse_hex_u64(value: &str) -> Result<u64, String> {
    let digits = strip_hex_prefix(value, "Hex value")?;
    u64::from_str_radix(digits, 16).map_err(|e| format!("Invalid u64 hex value: {e}"))
}

/// Parse a 0x-prefixed quantity that must fit in a `u128` (fee fields)
pub fn parse_hex_u128(value: &str) -> Result<u128, String> {
    let wide = parse_hex_u256(value)?;
    u128::try_from(wide).map_err(|_| format!("Value out of range for a fee field: {value}"))
}

/// Parse 0x-prefixed hex data; "0x" alone is empty data
pub fn parse_hex_bytes(value: &str) -> Result<Bytes, String> {
    let digits = strip_hex_prefix(value, "Hex data")?;
    if digits.is_empty() {
        return Ok(Bytes::new());
    }
    let data = hex::decode(digits).map_err(|e| format!("Invalid hex data: {e}"))?;
    Ok(Bytes::from(data))
}

/// Format a `U256` as a 0x-prefixed hex quantity
pub fn format_hex_u256(value: U256) -> String {
    format!("0x{value:x}")
}
