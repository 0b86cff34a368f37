use gloo_utils::format::JsValueSerdeExt;
use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::window;

/// EIP-1193 error code for a request the user declined in the wallet
const USER_REJECTED_CODE: i64 = 4001;

#[derive(Debug, Clone, PartialEq)]
pub enum WalletError {
    NotInstalled,
    Rejected(String),
    Rpc { code: i64, message: String },
    JavaScriptError(String),
}

impl std::fmt::Display for WalletError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalletError::NotInstalled => write!(f, "MetaMask is not installed!"),
            WalletError::Rejected(msg) => write!(f, "Request rejected: {}", msg),
            WalletError::Rpc { code, message } => write!(f, "Wallet error {}: {}", code, message),
            WalletError::JavaScriptError(msg) => write!(f, "JavaScript error: {}", msg),
        }
    }
}

impl WalletError {
    /// Build an error from the `{ code, message }` object a provider rejects with
    fn from_js(value: &JsValue) -> Self {
        let message = js_sys::Reflect::get(value, &JsValue::from_str("message"))
            .ok()
            .and_then(|m| m.as_string())
            .unwrap_or_else(|| format!("{:?}", value));
        let code = js_sys::Reflect::get(value, &JsValue::from_str("code"))
            .ok()
            .and_then(|c| c.as_f64())
            .map(|c| c as i64);

        match code {
            Some(USER_REJECTED_CODE) => WalletError::Rejected(message),
            Some(code) => WalletError::Rpc { code, message },
            None => WalletError::JavaScriptError(message),
        }
    }
}

/// Browser wallet injected as `window.ethereum` (MetaMask and compatible wallets)
///
/// Every call goes through the EIP-1193 `request({ method, params })` entry
/// point and resolves to the JSON-RPC result.
#[derive(Clone)]
pub struct EthereumProvider {
    provider: JsValue,
}

impl EthereumProvider {
    fn lookup() -> Option<JsValue> {
        let win = window()?;
        let provider = js_sys::Reflect::get(&win, &JsValue::from_str("ethereum")).ok()?;
        if provider.is_null() || provider.is_undefined() {
            None
        } else {
            Some(provider)
        }
    }

    /// Check if a wallet extension injected `window.ethereum`
    pub fn is_installed() -> bool {
        Self::lookup().is_some()
    }

    pub fn detect() -> Result<Self, WalletError> {
        Self::lookup()
            .map(|provider| Self { provider })
            .ok_or(WalletError::NotInstalled)
    }

    /// Send a JSON-RPC request through the wallet and wait for the result
    pub async fn request(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, WalletError> {
        let args = JsValue::from_serde(&serde_json::json!({
            "method": method,
            "params": params,
        }))
        .map_err(|e| WalletError::JavaScriptError(format!("Failed to build request: {}", e)))?;

        let request_func = js_sys::Reflect::get(&self.provider, &JsValue::from_str("request"))
            .map_err(|e| WalletError::JavaScriptError(format!("Failed to get request function: {:?}", e)))?;

        if !request_func.is_function() {
            return Err(WalletError::JavaScriptError("request is not a function".to_string()));
        }

        log::debug!("Wallet request: {}", method);

        let func = js_sys::Function::from(request_func);
        let promise = func
            .call1(&self.provider, &args)
            .map_err(|e| WalletError::from_js(&e))?;

        let result = JsFuture::from(Promise::from(promise))
            .await
            .map_err(|e| {
                let err = WalletError::from_js(&e);
                log::warn!("Wallet request {} failed: {}", method, err);
                err
            })?;

        if result.is_undefined() || result.is_null() {
            return Ok(serde_json::Value::Null);
        }

        result
            .into_serde()
            .map_err(|e| WalletError::JavaScriptError(format!("Failed to read {} result: {}", method, e)))
    }
}
