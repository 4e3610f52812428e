#[cfg(feature = "native")]
use jsonrpsee::types::ErrorObjectOwned;
use sha2::{Digest, Sha256};

use crate::{Context, Spec};

/// Derives a deterministic address from an arbitrary string. Handy for tests and demos.
pub fn generate_address<C: Context>(key: &str) -> <C as Spec>::Address {
    let hash: [u8; 32] = Sha256::digest(key.as_bytes()).into();
    C::Address::from(hash)
}

/// Wraps an error into a JSON-RPC error object, keeping its text in the `data` field.
#[cfg(feature = "native")]
pub fn to_jsonrpsee_error_object(err: impl ToString, message: &str) -> ErrorObjectOwned {
    ErrorObjectOwned::owned(
        jsonrpsee::types::error::UNKNOWN_ERROR_CODE,
        message,
        Some(err.to_string()),
    )
}
