//! Request-body decoding shared by all POST handlers.
//!
//! Bodies are parsed from raw bytes rather than through `axum::Json`, so a
//! missing or non-JSON `Content-Type` is not a rejection on its own. Clients
//! in the wild post JSON without setting the header.

use crate::AppError;
use serde::de::DeserializeOwned;

/// Decode a JSON request body, mapping failures to a validation error.
pub(super) fn decode_json<T: DeserializeOwned>(
    body: &[u8],
    what: &'static str,
) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|err| {
        tracing::warn!("Could not parse {} request: {}", what, err);
        AppError::BadRequest(format!("Malformed {} request: {}", what, err))
    })
}

#[cfg(test)]
mod tests {
    use super::decode_json;
    use crate::AppError;

    #[test]
    fn decodes_json_string_bodies() {
        let name: String = decode_json(br#""alice""#, "register").expect("json string");
        assert_eq!(name, "alice");
    }

    #[test]
    fn malformed_bodies_become_bad_requests() {
        let bodies: [&[u8]; 4] = [b"", b"alice", b"{\"name\":", b"42"];
        for body in bodies {
            let result = decode_json::<String>(body, "register");
            match result {
                Err(AppError::BadRequest(message)) => {
                    assert!(message.starts_with("Malformed register request"))
                }
                other => panic!("body {:?} should be rejected, got {:?}", body, other),
            }
        }
    }
}
