use thiserror::Error;

/// Submission-boundary errors. All are fatal; nothing here retries.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("node returned error {code}: {message}")]
    Node { code: i64, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("object not found: {0}")]
    ObjectNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_node_error() {
        let err = RpcError::Node {
            code: -32602,
            message: "invalid params".into(),
        };
        assert_eq!(
            err.to_string(),
            "node returned error -32602: invalid params"
        );
    }

    #[test]
    fn display_object_not_found() {
        let err = RpcError::ObjectNotFound("0x6".into());
        assert_eq!(err.to_string(), "object not found: 0x6");
    }
}
