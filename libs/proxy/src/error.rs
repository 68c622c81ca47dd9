use thiserror::Error;

/// Everything a forwarded call can fail with
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Caller-supplied arguments have the wrong arity or type
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// The refiner endpoint is missing or refused the dial
    #[error("socket connection to refiner is not available. Trying to reconnect. Please try again")]
    EndpointUnavailable,

    /// Read or write on an established connection failed
    #[error("transport error: {0}")]
    Transport(refiner_fabric::Error),

    /// The refiner rejected a trace request
    #[error("{0}")]
    Rpc(String),

    /// The refiner's execution engine rejected a gas estimation
    #[error("engine error: {0}")]
    Engine(String),

    #[error("unexpected response: {0}")]
    UnexpectedResponseShape(String),

    /// Response carried neither a result nor a readable error
    #[error("internal rpc error")]
    InternalProtocol,

    #[error("malformed number: {0}")]
    MalformedNumber(String),

    #[error("encoding error: {0}")]
    Encoding(String),
}

impl From<refiner_fabric::Error> for ProxyError {
    fn from(err: refiner_fabric::Error) -> Self {
        match err {
            refiner_fabric::Error::Encoding(msg) => Self::Encoding(msg),
            other => Self::Transport(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fabric_errors_split_into_encoding_and_transport() {
        let encoding: ProxyError = refiner_fabric::Error::Encoding("bad".into()).into();
        assert!(matches!(encoding, ProxyError::Encoding(msg) if msg == "bad"));

        let closed: ProxyError = refiner_fabric::Error::ConnectionClosed.into();
        assert!(matches!(
            closed,
            ProxyError::Transport(refiner_fabric::Error::ConnectionClosed)
        ));
    }

    #[test]
    fn display() {
        assert_eq!(
            ProxyError::Engine("out of gas".into()).to_string(),
            "engine error: out of gas"
        );
        assert_eq!(ProxyError::InternalProtocol.to_string(), "internal rpc error");
        assert!(ProxyError::EndpointUnavailable
            .to_string()
            .contains("Please try again"));
        assert_eq!(
            ProxyError::Rpc("transaction not found".into()).to_string(),
            "transaction not found"
        );
    }
}
