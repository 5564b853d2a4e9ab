//! Error types
//!
//! Every failure ends up as a Spanish message rendered inline by the section
//! that triggered it, so `Display` is the user-facing text.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never reached the server.
    #[error("No se pudo conectar con el servidor")]
    Network,
    /// The server answered with an HTML page (proxy misconfigured, dev server fallback...).
    #[error("Backend no respondió JSON. Revisa proxy /api o backend.")]
    NotJson,
    /// Non-2xx status; carries `error` from the body or a per-call fallback.
    #[error("{0}")]
    Server(String),
    /// The body was JSON but not the shape we expected.
    #[error("Respuesta inválida del servidor: {0}")]
    Decode(String),
    #[error("Sesión expirada. Vuelve a iniciar sesión.")]
    Unauthenticated,
}

impl ApiError {
    pub fn server(msg: impl Into<String>) -> Self {
        Self::Server(msg.into())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(ApiError::Network.to_string(), "No se pudo conectar con el servidor");
        assert_eq!(ApiError::server("Ruta ya existe").to_string(), "Ruta ya existe");
        assert!(ApiError::NotJson.to_string().contains("/api"));
    }

    #[test]
    fn test_decode_from_serde() {
        let err: ApiError = serde_json::from_str::<u32>("\"x\"").unwrap_err().into();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
