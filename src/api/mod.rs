//! REST API Wrappers
//!
//! Frontend bindings to the Areatrans backend, organized by section. Every
//! hub-scoped call goes to `/api/hubs/{hub}/...` with the bearer token from
//! the session.

mod attendance;
mod auth;
mod contacts;
mod delivery;
mod fleet;
mod kilos_litros;
mod purchases;
mod settlements;

use gloo_net::http::{Request, RequestBuilder, Response};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config;
use crate::error::{ApiError, ApiResult};
use crate::session;

// Re-export all public items
pub use attendance::*;
pub use auth::*;
pub use contacts::*;
pub use delivery::*;
pub use fleet::*;
pub use kilos_litros::*;
pub use purchases::*;
pub use settlements::*;

/// Same set `encodeURIComponent` leaves alone.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

// ========================
// URL building
// ========================

pub(crate) fn encode(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// `/api/hubs/{hub}{rest}`, without the configured base.
pub(crate) fn hub_path(hub: &str, rest: &str) -> String {
    format!("/api/hubs/{}{}", encode(hub), rest)
}

pub(crate) fn hub_url(hub: &str, rest: &str) -> String {
    config::api_url(&hub_path(hub, rest))
}

pub(crate) fn query(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

// ========================
// Requests
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Get,
    Post,
    Put,
    Delete,
}

fn builder(method: Method, url: &str, with_token: bool) -> RequestBuilder {
    let b = match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Delete => Request::delete(url),
    };
    match session::token().filter(|_| with_token) {
        Some(token) => b.header("Authorization", &format!("Bearer {}", token)),
        None => b,
    }
}

/// Authenticated request without a body.
pub(crate) async fn call(method: Method, url: &str, fallback: &str) -> ApiResult<Value> {
    log::debug!("[API] {:?} {}", method, url);
    let sent = builder(method, url, true).send().await;
    finish(sent, fallback).await
}

/// Authenticated request with a JSON body.
pub(crate) async fn call_json<B: Serialize>(
    method: Method,
    url: &str,
    body: &B,
    fallback: &str,
) -> ApiResult<Value> {
    send_json(method, url, body, fallback, true).await
}

pub(crate) async fn send_json<B: Serialize>(
    method: Method,
    url: &str,
    body: &B,
    fallback: &str,
    with_token: bool,
) -> ApiResult<Value> {
    log::debug!("[API] {:?} {}", method, url);
    let request = builder(method, url, with_token)
        .json(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    finish(request.send().await, fallback).await
}

async fn finish(
    sent: Result<Response, gloo_net::Error>,
    fallback: &str,
) -> ApiResult<Value> {
    let resp = sent.map_err(|e| {
        log::error!("[API] network error: {}", e);
        ApiError::Network
    })?;
    let ok = resp.ok();
    let status = resp.status();
    let text = resp.text().await.map_err(|e| {
        log::error!("[API] could not read body: {}", e);
        ApiError::Network
    })?;
    let parsed = parse_body(ok, status, &text, fallback);
    if let Err(e) = &parsed {
        log::warn!("[API] {} {}", status, e);
    }
    parsed
}

// ========================
// Response handling
// ========================

fn is_html(text: &str) -> bool {
    let t = text.trim_start().to_lowercase();
    t.starts_with("<!doctype") || t.starts_with("<html")
}

/// Empty bodies read as `{}`. Error bodies surface their `error` field.
fn parse_body(ok: bool, status: u16, text: &str, fallback: &str) -> ApiResult<Value> {
    if is_html(text) {
        return Err(ApiError::NotJson);
    }
    let json: Value = if text.trim().is_empty() {
        Value::Object(Default::default())
    } else {
        match serde_json::from_str(text) {
            Ok(v) => v,
            Err(e) if ok => return Err(e.into()),
            Err(_) => Value::Null,
        }
    };
    if ok {
        return Ok(json);
    }
    match json.get("error").and_then(Value::as_str) {
        Some(msg) if !msg.is_empty() => Err(ApiError::server(msg)),
        _ if status == 401 => Err(ApiError::Unauthenticated),
        _ => Err(ApiError::server(fallback)),
    }
}

/// Records come back wrapped (`{"item": ...}`, `{"vehicle": ...}`) or bare.
pub(crate) fn unwrap_record<T: DeserializeOwned>(json: Value, keys: &[&str]) -> ApiResult<T> {
    let inner = keys
        .iter()
        .find_map(|k| json.get(*k).filter(|v| !v.is_null()).cloned())
        .unwrap_or(json);
    Ok(serde_json::from_value(inner)?)
}

/// List under `key`; missing or `null` is an empty list.
pub(crate) fn list_field<T: DeserializeOwned>(json: &Value, key: &str) -> ApiResult<Vec<T>> {
    match json.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(v) => Ok(serde_json::from_value(v.clone())?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Vehicle;

    #[test]
    fn test_encode_like_uri_component() {
        assert_eq!(encode("Madrid Puerta Toledo"), "Madrid%20Puerta%20Toledo");
        assert_eq!(encode("Hub Cádiz"), "Hub%20C%C3%A1diz");
        assert_eq!(encode("a/b?c"), "a%2Fb%3Fc");
        assert_eq!(encode("x-y_z.(1)"), "x-y_z.(1)");
    }

    #[test]
    fn test_hub_path_and_query() {
        assert_eq!(hub_path("Hub Cadiz", "/flota/3"), "/api/hubs/Hub%20Cadiz/flota/3");
        assert_eq!(
            query(&[("year", "2024".into()), ("route_code", "R 1".into())]),
            "year=2024&route_code=R%201"
        );
    }

    #[test]
    fn test_parse_body_ok_and_empty() {
        assert_eq!(parse_body(true, 200, "", "x").unwrap(), serde_json::json!({}));
        assert_eq!(parse_body(true, 200, r#"{"a":1}"#, "x").unwrap()["a"], 1);
        assert!(matches!(parse_body(true, 200, "{nope", "x"), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_parse_body_errors() {
        assert_eq!(
            parse_body(false, 409, r#"{"error":"Esa ruta ya existe en este HUB"}"#, "No pude crear la ruta"),
            Err(ApiError::server("Esa ruta ya existe en este HUB"))
        );
        assert_eq!(
            parse_body(false, 500, "Internal Server Error", "Error cargando flota"),
            Err(ApiError::server("Error cargando flota"))
        );
        assert_eq!(parse_body(false, 401, "", "x"), Err(ApiError::Unauthenticated));
        assert_eq!(parse_body(true, 200, "<!DOCTYPE html><html>", "x"), Err(ApiError::NotJson));
    }

    #[test]
    fn test_unwrap_record_variants() {
        let wrapped = serde_json::json!({"vehicle": {"id": 1, "matricula": "A", "tipo": "Moto"}});
        let v: Vehicle = unwrap_record(wrapped, &["vehicle", "vehiculo"]).unwrap();
        assert_eq!(v.id, 1);
        let spanish = serde_json::json!({"vehiculo": {"id": 2, "matricula": "B"}});
        let v: Vehicle = unwrap_record(spanish, &["vehicle", "vehiculo"]).unwrap();
        assert_eq!(v.matricula, "B");
        let bare = serde_json::json!({"id": 3, "matricula": "C"});
        let v: Vehicle = unwrap_record(bare, &["vehicle", "vehiculo"]).unwrap();
        assert_eq!(v.id, 3);
    }

    #[test]
    fn test_list_field() {
        let json = serde_json::json!({"vehicles": null});
        assert!(list_field::<Vehicle>(&json, "vehicles").unwrap().is_empty());
        assert!(list_field::<Vehicle>(&json, "items").unwrap().is_empty());
    }
}
