//! Auth Commands

use serde::Serialize;

use super::{send_json, Method};
use crate::config;
use crate::error::ApiResult;
use crate::models::LoginResponse;

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct CredentialsArgs<'a> {
    email: &'a str,
    password: &'a str,
}

// ========================
// Commands
// ========================

pub async fn login(email: &str, password: &str) -> ApiResult<LoginResponse> {
    let json = send_json(
        Method::Post,
        &config::api_url("/api/login"),
        &CredentialsArgs { email, password },
        "Error del servidor",
        false,
    )
    .await?;
    Ok(serde_json::from_value(json)?)
}

pub async fn register(email: &str, password: &str) -> ApiResult<()> {
    send_json(
        Method::Post,
        &config::api_url("/api/register"),
        &CredentialsArgs { email, password },
        "Error del servidor",
        false,
    )
    .await?;
    Ok(())
}
