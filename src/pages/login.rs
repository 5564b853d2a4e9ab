//! Login Page
//!
//! Login and account registration share one form; `mode` decides which
//! endpoint is called and whether the confirmation field is shown.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api;
use crate::session;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Login,
    Register,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Message {
    Ok(String),
    Err(String),
}

/// Client-side checks run before any request.
fn validate_credentials(email: &str, password: &str, confirm: &str, register: bool) -> Result<(), &'static str> {
    if !email.contains('@') {
        return Err("Correo inválido");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("La contraseña debe tener al menos 6 caracteres");
    }
    if register && password != confirm {
        return Err("Las contraseñas no coinciden");
    }
    Ok(())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let navigate = use_navigate();

    let mode = RwSignal::new(Mode::Login);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let loading = RwSignal::new(false);
    let message = RwSignal::new(None::<Message>);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        message.set(None);
        let current = mode.get_untracked();
        let (e, p) = (email.get_untracked(), password.get_untracked());
        if let Err(msg) = validate_credentials(&e, &p, &confirm.get_untracked(), current == Mode::Register) {
            message.set(Some(Message::Err(msg.to_string())));
            return;
        }
        loading.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match current {
                Mode::Register => match api::register(&e, &p).await {
                    Ok(()) => {
                        log::info!("[AUTH] account created for {}", e);
                        message.set(Some(Message::Ok("Cuenta creada. Inicia sesión.".to_string())));
                        mode.set(Mode::Login);
                        confirm.set(String::new());
                    }
                    Err(err) => message.set(Some(Message::Err(err.to_string()))),
                },
                Mode::Login => match api::login(&e, &p).await {
                    Ok(resp) => {
                        log::info!("[AUTH] logged in as {}", e);
                        session::save_login(&resp);
                        navigate("/home", Default::default());
                    }
                    Err(err) => {
                        log::warn!("[AUTH] login failed: {}", err);
                        message.set(Some(Message::Err(err.to_string())));
                    }
                },
            }
            loading.set(false);
        });
    };

    let switch_mode = move |next: Mode| {
        mode.set(next);
        message.set(None);
    };

    view! {
        <div class="login-page">
            <div class="login-wrapper">
                <div class="brand">"Areatrans"</div>
                <div class="login-card">
                    <h1>{move || if mode.get() == Mode::Login { "Iniciar sesión" } else { "Crear cuenta" }}</h1>
                    <form class="login-form" on:submit=on_submit>
                        <input
                            type="email"
                            placeholder="Correo"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        <input
                            type="password"
                            placeholder="Contraseña"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        <Show when=move || mode.get() == Mode::Register>
                            <input
                                type="password"
                                placeholder="Confirmar contraseña"
                                prop:value=move || confirm.get()
                                on:input=move |ev| confirm.set(event_target_value(&ev))
                            />
                        </Show>
                        <button type="submit" class="btn btn-orange" disabled=move || loading.get()>
                            {move || match (loading.get(), mode.get()) {
                                (true, _) => "Procesando...",
                                (false, Mode::Login) => "Entrar",
                                (false, Mode::Register) => "Crear cuenta",
                            }}
                        </button>
                        {move || {
                            message
                                .get()
                                .map(|m| {
                                    let (class, text) = match m {
                                        Message::Ok(text) => ("msg msg-ok", text),
                                        Message::Err(text) => ("msg msg-err", text),
                                    };
                                    view! { <div class=class>{text}</div> }
                                })
                        }}
                    </form>
                    <div class="login-switch">
                        <Show
                            when=move || mode.get() == Mode::Login
                            fallback=move || {
                                view! {
                                    "¿Ya tienes cuenta? "
                                    <span class="link" on:click=move |_| switch_mode(Mode::Login)>
                                        "Volver al login"
                                    </span>
                                }
                            }
                        >
                            "¿No tienes cuenta? "
                            <span class="link" on:click=move |_| switch_mode(Mode::Register)>
                                "Crear cuenta"
                            </span>
                        </Show>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_credentials() {
        assert_eq!(validate_credentials("ana.es", "secreto", "", false), Err("Correo inválido"));
        assert!(validate_credentials("ana@x.es", "12345", "", false).unwrap_err().contains("6 caracteres"));
        assert_eq!(validate_credentials("ana@x.es", "secreto", "", false), Ok(()));
        assert_eq!(
            validate_credentials("ana@x.es", "secreto", "secret0", true),
            Err("Las contraseñas no coinciden")
        );
        assert_eq!(validate_credentials("ana@x.es", "secreto", "secreto", true), Ok(()));
    }
}
