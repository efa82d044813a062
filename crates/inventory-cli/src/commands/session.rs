//! Session commands: login, logout, whoami, landing, signup.

use clap::Args;
use dialoguer::{Input, Password};

use inventory_auth::{AccessGate, TokenInspector, TokenStatus};
use inventory_core::config::AppConfig;
use inventory_core::error::AppError;
use inventory_entity::auth::SignupRequest;

use crate::output::{self, OutputFormat};

/// Arguments for the login command
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username (prompted when omitted)
    pub username: Option<String>,
}

/// Arguments for the whoami command
#[derive(Debug, Args)]
pub struct WhoamiArgs {
    /// Re-validate the session with the API gateway first
    #[arg(long)]
    pub verify: bool,
}

/// Arguments for the signup command
#[derive(Debug, Args)]
pub struct SignupArgs {
    /// Desired username
    pub username: String,
    /// Email address
    #[arg(long)]
    pub email: String,
    /// Full name
    #[arg(long)]
    pub full_name: String,
    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub date_of_birth: Option<String>,
}

/// Execute the login command
pub async fn login(args: &LoginArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let store = super::session_store(config)?;

    let username = match &args.username {
        Some(username) => username.clone(),
        None => Input::<String>::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(prompt_error)?,
    };
    let password = Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(prompt_error)?;

    let session = store.login(&username, &password).await?;

    match format {
        OutputFormat::Json => output::print_json(&session.user),
        OutputFormat::Table => {
            output::print_success(&format!("Signed in as {}", session.user.username));
            output::print_kv("Role", &session.user.role);
            output::print_kv("Landing", session.landing().path());
        }
    }
    Ok(())
}

/// Execute the logout command
pub async fn logout(config: &AppConfig) -> Result<(), AppError> {
    let store = super::session_store(config)?;
    store.logout().await?;
    output::print_success("Signed out");
    Ok(())
}

/// Execute the whoami command
pub async fn whoami(args: &WhoamiArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let store = super::session_store(config)?;

    let session = if args.verify {
        store.verify().await?
    } else {
        store.get_session().await?
    };

    let Some(session) = session else {
        output::print_warning("Not signed in");
        return Ok(());
    };

    if format == OutputFormat::Json {
        output::print_json(&session.user);
        return Ok(());
    }

    let token = match TokenInspector::inspect(&session.token) {
        TokenStatus::Valid { expires_at: Some(exp), .. } => format!("valid until {exp}"),
        TokenStatus::Valid { .. } => "valid".to_string(),
        TokenStatus::Expired => "expired".to_string(),
        TokenStatus::Malformed => "opaque".to_string(),
    };

    output::print_kv("Username", &session.user.username);
    output::print_kv("Name", &session.user.full_name);
    output::print_kv("Role", &session.user.role);
    output::print_kv("Landing", session.landing().path());
    output::print_kv("Token", &token);
    output::print_kv(
        "Supplier access",
        if session.user.can_access_supplier_service() { "yes" } else { "no" },
    );
    Ok(())
}

/// Execute the landing command
pub async fn landing(config: &AppConfig) -> Result<(), AppError> {
    let store = super::session_store(config)?;
    let session = store.get_session().await?;

    let mut gate = AccessGate::new();
    if let Some(route) = gate.observe(session.as_ref()) {
        println!("{}", route.path());
    }
    Ok(())
}

/// Execute the signup command
pub async fn signup(args: &SignupArgs, config: &AppConfig) -> Result<(), AppError> {
    let store = super::session_store(config)?;

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(prompt_error)?;

    let request = SignupRequest {
        username: args.username.clone(),
        password,
        email: args.email.clone(),
        full_name: args.full_name.clone(),
        phone_number: args.phone.clone(),
        date_of_birth: args.date_of_birth.clone(),
    };

    let message = store.signup(&request).await?;
    output::print_success(if message.trim().is_empty() {
        "Account created"
    } else {
        message.trim()
    });
    Ok(())
}

fn prompt_error(err: dialoguer::Error) -> AppError {
    AppError::validation(format!("Prompt failed: {err}"))
}
