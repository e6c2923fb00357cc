//! CLI command implementations

use anyhow::Result;
use std::fs;

use crate::auth::SessionManager;
use crate::cli::{
    error, info, loading_spinner, print_principal_table, print_welcome, prompts, success, warn,
    LoginArgs, OutputFormat, SignupArgs,
};
use crate::config::{self, loader::CONFIG_FILENAME};

/// Initialize a new nearme.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new(CONFIG_FILENAME);

    if config_path.exists() {
        warn(&format!("{} already exists", CONFIG_FILENAME));
        return Ok(());
    }

    let content = config::loader::default_config_content();
    fs::write(config_path, content)?;

    success(&format!("Created {}", CONFIG_FILENAME));
    info("Run 'nearme login' or 'nearme signup' to get started");

    Ok(())
}

/// Sign in
pub async fn login(args: LoginArgs) -> Result<()> {
    let session = open_session()?;

    if let Some(current) = session.current_principal() {
        info(&format!(
            "Signed in as {}, this login will replace that session",
            current.display_name
        ));
    }

    let credentials = prompts::login_credentials(args)?;

    let spinner = loading_spinner("Signing in...");
    let result = session.login(credentials).await;
    spinner.finish_and_clear();

    match result {
        Ok(principal) => {
            success("Signed in");
            print_welcome(&principal);
            Ok(())
        }
        Err(e) => {
            error(&e.to_string());
            Err(e.into())
        }
    }
}

/// Create an account
pub async fn signup(args: SignupArgs) -> Result<()> {
    let session = open_session()?;
    let data = prompts::signup_data(args)?;

    let spinner = loading_spinner("Creating your account...");
    let result = session.signup(data).await;
    spinner.finish_and_clear();

    match result {
        Ok(principal) => {
            success("Account created");
            print_welcome(&principal);
            if let Some(shop_id) = principal.shop_id() {
                info(&format!("Your shop id is {}. You can sign in with it.", shop_id));
            }
            Ok(())
        }
        Err(e) => {
            error(&e.to_string());
            Err(e.into())
        }
    }
}

/// Sign out
pub async fn logout() -> Result<()> {
    let session = open_session()?;
    let was_signed_in = session.is_authenticated();

    session.logout();

    if was_signed_in {
        success("Signed out");
    } else {
        info("Not signed in");
    }
    Ok(())
}

/// Show the signed-in principal
pub async fn whoami(format: OutputFormat) -> Result<()> {
    let session = open_session()?;

    let Some(principal) = session.current_principal() else {
        match format {
            OutputFormat::Table => info("Not signed in. Run 'nearme login' to sign in."),
            OutputFormat::Json | OutputFormat::Yaml => println!("null"),
        }
        return Ok(());
    };

    match format {
        OutputFormat::Table => print_principal_table(&principal),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&principal)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&principal)?),
    }

    Ok(())
}

/// Load config and restore the session from the configured store
fn open_session() -> Result<SessionManager> {
    let config = config::load_config_or_default()?;
    Ok(SessionManager::from_config(&config))
}
