//! Interactive prompts for values not given on the command line

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Password, Select};

use super::{LoginArgs, SignupArgs};
use crate::auth::{LoginCredentials, Role, ShopData, SignupData};

fn text(theme: &ColorfulTheme, value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::with_theme(theme)
            .with_prompt(prompt)
            .interact_text()?),
    }
}

fn optional_text(
    theme: &ColorfulTheme,
    value: Option<String>,
    prompt: &str,
) -> Result<Option<String>> {
    if value.is_some() {
        return Ok(value);
    }
    let answer: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(Some(answer).filter(|a| !a.trim().is_empty()))
}

fn password(theme: &ColorfulTheme, value: Option<String>, confirm: bool) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    let mut prompt = Password::with_theme(theme).with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    Ok(prompt.interact()?)
}

/// Collect login credentials, prompting for anything missing
pub fn login_credentials(args: LoginArgs) -> Result<LoginCredentials> {
    let theme = ColorfulTheme::default();
    let identifier = text(&theme, args.identifier, "Email, phone or shop id")?;
    let secret = password(&theme, args.password, false)?;

    Ok(LoginCredentials::new(identifier, secret).remember_me(args.remember_me))
}

/// Collect a signup form, prompting for anything missing
pub fn signup_data(args: SignupArgs) -> Result<SignupData> {
    let theme = ColorfulTheme::default();

    let role = match args.role {
        Some(role) => role.into(),
        None => {
            let options = [
                "Customer (order from nearby shops)",
                "Shop owner (sell to neighbours)",
            ];
            let idx = Select::with_theme(&theme)
                .with_prompt("I am a")
                .items(&options)
                .default(0)
                .interact()?;
            if idx == 0 {
                Role::Customer
            } else {
                Role::ShopOwner
            }
        }
    };

    let display_name = text(&theme, args.name, "Full name")?;
    let email_or_contact = text(&theme, args.email, "Email")?;
    let phone = text(&theme, args.phone, "Phone")?;
    let secret = password(&theme, args.password, true)?;

    let shop_data = match role {
        Role::Customer => None,
        Role::ShopOwner => Some(ShopData {
            shop_name: text(&theme, args.shop_name, "Shop name")?,
            address: optional_text(&theme, args.shop_address, "Shop address (optional)")?,
            category: optional_text(&theme, args.shop_category, "Shop category (optional)")?,
        }),
    };

    Ok(SignupData {
        display_name,
        email_or_contact,
        phone,
        secret,
        role,
        shop_data,
    })
}
