//! CLI interface for Near me

pub mod commands;
mod output;
pub mod prompts;

pub use output::*;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::auth::Role;

#[derive(Parser)]
#[command(name = "nearme")]
#[command(author = "Near me")]
#[command(version)]
#[command(about = "Sign in to Near me, the neighbourhood shop marketplace", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new nearme.toml configuration file
    Init,

    /// Sign in with an email, phone number or shop id
    Login(LoginArgs),

    /// Create a customer or shop owner account
    Signup(SignupArgs),

    /// Sign out and forget the saved session
    Logout,

    /// Show who is signed in
    Whoami {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Args, Debug, Default)]
pub struct LoginArgs {
    /// Email, phone number or shop id (prompted when omitted)
    #[arg(short, long)]
    pub identifier: Option<String>,

    /// Password (prompted when omitted)
    #[arg(short, long, env = "NEARME_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Keep me signed in
    #[arg(long)]
    pub remember_me: bool,
}

#[derive(Args, Debug, Default)]
pub struct SignupArgs {
    /// Full name
    #[arg(long)]
    pub name: Option<String>,

    /// Email address or other contact
    #[arg(long)]
    pub email: Option<String>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Password (prompted when omitted)
    #[arg(long, env = "NEARME_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Account type
    #[arg(long)]
    pub role: Option<RoleArg>,

    /// Shop name (shop owners)
    #[arg(long)]
    pub shop_name: Option<String>,

    /// Shop address (shop owners)
    #[arg(long)]
    pub shop_address: Option<String>,

    /// Shop category, e.g. grocery or bakery (shop owners)
    #[arg(long)]
    pub shop_category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Customer,
    ShopOwner,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Customer => Role::Customer,
            RoleArg::ShopOwner => Role::ShopOwner,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
