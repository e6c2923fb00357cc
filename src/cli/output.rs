//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::auth::{Principal, Role};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Format a role as a colored label
pub fn format_role(role: Role) -> String {
    match role {
        Role::Customer => "customer".cyan().to_string(),
        Role::ShopOwner => "shop owner".magenta().to_string(),
    }
}

/// Spinner shown while a backend call is in flight
pub fn loading_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print the signed-in principal as a table
pub fn print_principal_table(principal: &Principal) {
    let role_color = match principal.role() {
        Role::Customer => Color::Cyan,
        Role::ShopOwner => Color::Magenta,
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").fg(Color::Green),
            Cell::new("Contact").fg(Color::Green),
            Cell::new("Role").fg(Color::Green),
            Cell::new("Shop").fg(Color::Green),
            Cell::new("ID").fg(Color::Green),
        ]);

    let shop = match (principal.shop_name(), principal.shop_id()) {
        (Some(name), Some(id)) => format!("{} ({})", name, id),
        _ => "-".to_string(),
    };

    table.add_row(vec![
        Cell::new(&principal.display_name),
        Cell::new(&principal.email_or_contact),
        Cell::new(principal.role().to_string()).fg(role_color),
        Cell::new(shop),
        Cell::new(&principal.id),
    ]);

    println!("{table}");
}

/// Print a short greeting after sign in
pub fn print_welcome(principal: &Principal) {
    println!();
    println!(
        "  {} {} ({})",
        "Welcome,".bold(),
        principal.display_name.bold(),
        format_role(principal.role())
    );
    if let Some(shop_name) = principal.shop_name() {
        println!("  {} {}", "Managing:".bold(), shop_name.green());
    }
    println!();
}
