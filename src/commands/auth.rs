use clap::ArgMatches;
use colored::*;

use crate::config::{config_path, load_config, save_config, StoredCredentials};

pub async fn handle_auth(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    if let (Some(username), Some(app_password)) = (
        matches.get_one::<String>("username"),
        matches.get_one::<String>("app-password"),
    ) {
        let mut config = load_config();
        config.auth_credentials = Some(StoredCredentials {
            bb_username: username.clone(),
            bb_app_password: app_password.clone(),
        });
        save_config(&config)?;

        println!("✅ Credentials saved for {}", username.bright_green());
        if let Some(path) = config_path() {
            println!("{}", format!("Stored in {}", path.display()).dimmed());
        }
    } else if matches.get_flag("show") {
        match load_config().auth_credentials {
            Some(creds) if !creds.bb_username.is_empty() => {
                println!("Username: {}", creds.bb_username);
                println!(
                    "App password: {}",
                    if creds.bb_app_password.is_empty() { "not set" } else { "********" }
                );
            }
            _ => println!("No credentials configured"),
        }
    } else {
        println!("Usage: bbissues auth --username <USER> --app-password <PASSWORD> or bbissues auth --show");
    }
    Ok(())
}
