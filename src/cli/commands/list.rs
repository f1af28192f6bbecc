//! `keyvault list`: stored secrets with their cipher and timestamps.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::cli::{open_manager, Cli};
use crate::crypto::CipherScheme;
use crate::errors::Result;
use crate::vault::SecretMetadata;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let manager = open_manager(cli)?;
    let secrets = manager.list()?;

    if secrets.is_empty() {
        println!("No encrypted keys found.");
        println!(
            "{}",
            style("Run `keyvault encrypt <name> <secret>` to add one.").dim()
        );
        return Ok(());
    }

    println!("{}", secrets_table(&secrets));

    let legacy = secrets
        .iter()
        .filter(|s| s.cipher == CipherScheme::Aes256Cbc)
        .count();
    if legacy > 0 {
        println!(
            "{}",
            style(format!(
                "{legacy} key(s) still use {}; encrypt them again to upgrade.",
                CipherScheme::Aes256Cbc.label()
            ))
            .dim()
        );
    }

    Ok(())
}

fn secrets_table(secrets: &[SecretMetadata]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Cipher", "Created", "Updated"]);

    for s in secrets {
        table.add_row(vec![
            s.name.clone(),
            s.cipher.label().to_string(),
            s.created.format(TIME_FORMAT).to_string(),
            s.updated.format(TIME_FORMAT).to_string(),
        ]);
    }

    table
}
