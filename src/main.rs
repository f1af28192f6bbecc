use clap::Parser;
use keyvault::cli::{commands, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    // Usage errors exit with 1 like every other failure; --help and
    // --version still exit with 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    // Diagnostics go to stderr so they never mix with printed secrets.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("keyvault=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Encrypt {
            ref name,
            ref secret,
            ref password,
        } => commands::encrypt::execute(&cli, name, secret, password.as_deref()),
        Commands::Decrypt {
            ref name,
            ref password,
        } => commands::decrypt::execute(&cli, name, password),
        Commands::GeneratePassword { length } => commands::generate_password::execute(length),
        Commands::List => commands::list::execute(&cli),
        Commands::Validate { ref name } => commands::validate::execute(&cli, name),
        Commands::Completions { shell } => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        keyvault::cli::output::failure(&e);
        std::process::exit(1);
    }
}
