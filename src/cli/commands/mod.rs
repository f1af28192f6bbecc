//! One module per subcommand. Each exposes an `execute` function.

pub mod completions;
pub mod decrypt;
pub mod encrypt;
pub mod generate_password;
pub mod list;
pub mod validate;
