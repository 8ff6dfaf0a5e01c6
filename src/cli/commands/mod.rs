//! One module per subcommand, each exposing `execute`.

pub mod add;
pub mod change_password;
pub mod delete;
pub mod edit;
pub mod generate_key;
pub mod list;
pub mod login;
pub mod register;
pub mod show;
pub mod sync;
