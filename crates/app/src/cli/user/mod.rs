use clap::{Args, Subcommand};

mod create;
mod promote;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    /// Create an account
    Create(create::CreateUserArgs),

    /// Give an existing account the admin role
    Promote(promote::PromoteUserArgs),
}

pub(crate) async fn run(command: UserCommand) -> Result<(), String> {
    match command.command {
        UserSubcommand::Create(args) => create::run(args).await,
        UserSubcommand::Promote(args) => promote::run(args).await,
    }
}
