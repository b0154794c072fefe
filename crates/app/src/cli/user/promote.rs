use clap::Args;
use emporium_app::{
    database::{self, Db},
    domain::users::{
        PgUsersService, UsersService,
        models::{Role, UserUpdate},
    },
};

#[derive(Debug, Args)]
pub(crate) struct PromoteUserArgs {
    /// Email address of the account to promote
    email: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: PromoteUserArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgUsersService::new(Db::new(pool));

    let user = service
        .get_user_by_email(&args.email)
        .await
        .map_err(|error| format!("failed to find user: {error}"))?;

    if user.is_admin() {
        println!("{} is already an admin", user.email);

        return Ok(());
    }

    let user = service
        .update_user(
            user.uuid,
            UserUpdate {
                name: user.name,
                role: Role::Admin,
            },
        )
        .await
        .map_err(|error| format!("failed to promote user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_role: {}", user.role);

    Ok(())
}
