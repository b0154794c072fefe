use clap::Args;
use emporium_app::{
    database::{self, Db},
    domain::users::{
        PgUsersService, UsersService,
        models::{NewUser, Role, UserUuid},
        password::Password,
    },
};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Sign-in email address
    #[arg(long)]
    email: String,

    /// Initial password
    #[arg(long, env = "EMPORIUM_USER_PASSWORD", hide_env_values = true)]
    password: String,

    /// Grant the admin role
    #[arg(long)]
    admin: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgUsersService::new(Db::new(pool));

    let user = service
        .sign_up(NewUser {
            uuid: UserUuid::new(),
            name: args.name,
            email: args.email,
            password: Password::new(args.password),
            role: if args.admin { Role::Admin } else { Role::User },
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_email: {}", user.email);
    println!("user_role: {}", user.role);

    Ok(())
}
