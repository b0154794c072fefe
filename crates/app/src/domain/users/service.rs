//! Users service.

use async_trait::async_trait;
use emporium::{
    catalog::{Page, Paginated},
    checkout::{PaymentMethod, ShippingAddress},
};
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::{Db, amount_to_i64},
    domain::users::{
        errors::UsersServiceError,
        models::{
            DEFAULT_SESSION_TTL, MIN_NAME_LEN, MIN_PASSWORD_LEN, NewUser, Session, SessionUuid,
            User, UserUpdate, UserUuid,
        },
        password::Password,
        repository::PgUsersRepository,
        token::{
            format_session_token, generate_session_secret, hash_session_token,
            parse_session_token,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    session_ttl: SignedDuration,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self::with_session_ttl(db, DEFAULT_SESSION_TTL)
    }

    #[must_use]
    pub fn with_session_ttl(db: Db, session_ttl: SignedDuration) -> Self {
        Self {
            db,
            session_ttl,
            repository: PgUsersRepository::new(),
        }
    }
}

/// Trim and lowercase an email address, rejecting obviously malformed ones.
pub(crate) fn normalise_email(email: &str) -> Result<String, UsersServiceError> {
    let email = email.trim().to_lowercase();

    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(email)
        }
        _ => Err(UsersServiceError::InvalidEmail),
    }
}

fn validate_name(name: &str) -> Result<&str, UsersServiceError> {
    let name = name.trim();

    if name.chars().count() < MIN_NAME_LEN {
        return Err(UsersServiceError::NameTooShort);
    }

    Ok(name)
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn sign_up(&self, user: NewUser) -> Result<User, UsersServiceError> {
        let name = validate_name(&user.name)?;
        let email = normalise_email(&user.email)?;

        if user.password.len() < MIN_PASSWORD_LEN {
            return Err(UsersServiceError::PasswordTooShort);
        }

        let password_hash = user.password.hash()?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_user(&mut tx, user.uuid, name, &email, &password_hash, user.role)
            .await?;

        tx.commit().await?;

        info!(user = %created.uuid, role = %created.role, "signed up user");

        Ok(created)
    }

    async fn sign_in(
        &self,
        email: &str,
        password: Password,
    ) -> Result<Session, UsersServiceError> {
        let email = normalise_email(email).map_err(|_| UsersServiceError::InvalidCredentials)?;

        let mut tx = self.db.begin().await?;

        let Some((user_uuid, password_hash)) =
            self.repository.get_password_hash(&mut tx, &email).await?
        else {
            return Err(UsersServiceError::InvalidCredentials);
        };

        if !password.verify(&password_hash) {
            warn!(user = %user_uuid, "rejected sign in");

            return Err(UsersServiceError::InvalidCredentials);
        }

        let user = self.repository.get_user(&mut tx, user_uuid).await?;

        let session = SessionUuid::new();
        let secret = generate_session_secret();
        let token = format_session_token(session.into_uuid(), &secret);
        let expires_at = Timestamp::now()
            .checked_add(self.session_ttl)
            .map_err(|_| UsersServiceError::InvalidData)?;

        self.repository
            .create_session(
                &mut tx,
                session,
                user.uuid,
                &hash_session_token(&token),
                expires_at,
            )
            .await?;

        tx.commit().await?;

        info!(user = %user.uuid, %session, "signed in user");

        Ok(Session {
            uuid: session,
            token,
            user,
            expires_at,
        })
    }

    async fn sign_out(&self, token: &str) -> Result<(), UsersServiceError> {
        let parsed = parse_session_token(token).map_err(|_| UsersServiceError::InvalidToken)?;
        let session = SessionUuid::from_uuid(parsed.session_uuid);

        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .revoke_session(&mut tx, session, &hash_session_token(token))
            .await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::InvalidToken);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn authenticate(&self, token: &str) -> Result<User, UsersServiceError> {
        let parsed = parse_session_token(token).map_err(|_| UsersServiceError::InvalidToken)?;

        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .find_session_user(
                &mut tx,
                SessionUuid::from_uuid(parsed.session_uuid),
                &hash_session_token(token),
            )
            .await?
            .ok_or(UsersServiceError::InvalidToken)?;

        tx.commit().await?;

        Ok(user)
    }

    async fn get_user(&self, user: UserUuid) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, UsersServiceError> {
        let email = normalise_email(email)?;

        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user_by_email(&mut tx, &email).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn update_profile(&self, user: UserUuid, name: &str) -> Result<User, UsersServiceError> {
        let name = validate_name(name)?;

        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_user_name(&mut tx, user, name).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn update_address(
        &self,
        user: UserUuid,
        address: ShippingAddress,
    ) -> Result<User, UsersServiceError> {
        let address = address.validate()?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_user_address(&mut tx, user, &address)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn update_payment_method(
        &self,
        user: UserUuid,
        payment_method: PaymentMethod,
    ) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_user_payment_method(&mut tx, user, payment_method)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn list_users(&self, page: Page) -> Result<Paginated<User>, UsersServiceError> {
        let limit = amount_to_i64(page.limit(), "limit")?;
        let offset = amount_to_i64(page.offset(), "offset")?;

        let mut tx = self.db.begin().await?;

        let users = self.repository.list_users(&mut tx, limit, offset).await?;
        let total = self.repository.count_users(&mut tx).await?;

        tx.commit().await?;

        Ok(Paginated {
            items: users,
            total: u64::try_from(total).unwrap_or_default(),
            page,
        })
    }

    async fn update_user(
        &self,
        user: UserUuid,
        update: UserUpdate,
    ) -> Result<User, UsersServiceError> {
        let name = validate_name(&update.name)?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_user(&mut tx, user, name, update.role)
            .await?;

        tx.commit().await?;

        info!(user = %updated.uuid, role = %updated.role, "updated user");

        Ok(updated)
    }

    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_user(&mut tx, user).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        info!(%user, "deleted user");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Register a new account.
    async fn sign_up(&self, user: NewUser) -> Result<User, UsersServiceError>;

    /// Check credentials and open a bearer session.
    async fn sign_in(&self, email: &str, password: Password)
    -> Result<Session, UsersServiceError>;

    /// Revoke the session behind a bearer token.
    async fn sign_out(&self, token: &str) -> Result<(), UsersServiceError>;

    /// Resolve a bearer token to its user.
    async fn authenticate(&self, token: &str) -> Result<User, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<User, UsersServiceError>;

    /// Retrieve a user by email address, case-insensitively.
    async fn get_user_by_email(&self, email: &str) -> Result<User, UsersServiceError>;

    /// Change a user's own display name.
    async fn update_profile(&self, user: UserUuid, name: &str) -> Result<User, UsersServiceError>;

    /// Store the shipping address used at checkout.
    async fn update_address(
        &self,
        user: UserUuid,
        address: ShippingAddress,
    ) -> Result<User, UsersServiceError>;

    /// Store the payment method used at checkout.
    async fn update_payment_method(
        &self,
        user: UserUuid,
        payment_method: PaymentMethod,
    ) -> Result<User, UsersServiceError>;

    /// Page through every user, newest first.
    async fn list_users(&self, page: Page) -> Result<Paginated<User>, UsersServiceError>;

    /// Change a user's name and role.
    async fn update_user(
        &self,
        user: UserUuid,
        update: UserUpdate,
    ) -> Result<User, UsersServiceError>;

    /// Delete a user together with their sessions and cart.
    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use emporium::checkout::AddressError;
    use testresult::TestResult;

    use crate::{
        domain::users::models::Role,
        test::{TestContext, helpers},
    };

    use super::*;

    fn address() -> ShippingAddress {
        ShippingAddress {
            full_name: "Ada Lovelace".to_string(),
            street_address: "12 St James's Square".to_string(),
            city: "London".to_string(),
            postal_code: "SW1Y".to_string(),
            country: "United Kingdom".to_string(),
        }
    }

    #[test]
    fn emails_are_trimmed_and_lowercased() -> TestResult {
        assert_eq!(normalise_email("  Ada@Example.COM ")?, "ada@example.com");

        Ok(())
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in ["", "ada", "@example.com", "ada@", "a@b@c"] {
            let result = normalise_email(email);

            assert!(
                matches!(result, Err(UsersServiceError::InvalidEmail)),
                "expected InvalidEmail for {email:?}, got {result:?}"
            );
        }
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn sign_up_validates_name_and_password() {
        let ctx = TestContext::new().await;

        let result = ctx
            .users
            .sign_up(helpers::new_user("Al", "al@example.com", "secret123"))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::NameTooShort)),
            "expected NameTooShort, got {result:?}"
        );

        let result = ctx
            .users
            .sign_up(helpers::new_user("Alan Turing", "alan@example.com", "short"))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::PasswordTooShort)),
            "expected PasswordTooShort, got {result:?}"
        );
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn duplicate_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        helpers::create_user(&ctx, "Ada Lovelace", "ada@example.com").await?;

        let result = ctx
            .users
            .sign_up(helpers::new_user("Ada Byron", "ADA@example.com", "secret123"))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn sign_in_issues_token_that_authenticates() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "Ada Lovelace", "ada@example.com").await?;

        let session = ctx
            .users
            .sign_in("Ada@Example.com", Password::new(helpers::PASSWORD))
            .await?;

        assert_eq!(session.user, user);
        assert!(session.token.starts_with("em_v1_"), "unexpected token shape");

        let authenticated = ctx.users.authenticate(&session.token).await?;

        assert_eq!(authenticated, user);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn wrong_email_and_wrong_password_look_the_same() -> TestResult {
        let ctx = TestContext::new().await;

        helpers::create_user(&ctx, "Ada Lovelace", "ada@example.com").await?;

        let wrong_password = ctx
            .users
            .sign_in("ada@example.com", Password::new("not-the-password"))
            .await;
        let wrong_email = ctx
            .users
            .sign_in("nobody@example.com", Password::new(helpers::PASSWORD))
            .await;

        assert!(
            matches!(wrong_password, Err(UsersServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {wrong_password:?}"
        );
        assert!(
            matches!(wrong_email, Err(UsersServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {wrong_email:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn signed_out_tokens_stop_working() -> TestResult {
        let ctx = TestContext::new().await;

        helpers::create_user(&ctx, "Ada Lovelace", "ada@example.com").await?;

        let session = ctx
            .users
            .sign_in("ada@example.com", Password::new(helpers::PASSWORD))
            .await?;

        ctx.users.sign_out(&session.token).await?;

        let result = ctx.users.authenticate(&session.token).await;

        assert!(
            matches!(result, Err(UsersServiceError::InvalidToken)),
            "expected InvalidToken, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn expired_sessions_do_not_authenticate() -> TestResult {
        let ctx = TestContext::new().await;
        let users = PgUsersService::with_session_ttl(ctx.db.clone(), SignedDuration::from_secs(-1));

        helpers::create_user(&ctx, "Ada Lovelace", "ada@example.com").await?;

        let session = users
            .sign_in("ada@example.com", Password::new(helpers::PASSWORD))
            .await?;

        let result = users.authenticate(&session.token).await;

        assert!(
            matches!(result, Err(UsersServiceError::InvalidToken)),
            "expected InvalidToken, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn update_address_validates_and_persists() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "Ada Lovelace", "ada@example.com").await?;

        let result = ctx
            .users
            .update_address(
                user.uuid,
                ShippingAddress {
                    city: "  L ".to_string(),
                    ..address()
                },
            )
            .await;

        assert!(
            matches!(
                result,
                Err(UsersServiceError::InvalidAddress(AddressError::TooShort {
                    field: "city",
                    ..
                }))
            ),
            "expected a short city, got {result:?}"
        );

        let updated = ctx.users.update_address(user.uuid, address()).await?;

        assert_eq!(updated.address, Some(address()));

        let updated = ctx
            .users
            .update_payment_method(user.uuid, PaymentMethod::Stripe)
            .await?;

        assert_eq!(updated.payment_method, Some(PaymentMethod::Stripe));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn admin_can_promote_and_delete_users() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "Ada Lovelace", "ada@example.com").await?;

        let promoted = ctx
            .users
            .update_user(
                user.uuid,
                UserUpdate {
                    name: "Ada King".to_string(),
                    role: Role::Admin,
                },
            )
            .await?;

        assert!(promoted.is_admin(), "expected an admin");
        assert_eq!(promoted.name, "Ada King");

        let listed = ctx.users.list_users(Page::default()).await?;

        assert_eq!(listed.total, 1);

        ctx.users.delete_user(user.uuid).await?;

        let result = ctx.users.get_user(user.uuid).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
