//! Users Repository

use emporium::checkout::{PaymentMethod, ShippingAddress};
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
    types::Json,
};

use crate::domain::users::models::{Role, SessionUuid, User, UserUuid};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const GET_USER_BY_EMAIL_SQL: &str = include_str!("sql/get_user_by_email.sql");
const GET_PASSWORD_HASH_SQL: &str = include_str!("sql/get_password_hash.sql");
const UPDATE_USER_NAME_SQL: &str = include_str!("sql/update_user_name.sql");
const UPDATE_USER_ADDRESS_SQL: &str = include_str!("sql/update_user_address.sql");
const UPDATE_USER_PAYMENT_METHOD_SQL: &str = include_str!("sql/update_user_payment_method.sql");
const UPDATE_USER_SQL: &str = include_str!("sql/update_user.sql");
const LIST_USERS_SQL: &str = include_str!("sql/list_users.sql");
const COUNT_USERS_SQL: &str = include_str!("sql/count_users.sql");
const DELETE_USER_SQL: &str = include_str!("sql/delete_user.sql");
const CREATE_SESSION_SQL: &str = include_str!("sql/create_session.sql");
const FIND_SESSION_USER_SQL: &str = include_str!("sql/find_session_user.sql");
const REVOKE_SESSION_SQL: &str = include_str!("sql/revoke_session.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(CREATE_USER_SQL)
            .bind(user)
            .bind(name)
            .bind(email)
            .bind(password_hash)
            .bind(role.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(GET_USER_SQL)
            .bind(user)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_user_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(GET_USER_BY_EMAIL_SQL)
            .bind(email)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_password_hash(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<(UserUuid, String)>, sqlx::Error> {
        query_as(GET_PASSWORD_HASH_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_user_name(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        name: &str,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(UPDATE_USER_NAME_SQL)
            .bind(user)
            .bind(name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_user_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        address: &ShippingAddress,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(UPDATE_USER_ADDRESS_SQL)
            .bind(user)
            .bind(Json(address))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_user_payment_method(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        payment_method: PaymentMethod,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(UPDATE_USER_PAYMENT_METHOD_SQL)
            .bind(user)
            .bind(payment_method.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        name: &str,
        role: Role,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(UPDATE_USER_SQL)
            .bind(user)
            .bind(name)
            .bind(role.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, sqlx::Error> {
        query_as::<Postgres, User>(LIST_USERS_SQL)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_USERS_SQL)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_USER_SQL)
            .bind(user)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn create_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
        user: UserUuid,
        token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_SESSION_SQL)
            .bind(session)
            .bind(user)
            .bind(token_hash)
            .bind(SqlxTimestamp::from(expires_at))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// The owner of a live session, if the token matches.
    pub(crate) async fn find_session_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
        token_hash: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        query_as::<Postgres, User>(FIND_SESSION_USER_SQL)
            .bind(session)
            .bind(token_hash)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn revoke_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
        token_hash: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REVOKE_SESSION_SQL)
            .bind(session)
            .bind(token_hash)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;
        let role = role.parse::<Role>().map_err(|e| sqlx::Error::ColumnDecode {
            index: "role".to_string(),
            source: Box::new(e),
        })?;

        let payment_method = row
            .try_get::<Option<String>, _>("payment_method")?
            .map(|method| method.parse::<PaymentMethod>())
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "payment_method".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            role,
            address: row
                .try_get::<Option<Json<ShippingAddress>>, _>("address")?
                .map(|address| address.0),
            payment_method,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
