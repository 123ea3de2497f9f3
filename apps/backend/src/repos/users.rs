use sea_orm::ConnectionTrait;

use crate::adapters::users_sea as users_adapter;
use crate::entities::users;
use crate::errors::domain::DomainError;

/// User domain model. Usernames are the identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
}

pub async fn find_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_username(conn, username).await?;
    Ok(user.map(User::from))
}

pub async fn find_or_create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<User, DomainError> {
    let user = users_adapter::find_or_create(conn, username).await?;
    Ok(User::from(user))
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            username: model.username,
        }
    }
}
