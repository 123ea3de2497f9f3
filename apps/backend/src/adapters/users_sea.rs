//! SeaORM adapter for the users table.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};

use crate::entities::users;

pub async fn find_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(username.to_string())
        .one(conn)
        .await
}

/// Insert the user if absent; usernames are the primary key so a
/// concurrent insert shows up as an already-existing row.
pub async fn find_or_create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<users::Model, sea_orm::DbErr> {
    if let Some(existing) = find_by_username(conn, username).await? {
        return Ok(existing);
    }
    let model = users::ActiveModel {
        username: Set(username.to_string()),
    };
    model.insert(conn).await
}
