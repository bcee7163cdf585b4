use crate::db::{get_connection, WriteHandle};
use crate::errors::Result;
use crate::schema::users;
use crate::users::users_model::{NewUser, User};
use crate::users::users_traits::UserRepositoryTrait;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

pub struct UserRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        UserRepository { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn find_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        Ok(users::table.find(user_id).first::<User>(&mut conn)?)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(users::table
            .filter(users::email.eq(email))
            .first::<User>(&mut conn)
            .optional()?)
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let now = Utc::now().to_rfc3339();
                let new_user = NewUser {
                    id: Some(new_user.id.unwrap_or_else(|| Uuid::new_v4().to_string())),
                    created_at: Some(now.clone()),
                    updated_at: Some(now),
                    ..new_user
                };

                diesel::insert_into(users::table)
                    .values(&new_user)
                    .execute(conn)?;

                Ok(users::table
                    .find(new_user.id.as_deref().unwrap_or_default())
                    .first::<User>(conn)?)
            })
            .await
    }
}
