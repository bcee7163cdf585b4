use crate::errors::{Error, Result};
use crate::users::users_model::{NewUser, User};
use crate::users::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::users::UserError;
use async_trait::async_trait;
use std::sync::Arc;

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        UserService { repository }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository.find_by_id(user_id)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.repository.find_by_email(email)
    }

    async fn register(&self, email: String, name: String, password_hash: String) -> Result<User> {
        if self.repository.find_by_email(&email)?.is_some() {
            return Err(Error::User(UserError::EmailTaken));
        }

        self.repository
            .create(NewUser {
                id: None,
                email,
                name,
                password_hash,
                created_at: None,
                updated_at: None,
            })
            .await
    }
}
