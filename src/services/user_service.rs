use std::sync::Arc;
use uuid::Uuid;

use crate::dto::auth_dto::{RegisterPayload, UpdateProfilePayload};
use crate::error::{Error, Result};
use crate::models::user::{NewUser, Role, User};
use crate::store::{StoreError, UserStore};
use crate::utils::crypto;

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Registration accepts applicant and company only; admin accounts are
    /// not self-service.
    pub async fn register(&self, payload: RegisterPayload) -> Result<User> {
        let role: Role = payload.role.parse().map_err(Error::BadRequest)?;
        if role == Role::Admin {
            return Err(Error::BadRequest(
                "Role must be either 'applicant' or 'company'".to_string(),
            ));
        }

        let password_hash = crypto::hash_password(&payload.password)?;

        self.users
            .insert(NewUser {
                name: payload.name,
                email: payload.email.trim().to_lowercase(),
                password_hash,
                role,
            })
            .await
            .map_err(|e| match e {
                StoreError::Conflict => Error::Conflict("Email already registered".to_string()),
                other => other.into(),
            })
    }

    /// Unknown email and wrong password produce the same 401.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let user = self
            .users
            .find_by_email(&email.trim().to_lowercase())
            .await?
            .ok_or_else(|| Error::Unauthorized("Invalid email or password".to_string()))?;

        let ok = crypto::verify_password(password, &user.password_hash)?;
        if !ok {
            return Err(Error::Unauthorized("Invalid email or password".to_string()));
        }
        Ok(user)
    }

    pub async fn get(&self, id: Uuid) -> Result<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))
    }

    pub async fn update_profile(&self, id: Uuid, payload: UpdateProfilePayload) -> Result<User> {
        let mut user = self.get(id).await?;

        if let Some(name) = payload.name {
            user.name = name;
        }
        if let Some(email) = payload.email {
            user.email = email.trim().to_lowercase();
        }
        if let Some(password) = payload.password {
            user.password_hash = crypto::hash_password(&password)?;
        }

        self.users.update(&user).await.map_err(|e| match e {
            StoreError::Conflict => Error::Conflict("Email already registered".to_string()),
            other => other.into(),
        })
    }

    /// Swaps the stored profile image path, returning the updated user and
    /// the superseded path for best-effort cleanup by the caller.
    pub async fn set_profile_image(
        &self,
        id: Uuid,
        path: String,
    ) -> Result<(User, Option<String>)> {
        let mut user = self.get(id).await?;
        let old = user.profile_image.replace(path);
        let user = self.users.update(&user).await?;
        Ok((user, old))
    }

    pub async fn set_resume(&self, id: Uuid, path: String) -> Result<(User, Option<String>)> {
        let mut user = self.get(id).await?;
        let old = user.resume_path.replace(path);
        let user = self.users.update(&user).await?;
        Ok((user, old))
    }
}
