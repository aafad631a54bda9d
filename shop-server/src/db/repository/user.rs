//! User Repository

use shared::models::{Role, User, normalize_email};

use super::BaseRepository;
use crate::db::Database;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Fields of a new account, password already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Database) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: u64) -> AppResult<Option<User>> {
        Ok(self.base.db().read().await?.user(id).cloned())
    }

    /// Case-insensitive email lookup
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = normalize_email(email);
        let snap = self.base.db().read().await?;
        Ok(snap
            .users
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(&email)))
    }

    /// Create an account; the email must not be registered yet
    pub async fn create(&self, data: NewUser, now_secs: i64) -> AppResult<User> {
        let email = normalize_email(&data.email);
        self.base
            .db()
            .write(|snap| {
                if snap.users.iter().any(|u| u.email.eq_ignore_ascii_case(&email)) {
                    return Err(AppError::new(ErrorCode::EmailAlreadyExists));
                }
                let user = User {
                    id: snap.next_user_id(),
                    firstname: data.firstname,
                    lastname: data.lastname,
                    email,
                    password: data.password_hash,
                    role: data.role,
                    created_at: now_secs,
                };
                snap.users.push(user.clone());
                Ok(user)
            })
            .await
    }

    /// Create the first administrator. Refused once any admin exists.
    pub async fn create_first_admin(&self, data: NewUser, now_secs: i64) -> AppResult<User> {
        let email = normalize_email(&data.email);
        self.base
            .db()
            .write(|snap| {
                if snap.users.iter().any(|u| u.role.is_admin()) {
                    return Err(AppError::new(ErrorCode::AdminAlreadyExists));
                }
                if snap.users.iter().any(|u| u.email.eq_ignore_ascii_case(&email)) {
                    return Err(AppError::new(ErrorCode::EmailAlreadyExists));
                }
                let admin = User {
                    id: snap.next_user_id(),
                    firstname: data.firstname,
                    lastname: data.lastname,
                    email,
                    password: data.password_hash,
                    role: Role::Admin,
                    created_at: now_secs,
                };
                snap.users.push(admin.clone());
                Ok(admin)
            })
            .await
    }
}
