//! Controller de autenticación
//!
//! Registro y login de usuarios. Passwords con bcrypt, identidad por JWT.

use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthController {
    users: UserRepository,
    jwt_config: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt_config: JwtConfig) -> Self {
        Self {
            users: UserRepository::new(pool),
            jwt_config,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;

        if self.users.email_exists(&request.email).await? {
            return Err(AppError::Conflict(format!(
                "User with email '{}' already exists",
                request.email
            )));
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Error hasheando password: {}", e)))?;

        let user = self
            .users
            .create(
                &request.email,
                &password_hash,
                &request.full_name,
                request.is_admin,
            )
            .await?;

        let token = generate_token(user.id, &user.email, user.is_admin, &self.jwt_config)?;

        info!("👤 Usuario {} registrado", user.email);

        Ok(AuthResponse {
            token,
            user: UserResponse::from(user),
        })
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;

        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        let valid = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Error verificando password: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let token = generate_token(user.id, &user.email, user.is_admin, &self.jwt_config)?;

        Ok(AuthResponse {
            token,
            user: UserResponse::from(user),
        })
    }
}
