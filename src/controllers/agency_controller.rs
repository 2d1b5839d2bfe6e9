//! Controller de agencias

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::agency_dto::{CreateAgencyRequest, UpdateAgencyRequest};
use crate::models::agency::Agency;
use crate::repositories::agency_repository::AgencyRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct AgencyController {
    repository: AgencyRepository,
}

impl AgencyController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: AgencyRepository::new(pool),
        }
    }

    pub async fn create(&self, request: CreateAgencyRequest) -> Result<Agency, AppError> {
        request.validate()?;

        if self.repository.code_exists(&request.code).await? {
            return Err(AppError::Conflict(format!(
                "Agency with code '{}' already exists",
                request.code
            )));
        }

        self.repository
            .create(
                &request.name,
                &request.code,
                request.contact_name.as_deref(),
                request.contact_phone.as_deref(),
                request.contact_email.as_deref(),
            )
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Agency, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Agency", &id.to_string()))
    }

    pub async fn list(&self) -> Result<Vec<Agency>, AppError> {
        self.repository.list().await
    }

    pub async fn update(&self, id: Uuid, request: UpdateAgencyRequest) -> Result<Agency, AppError> {
        request.validate()?;

        // Verificar que exista antes de actualizar
        self.get(id).await?;

        self.repository
            .update(
                id,
                request.name.as_deref(),
                request.contact_name.as_deref(),
                request.contact_phone.as_deref(),
                request.contact_email.as_deref(),
            )
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repository.delete(id).await?;
        if deleted == 0 {
            return Err(not_found_error("Agency", &id.to_string()));
        }
        Ok(())
    }
}
