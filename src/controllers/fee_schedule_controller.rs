//! Controller de tarifas configurables

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::dto::fee_schedule_dto::UpsertFeeScheduleRequest;
use crate::models::fee_schedule::FeeSchedule;
use crate::models::ledger::FeeType;
use crate::repositories::fee_schedule_repository::FeeScheduleRepository;
use crate::utils::errors::{validation_error, AppError};

pub struct FeeScheduleController {
    repository: FeeScheduleRepository,
}

impl FeeScheduleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: FeeScheduleRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<FeeSchedule>, AppError> {
        self.repository.list().await
    }

    pub async fn upsert(
        &self,
        request: UpsertFeeScheduleRequest,
    ) -> Result<FeeSchedule, AppError> {
        request.validate()?;

        if request.amount <= Decimal::ZERO {
            return Err(validation_error("amount", "fee amount must be positive"));
        }
        if request.fee_type == FeeType::Payment {
            return Err(validation_error(
                "fee_type",
                "PAYMENT is not a configurable fee",
            ));
        }

        let schedule = self
            .repository
            .upsert(&request.vehicle_class, request.fee_type, request.amount)
            .await?;

        info!(
            "💲 Tarifa {} para clase '{}' configurada en {}",
            schedule.fee_type, schedule.vehicle_class, schedule.amount
        );

        Ok(schedule)
    }
}
