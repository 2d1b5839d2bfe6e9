//! DTOs de agencias

use serde::Deserialize;
use validator::Validate;

/// Request para crear una agencia
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAgencyRequest {
    #[validate(length(min = 2, max = 200))]
    pub name: String,

    #[validate(length(min = 2, max = 20))]
    pub code: String,

    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,

    #[validate(email)]
    pub contact_email: Option<String>,
}

/// Request para actualizar una agencia
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAgencyRequest {
    #[validate(length(min = 2, max = 200))]
    pub name: Option<String>,

    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,

    #[validate(email)]
    pub contact_email: Option<String>,
}
