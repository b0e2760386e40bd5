use reqwest::Method;
use rota_core::constants::SHIFT_TEMPLATES_ROUTE;
use rota_core::types::{ShiftTemplate, ShiftTemplateInput};
use rota_core::util::color::normalize_hex_color;
use uuid::Uuid;

use super::ApiClient;
use crate::error::ApiResult;

/// Normalizes the colour before it is sent.
fn prepare(input: &ShiftTemplateInput) -> ApiResult<ShiftTemplateInput> {
    let mut prepared = input.clone();
    prepared.color = input
        .color
        .as_deref()
        .map(normalize_hex_color)
        .transpose()?;
    Ok(prepared)
}

impl ApiClient {
    /// ## Errors
    /// Returns network, status or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn list_templates(&self) -> ApiResult<Vec<ShiftTemplate>> {
        self.get_json(self.url(SHIFT_TEMPLATES_ROUTE)?).await
    }

    /// ## Errors
    /// Returns `CoreError::InvalidInput` for a malformed colour, otherwise
    /// network, validation, status or decode errors.
    #[tracing::instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_template(&self, input: &ShiftTemplateInput) -> ApiResult<ShiftTemplate> {
        let body = prepare(input)?;
        self.send_json(Method::POST, self.url(SHIFT_TEMPLATES_ROUTE)?, &body)
            .await
    }

    /// ## Errors
    /// Returns `CoreError::InvalidInput` for a malformed colour, otherwise
    /// network, validation, status or decode errors.
    #[tracing::instrument(skip(self, input), fields(name = %input.name))]
    pub async fn update_template(
        &self,
        id: Uuid,
        input: &ShiftTemplateInput,
    ) -> ApiResult<ShiftTemplate> {
        let body = prepare(input)?;
        self.send_json(
            Method::PUT,
            self.url(&format!("{SHIFT_TEMPLATES_ROUTE}/{id}"))?,
            &body,
        )
        .await
    }

    /// ## Errors
    /// Returns network or status errors.
    #[tracing::instrument(skip(self))]
    pub async fn delete_template(&self, id: Uuid) -> ApiResult<()> {
        self.send_empty(
            Method::DELETE,
            self.url(&format!("{SHIFT_TEMPLATES_ROUTE}/{id}"))?,
        )
        .await
    }
}
