use reqwest::Method;
use rota_core::constants::{
    BILLING_ROUTE, BROADCASTS_ROUTE, ERROR_LOGS_ROUTE, FEATURE_FLAGS_ROUTE, PLANS_ROUTE,
    SESSIONS_ROUTE,
};
use rota_core::types::{
    BillingAction, BillingReceipt, BillingRequest, Broadcast, ErrorLogEntry, FeatureFlag,
    NewBroadcast, Session, SubscriptionPlan,
};

use super::ApiClient;
use crate::error::ApiResult;

impl ApiClient {
    /// ## Errors
    /// Returns network, status or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn list_sessions(&self) -> ApiResult<Vec<Session>> {
        self.get_json(self.url(SESSIONS_ROUTE)?).await
    }

    /// ## Summary
    /// Lists the most recent error log entries, newest first.
    ///
    /// ## Errors
    /// Returns network, status or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn list_error_logs(&self, limit: u32) -> ApiResult<Vec<ErrorLogEntry>> {
        let mut url = self.url(ERROR_LOGS_ROUTE)?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        self.get_json(url).await
    }

    /// ## Errors
    /// Returns network, status or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn list_feature_flags(&self) -> ApiResult<Vec<FeatureFlag>> {
        self.get_json(self.url(FEATURE_FLAGS_ROUTE)?).await
    }

    /// ## Errors
    /// Returns network, status or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn set_feature_flag(&self, key: &str, enabled: bool) -> ApiResult<FeatureFlag> {
        let flag: FeatureFlag = self
            .send_json(
                Method::PATCH,
                self.url(&format!("{FEATURE_FLAGS_ROUTE}/{key}"))?,
                &serde_json::json!({ "enabled": enabled }),
            )
            .await?;
        tracing::info!(key, enabled = flag.enabled, "Updated feature flag");
        Ok(flag)
    }

    /// ## Errors
    /// Returns network, status or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn list_broadcasts(&self) -> ApiResult<Vec<Broadcast>> {
        self.get_json(self.url(BROADCASTS_ROUTE)?).await
    }

    /// ## Errors
    /// Returns network, validation, status or decode errors.
    #[tracing::instrument(skip(self, broadcast), fields(title = %broadcast.title))]
    pub async fn create_broadcast(&self, broadcast: &NewBroadcast) -> ApiResult<Broadcast> {
        self.send_json(Method::POST, self.url(BROADCASTS_ROUTE)?, broadcast)
            .await
    }

    /// ## Errors
    /// Returns network, status or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn list_plans(&self) -> ApiResult<Vec<SubscriptionPlan>> {
        self.get_json(self.url(PLANS_ROUTE)?).await
    }

    /// ## Summary
    /// Issues an invoice, refund or credit for an organization.
    ///
    /// ## Errors
    /// Returns network, validation, status or decode errors.
    #[tracing::instrument(skip(self, request), fields(org = %request.organization_id))]
    pub async fn billing_action(
        &self,
        action: BillingAction,
        request: &BillingRequest,
    ) -> ApiResult<BillingReceipt> {
        let receipt: BillingReceipt = self
            .send_json(
                Method::POST,
                self.url(&format!("{BILLING_ROUTE}/{action}"))?,
                request,
            )
            .await?;
        tracing::info!(receipt_id = %receipt.id, %action, "Billing action recorded");
        Ok(receipt)
    }
}
