use rota_core::constants::{LOCATIONS_ROUTE, MEMBERS_ROUTE};
use rota_core::types::{Location, Member, StaffKey};

use super::ApiClient;
use crate::error::ApiResult;

impl ApiClient {
    /// ## Errors
    /// Returns network, status or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn list_locations(&self) -> ApiResult<Vec<Location>> {
        self.get_json(self.url(LOCATIONS_ROUTE)?).await
    }

    /// ## Errors
    /// Returns network, status or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn list_members(&self) -> ApiResult<Vec<Member>> {
        let members: Vec<Member> = self.get_json(self.url(MEMBERS_ROUTE)?).await?;
        tracing::debug!(count = members.len(), "Fetched organization members");
        Ok(members)
    }

    /// ## Summary
    /// Staff row keys for the roster, in member list order.
    ///
    /// ## Errors
    /// Returns network, status or decode errors.
    pub async fn staff_keys(&self) -> ApiResult<Vec<StaffKey>> {
        Ok(self
            .list_members()
            .await?
            .into_iter()
            .map(|member| StaffKey::User(member.user_id))
            .collect())
    }
}
