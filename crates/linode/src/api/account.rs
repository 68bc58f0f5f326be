//! `account.*` and `user.*` actions.

use linode_common::http_client::HttpClient;
use linode_common::{ApiArgs, Result};
use linode_derive::Record;

use crate::client::LinodeClient;

/// Result of `account.estimateinvoice`.
#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct EstimatedInvoice {
    /// End of the billed period
    #[record("INVOICE_TO")]
    pub invoice_to: String,
    #[record("AMOUNT")]
    pub amount: f64,
}

/// Result of `account.info`.
#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct AccountInfo {
    #[record("ACTIVE_SINCE")]
    pub active_since: String,
    /// Pooled transfer, in GB
    #[record("TRANSFER_POOL")]
    pub transfer_pool: i64,
    #[record("TRANSFER_USED")]
    pub transfer_used: i64,
    #[record("TRANSFER_BILLABLE")]
    pub transfer_billable: i64,
    #[record("MANAGED")]
    pub managed: bool,
    #[record("BALANCE")]
    pub balance: f64,
    #[record("BILLING_METHOD")]
    pub billing_method: String,
}

impl<C: HttpClient> LinodeClient<C> {
    /// Maps to `account.estimateinvoice`.
    ///
    /// `mode` is one of `linode_new`, `linode_resize` or `nodebalancer_new`;
    /// which of the other arguments are needed depends on it.
    pub async fn account_estimate_invoice(
        &self,
        mode: &str,
        payment_term: Option<i64>,
        plan_id: Option<i64>,
        linode_id: Option<i64>,
    ) -> Result<EstimatedInvoice> {
        let args = ApiArgs::new()
            .with("mode", mode)
            .with("PaymentTerm", payment_term)
            .with("PlanID", plan_id)
            .with("LinodeID", linode_id);

        Ok(self.call("account.estimateinvoice", &args).await?.object()?)
    }

    /// Maps to `account.info`.
    pub async fn account_info(&self) -> Result<AccountInfo> {
        Ok(self.call("account.info", &ApiArgs::new()).await?.object()?)
    }

    /// Maps to `user.getapikey`, trading Manager credentials for an API key.
    ///
    /// `token` is required when two-factor authentication is on. `expires` is
    /// in hours, `0` meaning never; the server defaults to 168.
    pub async fn user_get_api_key(
        &self,
        username: &str,
        password: &str,
        token: Option<&str>,
        expires: Option<i64>,
        label: Option<&str>,
    ) -> Result<String> {
        let args = ApiArgs::new()
            .with("username", username)
            .with("password", password)
            .with("token", token)
            .with("expires", expires)
            .with("label", label);

        Ok(self.call("user.getAPIKey", &args).await?.single("API_KEY")?)
    }
}
