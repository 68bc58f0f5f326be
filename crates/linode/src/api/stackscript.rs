//! `stackscript.*` actions.

use linode_common::http_client::HttpClient;
use linode_common::{ApiArgs, Result};
use linode_derive::{Record, ToArgs};

use crate::client::LinodeClient;

/// Optional arguments of `stackscript.create` and `stackscript.update`.
///
/// `stackscript.create` always sends its own label, distribution list and
/// script, so those fields here only matter for updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, bon::Builder, ToArgs)]
#[builder(start_fn = new)]
pub struct StackScriptOpts {
    #[args("Label")]
    #[builder(into)]
    pub label: Option<String>,
    #[args("Description")]
    #[builder(into)]
    pub description: Option<String>,
    /// Comma separated distribution ids
    #[args("DistributionIDList")]
    #[builder(into)]
    pub distribution_id_list: Option<String>,
    #[args("isPublic,int")]
    pub is_public: Option<bool>,
    #[args("rev_note")]
    #[builder(into)]
    pub rev_note: Option<String>,
    #[args("script")]
    #[builder(into)]
    pub script: Option<String>,
}

/// One entry of `stackscript.list` or `avail.stackscripts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Record)]
pub struct StackScript {
    #[record("STACKSCRIPTID")]
    pub id: i64,
    #[record("USERID")]
    pub user_id: i64,
    #[record("LABEL")]
    pub label: String,
    #[record("DESCRIPTION")]
    pub description: String,
    /// Sometimes sent as a bare number
    #[record("DISTRIBUTIONIDLIST")]
    pub distribution_id_list: String,
    #[record("SCRIPT")]
    pub script: String,
    #[record("ISPUBLIC")]
    pub is_public: bool,
    #[record("DEPLOYMENTSTOTAL")]
    pub total_deploys: i64,
    #[record("DEPLOYMENTSACTIVE")]
    pub active_deploys: i64,
    #[record("LATESTREV")]
    pub latest_rev: i64,
    #[record("REV_NOTE")]
    pub rev_note: String,
    #[record("REV_DT")]
    pub rev_dt: String,
    #[record("CREATE_DT")]
    pub create_dt: String,
}

impl<C: HttpClient> LinodeClient<C> {
    /// Maps to `stackscript.create`.
    pub async fn stackscript_create(
        &self,
        label: &str,
        distribution_id_list: &str,
        script: &str,
        opts: &StackScriptOpts,
    ) -> Result<i64> {
        let args = ApiArgs::new()
            .with("Label", label)
            .with("DistributionIDList", distribution_id_list)
            .with("script", script);
        Ok(self
            .call_with("stackscript.create", opts, args)
            .await?
            .single("StackScriptID")?)
    }

    /// Maps to `stackscript.delete`.
    pub async fn stackscript_delete(&self, stackscript_id: i64) -> Result<()> {
        let args = ApiArgs::new().with("StackScriptID", stackscript_id);
        self.call("stackscript.delete", &args).await?;
        Ok(())
    }

    /// Maps to `stackscript.list`, listing the account's own StackScripts.
    pub async fn stackscript_list(&self, stackscript_id: Option<i64>) -> Result<Vec<StackScript>> {
        let args = ApiArgs::new().with("StackScriptID", stackscript_id);
        Ok(self.call("stackscript.list", &args).await?.records()?)
    }

    /// Maps to `stackscript.update`.
    pub async fn stackscript_update(&self, stackscript_id: i64, opts: &StackScriptOpts) -> Result<()> {
        let args = ApiArgs::new().with("StackScriptID", stackscript_id);
        self.call_with("stackscript.update", opts, args).await?;
        Ok(())
    }
}
