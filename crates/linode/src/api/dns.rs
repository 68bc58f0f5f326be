//! `domain.*` and `domain.resource.*` actions.

use linode_common::http_client::HttpClient;
use linode_common::{ApiArgs, Result};
use linode_derive::{Record, ToArgs};

use crate::client::LinodeClient;

/// Optional arguments of `domain.create`.
#[derive(Debug, Clone, Default, PartialEq, Eq, bon::Builder, ToArgs)]
#[builder(start_fn = new)]
pub struct DomainCreateOpts {
    #[args("Description")]
    #[builder(into)]
    pub description: Option<String>,
    /// Required for master zones
    #[args("SOA_Email")]
    #[builder(into)]
    pub soa_email: Option<String>,
    #[args("Refresh_sec")]
    pub refresh_sec: Option<i64>,
    #[args("Retry_sec")]
    pub retry_sec: Option<i64>,
    #[args("Expire_sec")]
    pub expire_sec: Option<i64>,
    #[args("TTL_sec")]
    pub ttl_sec: Option<i64>,
    #[args("lpm_displayGroup")]
    #[builder(into)]
    pub display_group: Option<String>,
    /// 0 disabled, 1 active, 2 edit mode
    #[args("status")]
    pub status: Option<i64>,
    /// Semicolon separated
    #[args("master_ips")]
    #[builder(into)]
    pub master_ips: Option<String>,
    /// Semicolon separated
    #[args("axfr_ips")]
    #[builder(into)]
    pub axfr_ips: Option<String>,
}

/// Optional arguments of `domain.update`.
#[derive(Debug, Clone, Default, PartialEq, Eq, bon::Builder, ToArgs)]
#[builder(start_fn = new)]
pub struct DomainUpdateOpts {
    #[args("Domain")]
    #[builder(into)]
    pub domain: Option<String>,
    #[args("Type")]
    #[builder(into)]
    pub kind: Option<String>,
    #[args("SOA_Email")]
    #[builder(into)]
    pub soa_email: Option<String>,
    #[args("Refresh_sec")]
    pub refresh_sec: Option<i64>,
    #[args("Retry_sec")]
    pub retry_sec: Option<i64>,
    #[args("Expire_sec")]
    pub expire_sec: Option<i64>,
    #[args("TTL_sec")]
    pub ttl_sec: Option<i64>,
    #[args("lpm_displayGroup")]
    #[builder(into)]
    pub display_group: Option<String>,
    #[args("status")]
    pub status: Option<i64>,
    #[args("master_ips")]
    #[builder(into)]
    pub master_ips: Option<String>,
    #[args("axfr_ips")]
    #[builder(into)]
    pub axfr_ips: Option<String>,
}

/// One zone of `domain.list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Record)]
pub struct Domain {
    #[record("DOMAINID")]
    pub id: i64,
    #[record("DOMAIN")]
    pub domain: String,
    #[record("DESCRIPTION")]
    pub description: String,
    /// `master` or `slave`
    #[record("TYPE")]
    pub kind: String,
    #[record("STATUS")]
    pub status: i64,
    #[record("SOA_EMAIL")]
    pub soa_email: String,
    #[record("RETRY_SEC")]
    pub retry_sec: i64,
    #[record("MASTER_IPS")]
    pub master_ips: String,
    /// Empty when no transfers are allowed
    #[record("AXFR_IPS")]
    pub axfr_ips: String,
    #[record("EXPIRE_SEC")]
    pub expire_sec: i64,
    #[record("REFRESH_SEC")]
    pub refresh_sec: i64,
    #[record("TTL_SEC")]
    pub ttl_sec: i64,
    #[record("LPM_DISPLAYGROUP")]
    pub display_group: String,
}

/// Optional arguments of `domain.resource.create`.
#[derive(Debug, Clone, Default, PartialEq, Eq, bon::Builder, ToArgs)]
#[builder(start_fn = new)]
pub struct DomainResourceCreateOpts {
    #[args("Name")]
    #[builder(into)]
    pub name: Option<String>,
    #[args("Target")]
    #[builder(into)]
    pub target: Option<String>,
    #[args("Priority")]
    pub priority: Option<i64>,
    #[args("Weight")]
    pub weight: Option<i64>,
    #[args("Protocol")]
    #[builder(into)]
    pub protocol: Option<String>,
    /// Rounded by the server to one of its fixed TTL steps
    #[args("TTL_sec")]
    pub ttl_sec: Option<i64>,
    #[args("Port")]
    pub port: Option<i64>,
}

/// Optional arguments of `domain.resource.update`.
#[derive(Debug, Clone, Default, PartialEq, Eq, bon::Builder, ToArgs)]
#[builder(start_fn = new)]
pub struct DomainResourceUpdateOpts {
    #[args("DomainID")]
    pub domain_id: Option<i64>,
    #[args("Name")]
    #[builder(into)]
    pub name: Option<String>,
    #[args("Target")]
    #[builder(into)]
    pub target: Option<String>,
    #[args("Priority")]
    pub priority: Option<i64>,
    #[args("Weight")]
    pub weight: Option<i64>,
    #[args("Port")]
    pub port: Option<i64>,
    #[args("Protocol")]
    #[builder(into)]
    pub protocol: Option<String>,
    #[args("TTL_sec")]
    pub ttl_sec: Option<i64>,
}

/// One record of `domain.resource.list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Record)]
pub struct DomainResource {
    #[record("RESOURCEID")]
    pub id: i64,
    #[record("DOMAINID")]
    pub domain_id: i64,
    #[record("NAME")]
    pub name: String,
    /// Record type, e.g. `a` or `srv`
    #[record("TYPE")]
    pub kind: String,
    #[record("TARGET")]
    pub target: String,
    #[record("PROTOCOL")]
    pub protocol: String,
    #[record("TTL_SEC")]
    pub ttl_sec: i64,
    #[record("PRIORITY")]
    pub priority: i64,
    #[record("WEIGHT")]
    pub weight: i64,
    #[record("PORT")]
    pub port: i64,
}

impl<C: HttpClient> LinodeClient<C> {
    /// Maps to `domain.create`. `kind` is `master` or `slave`.
    pub async fn domain_create(
        &self,
        domain: &str,
        kind: &str,
        opts: &DomainCreateOpts,
    ) -> Result<i64> {
        let args = ApiArgs::new().with("Domain", domain).with("Type", kind);
        Ok(self
            .call_with("domain.create", opts, args)
            .await?
            .single("DomainID")?)
    }

    /// Maps to `domain.delete`.
    pub async fn domain_delete(&self, domain_id: i64) -> Result<()> {
        let args = ApiArgs::new().with("DomainID", domain_id);
        self.call("domain.delete", &args).await?;
        Ok(())
    }

    /// Maps to `domain.list`.
    ///
    /// The server reports "no transfer addresses" as `none`; that is returned
    /// as an empty [`Domain::axfr_ips`].
    pub async fn domain_list(&self, domain_id: Option<i64>) -> Result<Vec<Domain>> {
        let args = ApiArgs::new().with("DomainID", domain_id);
        let mut domains: Vec<Domain> = self.call("domain.list", &args).await?.records()?;
        for d in domains.iter_mut().filter(|d| d.axfr_ips == "none") {
            d.axfr_ips.clear();
        }
        Ok(domains)
    }

    /// Maps to `domain.update`.
    pub async fn domain_update(&self, domain_id: i64, opts: &DomainUpdateOpts) -> Result<()> {
        let args = ApiArgs::new().with("DomainID", domain_id);
        self.call_with("domain.update", opts, args).await?;
        Ok(())
    }

    /// Maps to `domain.resource.create`.
    pub async fn domain_resource_create(
        &self,
        domain_id: i64,
        kind: &str,
        opts: &DomainResourceCreateOpts,
    ) -> Result<i64> {
        let args = ApiArgs::new()
            .with("DomainID", domain_id)
            .with("Type", kind);
        Ok(self
            .call_with("domain.resource.create", opts, args)
            .await?
            .single("ResourceID")?)
    }

    /// Maps to `domain.resource.delete`.
    pub async fn domain_resource_delete(&self, domain_id: i64, resource_id: i64) -> Result<()> {
        let args = ApiArgs::new()
            .with("DomainID", domain_id)
            .with("ResourceID", resource_id);
        self.call("domain.resource.delete", &args).await?;
        Ok(())
    }

    /// Maps to `domain.resource.list`.
    pub async fn domain_resource_list(
        &self,
        domain_id: i64,
        resource_id: Option<i64>,
    ) -> Result<Vec<DomainResource>> {
        let args = ApiArgs::new()
            .with("DomainID", domain_id)
            .with("ResourceID", resource_id);
        Ok(self.call("domain.resource.list", &args).await?.records()?)
    }

    /// Maps to `domain.resource.update`.
    pub async fn domain_resource_update(
        &self,
        resource_id: i64,
        opts: &DomainResourceUpdateOpts,
    ) -> Result<()> {
        let args = ApiArgs::new().with("ResourceID", resource_id);
        self.call_with("domain.resource.update", opts, args).await?;
        Ok(())
    }
}
