//! `avail.*` and `test.*` actions.

use linode_common::error::DecodeError;
use linode_common::http_client::HttpClient;
use linode_common::{ApiArgs, Result};
use linode_derive::Record;

use crate::api::stackscript::StackScript;
use crate::client::LinodeClient;

#[derive(Debug, Clone, Default, PartialEq, Eq, Record)]
pub struct Datacenter {
    #[record("DATACENTERID")]
    pub id: i64,
    #[record("LOCATION")]
    pub location: String,
    #[record("ABBR")]
    pub abbr: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Record)]
pub struct Distribution {
    #[record("DISTRIBUTIONID")]
    pub id: i64,
    #[record("LABEL")]
    pub label: String,
    #[record("IS64BIT")]
    pub is_64bit: bool,
    /// Smallest disk the image fits on, in MB
    #[record("MINIMAGESIZE")]
    pub min_image_size: i64,
    #[record("CREATE_DT")]
    pub create_dt: String,
    #[record("REQUIRESPVOPSKERNEL")]
    pub requires_pvops: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Record)]
pub struct Kernel {
    #[record("KERNELID")]
    pub id: i64,
    #[record("LABEL")]
    pub label: String,
    #[record("ISXEN")]
    pub is_xen: bool,
    #[record("ISPVOPS")]
    pub is_pvops: bool,
}

/// A plan offered by `avail.linodeplans`.
///
/// Per-datacenter availability (`AVAIL`) is not decoded.
#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct LinodePlan {
    #[record("PLANID")]
    pub id: i64,
    #[record("LABEL")]
    pub label: String,
    #[record("CORES")]
    pub cores: i64,
    /// Monthly price
    #[record("PRICE")]
    pub price: f64,
    #[record("HOURLY")]
    pub hourly: f64,
    /// MB
    #[record("RAM")]
    pub ram: i64,
    /// GB
    #[record("XFER")]
    pub xfer: i64,
    /// GB
    #[record("DISK")]
    pub disk: i64,
}

impl<C: HttpClient> LinodeClient<C> {
    /// Maps to `avail.datacenters`.
    pub async fn avail_datacenters(&self) -> Result<Vec<Datacenter>> {
        Ok(self.call("avail.datacenters", &ApiArgs::new()).await?.records()?)
    }

    /// Maps to `avail.distributions`.
    pub async fn avail_distributions(
        &self,
        distribution_id: Option<i64>,
    ) -> Result<Vec<Distribution>> {
        let args = ApiArgs::new().with("DistributionID", distribution_id);
        Ok(self.call("avail.distributions", &args).await?.records()?)
    }

    /// Maps to `avail.kernels`.
    pub async fn avail_kernels(
        &self,
        kernel_id: Option<i64>,
        is_xen: Option<bool>,
    ) -> Result<Vec<Kernel>> {
        let args = ApiArgs::new()
            .with("KernelID", kernel_id)
            .with("isXen", is_xen);
        Ok(self.call("avail.kernels", &args).await?.records()?)
    }

    /// Maps to `avail.linodeplans`.
    pub async fn avail_linode_plans(&self, plan_id: Option<i64>) -> Result<Vec<LinodePlan>> {
        let args = ApiArgs::new().with("PlanID", plan_id);
        Ok(self.call("avail.linodeplans", &args).await?.records()?)
    }

    /// Maps to `avail.stackscripts`, listing public StackScripts.
    pub async fn avail_stackscripts(
        &self,
        distribution_id: Option<i64>,
        distribution_vendor: Option<&str>,
        keywords: Option<&str>,
    ) -> Result<Vec<StackScript>> {
        let args = ApiArgs::new()
            .with("DistributionID", distribution_id)
            .with("DistributionVendor", distribution_vendor)
            .with("keywords", keywords);
        Ok(self.call("avail.stackscripts", &args).await?.records()?)
    }

    /// Maps to `test.echo` with `foo=bar`, a cheap way to check the API key.
    pub async fn test_echo(&self) -> Result<()> {
        let args = ApiArgs::new().with("foo", "bar");
        let echoed: String = self.call("test.echo", &args).await?.single("FOO")?;
        if echoed != "bar" {
            return Err(DecodeError::UnexpectedValue {
                context: "echo".into(),
                found: echoed,
            }
            .into());
        }
        Ok(())
    }
}
