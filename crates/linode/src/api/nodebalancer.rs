//! `nodebalancer.*` actions.

use linode_common::http_client::HttpClient;
use linode_common::{ApiArgs, Result};
use linode_derive::{Record, ToArgs};

use crate::client::LinodeClient;

/// One entry of `nodebalancer.list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Record)]
pub struct NodeBalancer {
    #[record("NODEBALANCERID")]
    pub id: i64,
    #[record("LABEL")]
    pub label: String,
    #[record("DATACENTERID")]
    pub datacenter_id: i64,
    #[record("HOSTNAME")]
    pub hostname: String,
    #[record("ADDRESS4")]
    pub ipv4: String,
    #[record("ADDRESS6")]
    pub ipv6: String,
    /// New connections per second per client IP, 0 to disable
    #[record("CLIENTCONNTHROTTLE")]
    pub throttle: i64,
}

/// Optional arguments of `nodebalancer.config.create` and
/// `nodebalancer.config.update`.
#[derive(Debug, Clone, Default, PartialEq, Eq, bon::Builder, ToArgs)]
#[builder(start_fn = new)]
pub struct NodeBalancerConfigOpts {
    #[args("Port")]
    pub port: Option<i64>,
    /// `http`, `https` or `tcp`
    #[args("Protocol")]
    #[builder(into)]
    pub protocol: Option<String>,
    /// `roundrobin`, `leastconn` or `source`
    #[args("Algorithm")]
    #[builder(into)]
    pub algorithm: Option<String>,
    /// `none`, `table` or `http_cookie`
    #[args("Stickiness")]
    #[builder(into)]
    pub stickiness: Option<String>,
    /// `connection`, `http` or `http_body`
    #[args("check")]
    #[builder(into)]
    pub check: Option<String>,
    #[args("check_interval")]
    pub check_interval: Option<i64>,
    #[args("check_timeout")]
    pub check_timeout: Option<i64>,
    #[args("check_attempts")]
    pub check_attempts: Option<i64>,
    #[args("check_path")]
    #[builder(into)]
    pub check_path: Option<String>,
    #[args("check_body")]
    #[builder(into)]
    pub check_body: Option<String>,
    #[args("check_passive,int")]
    pub check_passive: Option<bool>,
    #[args("ssl_cert")]
    #[builder(into)]
    pub ssl_cert: Option<String>,
    #[args("ssl_key")]
    #[builder(into)]
    pub ssl_key: Option<String>,
}

/// One entry of `nodebalancer.config.list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Record)]
pub struct NodeBalancerConfig {
    #[record("CONFIGID")]
    pub id: i64,
    #[record("NODEBALANCERID")]
    pub nodebalancer_id: i64,
    #[record("PORT")]
    pub port: i64,
    #[record("PROTOCOL")]
    pub protocol: String,
    #[record("ALGORITHM")]
    pub algorithm: String,
    #[record("STICKINESS")]
    pub stickiness: String,
    #[record("CHECK")]
    pub check: String,
    #[record("CHECK_INTERVAL")]
    pub check_interval: i64,
    #[record("CHECK_TIMEOUT")]
    pub check_timeout: i64,
    #[record("CHECK_ATTEMPTS")]
    pub check_attempts: i64,
    #[record("CHECK_PATH")]
    pub check_path: String,
    #[record("CHECK_BODY")]
    pub check_body: String,
    #[record("CHECK_PASSIVE")]
    pub check_passive: bool,
    #[record("SSL_FINGERPRINT")]
    pub ssl_fingerprint: String,
    #[record("SSL_COMMONNAME")]
    pub ssl_common_name: String,
}

/// One entry of `nodebalancer.node.list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Record)]
pub struct NodeBalancerNode {
    #[record("NODEID")]
    pub id: i64,
    #[record("CONFIGID")]
    pub config_id: i64,
    #[record("NODEBALANCERID")]
    pub nodebalancer_id: i64,
    #[record("LABEL")]
    pub label: String,
    /// `ip:port`
    #[record("ADDRESS")]
    pub address: String,
    #[record("WEIGHT")]
    pub weight: i64,
    /// `accept`, `reject` or `drain`
    #[record("MODE")]
    pub mode: String,
    #[record("STATUS")]
    pub status: String,
}

impl<C: HttpClient> LinodeClient<C> {
    /// Maps to `nodebalancer.create`.
    pub async fn nodebalancer_create(
        &self,
        datacenter_id: i64,
        label: Option<&str>,
        throttle: Option<i64>,
    ) -> Result<i64> {
        let args = ApiArgs::new()
            .with("DatacenterID", datacenter_id)
            .with("Label", label)
            .with("ClientConnThrottle", throttle);
        Ok(self
            .call("nodebalancer.create", &args)
            .await?
            .single("NodeBalancerID")?)
    }

    /// Maps to `nodebalancer.delete`.
    pub async fn nodebalancer_delete(&self, nodebalancer_id: i64) -> Result<()> {
        let args = ApiArgs::new().with("NodeBalancerID", nodebalancer_id);
        self.call("nodebalancer.delete", &args).await?;
        Ok(())
    }

    /// Maps to `nodebalancer.list`.
    pub async fn nodebalancer_list(&self, nodebalancer_id: Option<i64>) -> Result<Vec<NodeBalancer>> {
        let args = ApiArgs::new().with("NodeBalancerID", nodebalancer_id);
        Ok(self.call("nodebalancer.list", &args).await?.records()?)
    }

    /// Maps to `nodebalancer.update`.
    pub async fn nodebalancer_update(
        &self,
        nodebalancer_id: i64,
        label: Option<&str>,
        throttle: Option<i64>,
    ) -> Result<()> {
        let args = ApiArgs::new()
            .with("NodeBalancerID", nodebalancer_id)
            .with("Label", label)
            .with("ClientConnThrottle", throttle);
        self.call("nodebalancer.update", &args).await?;
        Ok(())
    }

    /// Maps to `nodebalancer.config.create`.
    pub async fn nodebalancer_config_create(
        &self,
        nodebalancer_id: i64,
        opts: &NodeBalancerConfigOpts,
    ) -> Result<i64> {
        let args = ApiArgs::new().with("NodeBalancerID", nodebalancer_id);
        Ok(self
            .call_with("nodebalancer.config.create", opts, args)
            .await?
            .single("ConfigID")?)
    }

    /// Maps to `nodebalancer.config.delete`.
    pub async fn nodebalancer_config_delete(&self, nodebalancer_id: i64, config_id: i64) -> Result<()> {
        let args = ApiArgs::new()
            .with("NodeBalancerID", nodebalancer_id)
            .with("ConfigID", config_id);
        self.call("nodebalancer.config.delete", &args).await?;
        Ok(())
    }

    /// Maps to `nodebalancer.config.list`.
    pub async fn nodebalancer_config_list(
        &self,
        nodebalancer_id: i64,
        config_id: Option<i64>,
    ) -> Result<Vec<NodeBalancerConfig>> {
        let args = ApiArgs::new()
            .with("NodeBalancerID", nodebalancer_id)
            .with("ConfigID", config_id);
        Ok(self.call("nodebalancer.config.list", &args).await?.records()?)
    }

    /// Maps to `nodebalancer.config.update`.
    pub async fn nodebalancer_config_update(
        &self,
        config_id: i64,
        opts: &NodeBalancerConfigOpts,
    ) -> Result<()> {
        let args = ApiArgs::new().with("ConfigID", config_id);
        self.call_with("nodebalancer.config.update", opts, args).await?;
        Ok(())
    }

    /// Maps to `nodebalancer.node.create`. `address` is `ip:port`.
    pub async fn nodebalancer_node_create(
        &self,
        config_id: i64,
        label: &str,
        address: &str,
        weight: Option<i64>,
        mode: Option<&str>,
    ) -> Result<i64> {
        let args = ApiArgs::new()
            .with("ConfigID", config_id)
            .with("Label", label)
            .with("Address", address)
            .with("Weight", weight)
            .with("Mode", mode);
        Ok(self
            .call("nodebalancer.node.create", &args)
            .await?
            .single("NodeID")?)
    }

    /// Maps to `nodebalancer.node.delete`.
    pub async fn nodebalancer_node_delete(&self, node_id: i64) -> Result<()> {
        let args = ApiArgs::new().with("NodeID", node_id);
        self.call("nodebalancer.node.delete", &args).await?;
        Ok(())
    }

    /// Maps to `nodebalancer.node.list`.
    pub async fn nodebalancer_node_list(
        &self,
        config_id: i64,
        node_id: Option<i64>,
    ) -> Result<Vec<NodeBalancerNode>> {
        let args = ApiArgs::new()
            .with("ConfigID", config_id)
            .with("NodeID", node_id);
        Ok(self.call("nodebalancer.node.list", &args).await?.records()?)
    }

    /// Maps to `nodebalancer.node.update`.
    pub async fn nodebalancer_node_update(
        &self,
        node_id: i64,
        label: Option<&str>,
        address: Option<&str>,
        weight: Option<i64>,
        mode: Option<&str>,
    ) -> Result<()> {
        let args = ApiArgs::new()
            .with("NodeID", node_id)
            .with("Label", label)
            .with("Address", address)
            .with("Weight", weight)
            .with("Mode", mode);
        self.call("nodebalancer.node.update", &args).await?;
        Ok(())
    }
}
