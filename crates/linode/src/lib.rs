//! # linode
//!
//! Typed async client for the Linode classic (v3) API.
//!
//! Every remote action is a method on [`LinodeClient`], named after the
//! action (`linode.disk.createfromimage` becomes
//! [`linode_disk_create_from_image`](LinodeClient::linode_disk_create_from_image)).
//! Required arguments are plain parameters, optional ones are `Option`s or an
//! options structure with a builder. Responses are decoded into plain structs
//! that tolerate the server's loose typing: numbers sent as strings, booleans
//! sent as `0`/`1`, and empty strings standing in for zero.
//!
//! Actions that start background work return a job id; see [`jobs`] for
//! waiting on them.
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> miette::Result<()> {
//! use std::time::Duration;
//! use linode::{LinodeClient, LinodeOpts};
//!
//! let client = LinodeClient::new("my-api-key");
//! let linode_id = client.linode_create(2, 1, None).await?;
//! client
//!     .linode_update(linode_id, &LinodeOpts::new().label("web-1").watchdog(true).build())
//!     .await?;
//!
//! let disk = client
//!     .linode_disk_create_from_distribution(linode_id, 130, "root", 8192, "hunter22", None)
//!     .await?;
//! let outcome = client
//!     .wait_for_job(linode_id, disk.job_id, Duration::from_secs(3), Duration::from_secs(300))
//!     .await?;
//! assert!(outcome.is_success());
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Every call returns [`ClientError`]. Failures reported by the server keep
//! their numeric code and message; [`ClientError::remote`] gives access to
//! them:
//!
//! ```no_run
//! # async fn demo(client: &linode::LinodeClient<reqwest::Client>) {
//! match client.linode_list(Some(1)).await {
//!     Ok(linodes) => println!("{} found", linodes.len()),
//!     Err(e) => match e.remote() {
//!         Some(remote) if remote.code == 4 => println!("key rejected"),
//!         _ => eprintln!("{e}"),
//!     },
//! }
//! # }
//! ```
//!
//! ## Custom transports
//!
//! [`LinodeClient::with_http`] accepts anything implementing
//! [`HttpClient`](linode_common::http_client::HttpClient), which makes it
//! straightforward to point the client at a test double or a different HTTP
//! stack.

pub mod api;
pub mod client;
pub mod jobs;

pub use api::{
    AccountInfo, Datacenter, DiskJob, Distribution, Domain, DomainCreateOpts, DomainResource,
    DomainResourceCreateOpts, DomainResourceUpdateOpts, DomainUpdateOpts, EstimatedInvoice, Image,
    ImagizeJob, Kernel, Linode, LinodeConfig, LinodeConfigCreateOpts, LinodeConfigUpdateOpts,
    LinodeDisk, LinodeIp, LinodeOpts, LinodePlan, NodeBalancer, NodeBalancerConfig,
    NodeBalancerConfigOpts, NodeBalancerNode, PrivateIp, StackScript, StackScriptOpts,
};
pub use client::{ClientOptions, LinodeClient};
pub use jobs::{Job, JobOutcome, WaitError};

pub use linode_common as common;
pub use linode_common::{ApiArgs, ApiResponse, ClientError, Record, Result, ToArgs};
pub use linode_derive::{Record, ToArgs};
pub use tokio_util::sync::CancellationToken;
