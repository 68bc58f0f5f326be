//! Typed operations, one per remote action.
//!
//! Each submodule adds methods to [`LinodeClient`](crate::LinodeClient) for one
//! group of actions, together with the records and options structures those
//! actions use. Required arguments are plain parameters; optional ones are
//! `Option`s or an options structure built with its `new()` builder.

pub mod account;
pub mod avail;
pub mod dns;
pub mod image;
pub mod linode;
pub mod nodebalancer;
pub mod stackscript;

pub use account::{AccountInfo, EstimatedInvoice};
pub use avail::{Datacenter, Distribution, Kernel, LinodePlan};
pub use dns::{
    Domain, DomainCreateOpts, DomainResource, DomainResourceCreateOpts, DomainResourceUpdateOpts,
    DomainUpdateOpts,
};
pub use image::Image;
pub use self::linode::{
    DiskJob, ImagizeJob, Linode, LinodeConfig, LinodeConfigCreateOpts, LinodeConfigUpdateOpts,
    LinodeDisk, LinodeIp, LinodeOpts, PrivateIp,
};
pub use nodebalancer::{NodeBalancer, NodeBalancerConfig, NodeBalancerConfigOpts, NodeBalancerNode};
pub use stackscript::{StackScript, StackScriptOpts};
