//! `linode.*` actions: instances, configuration profiles, disks and IPs.
//!
//! Power and disk operations return a job id. Pass it to
//! [`LinodeClient::wait_for_job`] to block until the work is done.

use linode_common::http_client::HttpClient;
use linode_common::{ApiArgs, Result};
use linode_derive::{Record, ToArgs};

use crate::client::LinodeClient;

/// One entry of `linode.list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Record)]
pub struct Linode {
    #[record("LINODEID")]
    pub id: i64,
    #[record("LABEL")]
    pub label: String,
    #[record("LPM_DISPLAYGROUP")]
    pub display_group: String,
    /// -2 boot failed, -1 being created, 0 new, 1 running, 2 powered off
    #[record("STATUS")]
    pub status: i64,
    #[record("DATACENTERID")]
    pub datacenter_id: i64,
    #[record("PLANID")]
    pub plan_id: i64,
    #[record("DISTRIBUTIONVENDOR")]
    pub distribution_vendor: String,
    #[record("CREATE_DT")]
    pub create_dt: String,
    /// MB
    #[record("TOTALRAM")]
    pub total_ram: i64,
    /// MB
    #[record("TOTALHD")]
    pub total_hd: i64,
    /// GB per month
    #[record("TOTALXFER")]
    pub total_xfer: i64,
    #[record("WATCHDOG")]
    pub watchdog: bool,
    #[record("BACKUPSENABLED")]
    pub backups_enabled: bool,
    #[record("BACKUPWINDOW")]
    pub backup_window: i64,
    #[record("BACKUPWEEKLYDAY")]
    pub backup_weekly_day: i64,
    #[record("ALERT_CPU_ENABLED")]
    pub alert_cpu_enabled: bool,
    #[record("ALERT_CPU_THRESHOLD")]
    pub alert_cpu_threshold: i64,
    #[record("ALERT_DISKIO_ENABLED")]
    pub alert_diskio_enabled: bool,
    #[record("ALERT_DISKIO_THRESHOLD")]
    pub alert_diskio_threshold: i64,
    #[record("ALERT_BWIN_ENABLED")]
    pub alert_bwin_enabled: bool,
    #[record("ALERT_BWIN_THRESHOLD")]
    pub alert_bwin_threshold: i64,
    #[record("ALERT_BWOUT_ENABLED")]
    pub alert_bwout_enabled: bool,
    #[record("ALERT_BWOUT_THRESHOLD")]
    pub alert_bwout_threshold: i64,
    #[record("ALERT_BWQUOTA_ENABLED")]
    pub alert_bwquota_enabled: bool,
    #[record("ALERT_BWQUOTA_THRESHOLD")]
    pub alert_bwquota_threshold: i64,
}

/// Optional arguments of `linode.update`.
#[derive(Debug, Clone, Default, PartialEq, Eq, bon::Builder, ToArgs)]
#[builder(start_fn = new)]
pub struct LinodeOpts {
    #[args("label")]
    #[builder(into)]
    pub label: Option<String>,
    #[args("lpm_displayGroup")]
    #[builder(into)]
    pub display_group: Option<String>,
    #[args("Alert_cpu_enabled")]
    pub alert_cpu_enabled: Option<bool>,
    #[args("Alert_cpu_threshold")]
    pub alert_cpu_threshold: Option<i64>,
    #[args("Alert_diskio_enabled")]
    pub alert_diskio_enabled: Option<bool>,
    #[args("Alert_diskio_threshold")]
    pub alert_diskio_threshold: Option<i64>,
    #[args("Alert_bwin_enabled")]
    pub alert_bwin_enabled: Option<bool>,
    #[args("Alert_bwin_threshold")]
    pub alert_bwin_threshold: Option<i64>,
    #[args("Alert_bwout_enabled")]
    pub alert_bwout_enabled: Option<bool>,
    #[args("Alert_bwout_threshold")]
    pub alert_bwout_threshold: Option<i64>,
    #[args("Alert_bwquota_enabled")]
    pub alert_bwquota_enabled: Option<bool>,
    #[args("Alert_bwquota_threshold")]
    pub alert_bwquota_threshold: Option<i64>,
    /// Hour of day, 0 to 23
    #[args("backupWindow")]
    pub backup_window: Option<i64>,
    /// 0 Sunday to 6 Saturday
    #[args("backupWeeklyDay")]
    pub backup_weekly_day: Option<i64>,
    #[args("watchdog")]
    pub watchdog: Option<bool>,
}

/// Optional arguments of `linode.config.create`.
#[derive(Debug, Clone, Default, PartialEq, Eq, bon::Builder, ToArgs)]
#[builder(start_fn = new)]
pub struct LinodeConfigCreateOpts {
    #[args("Comments")]
    #[builder(into)]
    pub comments: Option<String>,
    /// MB, 0 for no limit
    #[args("RAMLimit")]
    pub ram_limit: Option<i64>,
    /// `paravirt` or `fullvirt`
    #[args("virt_mode")]
    #[builder(into)]
    pub virt_mode: Option<String>,
    /// `default`, `single` or `binbash`
    #[args("RunLevel")]
    #[builder(into)]
    pub run_level: Option<String>,
    #[args("RootDeviceNum")]
    pub root_device_num: Option<i64>,
    #[args("RootDeviceCustom")]
    #[builder(into)]
    pub root_device_custom: Option<String>,
    #[args("RootDeviceRO")]
    pub root_device_ro: Option<bool>,
    #[args("helper_disableUpdateDB")]
    pub helper_disable_update_db: Option<bool>,
    #[args("helper_distro")]
    pub helper_distro: Option<bool>,
    #[args("helper_xen")]
    pub helper_xen: Option<bool>,
    #[args("helper_depmod")]
    pub helper_depmod: Option<bool>,
    #[args("helper_network")]
    pub helper_network: Option<bool>,
    #[args("devtmpfs_automount")]
    pub devtmpfs_automount: Option<bool>,
}

/// Optional arguments of `linode.config.update`.
#[derive(Debug, Clone, Default, PartialEq, Eq, bon::Builder, ToArgs)]
#[builder(start_fn = new)]
pub struct LinodeConfigUpdateOpts {
    #[args("LinodeID")]
    pub linode_id: Option<i64>,
    #[args("KernelID")]
    pub kernel_id: Option<i64>,
    #[args("Comments")]
    #[builder(into)]
    pub comments: Option<String>,
    #[args("RAMLimit")]
    pub ram_limit: Option<i64>,
    #[args("virt_mode")]
    #[builder(into)]
    pub virt_mode: Option<String>,
    #[args("RunLevel")]
    #[builder(into)]
    pub run_level: Option<String>,
    #[args("RootDeviceNum")]
    pub root_device_num: Option<i64>,
    #[args("RootDeviceCustom")]
    #[builder(into)]
    pub root_device_custom: Option<String>,
    #[args("RootDeviceRO")]
    pub root_device_ro: Option<bool>,
    #[args("helper_disableUpdateDB")]
    pub helper_disable_update_db: Option<bool>,
    #[args("helper_distro")]
    pub helper_distro: Option<bool>,
    #[args("helper_xen")]
    pub helper_xen: Option<bool>,
    #[args("helper_depmod")]
    pub helper_depmod: Option<bool>,
    #[args("helper_network")]
    pub helper_network: Option<bool>,
    #[args("devtmpfs_automount")]
    pub devtmpfs_automount: Option<bool>,
}

/// One entry of `linode.config.list`.
///
/// The server sends these keys in mixed case, unlike most listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Record)]
pub struct LinodeConfig {
    #[record("ConfigID")]
    pub id: i64,
    #[record("LinodeID")]
    pub linode_id: i64,
    #[record("KernelID")]
    pub kernel_id: i64,
    #[record("Label")]
    pub label: String,
    #[record("Comments")]
    pub comments: String,
    /// Comma separated disk ids, one slot per device
    #[record("DiskList")]
    pub disk_list: String,
    #[record("RAMLimit")]
    pub ram_limit: i64,
    #[record("virt_mode")]
    pub virt_mode: String,
    #[record("RunLevel")]
    pub run_level: String,
    #[record("RootDeviceNum")]
    pub root_device_num: i64,
    #[record("RootDeviceCustom")]
    pub root_device_custom: String,
    #[record("RootDeviceRO")]
    pub root_device_ro: bool,
    #[record("isRescue")]
    pub is_rescue: bool,
    #[record("helper_disableUpdateDB")]
    pub helper_disable_update_db: bool,
    #[record("helper_distro")]
    pub helper_distro: bool,
    #[record("helper_xen")]
    pub helper_xen: bool,
    #[record("helper_depmod")]
    pub helper_depmod: bool,
    #[record("helper_network")]
    pub helper_network: bool,
    #[record("devtmpfs_automount")]
    pub devtmpfs_automount: bool,
}

/// Job and disk ids returned by the disk creation actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Record)]
pub struct DiskJob {
    #[record("JobID")]
    pub job_id: i64,
    #[record("DiskID")]
    pub disk_id: i64,
}

/// Job and image ids returned by `linode.disk.imagize`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Record)]
pub struct ImagizeJob {
    #[record("JobID")]
    pub job_id: i64,
    #[record("ImageID")]
    pub image_id: i64,
}

/// One entry of `linode.disk.list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Record)]
pub struct LinodeDisk {
    #[record("DISKID")]
    pub id: i64,
    #[record("LINODEID")]
    pub linode_id: i64,
    #[record("LABEL")]
    pub label: String,
    /// `ext4`, `swap`, `raw` and so on
    #[record("TYPE")]
    pub kind: String,
    #[record("ISREADONLY")]
    pub is_read_only: bool,
    #[record("STATUS")]
    pub status: i64,
    /// MB
    #[record("SIZE")]
    pub size: i64,
    #[record("CREATE_DT")]
    pub create_dt: String,
    #[record("UPDATE_DT")]
    pub update_dt: String,
}

/// Address returned by `linode.ip.addprivate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Record)]
pub struct PrivateIp {
    #[record("IPAddressID")]
    pub id: i64,
    #[record("IPAddress")]
    pub address: String,
}

/// One entry of `linode.ip.list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Record)]
pub struct LinodeIp {
    #[record("IPADDRESSID")]
    pub id: i64,
    #[record("LINODEID")]
    pub linode_id: i64,
    #[record("ISPUBLIC")]
    pub is_public: bool,
    #[record("IPADDRESS")]
    pub address: String,
    #[record("RDNS_NAME")]
    pub rdns_name: String,
}

impl<C: HttpClient> LinodeClient<C> {
    /// Maps to `linode.boot`, returning the job id.
    ///
    /// Without `config_id` the last booted profile is used.
    pub async fn linode_boot(&self, linode_id: i64, config_id: Option<i64>) -> Result<i64> {
        let args = ApiArgs::new()
            .with("LinodeID", linode_id)
            .with("ConfigID", config_id);
        Ok(self.call("linode.boot", &args).await?.single("JobID")?)
    }

    /// Maps to `linode.clone`, returning the new Linode's id.
    pub async fn linode_clone(
        &self,
        linode_id: i64,
        datacenter_id: i64,
        plan_id: i64,
        payment_term: Option<i64>,
        hypervisor: Option<&str>,
    ) -> Result<i64> {
        let args = ApiArgs::new()
            .with("LinodeID", linode_id)
            .with("DatacenterID", datacenter_id)
            .with("PlanID", plan_id)
            .with("PaymentTerm", payment_term)
            .with("hypervisor", hypervisor);
        Ok(self.call("linode.clone", &args).await?.single("LinodeID")?)
    }

    /// Maps to `linode.create`, returning the new Linode's id.
    pub async fn linode_create(
        &self,
        datacenter_id: i64,
        plan_id: i64,
        payment_term: Option<i64>,
    ) -> Result<i64> {
        let args = ApiArgs::new()
            .with("DatacenterID", datacenter_id)
            .with("PlanID", plan_id)
            .with("PaymentTerm", payment_term);
        Ok(self.call("linode.create", &args).await?.single("LinodeID")?)
    }

    /// Maps to `linode.delete`.
    ///
    /// The server refuses to delete a Linode that still has disks unless
    /// `skip_checks` is set.
    pub async fn linode_delete(&self, linode_id: i64, skip_checks: Option<bool>) -> Result<()> {
        let args = ApiArgs::new()
            .with("LinodeID", linode_id)
            .with("skipChecks", skip_checks);
        self.call("linode.delete", &args).await?;
        Ok(())
    }

    /// Maps to `linode.list`.
    pub async fn linode_list(&self, linode_id: Option<i64>) -> Result<Vec<Linode>> {
        let args = ApiArgs::new().with("LinodeID", linode_id);
        Ok(self.call("linode.list", &args).await?.records()?)
    }

    /// Maps to `linode.reboot`, returning the job id.
    pub async fn linode_reboot(&self, linode_id: i64, config_id: Option<i64>) -> Result<i64> {
        let args = ApiArgs::new()
            .with("LinodeID", linode_id)
            .with("ConfigID", config_id);
        Ok(self.call("linode.reboot", &args).await?.single("JobID")?)
    }

    /// Maps to `linode.resize`.
    pub async fn linode_resize(&self, linode_id: i64, plan_id: i64) -> Result<()> {
        let args = ApiArgs::new()
            .with("LinodeID", linode_id)
            .with("PlanID", plan_id);
        self.call("linode.resize", &args).await?;
        Ok(())
    }

    /// Maps to `linode.shutdown`, returning the job id.
    pub async fn linode_shutdown(&self, linode_id: i64) -> Result<i64> {
        let args = ApiArgs::new().with("LinodeID", linode_id);
        Ok(self.call("linode.shutdown", &args).await?.single("JobID")?)
    }

    /// Maps to `linode.update`.
    pub async fn linode_update(&self, linode_id: i64, opts: &LinodeOpts) -> Result<()> {
        let args = ApiArgs::new().with("LinodeID", linode_id);
        self.call_with("linode.update", opts, args).await?;
        Ok(())
    }

    /// Maps to `linode.config.create`, returning the new profile's id.
    pub async fn linode_config_create(
        &self,
        linode_id: i64,
        kernel_id: i64,
        label: &str,
        disk_list: &str,
        opts: &LinodeConfigCreateOpts,
    ) -> Result<i64> {
        let args = ApiArgs::new()
            .with("LinodeID", linode_id)
            .with("KernelID", kernel_id)
            .with("Label", label)
            .with("DiskList", disk_list);
        Ok(self
            .call_with("linode.config.create", opts, args)
            .await?
            .single("ConfigID")?)
    }

    /// Maps to `linode.config.delete`.
    pub async fn linode_config_delete(&self, linode_id: i64, config_id: i64) -> Result<()> {
        let args = ApiArgs::new()
            .with("LinodeID", linode_id)
            .with("ConfigID", config_id);
        self.call("linode.config.delete", &args).await?;
        Ok(())
    }

    /// Maps to `linode.config.list`.
    pub async fn linode_config_list(
        &self,
        linode_id: i64,
        config_id: Option<i64>,
    ) -> Result<Vec<LinodeConfig>> {
        let args = ApiArgs::new()
            .with("LinodeID", linode_id)
            .with("ConfigID", config_id);
        Ok(self.call("linode.config.list", &args).await?.records()?)
    }

    /// Maps to `linode.config.update`.
    pub async fn linode_config_update(
        &self,
        config_id: i64,
        opts: &LinodeConfigUpdateOpts,
    ) -> Result<()> {
        let args = ApiArgs::new().with("ConfigID", config_id);
        self.call_with("linode.config.update", opts, args).await?;
        Ok(())
    }

    /// Maps to `linode.disk.create`. `kind` is the filesystem type and `size`
    /// is in MB.
    pub async fn linode_disk_create(
        &self,
        linode_id: i64,
        label: &str,
        kind: &str,
        size: i64,
    ) -> Result<DiskJob> {
        let args = ApiArgs::new()
            .with("LinodeID", linode_id)
            .with("Label", label)
            .with("Type", kind)
            .with("Size", size);
        Ok(self.call("linode.disk.create", &args).await?.object()?)
    }

    /// Maps to `linode.disk.createfromdistribution`.
    pub async fn linode_disk_create_from_distribution(
        &self,
        linode_id: i64,
        distribution_id: i64,
        label: &str,
        size: i64,
        root_pass: &str,
        root_ssh_key: Option<&str>,
    ) -> Result<DiskJob> {
        let args = ApiArgs::new()
            .with("LinodeID", linode_id)
            .with("DistributionID", distribution_id)
            .with("Label", label)
            .with("Size", size)
            .with("rootPass", root_pass)
            .with("rootSSHKey", root_ssh_key);
        Ok(self
            .call("linode.disk.createfromdistribution", &args)
            .await?
            .object()?)
    }

    /// Maps to `linode.disk.createfromimage`.
    ///
    /// Without `size` the disk takes the image's minimum size.
    pub async fn linode_disk_create_from_image(
        &self,
        image_id: i64,
        linode_id: i64,
        label: &str,
        size: Option<i64>,
        root_pass: Option<&str>,
        root_ssh_key: Option<&str>,
    ) -> Result<DiskJob> {
        let args = ApiArgs::new()
            .with("ImageID", image_id)
            .with("LinodeID", linode_id)
            .with("Label", label)
            .with("size", size)
            .with("rootPass", root_pass)
            .with("rootSSHKey", root_ssh_key);
        Ok(self
            .call("linode.disk.createfromimage", &args)
            .await?
            .object()?)
    }

    /// Maps to `linode.disk.createfromstackscript`.
    ///
    /// `udf_responses` is the JSON object of answers to the script's
    /// user defined fields.
    #[allow(clippy::too_many_arguments)]
    pub async fn linode_disk_create_from_stackscript(
        &self,
        linode_id: i64,
        stackscript_id: i64,
        udf_responses: &str,
        distribution_id: i64,
        label: &str,
        size: i64,
        root_pass: &str,
        root_ssh_key: Option<&str>,
    ) -> Result<DiskJob> {
        let args = ApiArgs::new()
            .with("LinodeID", linode_id)
            .with("StackScriptID", stackscript_id)
            .with("StackScriptUDFResponses", udf_responses)
            .with("DistributionID", distribution_id)
            .with("Label", label)
            .with("Size", size)
            .with("rootPass", root_pass)
            .with("rootSSHKey", root_ssh_key);
        Ok(self
            .call("linode.disk.createfromstackscript", &args)
            .await?
            .object()?)
    }

    /// Maps to `linode.disk.delete`, returning the job id.
    pub async fn linode_disk_delete(&self, linode_id: i64, disk_id: i64) -> Result<i64> {
        let args = ApiArgs::new()
            .with("LinodeID", linode_id)
            .with("DiskID", disk_id);
        Ok(self.call("linode.disk.delete", &args).await?.single("JobID")?)
    }

    /// Maps to `linode.disk.duplicate`.
    pub async fn linode_disk_duplicate(&self, linode_id: i64, disk_id: i64) -> Result<DiskJob> {
        let args = ApiArgs::new()
            .with("LinodeID", linode_id)
            .with("DiskID", disk_id);
        Ok(self.call("linode.disk.duplicate", &args).await?.object()?)
    }

    /// Maps to `linode.disk.imagize`.
    pub async fn linode_disk_imagize(
        &self,
        linode_id: i64,
        disk_id: i64,
        description: Option<&str>,
        label: Option<&str>,
    ) -> Result<ImagizeJob> {
        let args = ApiArgs::new()
            .with("LinodeID", linode_id)
            .with("DiskID", disk_id)
            .with("Description", description)
            .with("Label", label);
        Ok(self.call("linode.disk.imagize", &args).await?.object()?)
    }

    /// Maps to `linode.disk.list`.
    pub async fn linode_disk_list(
        &self,
        linode_id: i64,
        disk_id: Option<i64>,
    ) -> Result<Vec<LinodeDisk>> {
        let args = ApiArgs::new()
            .with("LinodeID", linode_id)
            .with("DiskID", disk_id);
        Ok(self.call("linode.disk.list", &args).await?.records()?)
    }

    /// Maps to `linode.disk.resize`, returning the job id.
    pub async fn linode_disk_resize(&self, linode_id: i64, disk_id: i64, size: i64) -> Result<i64> {
        let args = ApiArgs::new()
            .with("LinodeID", linode_id)
            .with("DiskID", disk_id)
            .with("size", size);
        Ok(self.call("linode.disk.resize", &args).await?.single("JobID")?)
    }

    /// Maps to `linode.disk.update`.
    pub async fn linode_disk_update(
        &self,
        linode_id: i64,
        disk_id: i64,
        label: Option<&str>,
        read_only: Option<bool>,
    ) -> Result<()> {
        let args = ApiArgs::new()
            .with("LinodeID", linode_id)
            .with("DiskID", disk_id)
            .with("Label", label)
            .with("isReadOnly", read_only);
        self.call("linode.disk.update", &args).await?;
        Ok(())
    }

    /// Maps to `linode.ip.addprivate`.
    pub async fn linode_ip_add_private(&self, linode_id: i64) -> Result<PrivateIp> {
        let args = ApiArgs::new().with("LinodeID", linode_id);
        Ok(self.call("linode.ip.addprivate", &args).await?.object()?)
    }

    /// Maps to `linode.ip.list`.
    pub async fn linode_ip_list(
        &self,
        linode_id: Option<i64>,
        ip_address_id: Option<i64>,
    ) -> Result<Vec<LinodeIp>> {
        let args = ApiArgs::new()
            .with("LinodeID", linode_id)
            .with("IPAddressID", ip_address_id);
        Ok(self.call("linode.ip.list", &args).await?.records()?)
    }

    /// Maps to `linode.ip.swap`.
    ///
    /// Either swaps with `with_ip_address_id` or moves the address to
    /// `to_linode_id`.
    pub async fn linode_ip_swap(
        &self,
        ip_address_id: i64,
        with_ip_address_id: Option<i64>,
        to_linode_id: Option<i64>,
    ) -> Result<()> {
        let args = ApiArgs::new()
            .with("IPAddressID", ip_address_id)
            .with("withIPAddressID", with_ip_address_id)
            .with("toLinodeID", to_linode_id);
        self.call("linode.ip.swap", &args).await?;
        Ok(())
    }
}
