//! `image.*` actions.

use linode_common::http_client::HttpClient;
use linode_common::{ApiArgs, Result};
use linode_derive::Record;

use crate::client::LinodeClient;

/// One entry of `image.list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Record)]
pub struct Image {
    #[record("IMAGEID")]
    pub id: i64,
    #[record("LABEL")]
    pub label: String,
    #[record("DESCRIPTION")]
    pub description: String,
    #[record("CREATE_DT")]
    pub create_dt: String,
    #[record("CREATOR")]
    pub creator: String,
    #[record("FS_TYPE")]
    pub fs_type: String,
    #[record("ISPUBLIC")]
    pub is_public: bool,
    #[record("LAST_USED_DT")]
    pub last_used_dt: String,
    /// MB
    #[record("MINSIZE")]
    pub min_size: i64,
    #[record("STATUS")]
    pub status: String,
    #[record("TYPE")]
    pub kind: String,
}

impl<C: HttpClient> LinodeClient<C> {
    /// Maps to `image.delete`.
    pub async fn image_delete(&self, image_id: i64) -> Result<()> {
        let args = ApiArgs::new().with("ImageID", image_id);
        self.call("image.delete", &args).await?;
        Ok(())
    }

    /// Maps to `image.list`. `pending_only` is sent int-encoded.
    pub async fn image_list(
        &self,
        image_id: Option<i64>,
        pending_only: Option<bool>,
    ) -> Result<Vec<Image>> {
        let mut args = ApiArgs::new().with("ImageID", image_id);
        args.set_int_bool("pendingOnly", pending_only);
        Ok(self.call("image.list", &args).await?.records()?)
    }

    /// Maps to `image.update`.
    pub async fn image_update(
        &self,
        image_id: i64,
        label: Option<&str>,
        description: Option<&str>,
    ) -> Result<()> {
        let args = ApiArgs::new()
            .with("ImageID", image_id)
            .with("label", label)
            .with("description", description);
        self.call("image.update", &args).await?;
        Ok(())
    }
}
