use crate::error::Result;
use crate::models::DescribeInfo;

/// Port for binding workspaces on the host toolkit
pub trait GeodatabaseHost {
    type Workspace: Workspace;

    /// Bind a workspace handle for the geodatabase at `path`
    fn bind(&self, path: &str) -> Result<Self::Workspace>;
}

/// A bound geodatabase workspace.
///
/// Every listing and describe call goes through the handle, so there is no
/// process-wide current workspace to drift.
pub trait Workspace {
    /// Path the handle is bound to
    fn path(&self) -> &str;

    /// Tables at the workspace root
    fn list_tables(&self) -> Result<Vec<String>>;

    /// Rasters at the workspace root
    fn list_rasters(&self) -> Result<Vec<String>>;

    /// Feature datasets in the workspace
    fn list_feature_datasets(&self) -> Result<Vec<String>>;

    /// Feature classes in `dataset`, or at the root when `None`
    fn list_feature_classes(&self, dataset: Option<&str>) -> Result<Vec<String>>;

    /// Introspect an item by full path
    fn describe(&self, item_path: &str) -> Result<DescribeInfo>;
}
