//! Directory use cases - bulk imports of profiles and groups.

mod bulk_upload_groups;
mod bulk_upload_profiles;

pub use bulk_upload_groups::{
    BulkUploadGroupsCommand, BulkUploadGroupsError, BulkUploadGroupsHandler,
    BulkUploadGroupsResult,
};
pub use bulk_upload_profiles::{
    BulkUploadProfilesCommand, BulkUploadProfilesError, BulkUploadProfilesHandler,
    BulkUploadProfilesResult,
};
