//! Group resources.
//!
//! See <https://developers.google.com/admin-sdk/directory/reference/rest/v1/groups>.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::resource::{DirectoryResource, Paginated, is_false, null_as_default};

/// A Google Workspace group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Always `admin#directory#group`.
    pub kind: String,
    /// Unique identifier of the group.
    pub id: String,
    /// Primary email address of the group.
    pub email: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Whether the group was created by an administrator.
    #[serde(default, skip_serializing_if = "is_false")]
    pub admin_created: bool,
    /// Number of direct members, encoded as a string by the API.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub direct_members_count: String,
    /// Alias email addresses, in API order.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub aliases: Vec<String>,
    /// Aliases outside the account's primary domain.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub non_editable_aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub etag: String,

    /// Fields not modelled above, kept as returned.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Group {
    /// Parses the string-encoded direct member count.
    pub fn direct_members(&self) -> Option<u64> {
        self.direct_members_count.parse().ok()
    }
}

impl DirectoryResource for Group {
    const KIND: &'static str = "admin#directory#group";

    fn kind(&self) -> &str {
        &self.kind
    }
}

/// One page of groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupList {
    /// Always `admin#directory#groups`.
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub etag: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub groups: Vec<Group>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl DirectoryResource for GroupList {
    const KIND: &'static str = "admin#directory#groups";

    fn kind(&self) -> &str {
        &self.kind
    }
}

impl Paginated for GroupList {
    type Item = Group;

    fn items(&self) -> &[Group] {
        &self.groups
    }

    fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }
}
