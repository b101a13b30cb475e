//! Group membership resources.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::resource::{DirectoryResource, Paginated, null_as_default, wire_enum};

wire_enum! {
    /// A member's role within a group.
    pub enum Role: "role" {
        Owner => "OWNER",
        Manager => "MANAGER",
        Member => "MEMBER",
    }
}

wire_enum! {
    /// The kind of entity a membership refers to.
    pub enum MemberType: "member type" {
        /// The whole customer account.
        Customer => "CUSTOMER",
        /// A member outside the account's domains.
        External => "EXTERNAL",
        Group => "GROUP",
        User => "USER",
    }
}

wire_enum! {
    /// Status of a membership.
    pub enum MemberStatus: "member status" {
        Active => "ACTIVE",
        Archived => "ARCHIVED",
        Suspended => "SUSPENDED",
        Unknown => "UNKNOWN",
    }
}

/// A member of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Always `admin#directory#member`.
    pub kind: String,
    /// Unique identifier; absent for some external members.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    pub role: Role,
    #[serde(rename = "type")]
    pub member_type: MemberType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MemberStatus>,
    /// Mail delivery preference, e.g. `ALL_MAIL`.
    #[serde(
        rename = "delivery_settings",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub delivery_settings: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub etag: String,

    /// Fields not modelled above, kept as returned.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DirectoryResource for Member {
    const KIND: &'static str = "admin#directory#member";

    fn kind(&self) -> &str {
        &self.kind
    }
}

/// One page of group members.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberList {
    /// Always `admin#directory#members`.
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub etag: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub members: Vec<Member>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl DirectoryResource for MemberList {
    const KIND: &'static str = "admin#directory#members";

    fn kind(&self) -> &str {
        &self.kind
    }
}

impl Paginated for MemberList {
    type Item = Member;

    fn items(&self) -> &[Member] {
        &self.members
    }

    fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }
}
