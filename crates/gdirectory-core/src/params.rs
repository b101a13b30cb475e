//! Typed request parameters for the Directory API.
//!
//! Each `Get*Params` struct serializes to the query parameters of its
//! endpoint: keys use the API's camelCase names, unset filters are omitted and
//! path keys (`groupKey`, `memberKey`, `userKey` of the single-resource
//! calls) are never serialized.

use serde::{Serialize, Serializer};

use crate::member::Role;
use crate::resource::wire_enum;

wire_enum! {
    /// Sort direction for list calls.
    pub enum SortOrder: "sort order" {
        Ascending => "ASCENDING",
        Descending => "DESCENDING",
    }
}

wire_enum! {
    /// Sort key accepted by `groups.list`.
    pub enum GroupOrderBy: "group order" {
        Email => "email",
    }
}

wire_enum! {
    /// Sort key accepted by `users.list`.
    pub enum UserOrderBy: "user order" {
        Email => "email",
        FamilyName => "familyName",
        GivenName => "givenName",
    }
}

wire_enum! {
    /// Which subset of user fields to fetch.
    pub enum Projection: "projection" {
        Basic => "basic",
        /// Include the custom schemas named in `customFieldMask`.
        Custom => "custom",
        Full => "full",
    }
}

wire_enum! {
    /// Whether to fetch the administrator or the domain-public view of a user.
    pub enum ViewType: "view type" {
        AdminView => "admin_view",
        DomainPublic => "domain_public",
    }
}

/// Role filter for `members.list`.
///
/// The API takes a single comma-separated string; callers may hand over a
/// single role, a list of roles, or an already formatted string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Roles {
    One(Role),
    Many(Vec<Role>),
    /// Forwarded untouched.
    Raw(String),
}

impl Roles {
    /// Returns the value sent on the wire.
    pub fn to_query_value(&self) -> String {
        match self {
            Self::One(role) => role.as_str().to_string(),
            Self::Many(roles) => roles
                .iter()
                .map(Role::as_str)
                .collect::<Vec<_>>()
                .join(","),
            Self::Raw(raw) => raw.clone(),
        }
    }
}

impl Serialize for Roles {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_query_value())
    }
}

impl From<Role> for Roles {
    fn from(role: Role) -> Self {
        Self::One(role)
    }
}

impl From<Vec<Role>> for Roles {
    fn from(roles: Vec<Role>) -> Self {
        Self::Many(roles)
    }
}

impl From<&[Role]> for Roles {
    fn from(roles: &[Role]) -> Self {
        Self::Many(roles.to_vec())
    }
}

impl From<String> for Roles {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}

impl From<&str> for Roles {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_string())
    }
}

/// Pagination controls shared by the list calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

/// Parameters for `GET /groups`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetGroupsParams {
    /// Customer ID, or `my_customer` for the caller's account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<GroupOrderBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    /// Only list the groups this user or group belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_key: Option<String>,
    #[serde(flatten)]
    pub page: PageParams,
}

impl GetGroupsParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_user_key(mut self, user_key: impl Into<String>) -> Self {
        self.user_key = Some(user_key.into());
        self
    }

    pub fn with_order(mut self, order_by: GroupOrderBy, sort_order: SortOrder) -> Self {
        self.order_by = Some(order_by);
        self.sort_order = Some(sort_order);
        self
    }

    pub fn with_max_results(mut self, max: u32) -> Self {
        self.page.max_results = Some(max);
        self
    }

    pub fn with_page_token(mut self, token: impl Into<String>) -> Self {
        self.page.page_token = Some(token.into());
        self
    }
}

/// Parameters for `GET /groups/{groupKey}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetGroupParams {
    /// Group email address, alias or unique ID.
    pub group_key: String,
}

impl GetGroupParams {
    pub fn new(group_key: impl Into<String>) -> Self {
        Self {
            group_key: group_key.into(),
        }
    }
}

/// Parameters for `GET /groups/{groupKey}/members`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetMembersParams {
    #[serde(skip)]
    pub group_key: String,
    /// Also list members of nested groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_derived_membership: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Roles>,
    #[serde(flatten)]
    pub page: PageParams,
}

impl GetMembersParams {
    pub fn new(group_key: impl Into<String>) -> Self {
        Self {
            group_key: group_key.into(),
            include_derived_membership: None,
            roles: None,
            page: PageParams::default(),
        }
    }

    pub fn with_derived_membership(mut self, include: bool) -> Self {
        self.include_derived_membership = Some(include);
        self
    }

    pub fn with_roles(mut self, roles: impl Into<Roles>) -> Self {
        self.roles = Some(roles.into());
        self
    }

    pub fn with_max_results(mut self, max: u32) -> Self {
        self.page.max_results = Some(max);
        self
    }

    pub fn with_page_token(mut self, token: impl Into<String>) -> Self {
        self.page.page_token = Some(token.into());
        self
    }
}

/// Parameters for `GET /groups/{groupKey}/members/{memberKey}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetMemberParams {
    pub group_key: String,
    /// Member email address or unique ID.
    pub member_key: String,
}

impl GetMemberParams {
    pub fn new(group_key: impl Into<String>, member_key: impl Into<String>) -> Self {
        Self {
            group_key: group_key.into(),
            member_key: member_key.into(),
        }
    }
}

/// Parameters for `GET /users`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUsersParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<UserOrderBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<Projection>,
    /// Comma-separated schema names, used with [`Projection::Custom`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_field_mask: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_type: Option<ViewType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// List deleted users instead of active ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    #[serde(flatten)]
    pub page: PageParams,
}

impl GetUsersParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }

    pub fn with_view_type(mut self, view_type: ViewType) -> Self {
        self.view_type = Some(view_type);
        self
    }

    pub fn with_show_deleted(mut self, show_deleted: bool) -> Self {
        self.show_deleted = Some(show_deleted);
        self
    }

    pub fn with_order(mut self, order_by: UserOrderBy, sort_order: SortOrder) -> Self {
        self.order_by = Some(order_by);
        self.sort_order = Some(sort_order);
        self
    }

    pub fn with_max_results(mut self, max: u32) -> Self {
        self.page.max_results = Some(max);
        self
    }

    pub fn with_page_token(mut self, token: impl Into<String>) -> Self {
        self.page.page_token = Some(token.into());
        self
    }
}

/// Parameters for `GET /users/{userKey}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUserParams {
    /// Primary email address, alias email or unique ID.
    #[serde(skip)]
    pub user_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<Projection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_type: Option<ViewType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_field_mask: Option<String>,
}

impl GetUserParams {
    pub fn new(user_key: impl Into<String>) -> Self {
        Self {
            user_key: user_key.into(),
            projection: None,
            view_type: None,
            custom_field_mask: None,
        }
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }

    pub fn with_view_type(mut self, view_type: ViewType) -> Self {
        self.view_type = Some(view_type);
        self
    }

    pub fn with_custom_field_mask(mut self, mask: impl Into<String>) -> Self {
        self.custom_field_mask = Some(mask.into());
        self
    }
}
