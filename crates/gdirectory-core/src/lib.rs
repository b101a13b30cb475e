//! Core types: directory resources, request parameters, tracing

pub mod group;
pub mod member;
pub mod params;
pub mod resource;
pub mod tracing;
pub mod user;

pub use group::{Group, GroupList};
pub use member::{Member, MemberList, MemberStatus, MemberType, Role};
pub use params::{
    GetGroupParams, GetGroupsParams, GetMemberParams, GetMembersParams, GetUserParams,
    GetUsersParams, GroupOrderBy, PageParams, Projection, Roles, SortOrder, UserOrderBy, ViewType,
};
pub use resource::{DirectoryResource, Paginated, ParseEnumError};
pub use crate::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use user::{User, UserEmail, UserGender, UserList, UserName};
