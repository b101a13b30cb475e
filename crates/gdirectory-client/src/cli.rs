//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use gdirectory_core::{
    GetGroupsParams, GetMembersParams, GetUserParams, GetUsersParams, GroupOrderBy, PageParams,
    Projection, Role, Roles, SortOrder, UserOrderBy, ViewType,
};

/// gdirectory - Read groups, members and users from the Google Admin Directory
#[derive(Debug, Parser)]
#[command(name = "gdirectory")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "GDIRECTORY_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print a fresh OAuth access token
    Token,

    /// Groups of the account
    Groups {
        #[command(subcommand)]
        action: GroupsAction,
    },

    /// Members of a group
    Members {
        #[command(subcommand)]
        action: MembersAction,
    },

    /// Users of the account
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Pagination flags shared by the list commands.
#[derive(Debug, Clone, Default, Args)]
pub struct PageArgs {
    /// Maximum number of results per page
    #[arg(long)]
    pub max_results: Option<u32>,

    /// Token of the page to fetch, from a previous `nextPageToken`
    #[arg(long)]
    pub page_token: Option<String>,
}

impl From<PageArgs> for PageParams {
    fn from(args: PageArgs) -> Self {
        Self {
            max_results: args.max_results,
            page_token: args.page_token,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum GroupsAction {
    /// List one page of groups
    List(GroupsListArgs),

    /// Show a single group
    Get {
        /// Group email address, alias or unique ID
        group_key: String,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct GroupsListArgs {
    /// Customer ID, or `my_customer` for the caller's account
    #[arg(long)]
    pub customer: Option<String>,

    /// Only groups of this domain
    #[arg(long)]
    pub domain: Option<String>,

    /// Search query, e.g. `email:admins*`
    #[arg(long)]
    pub query: Option<String>,

    /// Only groups this user or group is a member of
    #[arg(long)]
    pub user_key: Option<String>,

    /// Sort key (email)
    #[arg(long)]
    pub order_by: Option<GroupOrderBy>,

    /// ascending or descending
    #[arg(long)]
    pub sort_order: Option<SortOrder>,

    #[command(flatten)]
    pub page: PageArgs,
}

impl GroupsListArgs {
    pub fn into_params(self) -> GetGroupsParams {
        GetGroupsParams {
            customer: self.customer,
            domain: self.domain,
            order_by: self.order_by,
            query: self.query,
            sort_order: self.sort_order,
            user_key: self.user_key,
            page: self.page.into(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum MembersAction {
    /// List one page of members of a group
    List(MembersListArgs),

    /// Show a single membership
    Get {
        /// Group email address, alias or unique ID
        group_key: String,
        /// Member email address or unique ID
        member_key: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct MembersListArgs {
    /// Group email address, alias or unique ID
    pub group_key: String,

    /// Also list members of nested groups
    #[arg(long)]
    pub include_derived_membership: bool,

    /// Only these roles, comma separated (OWNER,MANAGER,MEMBER)
    #[arg(long, value_delimiter = ',')]
    pub roles: Vec<Role>,

    #[command(flatten)]
    pub page: PageArgs,
}

impl MembersListArgs {
    pub fn into_params(self) -> GetMembersParams {
        GetMembersParams {
            group_key: self.group_key,
            include_derived_membership: self.include_derived_membership.then_some(true),
            roles: (!self.roles.is_empty()).then(|| Roles::Many(self.roles)),
            page: self.page.into(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum UsersAction {
    /// List one page of users
    List(UsersListArgs),

    /// Show a single user
    Get(UserGetArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct UsersListArgs {
    /// Customer ID, or `my_customer` for the caller's account
    #[arg(long)]
    pub customer: Option<String>,

    /// Only users of this domain
    #[arg(long)]
    pub domain: Option<String>,

    /// Search query, e.g. `orgUnitPath=/Sales`
    #[arg(long)]
    pub query: Option<String>,

    /// Sort key (email, familyName, givenName)
    #[arg(long)]
    pub order_by: Option<UserOrderBy>,

    /// ascending or descending
    #[arg(long)]
    pub sort_order: Option<SortOrder>,

    /// basic, custom or full
    #[arg(long)]
    pub projection: Option<Projection>,

    /// admin_view or domain_public
    #[arg(long)]
    pub view_type: Option<ViewType>,

    /// Custom schemas to include with `--projection custom`
    #[arg(long)]
    pub custom_field_mask: Option<String>,

    /// List deleted users instead
    #[arg(long)]
    pub show_deleted: bool,

    #[command(flatten)]
    pub page: PageArgs,
}

impl UsersListArgs {
    pub fn into_params(self) -> GetUsersParams {
        GetUsersParams {
            customer: self.customer,
            domain: self.domain,
            order_by: self.order_by,
            projection: self.projection,
            custom_field_mask: self.custom_field_mask,
            view_type: self.view_type,
            query: self.query,
            show_deleted: self.show_deleted.then_some(true),
            sort_order: self.sort_order,
            page: self.page.into(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct UserGetArgs {
    /// Primary email address, alias or unique ID
    pub user_key: String,

    #[arg(long)]
    pub projection: Option<Projection>,

    #[arg(long)]
    pub view_type: Option<ViewType>,

    #[arg(long)]
    pub custom_field_mask: Option<String>,
}

impl UserGetArgs {
    pub fn into_params(self) -> GetUserParams {
        GetUserParams {
            user_key: self.user_key,
            projection: self.projection,
            view_type: self.view_type,
            custom_field_mask: self.custom_field_mask,
        }
    }
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration, secrets redacted
    Dump,

    /// Validate configuration and resolve credentials
    Validate,

    /// Show configuration file path
    Path,
}
