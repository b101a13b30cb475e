//! The Directory API data source.

use std::fmt;
use std::sync::Arc;

use gdirectory_core::{
    GetGroupParams, GetGroupsParams, GetMemberParams, GetMembersParams, GetUserParams,
    GetUsersParams, Group, GroupList, Member, MemberList, User, UserList,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::AccessTokenProvider;
use crate::config::DirectoryConfig;
use crate::error::{SourceError, SourceResult};
use crate::query::query_pairs;
use crate::transport::{GetRequest, HttpGet};

/// Typed, read-only access to groups, members and users.
///
/// Every call fetches a token from the credential object, then issues exactly
/// one GET through the transport. Nothing is retried or cached here; token
/// caching is up to the credential and timeouts are up to the transport.
/// Path keys are inserted into the URL exactly as given.
#[derive(Clone)]
pub struct DirectoryDataSource {
    credentials: Arc<dyn AccessTokenProvider>,
    transport: Arc<dyn HttpGet>,
    base_url: String,
}

impl DirectoryDataSource {
    pub fn new(credentials: Arc<dyn AccessTokenProvider>, transport: Arc<dyn HttpGet>) -> Self {
        Self {
            credentials,
            transport,
            base_url: DirectoryConfig::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Wires an [`OAuthClient`](crate::google::OAuthClient) and a
    /// [`ReqwestTransport`](crate::google::ReqwestTransport) from `config`.
    #[cfg(feature = "google")]
    pub fn from_config(config: &DirectoryConfig) -> SourceResult<Self> {
        use crate::google::{OAuthClient, ReqwestTransport};

        config.validate()?;
        let credentials = OAuthClient::from_config(config)?;
        let transport = ReqwestTransport::from_config(config)?;

        Ok(Self::new(Arc::new(credentials), Arc::new(transport)).with_base_url(&config.base_url))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns a fresh access token from the credential object.
    ///
    /// Fails with an authentication error when the credential yields no
    /// token (or an empty one). Errors raised by the credential itself are
    /// returned as-is.
    pub async fn get_authorization(&self) -> SourceResult<String> {
        match self.credentials.access_token().await? {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(SourceError::authentication(
                "Unable to retrieve the client access token",
            )),
        }
    }

    /// `GET /groups`
    pub async fn get_groups(&self, params: &GetGroupsParams) -> SourceResult<GroupList> {
        self.fetch("/groups".to_string(), params).await
    }

    /// `GET /groups/{groupKey}`
    pub async fn get_group(&self, params: &GetGroupParams) -> SourceResult<Group> {
        self.fetch(format!("/groups/{}", params.group_key), &()).await
    }

    /// `GET /groups/{groupKey}/members`
    pub async fn get_members(&self, params: &GetMembersParams) -> SourceResult<MemberList> {
        self.fetch(format!("/groups/{}/members", params.group_key), params)
            .await
    }

    /// `GET /groups/{groupKey}/members/{memberKey}`
    pub async fn get_member(&self, params: &GetMemberParams) -> SourceResult<Member> {
        self.fetch(
            format!("/groups/{}/members/{}", params.group_key, params.member_key),
            &(),
        )
        .await
    }

    /// `GET /users`
    pub async fn get_users(&self, params: &GetUsersParams) -> SourceResult<UserList> {
        self.fetch("/users".to_string(), params).await
    }

    /// `GET /users/{userKey}`
    pub async fn get_user(&self, params: &GetUserParams) -> SourceResult<User> {
        self.fetch(format!("/users/{}", params.user_key), params)
            .await
    }

    async fn fetch<T, P>(&self, path: String, params: &P) -> SourceResult<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let token = self.get_authorization().await?;
        let query = query_pairs(&token, params)?;

        let keys: Vec<&str> = query.iter().skip(1).map(|(k, _)| k.as_str()).collect();
        debug!(path = %path, params = ?keys, "directory request");

        let request = GetRequest::new(self.base_url.as_str(), path).with_query(query);
        let value = self.transport.get(request).await?;

        serde_json::from_value(value).map_err(|e| {
            SourceError::invalid_response(format!(
                "unexpected {} payload: {}",
                std::any::type_name::<T>().rsplit("::").next().unwrap_or("response"),
                e
            ))
            .with_source(e)
        })
    }
}

impl fmt::Debug for DirectoryDataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryDataSource")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
