//! Directory commands: one request per invocation, JSON on stdout.

use serde::Serialize;
use tracing::debug;

use gdirectory_core::{GetGroupParams, GetMemberParams};
use gdirectory_source::DirectoryDataSource;

use crate::cli::{Command, GroupsAction, MembersAction, UsersAction};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Builds a network-backed data source from the client configuration.
pub fn connect(config: &ClientConfig) -> ClientResult<DirectoryDataSource> {
    let directory = config.to_directory_config()?;
    debug!(base_url = %directory.base_url, "connecting to directory API");
    Ok(DirectoryDataSource::from_config(&directory)?)
}

/// Serializes a result as pretty or single-line JSON.
pub fn render_json<T: Serialize>(value: &T, compact: bool) -> ClientResult<String> {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    rendered.map_err(|e| ClientError::Output(format!("failed to serialize result: {}", e)))
}

/// Executes a directory command and returns what should be printed.
///
/// Configuration commands are not handled here.
pub async fn execute(
    source: &DirectoryDataSource,
    command: Command,
    compact: bool,
) -> ClientResult<String> {
    match command {
        Command::Token => Ok(source.get_authorization().await?),
        Command::Groups { action } => match action {
            GroupsAction::List(args) => {
                render_json(&source.get_groups(&args.into_params()).await?, compact)
            }
            GroupsAction::Get { group_key } => render_json(
                &source.get_group(&GetGroupParams::new(group_key)).await?,
                compact,
            ),
        },
        Command::Members { action } => match action {
            MembersAction::List(args) => {
                render_json(&source.get_members(&args.into_params()).await?, compact)
            }
            MembersAction::Get {
                group_key,
                member_key,
            } => render_json(
                &source
                    .get_member(&GetMemberParams::new(group_key, member_key))
                    .await?,
                compact,
            ),
        },
        Command::Users { action } => match action {
            UsersAction::List(args) => {
                render_json(&source.get_users(&args.into_params()).await?, compact)
            }
            UsersAction::Get(args) => {
                render_json(&source.get_user(&args.into_params()).await?, compact)
            }
        },
        Command::Config { .. } => Err(ClientError::Config(
            "config commands do not use the directory API".to_string(),
        )),
    }
}

/// Executes a directory command and prints its output.
pub async fn run(source: &DirectoryDataSource, command: Command, compact: bool) -> ClientResult<()> {
    let output = execute(source, command, compact).await?;
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{GroupsListArgs, MembersListArgs, PageArgs};
    use gdirectory_core::Role;
    use gdirectory_source::{
        AccessTokenProvider, BoxFuture, GetRequest, HttpGet, SourceErrorCode, SourceResult,
    };
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    struct FixedToken;

    impl AccessTokenProvider for FixedToken {
        fn access_token(&self) -> BoxFuture<'_, SourceResult<Option<String>>> {
            Box::pin(async { Ok(Some("cli-token".to_string())) })
        }
    }

    struct Canned {
        body: Value,
        seen: Mutex<Vec<GetRequest>>,
    }

    impl HttpGet for Canned {
        fn get(&self, request: GetRequest) -> BoxFuture<'_, SourceResult<Value>> {
            self.seen.lock().unwrap().push(request);
            let body = self.body.clone();
            Box::pin(async move { Ok(body) })
        }
    }

    fn source_with(body: Value) -> (DirectoryDataSource, Arc<Canned>) {
        let transport = Arc::new(Canned {
            body,
            seen: Mutex::new(Vec::new()),
        });
        let source = DirectoryDataSource::new(Arc::new(FixedToken), transport.clone());
        (source, transport)
    }

    #[tokio::test]
    async fn token_prints_the_raw_token() {
        let (source, transport) = source_with(json!({}));
        let output = execute(&source, Command::Token, false).await.unwrap();
        assert_eq!(output, "cli-token");
        assert!(transport.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn groups_get_prints_pretty_json() {
        let (source, transport) = source_with(json!({
            "kind": "admin#directory#group",
            "id": "03x",
            "etag": "e",
            "email": "eng@example.com",
            "name": "Engineering"
        }));

        let command = Command::Groups {
            action: GroupsAction::Get {
                group_key: "eng@example.com".to_string(),
            },
        };
        let output = execute(&source, command, false).await.unwrap();

        assert_eq!(
            transport.seen.lock().unwrap()[0].path,
            "/groups/eng@example.com"
        );
        let printed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(printed["email"], "eng@example.com");
        assert!(output.contains('\n'));
    }

    #[tokio::test]
    async fn groups_list_compact_keeps_page_token() {
        let (source, _) = source_with(json!({
            "kind": "admin#directory#groups",
            "etag": "e",
            "groups": [],
            "nextPageToken": "p2"
        }));

        let command = Command::Groups {
            action: GroupsAction::List(GroupsListArgs::default()),
        };
        let output = execute(&source, command, true).await.unwrap();

        insta::assert_snapshot!(
            output,
            @r#"{"kind":"admin#directory#groups","etag":"e","groups":[],"nextPageToken":"p2"}"#
        );
    }

    #[tokio::test]
    async fn members_list_sends_joined_roles() {
        let (source, transport) = source_with(json!({ "kind": "admin#directory#members" }));

        let command = Command::Members {
            action: MembersAction::List(MembersListArgs {
                group_key: "g1".to_string(),
                include_derived_membership: false,
                roles: vec![Role::Owner, Role::Manager],
                page: PageArgs::default(),
            }),
        };
        execute(&source, command, true).await.unwrap();

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0].path, "/groups/g1/members");
        assert_eq!(seen[0].query_value("roles"), Some("OWNER,MANAGER"));
    }

    #[tokio::test]
    async fn decoding_failures_surface_as_source_errors() {
        let (source, _) = source_with(json!({ "kind": "admin#directory#member" }));

        let command = Command::Members {
            action: MembersAction::Get {
                group_key: "g1".to_string(),
                member_key: "m1".to_string(),
            },
        };
        let err = execute(&source, command, false).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Source(ref e) if e.code() == SourceErrorCode::InvalidResponse
        ));
    }
}
