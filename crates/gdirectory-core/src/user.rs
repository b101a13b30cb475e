//! User resources.
//!
//! Timestamps (`creationTime`, `lastLoginTime`) are kept as the opaque
//! strings the API returns.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::resource::{DirectoryResource, Paginated, is_false, null_as_default};

/// A user's name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserName {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub family_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub given_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub full_name: String,
}

impl UserName {
    /// Returns true if no part of the name is set.
    pub fn is_empty(&self) -> bool {
        self.family_name.is_empty() && self.given_name.is_empty() && self.full_name.is_empty()
    }
}

/// One of a user's email addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEmail {
    pub address: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub primary: bool,
}

/// Gender descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGender {
    #[serde(rename = "type")]
    pub gender_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_me_as: Option<String>,
}

/// A Google Workspace user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Always `admin#directory#user`.
    pub kind: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub etag: String,
    pub primary_email: String,
    #[serde(default, skip_serializing_if = "UserName::is_empty")]
    pub name: UserName,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub emails: Vec<UserEmail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<UserGender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_unit_path: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_admin: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_delegated_admin: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub agreed_to_terms: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub suspended: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspension_reason: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub archived: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub change_password_at_next_login: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub ip_whitelisted: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub include_in_global_address_list: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_mailbox_setup: bool,
    #[serde(default, rename = "isEnrolledIn2Sv", skip_serializing_if = "is_false")]
    pub is_enrolled_in_2sv: bool,
    #[serde(default, rename = "isEnforcedIn2Sv", skip_serializing_if = "is_false")]
    pub is_enforced_in_2sv: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_photo_etag: Option<String>,

    /// Custom schema values, present with the `custom` or `full` projection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_schemas: Option<Map<String, Value>>,
    /// Fields not modelled above, kept as returned.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Returns the address flagged as primary, falling back to `primaryEmail`.
    pub fn primary_address(&self) -> &str {
        self.emails
            .iter()
            .find(|e| e.primary)
            .map(|e| e.address.as_str())
            .unwrap_or(&self.primary_email)
    }
}

impl DirectoryResource for User {
    const KIND: &'static str = "admin#directory#user";

    fn kind(&self) -> &str {
        &self.kind
    }
}

/// One page of users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserList {
    /// Always `admin#directory#users`.
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub etag: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub users: Vec<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl DirectoryResource for UserList {
    const KIND: &'static str = "admin#directory#users";

    fn kind(&self) -> &str {
        &self.kind
    }
}

impl Paginated for UserList {
    type Item = User;

    fn items(&self) -> &[User] {
        &self.users
    }

    fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_JSON: &str = r#"{
        "kind": "admin#directory#user",
        "id": "115136614780728779802",
        "etag": "\"u\"",
        "primaryEmail": "jane@example.com",
        "name": {"givenName": "Jane", "familyName": "Doe", "fullName": "Jane Doe"},
        "isAdmin": true,
        "isDelegatedAdmin": false,
        "lastLoginTime": "2020-03-02T09:15:31.000Z",
        "creationTime": "2018-06-11T08:32:39.000Z",
        "agreedToTerms": true,
        "suspended": false,
        "archived": false,
        "changePasswordAtNextLogin": false,
        "ipWhitelisted": false,
        "emails": [
            {"address": "jane@example.com", "primary": true},
            {"address": "jane.doe@example.com"}
        ],
        "gender": {"type": "female"},
        "customerId": "C01abcde",
        "orgUnitPath": "/Engineering",
        "isMailboxSetup": true,
        "isEnrolledIn2Sv": true,
        "isEnforcedIn2Sv": false,
        "includeInGlobalAddressList": true,
        "recoveryEmail": "jane@personal.example",
        "recoveryPhone": "+33600000000",
        "thumbnailPhotoUrl": "https://example.com/photo.jpg",
        "thumbnailPhotoEtag": "\"p\""
    }"#;

    #[test]
    fn parse_user() {
        let user: User = serde_json::from_str(USER_JSON).unwrap();
        assert!(user.has_expected_kind());
        assert_eq!(user.name.full_name, "Jane Doe");
        assert!(user.is_admin);
        assert!(user.is_enrolled_in_2sv);
        assert!(!user.is_enforced_in_2sv);
        assert_eq!(user.emails.len(), 2);
        assert!(!user.emails[1].primary);
        assert_eq!(user.gender.as_ref().unwrap().gender_type, "female");
        assert_eq!(user.last_login_time.as_deref(), Some("2020-03-02T09:15:31.000Z"));
        assert_eq!(user.org_unit_path.as_deref(), Some("/Engineering"));
    }

    #[test]
    fn two_step_flags_keep_api_casing() {
        let user: User = serde_json::from_str(USER_JSON).unwrap();
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["isEnrolledIn2Sv"], true);
        assert!(value.get("isEnrolledIn2sv").is_none());
    }

    #[test]
    fn primary_address_prefers_flagged_email() {
        let mut user: User = serde_json::from_str(USER_JSON).unwrap();
        user.primary_email = "other@example.com".to_string();
        assert_eq!(user.primary_address(), "jane@example.com");

        user.emails.clear();
        assert_eq!(user.primary_address(), "other@example.com");
    }

    #[test]
    fn parse_minimal_user() {
        let json = r#"{
            "kind": "admin#directory#user",
            "id": "1",
            "primaryEmail": "min@example.com"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert!(!user.is_admin);
        assert!(user.gender.is_none());
        assert!(user.name.full_name.is_empty());
    }

    #[test]
    fn custom_schemas_and_unmodelled_fields_are_kept() {
        let json = serde_json::json!({
            "kind": "admin#directory#user",
            "id": "1",
            "primaryEmail": "a@example.com",
            "customSchemas": {"HR": {"team": "eng"}},
            "organizations": [{"name": "Example", "primary": true}]
        });

        let user: User = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(user.custom_schemas.as_ref().unwrap()["HR"]["team"], "eng");
        assert_eq!(user.extra["organizations"][0]["name"], "Example");

        // Nothing defaulted on decode is written back.
        assert_eq!(serde_json::to_value(&user).unwrap(), json);
    }

    #[test]
    fn parse_user_list() {
        let json = format!(
            r#"{{"kind": "admin#directory#users", "etag": "e", "users": [{}], "nextPageToken": "n"}}"#,
            USER_JSON
        );

        let list: UserList = serde_json::from_str(&json).unwrap();
        assert!(list.has_expected_kind());
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.next_page_token(), Some("n"));
    }
}
