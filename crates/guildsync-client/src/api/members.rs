//! Member endpoints.

use crate::GuildSyncClient;
use guildsync_core::{GuildRef, Member, MemberProfile, Result, Snowflake};
use reqwest::{Method, StatusCode};

/// Member endpoints
pub struct MembersApi<'a> {
    client: &'a GuildSyncClient,
}

impl<'a> MembersApi<'a> {
    pub(crate) fn new(client: &'a GuildSyncClient) -> Self {
        Self { client }
    }

    /// Fetch one member; `None` when the backend does not answer 200
    pub async fn get(&self, member_id: Snowflake) -> Result<Option<Member>> {
        let url = self
            .client
            .endpoint(&format!("/api/members/{member_id}/"), &[])?;
        self.client.get_optional(&url).await
    }

    /// Register a member; `None` unless the backend answers 201 Created
    pub async fn create(&self, profile: &MemberProfile) -> Result<Option<Member>> {
        let url = self.client.endpoint("/api/members/", &[])?;
        self.client
            .post_form_optional(&url, profile, StatusCode::CREATED)
            .await
    }

    /// Push a new display name and avatar for a member
    pub async fn update(&self, profile: &MemberProfile) -> Result<()> {
        let url = self
            .client
            .endpoint(&format!("/api/members/{}/", profile.id), &[])?;
        self.client.mutate(Method::PATCH, &url, Some(profile)).await
    }

    /// All members registered with an e-mail address
    pub async fn by_email(&self, email: &str) -> Result<Vec<Member>> {
        let url = self.client.endpoint("/api/members/", &[("email", email)])?;
        self.client.fetch_paginated(url).await
    }

    /// Record that a member joined a guild
    pub async fn join_server(&self, member_id: Snowflake, guild_id: Snowflake) -> Result<()> {
        let url = self
            .client
            .endpoint(&format!("/api/members/{member_id}/server/"), &[])?;
        self.client
            .mutate(Method::POST, &url, Some(&GuildRef { id: guild_id }))
            .await
    }

    /// Record that a member left a guild
    pub async fn leave_server(&self, member_id: Snowflake, guild_id: Snowflake) -> Result<()> {
        let url = self
            .client
            .endpoint(&format!("/api/members/{member_id}/server/"), &[])?;
        self.client
            .mutate(Method::DELETE, &url, Some(&GuildRef { id: guild_id }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guildsync_core::SyncError;
    use serde_json::json;
    use wiremock::matchers::{body_string, body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_member() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/members/42/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 42,
                "name": "someone#0001",
                "icon_url": null,
                "email": "someone@example.org"
            })))
            .mount(&server)
            .await;

        let client = GuildSyncClient::new(server.uri(), "t").unwrap();
        let member = client.members().get(Snowflake(42)).await.unwrap().unwrap();

        assert_eq!(member.id, Snowflake(42));
        assert_eq!(member.name.as_deref(), Some("someone#0001"));
        assert_eq!(member.field("email"), Some(&json!("someone@example.org")));
    }

    #[tokio::test]
    async fn test_get_unknown_member_is_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/members/7/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = GuildSyncClient::new(server.uri(), "t").unwrap();
        assert!(client.members().get(Snowflake(7)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_member_created() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/members/"))
            .and(body_string("id=5&name=new%231234&icon_url=https%3A%2F%2Fcdn%2Fa.png"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "5",
                "name": "new#1234",
                "icon_url": "https://cdn/a.png"
            })))
            .mount(&server)
            .await;

        let client = GuildSyncClient::new(server.uri(), "t").unwrap();
        let profile = MemberProfile::new(5, "new#1234").icon_url("https://cdn/a.png");
        let member = client.members().create(&profile).await.unwrap();

        assert_eq!(member.map(|m| m.id), Some(Snowflake(5)));
    }

    #[tokio::test]
    async fn test_create_member_other_status_is_absent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/members/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5})))
            .mount(&server)
            .await;

        let client = GuildSyncClient::new(server.uri(), "t").unwrap();
        let member = client
            .members()
            .create(&MemberProfile::new(5, "dup"))
            .await
            .unwrap();

        assert!(member.is_none());
    }

    #[tokio::test]
    async fn test_update_member_omits_missing_avatar() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/members/9/"))
            .and(body_string("id=9&name=renamed"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = GuildSyncClient::new(server.uri(), "t").unwrap();
        client
            .members()
            .update(&MemberProfile::new(9, "renamed"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_by_email_is_paginated() {
        let server = MockServer::start().await;
        let uri = server.uri();
        Mock::given(method("GET"))
            .and(path("/api/members/"))
            .and(query_param("email", "a@b.c"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"id": 1}],
                "next": format!("{uri}/api/members/page2/")
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/members/page2/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"id": 2}],
                "next": null
            })))
            .mount(&server)
            .await;

        let client = GuildSyncClient::new(&uri, "t").unwrap();
        let members = client.members().by_email("a@b.c").await.unwrap();
        let ids: Vec<_> = members.iter().map(|m| m.id).collect();

        assert_eq!(ids, vec![Snowflake(1), Snowflake(2)]);
    }

    #[tokio::test]
    async fn test_join_and_leave_server() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/members/3/server/"))
            .and(body_string("id=77"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/members/3/server/"))
            .and(body_string_contains("id=77"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = GuildSyncClient::new(server.uri(), "t").unwrap();
        client
            .members()
            .join_server(Snowflake(3), Snowflake(77))
            .await
            .unwrap();
        client
            .members()
            .leave_server(Snowflake(3), Snowflake(77))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_leave_server_reports_failure() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = GuildSyncClient::new(server.uri(), "t").unwrap();
        let err = client
            .members()
            .leave_server(Snowflake(3), Snowflake(77))
            .await
            .unwrap_err();

        assert!(matches!(err, SyncError::Api { code: 404, .. }));
    }
}
