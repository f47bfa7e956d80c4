//! Server (guild) endpoints.

use crate::GuildSyncClient;
use guildsync_core::{GuildProfile, GuildRef, RawServer, Result, Snowflake};
use reqwest::Method;

/// Server (guild) endpoints
pub struct ServersApi<'a> {
    client: &'a GuildSyncClient,
}

impl<'a> ServersApi<'a> {
    pub(crate) fn new(client: &'a GuildSyncClient) -> Self {
        Self { client }
    }

    /// Every server record, across all pages
    pub async fn list(&self) -> Result<Vec<RawServer>> {
        let url = self.client.endpoint("/api/servers/", &[])?;
        self.client.fetch_paginated(url).await
    }

    /// One server record; any status but 200 is a fetch failure
    pub async fn get(&self, guild_id: Snowflake) -> Result<RawServer> {
        let url = self
            .client
            .endpoint(&format!("/api/servers/{guild_id}/"), &[])?;
        self.client.get_json(&url).await
    }

    /// Register a guild the bot just joined
    pub async fn register(&self, guild_id: Snowflake) -> Result<()> {
        let url = self.client.endpoint("/api/servers/", &[])?;
        self.client
            .mutate(Method::POST, &url, Some(&GuildRef { id: guild_id }))
            .await
    }

    /// Push a new display name and icon for a guild
    pub async fn update(&self, profile: &GuildProfile) -> Result<()> {
        let url = self
            .client
            .endpoint(&format!("/api/servers/{}/", profile.id), &[])?;
        self.client.mutate(Method::PATCH, &url, Some(profile)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guildsync_core::SyncError;
    use serde_json::json;
    use wiremock::matchers::{body_string, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_server_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/servers/1/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = GuildSyncClient::new(server.uri(), "t").unwrap();
        let err = client.servers().get(Snowflake(1)).await.unwrap_err();

        assert!(matches!(err, SyncError::FetchFailed { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_get_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/servers/1/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1,
                "name": "Guild",
                "rank_set": [],
                "ban_set": [],
                "emails_domains": [{"domain": "example.org"}]
            })))
            .mount(&server)
            .await;

        let client = GuildSyncClient::new(server.uri(), "t").unwrap();
        let raw = client.servers().get(Snowflake(1)).await.unwrap();

        assert_eq!(raw.id, Some(Snowflake(1)));
        assert_eq!(raw.emails_domains[0].domain, "example.org");
    }

    #[tokio::test]
    async fn test_register_and_update() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/servers/"))
            .and(body_string("id=8"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/api/servers/8/"))
            .and(body_string("id=8&name=Renamed&icon_url=https%3A%2F%2Fcdn%2Fi.png"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = GuildSyncClient::new(server.uri(), "t").unwrap();
        client.servers().register(Snowflake(8)).await.unwrap();
        client
            .servers()
            .update(&GuildProfile::new(8, "Renamed").icon_url("https://cdn/i.png"))
            .await
            .unwrap();
    }
}
