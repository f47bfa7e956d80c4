//! Ban listing.

use crate::GuildSyncClient;
use guildsync_core::{BanFilter, BanRecord, Result, Snowflake};

/// Ban listing endpoints
pub struct BansApi<'a> {
    client: &'a GuildSyncClient,
}

impl<'a> BansApi<'a> {
    pub(crate) fn new(client: &'a GuildSyncClient) -> Self {
        Self { client }
    }

    /// Bans of one server, optionally restricted by kind and value.
    ///
    /// Only the filters that are set are sent.
    pub async fn list(&self, guild_id: Snowflake, filter: &BanFilter) -> Result<Vec<BanRecord>> {
        let server = guild_id.to_string();
        let kind = filter.kind.map(|k| k.to_string());

        let mut params = vec![("server", server.as_str())];
        if let Some(ref k) = kind {
            params.push(("type", k.as_str()));
        }
        if let Some(ref v) = filter.value {
            params.push(("value", v.as_str()));
        }

        let url = self.client.endpoint("/api/bans/", &params)?;
        self.client.fetch_paginated(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guildsync_core::BanKind;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_bans_with_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/bans/"))
            .and(query_param("server", "12"))
            .and(query_param("type", "email"))
            .and(query_param("value", "x@y.z"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"type": "email", "value": "x@y.z", "server": 12}],
                "next": null
            })))
            .mount(&server)
            .await;

        let client = GuildSyncClient::new(server.uri(), "t").unwrap();
        let filter = BanFilter::default().kind(BanKind::Email).value("x@y.z");
        let bans = client.bans().list(Snowflake(12), &filter).await.unwrap();

        assert_eq!(bans.len(), 1);
        assert_eq!(bans[0].kind, BanKind::Email);
        assert_eq!(bans[0].server, Some(Snowflake(12)));
    }

    #[tokio::test]
    async fn test_list_bans_without_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/bans/"))
            .and(query_param("server", "12"))
            .and(query_param_is_missing("type"))
            .and(query_param_is_missing("value"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"type": "user", "value": 5}],
                "next": null
            })))
            .mount(&server)
            .await;

        let client = GuildSyncClient::new(server.uri(), "t").unwrap();
        let bans = client
            .bans()
            .list(Snowflake(12), &BanFilter::default())
            .await
            .unwrap();

        assert_eq!(bans[0].value, "5");
        assert_eq!(bans[0].server, None);
    }
}
