use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{
    records::{flavor_from_body, recipe_from_search},
    FlavorRecord, NutritionError, NutritionSource, RecipeRecord,
};
use crate::config::NutritionConfig;

const PROXY_PREFIX: &str = "/api-proxy";
const RECIPE_SEARCH_PATH: &str = "/recipedb/recipe2-api/recipe/search";
const FLAVOR_ALIAS_PATH: &str = "/flavordb/entities/by-entity-alias-readable";

/// Talks to RecipeDB and FlavorDB through the shared proxy.
#[derive(Debug, Clone)]
pub struct ProxyNutritionClient {
    client: reqwest::Client,
    endpoint: String,
    bearer_token: String,
}

impl ProxyNutritionClient {
    pub fn new(client: reqwest::Client, proxy_url: &str, bearer_token: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", proxy_url.trim_end_matches('/'), PROXY_PREFIX),
            bearer_token: bearer_token.to_string(),
        }
    }

    pub fn from_config(cfg: &NutritionConfig) -> anyhow::Result<Self> {
        let client = crate::http::client(cfg.timeout_secs)?;
        Ok(Self::new(client, &cfg.proxy_url, &cfg.bearer_token))
    }

    /// GET `path` with one query parameter. Non-2xx is a miss, not an error.
    async fn get_json(
        &self,
        path: &str,
        param: (&str, &str),
    ) -> Result<Option<Value>, NutritionError> {
        let url = format!("{}{}", self.endpoint, path);
        debug!(%url, "nutrition lookup");

        let response = self
            .client
            .get(&url)
            .query(&[param])
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", self.bearer_token),
            )
            .send()
            .await
            .map_err(|e| NutritionError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, path, "nutrition lookup returned non-success status");
            return Ok(None);
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| NutritionError::Decode(e.to_string()))?;
        Ok(Some(body))
    }
}

#[async_trait]
impl NutritionSource for ProxyNutritionClient {
    async fn search_recipe(&self, dish: &str) -> Result<Option<RecipeRecord>, NutritionError> {
        let recipe = self
            .get_json(RECIPE_SEARCH_PATH, ("q", dish))
            .await?
            .and_then(|body| recipe_from_search(&body));

        match &recipe {
            Some(r) => info!(title = r.title.as_deref().unwrap_or(""), "RecipeDB match found"),
            None => info!(dish, "RecipeDB: no match"),
        }
        Ok(recipe)
    }

    async fn search_flavor(&self, dish: &str) -> Result<Option<FlavorRecord>, NutritionError> {
        let flavor = self
            .get_json(FLAVOR_ALIAS_PATH, ("alias", dish))
            .await?
            .and_then(|body| flavor_from_body(&body));

        info!(dish, found = flavor.is_some(), "FlavorDB lookup finished");
        Ok(flavor)
    }
}

#[cfg(test)]
mod client_tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ProxyNutritionClient {
        ProxyNutritionClient::new(reqwest::Client::new(), &server.uri(), "anon-token")
    }

    #[tokio::test]
    async fn recipe_search_sends_query_and_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api-proxy/recipedb/recipe2-api/recipe/search"))
            .and(query_param("q", "Pav Bhaji"))
            .and(header("Authorization", "Bearer anon-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "payload": { "data": [{ "Recipe_title": "Pav Bhaji", "Energy": "400" }] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let recipe = client(&server)
            .search_recipe("Pav Bhaji")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(recipe.title.as_deref(), Some("Pav Bhaji"));
        assert_eq!(recipe.energy, Some(400.0));
    }

    #[tokio::test]
    async fn flavor_search_uses_alias_param() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api-proxy/flavordb/entities/by-entity-alias-readable"))
            .and(query_param("alias", "Dal Makhani"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "entity_alias_readable": "Dal Makhani",
                "category_readable": "Legume Dish"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let flavor = client(&server)
            .search_flavor("Dal Makhani")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(flavor.category.as_deref(), Some("Legume Dish"));
    }

    #[tokio::test]
    async fn non_success_status_is_a_miss() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client(&server);
        assert!(client.search_recipe("Dosa").await.unwrap().is_none());
        assert!(client.search_flavor("Dosa").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn invalid_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client(&server).search_recipe("Dosa").await.unwrap_err();
        assert!(matches!(err, NutritionError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_proxy_is_request_error() {
        let client = ProxyNutritionClient::new(reqwest::Client::new(), "http://127.0.0.1:1", "");
        let err = client.search_flavor("Dosa").await.unwrap_err();
        assert!(matches!(err, NutritionError::RequestFailed(_)));
    }
}
