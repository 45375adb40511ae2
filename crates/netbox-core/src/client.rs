//! HTTP client for the NetBox REST API.
//!
//! Wraps a [`reqwest::Client`] with token authentication, paginated list
//! handling, and mapping of non-success responses into [`NetBoxError`].

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{NetBoxError, Result};

/// Paginated envelope returned by NetBox list endpoints.
#[derive(Debug, Deserialize)]
struct ListResponse {
    count: u64,
    next: Option<String>,
    results: Vec<Value>,
}

/// Client for a single NetBox instance.
///
/// Cheap to clone; the underlying `reqwest::Client` holds the connection
/// pool.
#[derive(Debug, Clone)]
pub struct NetBoxClient {
    http: Client,
    base_url: Url,
    token: String,
}

impl NetBoxClient {
    /// Create a client for the NetBox instance at `base_url`.
    ///
    /// The URL is normalized to end with a slash so endpoint joins keep
    /// any path prefix NetBox is mounted under.
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url =
            Url::parse(&normalized).map_err(|e| NetBoxError::InvalidUrl(e.to_string()))?;

        Ok(Self {
            http: Client::new(),
            base_url,
            token: token.to_string(),
        })
    }

    /// URL for a list endpoint, e.g. `api/dcim/devices/`.
    fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        self.base_url
            .join(&format!("api/{}/", endpoint.trim_matches('/')))
            .map_err(|e| NetBoxError::InvalidUrl(e.to_string()))
    }

    /// URL for a single object, e.g. `api/dcim/devices/123/`.
    fn object_url(&self, endpoint: &str, id: u64) -> Result<Url> {
        self.base_url
            .join(&format!("api/{}/{}/", endpoint.trim_matches('/'), id))
            .map_err(|e| NetBoxError::InvalidUrl(e.to_string()))
    }

    /// Attach auth headers, send, and turn non-success statuses into errors.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = request
            .header("Authorization", format!("Token {}", self.token))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(NetBoxError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// List objects at `endpoint`, applying `filters` as query parameters.
    ///
    /// Follows the paginated envelope's `next` links until exhausted and
    /// returns the accumulated results.
    pub async fn list(&self, endpoint: &str, filters: &Map<String, Value>) -> Result<Vec<Value>> {
        let url = self.endpoint_url(endpoint)?;
        let query = filters_to_query(filters);

        tracing::debug!(%url, params = query.len(), "Fetching objects");

        let response = self.send(self.http.get(url).query(&query)).await?;
        let mut page: ListResponse = response.json().await?;

        let mut results = std::mem::take(&mut page.results);
        let mut next = page.next;

        // NetBox returns absolute URLs in `next`, query string included.
        while let Some(next_url) = next {
            let url = Url::parse(&next_url).map_err(|e| NetBoxError::InvalidUrl(e.to_string()))?;
            let response = self.send(self.http.get(url)).await?;
            let mut page: ListResponse = response.json().await?;
            results.append(&mut page.results);
            next = page.next;
        }

        tracing::debug!(count = results.len(), "Fetched objects");
        Ok(results)
    }

    /// Count objects at `endpoint` matching `filters`.
    ///
    /// Requests a single-item page and reads the envelope's `count` so the
    /// server does the counting.
    pub async fn count(&self, endpoint: &str, filters: &Map<String, Value>) -> Result<u64> {
        let url = self.endpoint_url(endpoint)?;
        let mut query = filters_to_query(filters);
        query.push(("limit".to_string(), "1".to_string()));

        let response = self.send(self.http.get(url).query(&query)).await?;
        let page: ListResponse = response.json().await?;
        Ok(page.count)
    }

    /// Fetch a single object by ID.
    pub async fn detail(&self, endpoint: &str, id: u64) -> Result<Value> {
        let url = self.object_url(endpoint, id)?;
        let response = self.send(self.http.get(url)).await?;
        Ok(response.json().await?)
    }

    /// Create an object, returning the created representation.
    pub async fn create(&self, endpoint: &str, data: &Value) -> Result<Value> {
        let url = self.endpoint_url(endpoint)?;
        let response = self.send(self.http.post(url).json(data)).await?;
        Ok(response.json().await?)
    }

    /// Partially update an object (PATCH), returning the new representation.
    pub async fn update(&self, endpoint: &str, id: u64, data: &Value) -> Result<Value> {
        let url = self.object_url(endpoint, id)?;
        let response = self.send(self.http.patch(url).json(data)).await?;
        Ok(response.json().await?)
    }

    /// Delete an object by ID.
    pub async fn delete(&self, endpoint: &str, id: u64) -> Result<()> {
        let url = self.object_url(endpoint, id)?;
        self.send(self.http.delete(url)).await?;
        Ok(())
    }
}

/// Flatten JSON filter values into query string pairs.
///
/// Arrays expand into repeated parameters, which NetBox treats as OR
/// filters (`?status=active&status=planned`). Scalars render without JSON
/// quoting.
fn filters_to_query(filters: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in filters {
        match value {
            Value::Array(items) => {
                for item in items {
                    pairs.push((key.clone(), scalar_to_string(item)));
                }
            }
            other => pairs.push((key.clone(), scalar_to_string(other))),
        }
    }
    pairs
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> NetBoxClient {
        NetBoxClient::new("https://netbox.example.com", "token").unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        assert!(NetBoxClient::new("not a url", "token").is_err());
    }

    #[test]
    fn test_endpoint_url() {
        let url = client().endpoint_url("dcim/devices").unwrap();
        assert_eq!(url.as_str(), "https://netbox.example.com/api/dcim/devices/");
    }

    #[test]
    fn test_endpoint_url_keeps_path_prefix() {
        let client = NetBoxClient::new("https://example.com/netbox", "token").unwrap();
        let url = client.endpoint_url("ipam/prefixes").unwrap();
        assert_eq!(url.as_str(), "https://example.com/netbox/api/ipam/prefixes/");
    }

    #[test]
    fn test_object_url() {
        let url = client().object_url("dcim/devices", 123).unwrap();
        assert_eq!(
            url.as_str(),
            "https://netbox.example.com/api/dcim/devices/123/"
        );
    }

    #[test]
    fn test_filters_to_query_scalars() {
        let filters = json!({
            "name": "router1",
            "site_id": 7,
            "has_primary_ip": true,
        });
        let pairs = filters_to_query(filters.as_object().unwrap());
        assert!(pairs.contains(&("name".to_string(), "router1".to_string())));
        assert!(pairs.contains(&("site_id".to_string(), "7".to_string())));
        assert!(pairs.contains(&("has_primary_ip".to_string(), "true".to_string())));
    }

    #[test]
    fn test_filters_to_query_expands_arrays() {
        let filters = json!({ "status": ["active", "planned"] });
        let pairs = filters_to_query(filters.as_object().unwrap());
        assert_eq!(
            pairs,
            vec![
                ("status".to_string(), "active".to_string()),
                ("status".to_string(), "planned".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_follows_next_links_and_sends_auth_headers() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let second_page_url = format!("http://{addr}/api/dcim/devices/?limit=50&offset=50");
        let pages = vec![
            json!({
                "count": 2,
                "next": second_page_url,
                "previous": null,
                "results": [{"id": 1, "name": "router1"}]
            })
            .to_string(),
            json!({
                "count": 2,
                "next": null,
                "previous": null,
                "results": [{"id": 2, "name": "router2"}]
            })
            .to_string(),
        ];

        // Serve each canned page on its own connection and capture the
        // raw requests so header invariants can be checked.
        let fake_netbox = tokio::spawn(async move {
            let mut requests = Vec::new();
            for body in pages {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut buf = vec![0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap();
                requests.push(String::from_utf8_lossy(&buf[..n]).to_string());

                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
            }
            requests
        });

        let client = NetBoxClient::new(&format!("http://{addr}"), "s3cr3t").unwrap();
        let results = client
            .list("dcim/devices", &Default::default())
            .await
            .unwrap();

        // Both pages accumulated, in order, stopping at next = null
        assert_eq!(
            results,
            vec![
                json!({"id": 1, "name": "router1"}),
                json!({"id": 2, "name": "router2"}),
            ]
        );

        let requests = fake_netbox.await.unwrap();
        assert_eq!(requests.len(), 2);
        for request in &requests {
            let lowered = request.to_lowercase();
            assert!(
                lowered.contains("authorization: token s3cr3t"),
                "{request}"
            );
            assert!(lowered.contains("accept: application/json"), "{request}");
        }
        // Second request hits the next link, query string included
        assert!(requests[1].contains("offset=50"), "{}", requests[1]);
    }

    #[test]
    fn test_list_response_envelope_parses() {
        let body = json!({
            "count": 42,
            "next": "https://netbox.example.com/api/dcim/devices/?limit=50&offset=50",
            "previous": null,
            "results": [{"id": 1, "name": "router1"}]
        });
        let page: ListResponse = serde_json::from_value(body).unwrap();
        assert_eq!(page.count, 42);
        assert!(page.next.is_some());
        assert_eq!(page.results.len(), 1);
    }
}
