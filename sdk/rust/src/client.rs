use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// A synthetic response as seen over the wire.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    pub status: u16,
    /// Header names lowercased; repeated fields joined with ", ".
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl FetchedResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Client for a running preview surface.
///
/// Redirects are not followed so they can be inspected.
pub struct OriginClient {
    client: Client,
    base_url: String,
}

impl OriginClient {
    pub fn new(base_url: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `GET` a path beneath the reserved origin.
    pub async fn fetch(&self, path: &str) -> Result<FetchedResponse, Box<dyn std::error::Error>> {
        self.call("GET", path, None, &[]).await
    }

    /// Issue an arbitrary request.
    pub async fn call(
        &self,
        method: &str,
        path: &str,
        body: Option<Vec<u8>>,
        headers: &[(&str, &str)],
    ) -> Result<FetchedResponse, Box<dyn std::error::Error>> {
        let method = Method::from_bytes(method.as_bytes())?;
        let mut request = self.client.request(method, self.url(path));
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let resp = request.send().await?;
        let status = resp.status().as_u16();

        let mut collected = BTreeMap::new();
        for (name, value) in resp.headers() {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            collected
                .entry(name.as_str().to_string())
                .and_modify(|existing: &mut String| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert(value);
        }

        let body = resp.bytes().await?.to_vec();
        Ok(FetchedResponse {
            status,
            headers: collected,
            body,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
