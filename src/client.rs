use std::path::PathBuf;

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client, Method, Response, StatusCode,
};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{config::Configs, consts, credentials, errors::HkError};

/// Single-shot authenticated client for the platform API.
pub struct ApiClient {
    client: Client,
    configs: Configs,
}

impl ApiClient {
    pub fn new(configs: &Configs) -> Result<Self, HkError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .user_agent(consts::get_user_agent())
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            configs: configs.clone(),
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, HkError> {
        self.request(Method::GET, &self.configs.api_endpoint(path))
            .await
    }

    /// Sends one request to an absolute `url` and decodes the JSON body into `T`.
    /// Credentials are resolved for the URL's host on every call.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
    ) -> Result<T, HkError> {
        let mut url = Url::parse(url).map_err(|e| HkError::InvalidUrl(url.to_owned(), e))?;
        let credential = credentials::resolve(&url, &self.netrc_path())?;

        // user-info is sent as a basic auth header only
        let _ = url.set_password(None);
        let _ = url.set_username("");

        tracing::debug!(%method, %url, "sending request");
        let response = self
            .client
            .request(method, url)
            .basic_auth(&credential.login, Some(&credential.secret))
            .send()
            .await?;

        classify(response).await
    }

    fn netrc_path(&self) -> PathBuf {
        self.configs.netrc_path()
    }
}

async fn classify<T: DeserializeOwned>(response: Response) -> Result<T, HkError> {
    let status = response.status();
    tracing::debug!(status = status.as_u16(), "received response");

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(HkError::Unauthorized);
    }

    if !status.is_success() {
        let head = format!("{response:?}");
        let body = response.text().await.unwrap_or_default();
        return Err(HkError::UnexpectedStatus {
            response: format!("{head}\n{body}"),
        });
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(HkError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::App;
    use tempfile::TempDir;
    use wiremock::matchers::{basic_auth, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn authed_url(server: &MockServer, route: &str) -> String {
        format!("http://user:pass@{}{}", server.address(), route)
    }

    fn client_for(home: &TempDir, api_url: Option<String>) -> ApiClient {
        ApiClient::new(&Configs::with_home(home.path(), api_url)).unwrap()
    }

    #[tokio::test]
    async fn test_success_decodes_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/apps/example"))
            .and(basic_auth("user", "pass"))
            .and(header("accept", "application/json"))
            .and(header("user-agent", consts::get_user_agent()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "app123",
                "name": "example",
                "owner_email": "me@example.com",
                "stack": "cedar",
                "dynos": 2,
                "workers": 1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let home = TempDir::new().unwrap();
        let app: App = client_for(&home, None)
            .request(Method::GET, &authed_url(&server, "/apps/example"))
            .await
            .unwrap();
        assert_eq!(app.id.as_deref(), Some("app123"));
        assert_eq!(app.name, "example");
        assert_eq!(app.owner_email.as_deref(), Some("me@example.com"));
        assert_eq!(app.stack.as_deref(), Some("cedar"));
        assert_eq!((app.dynos, app.workers), (2, 1));
    }

    #[tokio::test]
    async fn test_unauthorized_and_forbidden() {
        for status in [401, 403] {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(status).set_body_json(serde_json::json!({
                    "name": "looks like a valid app"
                })))
                .mount(&server)
                .await;

            let home = TempDir::new().unwrap();
            let err = client_for(&home, None)
                .request::<App>(Method::GET, &authed_url(&server, "/apps/example"))
                .await
                .unwrap_err();
            assert!(matches!(err, HkError::Unauthorized), "status {status}");
        }
    }

    #[tokio::test]
    async fn test_other_failure_status_keeps_raw_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal trouble"))
            .mount(&server)
            .await;

        let home = TempDir::new().unwrap();
        let err = client_for(&home, None)
            .request::<App>(Method::GET, &authed_url(&server, "/apps"))
            .await
            .unwrap_err();
        match err {
            HkError::UnexpectedStatus { response } => {
                assert!(response.contains("500"));
                assert!(response.contains("internal trouble"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let home = TempDir::new().unwrap();
        let err = client_for(&home, None)
            .request::<App>(Method::GET, &authed_url(&server, "/apps/x"))
            .await
            .unwrap_err();
        assert!(matches!(err, HkError::Decode(_)));
    }

    #[tokio::test]
    async fn test_api_override_and_netrc_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/apps"))
            .and(basic_auth("netrc-user", "netrc-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "name": "first" },
                { "name": "second" }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let home = TempDir::new().unwrap();
        std::fs::write(
            home.path().join(".netrc"),
            format!(
                "machine 127.0.0.1 login wrong password wrong\nmachine {} login netrc-user password netrc-key\n",
                server.address()
            ),
        )
        .unwrap();

        let client = client_for(&home, Some(format!("{}/", server.uri())));
        let apps: Vec<App> = client.get("/apps").await.unwrap();
        let names: Vec<_> = apps.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_before_sending() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let home = TempDir::new().unwrap();
        let err = client_for(&home, Some(server.uri()))
            .get::<Vec<App>>("/apps")
            .await
            .unwrap_err();
        assert!(matches!(err, HkError::CredentialStoreUnreadable { .. }));
    }
}
