use crate::client_error::{ClientError, Result};
use crate::config::{self, ClientConfig};
use crate::params::{
    require, AttachFile, AttachmentSource, CreateRecord, DeleteRecord, Document, FetchFile,
    FetchRelatedList, PatchRecord, ReadRecord, UpdateRecord,
};
use crate::response::{ApiErrorResponse, ApiGetResponse, Attachment};
use crate::token_manager::TokenSource;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Response;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use std::fs::File;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

/// Sub-resource holding a record's files.
const ATTACHMENTS: &str = "Attachments";

/// Build the headers for one request: the Zoho authorization header, plus the JSON content
/// type when the body is JSON. Pure and safe to call from any thread.
pub fn auth_headers(token: &str, json: bool) -> Result<HeaderMap> {
    require("token", token)?;

    let mut authorization = HeaderValue::from_str(&format!("Zoho-oauthtoken {}", token))
        .map_err(|_| ClientError::InvalidArgument(String::from("token contains characters not allowed in a header")))?;
    authorization.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, authorization);

    if json {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    Ok(headers)
}

/// Body of a single request.
enum Body {
    Empty,
    Json(Value),
    Multipart(Form),
    Form(Vec<(&'static str, String)>),
}

/// Client for the record and attachment endpoints under a versioned CRM base URL
/// such as `https://www.zohoapis.com/crm/v2`.
///
/// Every operation validates its parameters, sends exactly one request and returns the
/// response as received. A non-2xx status is not an error: read Zoho's error payload from
/// the response body. Only transport failures become [`ClientError::Network`].
///
/// The client has no mutable state and can be shared between threads freely.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::blocking::Client,
    config: ClientConfig,
}

impl Client {
    /// Create a client with default settings. Does not touch the network.
    pub fn new(base_url: &str) -> Result<Client> {
        Client::with_config(base_url, ClientConfig::default())
    }

    pub fn with_config(base_url: &str, config: ClientConfig) -> Result<Client> {
        let base_url = Url::parse(base_url).map_err(|error| {
            ClientError::Configuration(format!("invalid base URL {:?}: {}", base_url, error))
        })?;

        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::Configuration(format!(
                "base URL {:?} must be an http(s) URL",
                base_url.as_str()
            )));
        }

        Ok(Client {
            http: config.http_client()?,
            base_url,
            config,
        })
    }

    /// Build a client from `ZOHO_BASE_URL` and [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Client> {
        Client::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Client>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = config::required(&lookup, "ZOHO_BASE_URL")?;
        let config = ClientConfig::from_lookup(lookup)?;

        Client::with_config(&base_url, config)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the timeout for API requests.
    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }
}

impl Client {
    /// Insert a record: `POST /{module}` with `{"data":[fields]}`.
    pub fn create_record<T: TokenSource + ?Sized>(&self, params: &CreateRecord, token: &T) -> Result<Response> {
        params.validate()?;
        let url = self.url(&[params.module.as_str()]);

        self.dispatch(Method::POST, url, token, Body::Json(envelope(&params.data)))
    }

    /// Read one record, or the module listing when no id is given.
    pub fn read_record<T: TokenSource + ?Sized>(&self, params: &ReadRecord, token: &T) -> Result<Response> {
        params.validate()?;
        let url = match &params.id {
            Some(id) => self.url(&[params.module.as_str(), id.as_str()]),
            None => self.url(&[params.module.as_str()]),
        };

        self.dispatch(Method::GET, url, token, Body::Empty)
    }

    /// Replace a record: `PUT /{module}/{id}`.
    pub fn update_record<T: TokenSource + ?Sized>(&self, params: &UpdateRecord, token: &T) -> Result<Response> {
        params.validate()?;
        let url = self.url(&[params.module.as_str(), params.id.as_str()]);

        self.dispatch(Method::PUT, url, token, Body::Json(envelope(&params.data)))
    }

    /// Partially update a record: `PATCH /{module}/{id}`.
    pub fn patch_record<T: TokenSource + ?Sized>(&self, params: &PatchRecord, token: &T) -> Result<Response> {
        params.validate()?;
        let url = self.url(&[params.module.as_str(), params.id.as_str()]);

        self.dispatch(Method::PATCH, url, token, Body::Json(envelope(&params.data)))
    }

    pub fn delete_record<T: TokenSource + ?Sized>(&self, params: &DeleteRecord, token: &T) -> Result<Response> {
        params.validate()?;
        let url = self.url(&[params.module.as_str(), params.id.as_str()]);

        self.dispatch(Method::DELETE, url, token, Body::Empty)
    }

    /// Attach a local file (multipart `file` part) or a URL (`attachmentUrl`) to a record.
    ///
    /// A local file is opened before anything else happens, so a missing file fails without
    /// a network call. The open handle moves into the request body and is closed when the
    /// request finishes, whether it succeeded or not.
    pub fn attach_file<T: TokenSource + ?Sized>(&self, params: &AttachFile, token: &T) -> Result<Response> {
        params.validate()?;
        let url = self.url(&[params.module.as_str(), params.record_id.as_str(), ATTACHMENTS]);

        let body = match &params.source {
            AttachmentSource::Path(path) => Body::Multipart(file_form(path)?),
            AttachmentSource::Url(link) => Body::Form(vec![("attachmentUrl", link.clone())]),
        };

        self.dispatch(Method::POST, url, token, body)
    }

    /// Download one attachment, or get the JSON listing when `fetch_all` is set.
    ///
    /// The body is left untouched; for a single file it is the raw file content.
    pub fn fetch_file<T: TokenSource + ?Sized>(&self, params: &FetchFile, token: &T) -> Result<Response> {
        let url = match params.validate()? {
            Some(file_id) => self.url(&[params.module.as_str(), params.record_id.as_str(), ATTACHMENTS, file_id]),
            None => self.url(&[params.module.as_str(), params.record_id.as_str(), ATTACHMENTS]),
        };

        self.dispatch(Method::GET, url, token, Body::Empty)
    }

    /// List a record's attachments, parsed.
    ///
    /// Unlike the raw operations this interprets the response: Zoho's `204 No Content` is an
    /// empty list and an error status becomes [`ClientError::Api`].
    pub fn list_attachments<T: TokenSource + ?Sized>(
        &self,
        module: &str,
        record_id: &str,
        token: &T,
    ) -> Result<Vec<Attachment>> {
        let response = self.fetch_file(&FetchFile::all(module, record_id), token)?;
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }

        let raw_response = response.text()?;

        if !status.is_success() {
            // proxies and gateways answer with HTML or nothing; keep status and body regardless
            let error = serde_json::from_str::<ApiErrorResponse>(&raw_response).unwrap_or_else(|_| ApiErrorResponse {
                code: status.as_str().to_owned(),
                message: raw_response,
                status: String::from("error"),
            });
            return Err(ClientError::Api(error));
        }

        if raw_response.trim().is_empty() {
            return Ok(Vec::new());
        }

        let listing: ApiGetResponse<Attachment> = serde_json::from_str(&raw_response)?;

        Ok(listing.data)
    }

    /// Read a related list of a record: `GET /{module}/{record_id}/{name}`.
    pub fn fetch_related_list<T: TokenSource + ?Sized>(&self, params: &FetchRelatedList, token: &T) -> Result<Response> {
        params.validate()?;
        let url = self.url(&[params.module.as_str(), params.record_id.as_str(), params.name.as_str()]);

        self.dispatch(Method::GET, url, token, Body::Empty)
    }
}

impl Client {
    /// Append percent-encoded path segments to the base URL.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();

        // the base was checked to be hierarchical in `with_config`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        url
    }

    /// Send a single request.
    fn dispatch<T: TokenSource + ?Sized>(&self, method: Method, url: Url, token: &T, body: Body) -> Result<Response> {
        let token = token.bearer_token()?;
        let headers = auth_headers(&token, matches!(body, Body::Json(_)))?;

        let request = self.http.request(method.clone(), url.clone()).headers(headers);
        let request = match body {
            Body::Empty => request,
            Body::Json(value) => request.body(serde_json::to_vec(&value)?),
            Body::Multipart(form) => request.multipart(form),
            Body::Form(fields) => request.form(&fields),
        };

        debug!(%method, %url, "sending request");

        let response = request.send().map_err(|error| {
            error!(%method, %url, %error, "request failed");
            ClientError::Network(error)
        })?;

        debug!(%method, %url, status = %response.status(), "received response");

        Ok(response)
    }
}

/// Wrap a record in the `{"data":[...]}` envelope the write endpoints expect.
fn envelope(data: &Document) -> Value {
    json!({ "data": [data] })
}

/// Open `path` and wrap it as the multipart `file` part.
fn file_form(path: &Path) -> Result<Form> {
    let io_error = |source| ClientError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    let length = file.metadata().map_err(io_error)?.len();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("file"));

    let part = Part::reader_with_length(file, length)
        .file_name(file_name)
        .mime_str("application/octet-stream")
        .map_err(|error| ClientError::InvalidArgument(format!("invalid attachment content type: {}", error)))?;

    Ok(Form::new().part("file", part))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ApiSuccessResponse;
    use crate::test_support::{init_logging, token_body};
    use crate::{to_document, Credential, Domain, TokenManager};
    use mockito::{Matcher, Mock, Server, ServerGuard};
    use std::sync::Arc;

    const TOKEN: &str = "1000.test-token";

    /// Get a `Client` rooted at the mock server's `/crm/v2`.
    fn get_client(server: &ServerGuard) -> Client {
        init_logging();
        Client::new(&format!("{}/crm/v2", server.url())).unwrap()
    }

    /// Mocks that must never be hit, for checking validation happens before dispatch.
    fn forbid_requests(server: &mut ServerGuard) -> Vec<Mock> {
        ["GET", "POST", "PUT", "PATCH", "DELETE"]
            .iter()
            .map(|method| server.mock(method, Matcher::Any).expect(0).create())
            .collect()
    }

    fn assert_untouched(mocks: Vec<Mock>) {
        for mock in mocks {
            mock.assert();
        }
    }

    fn lead() -> Document {
        to_document(&json!({"Company": "Acme Corp", "Last_Name": "Doe"})).unwrap()
    }

    #[test]
    fn create_record_sends_enveloped_json() {
        let mut server = Server::new();
        let mocker = server
            .mock("POST", "/crm/v2/Leads")
            .match_header("authorization", "Zoho-oauthtoken T")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Exact(String::from(
                r#"{"data":[{"Company":"Acme Corp","Last_Name":"Doe"}]}"#,
            )))
            .with_status(201)
            .with_body(r#"{"data":[{"code":"SUCCESS","details":{"Modified_Time":"2024-01-05T10:00:00+05:30","Created_Time":"2024-01-05T10:00:00+05:30","id":"4150868000001"},"message":"record added","status":"success"}]}"#)
            .create();
        let client = get_client(&server);

        let response = client.create_record(&CreateRecord::new("Leads", lead()), "T").unwrap();

        mocker.assert();
        assert_eq!(response.status().as_u16(), 201);
        let created: ApiSuccessResponse = response.json().unwrap();
        assert_eq!(created.data[0].code, "SUCCESS");
    }

    #[test]
    fn read_record_paths() {
        let mut server = Server::new();
        let one = server
            .mock("GET", "/crm/v2/Leads/R1")
            .match_header("authorization", "Zoho-oauthtoken T")
            .match_header("content-type", Matcher::Missing)
            .with_body(r#"{"data":[{"id":"R1"}]}"#)
            .create();
        let all = server
            .mock("GET", "/crm/v2/Leads")
            .with_body(r#"{"data":[]}"#)
            .create();
        let client = get_client(&server);

        client.read_record(&ReadRecord::one("Leads", "R1"), "T").unwrap();
        client.read_record(&ReadRecord::all("Leads"), "T").unwrap();

        one.assert();
        all.assert();
    }

    #[test]
    fn update_patch_and_delete_use_their_methods() {
        let mut server = Server::new();
        let body = r#"{"data":[{"Company":"Acme Corp","Last_Name":"Doe"}]}"#;
        let put = server.mock("PUT", "/crm/v2/Leads/R1").match_body(body).create();
        let patch = server.mock("PATCH", "/crm/v2/Leads/R1").match_body(body).create();
        let delete = server
            .mock("DELETE", "/crm/v2/Leads/R1")
            .match_body(Matcher::Exact(String::new()))
            .create();
        let client = get_client(&server);

        client.update_record(&UpdateRecord::new("Leads", "R1", lead()), "T").unwrap();
        client.patch_record(&PatchRecord::new("Leads", "R1", lead()), "T").unwrap();
        client.delete_record(&DeleteRecord::new("Leads", "R1"), "T").unwrap();

        put.assert();
        patch.assert();
        delete.assert();
    }

    #[test]
    fn error_statuses_are_returned_untouched() {
        let mut server = Server::new();
        let error_body = r#"{"code":"INVALID_TOKEN","details":{},"message":"invalid oauth token","status":"error"}"#;
        let mocker = server
            .mock("DELETE", "/crm/v2/Leads/R1")
            .with_status(401)
            .with_body(error_body)
            .create();
        let client = get_client(&server);

        let response = client.delete_record(&DeleteRecord::new("Leads", "R1"), "T").unwrap();

        mocker.assert();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.text().unwrap(), error_body);
    }

    #[test]
    fn missing_identifiers_never_reach_the_network() {
        let mut server = Server::new();
        let mocks = forbid_requests(&mut server);
        let client = get_client(&server);
        let credential = Credential::new(Domain::custom(&server.url()).unwrap(), "refresh", "id", "secret");
        let manager = TokenManager::from_credential(credential, ClientConfig::default()).unwrap();

        let results = vec![
            client.create_record(&CreateRecord::new("", lead()), &manager),
            client.update_record(&UpdateRecord::new("Leads", "", lead()), &manager),
            client.patch_record(&PatchRecord::new("Leads", "", lead()), &manager),
            client.delete_record(&DeleteRecord::new("Leads", ""), &manager),
            client.attach_file(&AttachFile::url("Leads", "", "https://example.com/a.pdf"), &manager),
            client.fetch_file(&FetchFile { file_id: None, ..FetchFile::one("Leads", "R1", "") }, &manager),
            client.fetch_file(&FetchFile::one("Leads", "R1", " "), &manager),
            client.fetch_related_list(&FetchRelatedList::new("Leads", "", "Notes"), &manager),
        ];

        for result in results {
            assert!(matches!(result, Err(ClientError::InvalidArgument(_))), "got {:?}", result.map(|r| r.status()));
        }
        assert_untouched(mocks);
    }

    #[test]
    fn empty_token_is_rejected_locally() {
        let mut server = Server::new();
        let mocks = forbid_requests(&mut server);
        let client = get_client(&server);

        let result = client.read_record(&ReadRecord::all("Leads"), "");

        assert!(matches!(result, Err(ClientError::InvalidArgument(_))));
        assert_untouched(mocks);
    }

    #[test]
    fn token_manager_supplies_the_bearer_token() {
        let mut server = Server::new();
        let token_mock = server
            .mock("POST", "/oauth/v2/token")
            .with_header("content-type", "application/json")
            .with_body(token_body("1000.managed", 3600))
            .expect(1)
            .create();
        let read_mock = server
            .mock("GET", "/crm/v2/Leads")
            .match_header("authorization", "Zoho-oauthtoken 1000.managed")
            .with_body(r#"{"data":[]}"#)
            .expect(2)
            .create();
        let client = get_client(&server);
        let credential = Credential::new(Domain::custom(&server.url()).unwrap(), "refresh", "id", "secret");
        let manager = Arc::new(TokenManager::from_credential(credential, ClientConfig::default()).unwrap());

        client.read_record(&ReadRecord::all("Leads"), &manager).unwrap();
        client.read_record(&ReadRecord::all("Leads"), &manager).unwrap();

        token_mock.assert();
        read_mock.assert();
    }

    #[test]
    fn failed_refresh_blocks_the_call() {
        let mut server = Server::new();
        let _token_mock = server
            .mock("POST", "/oauth/v2/token")
            .with_body(r#"{"error":"invalid_code"}"#)
            .create();
        let read_mock = server.mock("GET", Matcher::Any).expect(0).create();
        let client = get_client(&server);
        let credential = Credential::new(Domain::custom(&server.url()).unwrap(), "refresh", "id", "secret");
        let manager = TokenManager::from_credential(credential, ClientConfig::default()).unwrap();

        let result = client.read_record(&ReadRecord::all("Leads"), &manager);

        assert!(matches!(result, Err(ClientError::Authentication(_))));
        read_mock.assert();
    }

    #[test]
    fn fetch_single_file_is_binary_safe() {
        let original: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let mut server = Server::new();
        let mocker = server
            .mock("GET", "/crm/v2/Leads/R1/Attachments/F1")
            .match_header("authorization", "Zoho-oauthtoken T")
            .with_header("content-type", "application/octet-stream")
            .with_body(&original)
            .create();
        let client = get_client(&server);
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("download.bin");

        let response = client.fetch_file(&FetchFile::one("Leads", "R1", "F1"), "T").unwrap();
        std::fs::write(&target, response.bytes().unwrap()).unwrap();

        mocker.assert();
        assert_eq!(std::fs::read(&target).unwrap(), original);
    }

    #[test]
    fn fetch_all_lists_attachments() {
        let mut server = Server::new();
        let mocker = server
            .mock("GET", "/crm/v2/Leads/R1/Attachments")
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":[{"File_Name":"a.pdf","Size":"10","id":"F1"},{"File_Name":"b.png","Size":"20","id":"F2"}],"info":{"per_page":20,"count":2,"page":1,"more_records":false}}"#)
            .expect(2)
            .create();
        let client = get_client(&server);

        let raw = client.fetch_file(&FetchFile::all("Leads", "R1"), "T").unwrap();
        let listing: ApiGetResponse<Attachment> = raw.json().unwrap();
        let parsed = client.list_attachments("Leads", "R1", "T").unwrap();

        mocker.assert();
        assert_eq!(listing.data.len(), 2);
        let ids: Vec<&str> = parsed.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["F1", "F2"]);
    }

    #[test]
    fn list_attachments_no_content_is_empty() {
        let mut server = Server::new();
        let _listing_mock = server.mock("GET", "/crm/v2/Leads/R1/Attachments").with_status(204).create();
        let client = get_client(&server);

        assert!(client.list_attachments("Leads", "R1", "T").unwrap().is_empty());
    }

    #[test]
    fn list_attachments_surfaces_api_errors() {
        let mut server = Server::new();
        let _listing_mock = server
            .mock("GET", "/crm/v2/Leads/R1/Attachments")
            .with_status(400)
            .with_body(r#"{"code":"INVALID_URL_PATTERN","details":{},"message":"Please check if the URL trying to access is a correct one","status":"error"}"#)
            .create();
        let client = get_client(&server);

        match client.list_attachments("Leads", "R1", "T") {
            Err(ClientError::Api(error)) => assert_eq!(error.code, "INVALID_URL_PATTERN"),
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[test]
    fn list_attachments_keeps_non_json_error_bodies() {
        let mut server = Server::new();
        let _listing_mock = server
            .mock("GET", "/crm/v2/Leads/R1/Attachments")
            .with_status(502)
            .with_header("content-type", "text/html")
            .with_body("<html>Bad Gateway</html>")
            .create();
        let client = get_client(&server);

        match client.list_attachments("Leads", "R1", "T") {
            Err(ClientError::Api(error)) => {
                assert_eq!(error.code, "502");
                assert_eq!(error.message, "<html>Bad Gateway</html>");
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[test]
    fn list_attachments_keeps_status_of_empty_error_body() {
        let mut server = Server::new();
        let _listing_mock = server
            .mock("GET", "/crm/v2/Leads/R1/Attachments")
            .with_status(401)
            .create();
        let client = get_client(&server);

        match client.list_attachments("Leads", "R1", "T") {
            Err(ClientError::Api(error)) => {
                assert_eq!(error.code, "401");
                assert!(error.message.is_empty());
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[test]
    fn attach_file_streams_multipart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "quarterly numbers").unwrap();
        let mut server = Server::new();
        let mocker = server
            .mock("POST", "/crm/v2/Leads/R1/Attachments")
            .match_header("authorization", "Zoho-oauthtoken T")
            .match_header("content-type", Matcher::Regex(String::from("^multipart/form-data; boundary=")))
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(String::from(r#"name="file"; filename="notes.txt""#)),
                Matcher::Regex(String::from("quarterly numbers")),
            ]))
            .with_status(200)
            .create();
        let client = get_client(&server);

        client.attach_file(&AttachFile::path("Leads", "R1", &path), "T").unwrap();

        mocker.assert();
    }

    #[test]
    fn attach_url_sends_attachment_url_form() {
        let mut server = Server::new();
        let mocker = server
            .mock("POST", "/crm/v2/Leads/R1/Attachments")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body("attachmentUrl=https%3A%2F%2Fexample.com%2Fa.pdf")
            .create();
        let client = get_client(&server);

        client.attach_file(&AttachFile::url("Leads", "R1", "https://example.com/a.pdf"), "T").unwrap();

        mocker.assert();
    }

    #[test]
    fn attach_missing_file_fails_before_sending() {
        let mut server = Server::new();
        let mocks = forbid_requests(&mut server);
        let client = get_client(&server);
        let dir = tempfile::tempdir().unwrap();

        let result = client.attach_file(&AttachFile::path("Leads", "R1", dir.path().join("absent.pdf")), "T");

        assert!(matches!(result, Err(ClientError::Io { .. })));
        assert_untouched(mocks);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn attach_file_releases_handle_after_transport_failure() {
        use crate::test_support::open_handles;

        init_logging();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contract.pdf");
        std::fs::write(&path, vec![7u8; 64 * 1024]).unwrap();
        let client = Client::new("http://127.0.0.1:1/crm/v2").unwrap();

        let result = client.attach_file(&AttachFile::path("Leads", "R1", &path), "T");

        assert!(matches!(result, Err(ClientError::Network(_))));
        assert_eq!(open_handles(&path), 0);
    }

    #[test]
    fn related_list_path() {
        let mut server = Server::new();
        let mocker = server.mock("GET", "/crm/v2/Leads/R1/Notes").create();
        let client = get_client(&server);

        client.fetch_related_list(&FetchRelatedList::new("Leads", "R1", "Notes"), "T").unwrap();

        mocker.assert();
    }

    #[test]
    fn identifiers_are_percent_encoded() {
        let client = Client::new("https://www.zohoapis.com/crm/v2/").unwrap();

        assert_eq!(
            client.url(&["Leads", "R 1/2"]).as_str(),
            "https://www.zohoapis.com/crm/v2/Leads/R%201%2F2"
        );
    }

    #[test]
    fn invalid_base_urls_are_configuration_errors() {
        assert!(matches!(Client::new("zohoapis"), Err(ClientError::Configuration(_))));
        assert!(matches!(Client::new("ftp://files.zoho.com/crm"), Err(ClientError::Configuration(_))));
    }

    #[test]
    fn client_from_lookup() {
        let client = Client::from_lookup(|key| match key {
            "ZOHO_BASE_URL" => Some(String::from("https://www.zohoapis.eu/crm/v2")),
            "ZOHO_TIMEOUT_SECS" => Some(String::from("12")),
            _ => None,
        })
        .unwrap();

        assert_eq!(client.base_url().host_str(), Some("www.zohoapis.eu"));
        assert_eq!(client.timeout(), Duration::from_secs(12));
    }

    #[test]
    fn headers_depend_only_on_token() {
        let json_headers = auth_headers("T", true).unwrap();
        let plain_headers = auth_headers("T", false).unwrap();

        assert_eq!(json_headers[AUTHORIZATION], "Zoho-oauthtoken T");
        assert_eq!(json_headers[CONTENT_TYPE], "application/json");
        assert!(json_headers[AUTHORIZATION].is_sensitive());
        assert!(plain_headers.get(CONTENT_TYPE).is_none());
        assert_eq!(auth_headers("T", true).unwrap(), json_headers);
        assert!(matches!(auth_headers("bad\ntoken", false), Err(ClientError::InvalidArgument(_))));
    }
}
