//! The generic resource set.
//!
//! A [`ResourceSet<T>`] maps list/get/search/create/update/delete calls for
//! one entity type onto HTTP requests against the URL templates of a
//! [`ResourceConfig`]. Responses with a status above 300 become
//! [`ResourceError::ApiAccess`]; anything else is decoded as `T`.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::oauth::OAuthSigner;
use crate::clients::{
    ApiAccessError, FilePart, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder,
    HttpResponse,
};
use crate::config::ResourceConfig;
use crate::query::{map_to_query_pairs, QueryObject};
use crate::rest::codec;
use crate::rest::errors::ResourceError;
use crate::rest::path::{build_path, resolve_template, ResourceOperation};

/// Timeout applied to entity create requests.
pub const CREATE_TIMEOUT: Duration = Duration::from_secs(20);

/// A file sent as a multipart body by [`ResourceSet::create_file`].
///
/// The file goes in a part named `stream` with an empty file name unless
/// overridden. The request goes to the `create_url` template unless
/// [`url`](Self::url) names an absolute URL below the base URL.
///
/// # Example
///
/// ```rust
/// use restify::rest::FileUpload;
///
/// let upload = FileUpload::new(b"col1,col2\n".to_vec())
///     .field_name("import")
///     .file_name("items.csv")
///     .url("https://api.example.com/v1/imports");
///
/// assert_eq!(upload.override_url(), Some("https://api.example.com/v1/imports"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    part: FilePart,
    url: Option<String>,
}

impl FileUpload {
    /// Creates an upload of the given bytes.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            part: FilePart::new(bytes),
            url: None,
        }
    }

    /// Sends the upload to this absolute URL instead of `create_url`.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the multipart field name.
    #[must_use]
    pub fn field_name(mut self, name: impl Into<String>) -> Self {
        self.part = self.part.field_name(name);
        self
    }

    /// Sets the file name announced in the multipart part.
    #[must_use]
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.part = self.part.file_name(name);
        self
    }

    /// Returns the override URL, if any.
    #[must_use]
    pub fn override_url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

/// A typed facade over one kind of REST resource.
///
/// Constructed once per API session from a [`ResourceConfig`] and reused
/// across calls. Cloning is cheap; the configuration is shared.
///
/// # Thread Safety
///
/// `ResourceSet` is `Send + Sync` for any `T` and never mutates itself.
/// Extra parameters are attached to a derived copy with
/// [`with_params`](Self::with_params).
///
/// # Example
///
/// ```rust,ignore
/// use restify::{BaseUrl, ContentType, ResourceConfig, ResourceSet};
///
/// #[derive(Debug, serde::Serialize, serde::Deserialize)]
/// struct Item {
///     id: u32,
///     name: String,
/// }
///
/// let config = ResourceConfig::builder()
///     .base_url(BaseUrl::new("https://api.example.com/v1")?)
///     .content_type(ContentType::Json)
///     .list_url("/items")
///     .get_url("/items/{0}")
///     .edit_url("/items/{0}")
///     .build()?;
///
/// let items: ResourceSet<Item> = ResourceSet::new(config)?;
///
/// let all = items.list().await?;
/// let one = items.get("42").await?;
/// let deleted = items.delete("42").await?;
/// ```
pub struct ResourceSet<T> {
    config: Arc<ResourceConfig>,
    client: HttpClient,
    params: Vec<(String, String)>,
    _entity: PhantomData<fn() -> T>,
}

// Verify ResourceSet is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceSet<std::rc::Rc<()>>>();
    assert_send_sync::<FileUpload>();
};

impl<T> Clone for ResourceSet<T> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            client: self.client.clone(),
            params: self.params.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ResourceSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceSet")
            .field("entity", &std::any::type_name::<T>())
            .field("base_url", self.config.base_url())
            .field("content_type", &self.config.content_type())
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl<T> ResourceSet<T> {
    /// Creates a resource set with its own HTTP client.
    ///
    /// The client uses the configuration's timeout and User-Agent prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the HTTP client cannot be created.
    pub fn new(config: ResourceConfig) -> Result<Self, ResourceError> {
        let client = HttpClient::new(config.user_agent_prefix(), config.timeout())?;
        Ok(Self::with_client(config, client))
    }

    /// Creates a resource set sharing an existing HTTP client.
    #[must_use]
    pub fn with_client(config: ResourceConfig, client: HttpClient) -> Self {
        Self {
            config: Arc::new(config),
            client,
            params: Vec::new(),
            _entity: PhantomData,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    /// Returns the extra parameters sent with every request.
    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Returns a copy that sends these extra parameters with every request,
    /// after any it already carries.
    ///
    /// `self` is left unchanged.
    #[must_use]
    pub fn with_params<K, V>(&self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut derived = self.clone();
        derived
            .params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        derived
    }

    /// Encodes an entity exactly as it would be sent in a request body.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Encode`] if the entity cannot be serialized.
    pub fn encode_entity(&self, entity: &T) -> Result<String, ResourceError>
    where
        T: Serialize,
    {
        codec::encode(entity, self.config.content_type())
    }

    /// Resolves an operation's template to an absolute URL.
    fn operation_url(
        &self,
        operation: ResourceOperation,
        args: &[&str],
    ) -> Result<String, ResourceError> {
        let template = resolve_template(self.config.templates(), operation)?;
        Ok(self.config.base_url().join(&build_path(template, args)))
    }

    /// Checks that an absolute URL lies below the base URL.
    fn absolute_url(&self, url: &str) -> Result<String, ResourceError> {
        self.config
            .base_url()
            .relative_path(url)
            .map(|_| url.trim().to_string())
            .ok_or_else(|| ResourceError::InvalidUrl {
                url: url.to_string(),
            })
    }

    /// Starts a request for an operation, using its HTTP method and
    /// resolved template.
    fn operation_request(
        &self,
        operation: ResourceOperation,
        args: &[&str],
    ) -> Result<HttpRequestBuilder, ResourceError> {
        let url = self.operation_url(operation, args)?;
        Ok(self.request(operation.http_method(), url))
    }

    /// Starts a request carrying the configured content type, headers,
    /// extra parameters and signer.
    fn request(&self, method: HttpMethod, url: String) -> HttpRequestBuilder {
        self.decorate(HttpRequest::builder(method, url).query(self.params.iter().cloned()))
    }

    /// Adds content type, fixed headers and signer to a request whose query
    /// is already in place.
    fn decorate(&self, mut builder: HttpRequestBuilder) -> HttpRequestBuilder {
        builder = builder.content_type(self.config.content_type());
        for (name, value) in self.config.headers() {
            builder = builder.header(name.clone(), value.clone());
        }
        if let Some(credential) = self.config.credential() {
            builder = builder.signer(OAuthSigner::new(credential.clone()));
        }
        builder
    }

    /// Executes a request and rejects statuses above 300.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ResourceError> {
        let url = request.url.clone();
        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(HttpError::Network(e)) => {
                tracing::warn!(url = %url, error = %e, "Resource request failed");
                return Err(ApiAccessError::from_transport(e.to_string(), url).into());
            }
            Err(e) => return Err(e.into()),
        };

        if response.code > 300 {
            tracing::warn!(
                status = response.code,
                url = %response.url,
                "Resource request rejected"
            );
            return Err(
                ApiAccessError::from_status(response.code, response.reason, response.url).into(),
            );
        }

        Ok(response)
    }
}

impl<T: DeserializeOwned> ResourceSet<T> {
    /// Lists all resources using the `list_url` template.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotConfigured`] if `list_url` is unset,
    /// [`ResourceError::ApiAccess`] on failure statuses, and
    /// [`ResourceError::Decode`] if the body is not a list of `T`.
    pub async fn list(&self) -> Result<Vec<T>, ResourceError> {
        let request = self.operation_request(ResourceOperation::List, &[])?;
        self.fetch_list(request).await
    }

    /// Lists the resources below a parent using the `child_list_url`
    /// template.
    ///
    /// # Errors
    ///
    /// See [`list`](Self::list).
    pub async fn list_children(&self, parent_id: &str) -> Result<Vec<T>, ResourceError> {
        let request = self.operation_request(ResourceOperation::ListChildren, &[parent_id])?;
        self.fetch_list(request).await
    }

    /// Gets one resource using the `get_url` template.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotConfigured`] if `get_url` is unset,
    /// [`ResourceError::ApiAccess`] on failure statuses, and
    /// [`ResourceError::Decode`] if the body is not a `T`.
    pub async fn get(&self, id: &str) -> Result<T, ResourceError> {
        let request = self.operation_request(ResourceOperation::Get, &[id])?;
        self.fetch(request).await
    }

    /// Gets one resource below a parent using the `child_url` template.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn get_child(&self, parent_id: &str, id: &str) -> Result<T, ResourceError> {
        let request = self.operation_request(ResourceOperation::GetChild, &[parent_id, id])?;
        self.fetch(request).await
    }

    /// Gets one resource from an absolute URL, such as a link returned by
    /// the API.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidUrl`] if the URL does not start with
    /// the base URL or names nothing below it.
    pub async fn get_by_url(&self, url: &str) -> Result<T, ResourceError> {
        let url = self.absolute_url(url)?;
        self.fetch(self.request(ResourceOperation::Get.http_method(), url))
            .await
    }

    /// Searches using the `search_url` template and a query object.
    ///
    /// The query object's pairs are sent as query parameters, before any
    /// extra parameters. The body is decoded as `R`, which is often a
    /// wrapper type holding the results.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotConfigured`] if `search_url` is unset and
    /// [`ResourceError::Query`] if the query object cannot be mapped. Neither
    /// sends a request.
    pub async fn search<R, Q>(&self, query: &Q) -> Result<R, ResourceError>
    where
        R: DeserializeOwned,
        Q: QueryObject,
    {
        let url = self.operation_url(ResourceOperation::Search, &[])?;
        let pairs = map_to_query_pairs(query)?;

        let request = HttpRequest::builder(ResourceOperation::Search.http_method(), url)
            .query(pairs)
            .query(self.params.iter().cloned());
        let request = self.decorate(request).build().map_err(HttpError::from)?;

        let response = self.send(request).await?;
        codec::decode(&response.body, self.config.content_type())
    }

    /// Creates a resource and returns the API's representation of it.
    ///
    /// The entity is encoded per the content type and posted to `url` if
    /// given and not blank, else to the `create_url` template. The request
    /// times out after [`CREATE_TIMEOUT`]. A successful response with an
    /// empty body, such as `201 Created` or `204 No Content`, yields `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidUrl`] if `url` is not below the base
    /// URL, [`ResourceError::NotConfigured`] if no `url` is given and
    /// `create_url` is unset, and [`ResourceError::ApiAccess`] on failure
    /// statuses.
    pub async fn create(&self, entity: &T, url: Option<&str>) -> Result<Option<T>, ResourceError>
    where
        T: Serialize,
    {
        let url = self.create_target(url)?;
        let body = self.encode_entity(entity)?;

        let request = self
            .request(ResourceOperation::Create.http_method(), url)
            .text(body)
            .timeout(CREATE_TIMEOUT)
            .build()
            .map_err(HttpError::from)?;

        let response = self.send(request).await?;
        self.decode_optional(&response)
    }

    /// Uploads a file as a multipart body.
    ///
    /// Returns `true` if the status is below 300.
    ///
    /// # Errors
    ///
    /// See [`create`](Self::create).
    pub async fn create_file(&self, upload: FileUpload) -> Result<bool, ResourceError> {
        let response = self.upload(upload).await?;
        Ok(response.code < 300)
    }

    /// Uploads a file as a multipart body and decodes the response as `T`.
    ///
    /// An empty response body yields `None`.
    ///
    /// # Errors
    ///
    /// See [`create`](Self::create).
    pub async fn create_file_returning(
        &self,
        upload: FileUpload,
    ) -> Result<Option<T>, ResourceError> {
        let response = self.upload(upload).await?;
        self.decode_optional(&response)
    }

    /// Replaces a resource using the `edit_url` template.
    ///
    /// Returns the API's representation of the resource, or `None` when the
    /// response body is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotConfigured`] if `edit_url` is unset and
    /// [`ResourceError::ApiAccess`] on failure statuses.
    pub async fn update(&self, entity: &T, id: &str) -> Result<Option<T>, ResourceError>
    where
        T: Serialize,
    {
        let request = self.operation_request(ResourceOperation::Update, &[id])?;
        let body = self.encode_entity(entity)?;

        let request = request.text(body).build().map_err(HttpError::from)?;

        let response = self.send(request).await?;
        self.decode_optional(&response)
    }

    /// Replaces a resource's content with a file, sent as a multipart body
    /// to the `edit_url` template.
    ///
    /// Returns `true` if the status is below 300.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn update_file(
        &self,
        bytes: impl Into<Vec<u8>>,
        id: &str,
    ) -> Result<bool, ResourceError> {
        let request = self
            .operation_request(ResourceOperation::Update, &[id])?
            .file(FilePart::new(bytes))
            .build()
            .map_err(HttpError::from)?;

        let response = self.send(request).await?;
        Ok(response.code < 300)
    }

    /// Deletes a resource using the `edit_url` template.
    ///
    /// Returns `true` if the status is below 300.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotConfigured`] if `edit_url` is unset and
    /// [`ResourceError::ApiAccess`] on failure statuses.
    pub async fn delete(&self, id: &str) -> Result<bool, ResourceError> {
        let request = self
            .operation_request(ResourceOperation::Delete, &[id])?
            .build()
            .map_err(HttpError::from)?;

        let response = self.send(request).await?;
        Ok(response.code < 300)
    }

    async fn fetch(&self, request: HttpRequestBuilder) -> Result<T, ResourceError> {
        let response = self.get_response(request).await?;
        codec::decode(&response.body, self.config.content_type())
    }

    async fn fetch_list(&self, request: HttpRequestBuilder) -> Result<Vec<T>, ResourceError> {
        let response = self.get_response(request).await?;
        codec::decode_list(&response.body, self.config.content_type())
    }

    async fn get_response(
        &self,
        request: HttpRequestBuilder,
    ) -> Result<HttpResponse, ResourceError> {
        let request = request.build().map_err(HttpError::from)?;
        self.send(request).await
    }

    /// Decodes a write response, treating a blank body as no entity.
    fn decode_optional(&self, response: &HttpResponse) -> Result<Option<T>, ResourceError> {
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        codec::decode(&response.body, self.config.content_type()).map(Some)
    }

    async fn upload(&self, upload: FileUpload) -> Result<HttpResponse, ResourceError> {
        let url = self.create_target(upload.url.as_deref())?;

        let request = self
            .request(ResourceOperation::Create.http_method(), url)
            .file(upload.part)
            .build()
            .map_err(HttpError::from)?;

        self.send(request).await
    }

    fn create_target(&self, url: Option<&str>) -> Result<String, ResourceError> {
        match url.filter(|url| !url.trim().is_empty()) {
            Some(url) => self.absolute_url(url),
            None => self.operation_url(ResourceOperation::Create, &[]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ContentType;
    use crate::config::BaseUrl;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: u32,
        name: String,
    }

    fn create_test_set() -> ResourceSet<Item> {
        let config = ResourceConfig::builder()
            .base_url(BaseUrl::new("https://api.example.com/v1/").unwrap())
            .content_type(ContentType::Json)
            .get_url("/items/{0}")
            .child_url("/lists/{0}/items/{1}")
            .build()
            .unwrap();
        ResourceSet::new(config).unwrap()
    }

    #[test]
    fn test_operation_url_joins_base_and_template() {
        let set = create_test_set();
        assert_eq!(
            set.operation_url(ResourceOperation::Get, &["42"]).unwrap(),
            "https://api.example.com/v1/items/42"
        );
        assert_eq!(
            set.operation_url(ResourceOperation::GetChild, &["7", "8"])
                .unwrap(),
            "https://api.example.com/v1/lists/7/items/8"
        );
    }

    #[test]
    fn test_unset_template_fails_before_sending() {
        let set = create_test_set();

        let result = tokio_test::block_on(set.list());
        assert!(matches!(
            result,
            Err(ResourceError::NotConfigured {
                template: "list_url"
            })
        ));

        let result = tokio_test::block_on(set.delete("1"));
        assert!(matches!(
            result,
            Err(ResourceError::NotConfigured {
                template: "edit_url"
            })
        ));
    }

    #[tokio::test]
    async fn test_get_by_url_rejects_foreign_and_base_urls() {
        let set = create_test_set();

        for url in [
            "https://other.example.com/v1/items/1",
            "https://api.example.com/v1",
            "https://api.example.com/v1/",
            "https://api.example.com/v10/items/1",
        ] {
            let result = set.get_by_url(url).await;
            assert!(
                matches!(result, Err(ResourceError::InvalidUrl { .. })),
                "expected InvalidUrl for {url}"
            );
        }
    }

    #[test]
    fn test_with_params_returns_a_derived_copy() {
        let set = create_test_set();
        let derived = set.with_params([("page", "2")]);
        let derived = derived.with_params(vec![("sort".to_string(), "name".to_string())]);

        assert!(set.params().is_empty());
        assert_eq!(
            derived.params(),
            &[
                ("page".to_string(), "2".to_string()),
                ("sort".to_string(), "name".to_string()),
            ]
        );
    }

    #[test]
    fn test_encode_entity_uses_content_type() {
        let set = create_test_set();
        let body = set
            .encode_entity(&Item {
                id: 1,
                name: "One".to_string(),
            })
            .unwrap();
        assert_eq!(body, r#"{"id":1,"name":"One"}"#);
    }

    #[test]
    fn test_create_target_prefers_override() {
        let set = create_test_set();

        assert_eq!(
            set.create_target(Some("https://api.example.com/v1/imports"))
                .unwrap(),
            "https://api.example.com/v1/imports"
        );
        assert!(matches!(
            set.create_target(None),
            Err(ResourceError::NotConfigured {
                template: "create_url"
            })
        ));
    }

    #[test]
    fn test_create_target_ignores_blank_override() {
        let set = create_test_set();

        for blank in ["", "   "] {
            assert!(matches!(
                set.create_target(Some(blank)),
                Err(ResourceError::NotConfigured {
                    template: "create_url"
                })
            ));
        }
    }

    #[test]
    fn test_blank_write_response_decodes_to_none() {
        let set = create_test_set();
        let response = |body: &[u8]| {
            HttpResponse::new(
                204,
                "No Content".to_string(),
                std::collections::HashMap::new(),
                body.to_vec(),
                "https://api.example.com/v1/items/1".to_string(),
            )
        };

        assert_eq!(set.decode_optional(&response(b"")).unwrap(), None);
        assert_eq!(set.decode_optional(&response(b" \r\n")).unwrap(), None);
        assert_eq!(
            set.decode_optional(&response(br#"{"id":1,"name":"One"}"#))
                .unwrap(),
            Some(Item {
                id: 1,
                name: "One".to_string(),
            })
        );
        assert!(matches!(
            set.decode_optional(&response(b"not json")),
            Err(ResourceError::Decode { .. })
        ));
    }

    #[test]
    fn test_file_upload_defaults() {
        let upload = FileUpload::new(vec![1, 2, 3]);
        assert_eq!(upload.override_url(), None);
        assert_eq!(upload.part, FilePart::new(vec![1, 2, 3]));
    }

    #[test]
    fn test_debug_does_not_require_debug_entity() {
        struct Opaque;
        let set: ResourceSet<Opaque> = ResourceSet::with_client(
            create_test_set().config().clone(),
            HttpClient::new(None, None).unwrap(),
        );
        let debug = format!("{set:?}");
        assert!(debug.contains("ResourceSet"));
        assert!(debug.contains("api.example.com"));
    }
}
