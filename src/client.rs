use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client as ReqwestClient;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::Serialize;

use crate::auth::{self, Template};
use crate::config::Config;
use crate::error::Error;
use crate::transaction::Transaction;
use crate::types::request::{
    CreateIndexRequest, CreateObjectRequest, DeleteIndexRequest, DownloadRequest, KeyQuery,
    ListIndexRequest, ListQuery, Page, RangeQuery, TransBeginRequest, TransCreateRequest,
    TransIdRequest, TransKeyQuery, TransUpdateRequest, UpdateIndexRequest, UpdateObjectRequest,
    UploadRequest, strs,
};
use crate::types::response::{ListPayload, RangePayload};
use crate::types::{ApiResponse, ListResponse, RawResponse};
use crate::{Result, Timestamp};

/// Endpoint paths, relative to the configured host.
pub mod paths {
    pub const CREATE: &str = "/api/create";
    pub const UPDATE: &str = "/api/update";
    pub const GET: &str = "/api/get";
    pub const DELETE: &str = "/api/del";
    pub const LIST: &str = "/api/list";
    pub const UPLOAD: &str = "/api/upload";
    pub const DOWNLOAD: &str = "/api/down";
    pub const TRANS_BEGIN: &str = "/api/trans/begin";
    pub const TRANS_CREATE: &str = "/api/trans/create";
    pub const TRANS_UPDATE: &str = "/api/trans/update";
    pub const TRANS_GET: &str = "/api/trans/get";
    pub const TRANS_DELETE: &str = "/api/trans/del";
    pub const TRANS_COMMIT: &str = "/api/trans/commit";
    pub const TRANS_ROLLBACK: &str = "/api/trans/roll_back";
    pub const INDEX_CREATE: &str = "/api/index/create";
    pub const INDEX_UPDATE: &str = "/api/index/update";
    pub const INDEX_DELETE: &str = "/api/index/del";
    pub const INDEX_LIST: &str = "/api/index/list";
    pub const CREATE_RAW: &str = "/api/create_raw";
    pub const GET_RAW: &str = "/api/get_raw";
    pub const GET_RANGE: &str = "/api/get_range";
}

/// Signing client for the WDB HTTP API.
///
/// Cheap to clone and safe to share: the only state is the immutable config
/// and the underlying connection pool.
#[derive(Clone, Debug)]
pub struct Client {
    config: Config,
    client: ReqwestClient,
}

impl Client {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_client(config, ReqwestClient::new())
    }

    /// Uses a caller-configured HTTP client, e.g. one with timeouts.
    #[must_use]
    pub fn with_client(config: Config, client: ReqwestClient) -> Self {
        Self { config, client }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// POSTs `body` as JSON to `path` and returns the decoded envelope.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResponse {
        self.try_post(path, body)
            .await
            .unwrap_or_else(ApiResponse::from)
    }

    /// GETs `path` with `query` form-encoded and returns the decoded envelope.
    pub async fn get<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> ApiResponse {
        self.try_get(path, query)
            .await
            .unwrap_or_else(ApiResponse::from)
    }

    pub async fn create_obj<S: AsRef<str>>(
        &self,
        key: &str,
        content: &str,
        categories: &[S],
    ) -> ApiResponse {
        self.create_object(paths::CREATE, key, content, categories)
            .await
    }

    pub async fn update_obj(&self, key: &str, content: &str) -> ApiResponse {
        self.signed_post(
            paths::UPDATE,
            Template::Object { key, content },
            |time, sg| UpdateObjectRequest {
                key,
                content,
                time,
                sg,
            },
        )
        .await
        .unwrap_or_else(ApiResponse::from)
    }

    pub async fn get_obj(&self, key: &str) -> ApiResponse {
        self.get_by_key(paths::GET, key)
            .await
            .unwrap_or_else(ApiResponse::from)
    }

    pub async fn delete_obj(&self, key: &str) -> ApiResponse {
        self.get_by_key(paths::DELETE, key)
            .await
            .unwrap_or_else(ApiResponse::from)
    }

    /// Lists keys in `category`.
    pub async fn list_obj(&self, category: &str, page: &Page) -> ListResponse {
        let result = self
            .signed_get(paths::LIST, Template::Category { category }, |time, sg| {
                ListQuery {
                    category,
                    offset: page.offset,
                    limit: page.limit,
                    order: &page.order,
                    time,
                    sg,
                }
            })
            .await;
        into_list(result)
    }

    /// Imports the file at `path` on the service host as `key`.
    pub async fn upload<S: AsRef<str>>(
        &self,
        path: &str,
        key: &str,
        categories: &[S],
    ) -> ApiResponse {
        self.signed_post(paths::UPLOAD, Template::Key { key }, |time, sg| {
            UploadRequest {
                path,
                key,
                categories: strs(categories),
                time,
                sg,
            }
        })
        .await
        .unwrap_or_else(ApiResponse::from)
    }

    /// Exports `key` to the file at `path` on the service host.
    pub async fn download(&self, path: &str, key: &str) -> ApiResponse {
        self.signed_post(paths::DOWNLOAD, Template::Key { key }, |time, sg| {
            DownloadRequest {
                path,
                key,
                time,
                sg,
            }
        })
        .await
        .unwrap_or_else(ApiResponse::from)
    }

    /// Opens a transaction over `keys`. On success `data` holds the session token.
    pub async fn trans_begin<S: AsRef<str>>(&self, keys: &[S]) -> ApiResponse {
        self.signed_post(paths::TRANS_BEGIN, Template::Begin, |time, sg| {
            TransBeginRequest {
                keys: strs(keys),
                time,
                sg,
            }
        })
        .await
        .unwrap_or_else(ApiResponse::from)
    }

    /// Like [`Client::trans_begin`], wrapping the token in a [`Transaction`]
    /// that can be ended only once. A non-success envelope is returned as `Err`.
    pub async fn begin_transaction<S: AsRef<str>>(
        &self,
        keys: &[S],
    ) -> std::result::Result<Transaction<'_>, ApiResponse> {
        let rsp = self.trans_begin(keys).await;
        if rsp.is_success() {
            Ok(Transaction::new(self, rsp.data))
        } else {
            Err(rsp)
        }
    }

    pub async fn trans_create<S: AsRef<str>>(
        &self,
        tsid: &str,
        key: &str,
        content: &str,
        categories: &[S],
    ) -> ApiResponse {
        self.signed_post(
            paths::TRANS_CREATE,
            Template::TransObject { tsid, key, content },
            |time, sg| TransCreateRequest {
                tsid,
                key,
                categories: strs(categories),
                content,
                time,
                sg,
            },
        )
        .await
        .unwrap_or_else(ApiResponse::from)
    }

    pub async fn trans_update(&self, tsid: &str, key: &str, content: &str) -> ApiResponse {
        self.signed_post(
            paths::TRANS_UPDATE,
            Template::TransObject { tsid, key, content },
            |time, sg| TransUpdateRequest {
                tsid,
                key,
                content,
                time,
                sg,
            },
        )
        .await
        .unwrap_or_else(ApiResponse::from)
    }

    pub async fn trans_get(&self, tsid: &str, key: &str) -> ApiResponse {
        self.trans_by_key(paths::TRANS_GET, tsid, key)
            .await
            .unwrap_or_else(ApiResponse::from)
    }

    pub async fn trans_delete(&self, tsid: &str, key: &str) -> ApiResponse {
        self.trans_by_key(paths::TRANS_DELETE, tsid, key)
            .await
            .unwrap_or_else(ApiResponse::from)
    }

    pub async fn trans_commit(&self, tsid: &str) -> ApiResponse {
        self.trans_end(paths::TRANS_COMMIT, tsid)
            .await
            .unwrap_or_else(ApiResponse::from)
    }

    pub async fn trans_rollback(&self, tsid: &str) -> ApiResponse {
        self.trans_end(paths::TRANS_ROLLBACK, tsid)
            .await
            .unwrap_or_else(ApiResponse::from)
    }

    /// Adds `key` under each of `index_keys`.
    pub async fn create_index<S: AsRef<str>, R: AsRef<str>>(
        &self,
        index_keys: &[S],
        key: &str,
        index_raw: &[R],
    ) -> ApiResponse {
        self.signed_post(paths::INDEX_CREATE, Template::Key { key }, |time, sg| {
            CreateIndexRequest {
                index_keys: strs(index_keys),
                key,
                index_raw: strs(index_raw),
                time,
                sg,
            }
        })
        .await
        .unwrap_or_else(ApiResponse::from)
    }

    /// Moves `key` from `old_index_keys` to `new_index_keys`.
    pub async fn update_index<O: AsRef<str>, N: AsRef<str>, R: AsRef<str>>(
        &self,
        old_index_keys: &[O],
        new_index_keys: &[N],
        key: &str,
        index_raw: &[R],
    ) -> ApiResponse {
        self.signed_post(paths::INDEX_UPDATE, Template::Key { key }, |time, sg| {
            UpdateIndexRequest {
                old_index_keys: strs(old_index_keys),
                new_index_keys: strs(new_index_keys),
                key,
                index_raw: strs(index_raw),
                time,
                sg,
            }
        })
        .await
        .unwrap_or_else(ApiResponse::from)
    }

    pub async fn delete_index<S: AsRef<str>>(&self, index_keys: &[S], key: &str) -> ApiResponse {
        self.signed_post(paths::INDEX_DELETE, Template::Key { key }, |time, sg| {
            DeleteIndexRequest {
                index_keys: strs(index_keys),
                key,
                time,
                sg,
            }
        })
        .await
        .unwrap_or_else(ApiResponse::from)
    }

    /// Lists document keys under `index_key` matching `condition`.
    pub async fn list_index(&self, index_key: &str, condition: &str, page: &Page) -> ListResponse {
        let result = self
            .signed_post(
                paths::INDEX_LIST,
                Template::IndexList { index_key },
                |time, sg| ListIndexRequest {
                    index_key,
                    condition,
                    offset: page.offset,
                    limit: page.limit,
                    order: &page.order,
                    time,
                    sg,
                },
            )
            .await;
        into_list(result)
    }

    /// Stores `data` base64-encoded; the signature covers the encoded text.
    pub async fn create_raw<S: AsRef<str>>(
        &self,
        key: &str,
        data: &[u8],
        categories: &[S],
    ) -> ApiResponse {
        let content = BASE64.encode(data);
        self.create_object(paths::CREATE_RAW, key, &content, categories)
            .await
    }

    pub async fn get_raw(&self, key: &str) -> RawResponse {
        self.try_get_raw(key)
            .await
            .unwrap_or_else(RawResponse::from)
    }

    /// Reads `limit` bytes of `key` starting at `offset`. `size` is the full
    /// object size reported by the service.
    pub async fn get_range(&self, key: &str, offset: u64, limit: u64) -> RawResponse {
        self.try_get_range(key, offset, limit)
            .await
            .unwrap_or_else(RawResponse::from)
    }

    async fn try_get_raw(&self, key: &str) -> Result<RawResponse> {
        let rsp = self.get_by_key(paths::GET_RAW, key).await?;
        if !rsp.is_success() {
            warn_remote_failure(&rsp);
            return Ok(RawResponse::failure(rsp.msg));
        }

        let raw = BASE64.decode(rsp.data)?;
        let size = u64::try_from(raw.len()).map_err(Error::decode)?;
        Ok(RawResponse::ok(size, raw))
    }

    async fn try_get_range(&self, key: &str, offset: u64, limit: u64) -> Result<RawResponse> {
        let rsp = self
            .signed_get(paths::GET_RANGE, Template::Key { key }, |time, sg| {
                RangeQuery {
                    key,
                    offset,
                    limit,
                    time,
                    sg,
                }
            })
            .await?;
        if !rsp.is_success() {
            warn_remote_failure(&rsp);
            return Ok(RawResponse::failure(rsp.msg));
        }

        let payload: RangePayload = rsp.decode_data()?;
        let raw = BASE64.decode(payload.data)?;
        Ok(RawResponse::ok(payload.all_size, raw))
    }

    async fn create_object<S: AsRef<str>>(
        &self,
        path: &str,
        key: &str,
        content: &str,
        categories: &[S],
    ) -> ApiResponse {
        self.signed_post(path, Template::Object { key, content }, |time, sg| {
            CreateObjectRequest {
                key,
                categories: strs(categories),
                content,
                time,
                sg,
            }
        })
        .await
        .unwrap_or_else(ApiResponse::from)
    }

    async fn get_by_key(&self, path: &str, key: &str) -> Result<ApiResponse> {
        self.signed_get(path, Template::Key { key }, |time, sg| KeyQuery {
            key,
            time,
            sg,
        })
        .await
    }

    async fn trans_by_key(&self, path: &str, tsid: &str, key: &str) -> Result<ApiResponse> {
        self.signed_get(path, Template::TransKey { tsid, key }, |time, sg| {
            TransKeyQuery {
                tsid,
                key,
                time,
                sg,
            }
        })
        .await
    }

    async fn trans_end(&self, path: &str, tsid: &str) -> Result<ApiResponse> {
        self.signed_post(path, Template::TransId { tsid }, |time, sg| {
            TransIdRequest { tsid, time, sg }
        })
        .await
    }

    /// Stamps and signs, then POSTs the record built by `body`.
    async fn signed_post<B, F>(
        &self,
        path: &str,
        template: Template<'_>,
        body: F,
    ) -> Result<ApiResponse>
    where
        B: Serialize,
        F: FnOnce(Timestamp, String) -> B,
    {
        let (time, sg) = self.stamp(template)?;
        self.try_post(path, &body(time, sg)).await
    }

    /// Stamps and signs, then GETs with the query built by `query`.
    async fn signed_get<Q, F>(
        &self,
        path: &str,
        template: Template<'_>,
        query: F,
    ) -> Result<ApiResponse>
    where
        Q: Serialize,
        F: FnOnce(Timestamp, String) -> Q,
    {
        let (time, sg) = self.stamp(template)?;
        self.try_get(path, &query(time, sg)).await
    }

    fn stamp(&self, template: Template<'_>) -> Result<(Timestamp, String)> {
        let time = self.config.time.resolve()?;
        let sg = auth::signature(&self.config.secret_key, time, template);
        Ok((time, sg))
    }

    async fn try_post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        let body = serde_json::to_vec(body).map_err(Error::serialization)?;
        let request = self
            .client
            .request(Method::POST, self.config.endpoint(path)?)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .build()?;

        crate::request(&self.client, request).await
    }

    async fn try_get<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> Result<ApiResponse> {
        let mut url = self.config.endpoint(path)?;
        url.set_query(Some(&serde_html_form::to_string(query)?));
        let request = self.client.request(Method::GET, url).build()?;

        crate::request(&self.client, request).await
    }
}

/// Adapts a generic envelope whose `data` nests a list payload.
fn into_list(result: Result<ApiResponse>) -> ListResponse {
    let rsp = match result {
        Ok(rsp) => rsp,
        Err(err) => return err.into(),
    };
    if !rsp.is_success() {
        warn_remote_failure(&rsp);
        return ListResponse::failure(rsp.msg);
    }

    match rsp.decode_data::<ListPayload>() {
        Ok(payload) => ListResponse::ok(payload.total, payload.list),
        Err(err) => err.into(),
    }
}

#[cfg_attr(not(feature = "tracing"), expect(unused_variables, reason = "only traced"))]
fn warn_remote_failure(rsp: &ApiResponse) {
    #[cfg(feature = "tracing")]
    tracing::warn!(code = rsp.code, msg = %rsp.msg, "remote call failed");
}
