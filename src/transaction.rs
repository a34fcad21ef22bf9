use crate::client::Client;
use crate::types::ApiResponse;

/// An open transaction session.
///
/// Thin wrapper over a session token returned by `trans/begin`. Ending the
/// session consumes the value, so a token cannot be committed or rolled back
/// twice through this type. The service remains the source of truth: a token
/// it has already expired still yields a non-success envelope.
#[derive(Debug)]
#[must_use = "a transaction should be ended with `commit` or `rollback`"]
pub struct Transaction<'client> {
    client: &'client Client,
    tsid: String,
}

impl<'client> Transaction<'client> {
    pub(crate) fn new(client: &'client Client, tsid: String) -> Self {
        Self { client, tsid }
    }

    /// Resumes a session from a token obtained elsewhere.
    #[must_use]
    pub fn resume<S: Into<String>>(client: &'client Client, tsid: S) -> Self {
        Self::new(client, tsid.into())
    }

    #[must_use]
    pub fn tsid(&self) -> &str {
        &self.tsid
    }

    pub async fn create<S: AsRef<str>>(
        &self,
        key: &str,
        content: &str,
        categories: &[S],
    ) -> ApiResponse {
        self.client
            .trans_create(&self.tsid, key, content, categories)
            .await
    }

    pub async fn update(&self, key: &str, content: &str) -> ApiResponse {
        self.client.trans_update(&self.tsid, key, content).await
    }

    pub async fn get(&self, key: &str) -> ApiResponse {
        self.client.trans_get(&self.tsid, key).await
    }

    pub async fn delete(&self, key: &str) -> ApiResponse {
        self.client.trans_delete(&self.tsid, key).await
    }

    pub async fn commit(self) -> ApiResponse {
        self.client.trans_commit(&self.tsid).await
    }

    pub async fn rollback(self) -> ApiResponse {
        self.client.trans_rollback(&self.tsid).await
    }

    /// Gives back the raw token without ending the session.
    #[must_use]
    pub fn into_tsid(self) -> String {
        self.tsid
    }
}
