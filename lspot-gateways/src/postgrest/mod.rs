//! Remote data gateway speaking the PostgREST dialect of the hosted backend.
//!
//! Row-level authorization is enforced server-side; this adapter only attaches
//! the api key and the current access token and translates HTTP failures into
//! repository errors.

use std::sync::RwLock;

use reqwest::{
    blocking::{Client, RequestBuilder, Response},
    StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};

use lspot_core::repositories::Error;

mod models;
mod repo_impl;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct PostgrestGateway {
    base_url: String,
    api_key: String,
    access_token: RwLock<Option<String>>,
    client: Client,
}

impl PostgrestGateway {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            access_token: RwLock::new(None),
            client: Client::new(),
        }
    }

    /// Attaches or clears the bearer token of the authenticated user.
    /// Without a token, requests run with anonymous permissions.
    pub fn set_access_token(&self, token: Option<String>) {
        *self.access_token.write().unwrap() = token;
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self.access_token.read().unwrap();
        let bearer = token.as_deref().unwrap_or(&self.api_key);
        request
            .header("apikey", &self.api_key)
            .bearer_auth(bearer)
    }

    fn run(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().map_err(anyhow::Error::from)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(error_for_status(status, body))
    }

    fn select<T: DeserializeOwned>(&self, table: &str, query: &[(&str, String)]) -> Result<Vec<T>> {
        let request = self.authorized(self.client.get(self.table_url(table)).query(query));
        let response = self.run(request)?;
        Ok(response.json().map_err(anyhow::Error::from)?)
    }

    /// Inserts a row and returns the created representation.
    fn insert_returning<P: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        payload: &P,
    ) -> Result<T> {
        let request = self.authorized(
            self.client
                .post(self.table_url(table))
                .header("Prefer", "return=representation")
                .json(payload),
        );
        let response = self.run(request)?;
        let mut rows: Vec<T> = response.json().map_err(anyhow::Error::from)?;
        if rows.is_empty() {
            return Err(Error::Other(anyhow::anyhow!(
                "Insert into '{table}' returned no representation"
            )));
        }
        Ok(rows.remove(0))
    }

    fn insert<P: Serialize>(&self, table: &str, payload: &P) -> Result<()> {
        let request = self.authorized(
            self.client
                .post(self.table_url(table))
                .header("Prefer", "return=minimal")
                .json(payload),
        );
        self.run(request)?;
        Ok(())
    }

    /// Insert-or-replace on the columns named by `on_conflict`.
    fn upsert<P: Serialize>(&self, table: &str, payload: &P, on_conflict: &str) -> Result<()> {
        let request = self.authorized(
            self.client
                .post(self.table_url(table))
                .query(&[("on_conflict", on_conflict)])
                .header("Prefer", "resolution=merge-duplicates,return=minimal")
                .json(payload),
        );
        self.run(request)?;
        Ok(())
    }

    /// Applies a partial update and returns the affected rows.
    fn update_returning<P: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
        payload: &P,
    ) -> Result<Vec<T>> {
        let request = self.authorized(
            self.client
                .patch(self.table_url(table))
                .query(query)
                .header("Prefer", "return=representation")
                .json(payload),
        );
        let response = self.run(request)?;
        Ok(response.json().map_err(anyhow::Error::from)?)
    }

    fn delete(&self, table: &str, query: &[(&str, String)]) -> Result<()> {
        let request = self.authorized(self.client.delete(self.table_url(table)).query(query));
        self.run(request)?;
        Ok(())
    }
}

fn error_for_status(status: StatusCode, body: String) -> Error {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Forbidden,
        StatusCode::NOT_FOUND | StatusCode::NOT_ACCEPTABLE => Error::NotFound,
        StatusCode::CONFLICT => Error::AlreadyExists,
        _ => Error::Other(anyhow::anyhow!("Backend request failed ({status}): {body}")),
    }
}

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

fn in_list<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
    let list = values.into_iter().collect::<Vec<_>>().join(",");
    format!("in.({list})")
}

fn ilike_contains(fragment: &str) -> String {
    format!("ilike.*{fragment}*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_operators() {
        assert_eq!(eq("false"), "eq.false");
        assert_eq!(in_list(["a", "b"]), "in.(a,b)");
        assert_eq!(ilike_contains("123 Main St"), "ilike.*123 Main St*");
    }

    #[test]
    fn status_mapping() {
        assert!(matches!(
            error_for_status(StatusCode::FORBIDDEN, String::new()),
            Error::Forbidden
        ));
        assert!(matches!(
            error_for_status(StatusCode::NOT_FOUND, String::new()),
            Error::NotFound
        ));
        assert!(matches!(
            error_for_status(StatusCode::CONFLICT, String::new()),
            Error::AlreadyExists
        ));
        assert!(matches!(
            error_for_status(StatusCode::BAD_GATEWAY, String::new()),
            Error::Other(_)
        ));
    }
}
