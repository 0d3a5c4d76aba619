use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value;

use crate::store::backend::{Direction, Query, RecordBackend, StoreError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Record backend speaking the remote store's PostgREST-style HTTP protocol.
/// Every call is a blocking round-trip; failures surface as an error for
/// that single operation and are never retried here.
pub struct HttpBackend {
    client: Client,
    base: String,
    key: String,
}

impl HttpBackend {
    pub fn new(url: &str, key: &str) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base: format!("{}/rest/v1", url.trim_end_matches('/')),
            key: key.to_string(),
        })
    }

    fn request(&self, method: Method, table: &str, params: &[(String, String)]) -> RequestBuilder {
        let mut url = format!("{}/{}", self.base, table);
        for (i, (name, value)) in params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            url.push(sep);
            url.push_str(name);
            url.push('=');
            url.push_str(value);
        }
        self.client
            .request(method, url)
            .header("apikey", &self.key)
            .header("Authorization", format!("Bearer {}", self.key))
    }

    /// Send a request and parse the response body, mapping non-success
    /// statuses to a rejection carrying the store's error message
    fn run(&self, builder: RequestBuilder) -> Result<Value, StoreError> {
        let response = builder.send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message: body,
            });
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Encode a query into PostgREST request parameters. Filter values are
/// percent-encoded; operator prefixes and column names are not.
fn params_for(query: &Query, embed: Option<&str>) -> Vec<(String, String)> {
    let mut params = Vec::new();
    let select = match embed {
        Some(parent) => format!("*,{}(title)", parent),
        None => "*".to_string(),
    };
    params.push(("select".to_string(), select));
    for filter in &query.filters {
        params.push((
            filter.column.clone(),
            format!(
                "{}.{}",
                filter.cmp.as_str(),
                urlencoding::encode(&filter.value)
            ),
        ));
    }
    if let Some((column, direction)) = &query.order {
        let dir = match direction {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        };
        params.push(("order".to_string(), format!("{}.{}", column, dir)));
    }
    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }
    params
}

fn id_filter(id: &str) -> (String, String) {
    ("id".to_string(), format!("eq.{}", urlencoding::encode(id)))
}

fn expect_rows(value: Value) -> Vec<Value> {
    match value {
        Value::Array(rows) => rows,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

impl RecordBackend for HttpBackend {
    fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>, StoreError> {
        let params = params_for(query, query.embed.as_deref());
        let value = self.run(self.request(Method::GET, table, &params))?;
        Ok(expect_rows(value))
    }

    fn insert(&self, table: &str, row: &Value) -> Result<Value, StoreError> {
        let value = self.run(
            self.request(Method::POST, table, &[])
                .header("Prefer", "return=representation")
                .json(row),
        )?;
        expect_rows(value).into_iter().next().ok_or_else(|| {
            StoreError::Rejected {
                status: 500,
                message: format!("insert into {} returned no row", table),
            }
        })
    }

    fn update(&self, table: &str, id: &str, patch: &Value) -> Result<(), StoreError> {
        let value = self.run(
            self.request(Method::PATCH, table, &[id_filter(id)])
                .header("Prefer", "return=representation")
                .json(patch),
        )?;
        // The store answers an unmatched PATCH with an empty set
        if expect_rows(value).is_empty() {
            return Err(StoreError::not_found(table, id));
        }
        Ok(())
    }

    fn upsert(&self, table: &str, key_column: &str, row: &Value) -> Result<(), StoreError> {
        let params = [("on_conflict".to_string(), key_column.to_string())];
        self.run(
            self.request(Method::POST, table, &params)
                .header("Prefer", "resolution=merge-duplicates,return=minimal")
                .json(row),
        )?;
        Ok(())
    }

    fn delete(&self, table: &str, id: &str) -> Result<(), StoreError> {
        self.run(self.request(Method::DELETE, table, &[id_filter(id)]))?;
        Ok(())
    }
}
