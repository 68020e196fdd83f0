//! HTTP transport for the remote tabular endpoint.
//!
//! `GET {endpoint}/{table}` returns a JSON array of string-keyed records,
//! `DELETE {endpoint}/{table}` clears it, `PUT {endpoint}/{table}` writes a
//! full replacement array.

use super::Transport;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::row::Row;
use std::io;
use std::time::Duration;
use ureq::{Agent, AgentBuilder};

pub struct HttpTransport {
    agent: Agent,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: &str, timeout: Duration) -> Self {
        let agent = AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(&cfg.endpoint, cfg.timeout())
    }

    fn url(&self, table: &str) -> String {
        format!("{}/{}", self.endpoint, table)
    }
}

fn map_error(err: ureq::Error) -> AppError {
    match err {
        ureq::Error::Status(status, resp) => AppError::Http {
            status,
            message: resp.into_string().unwrap_or_default(),
        },
        // connection refused, DNS, timeout: all worth another attempt
        ureq::Error::Transport(t) => AppError::Io(io::Error::other(t.to_string())),
    }
}

impl Transport for HttpTransport {
    fn get(&self, table: &str) -> AppResult<Option<Vec<Row>>> {
        let resp = match self.agent.get(&self.url(table)).call() {
            Ok(r) => r,
            Err(ureq::Error::Status(404, _)) => return Ok(None),
            Err(e) => return Err(map_error(e)),
        };

        let body = resp.into_string()?;
        if body.trim().is_empty() {
            return Ok(Some(Vec::new()));
        }
        let rows: Vec<Row> = serde_json::from_str(&body)?;
        Ok(Some(rows))
    }

    fn clear(&self, table: &str) -> AppResult<()> {
        match self.agent.delete(&self.url(table)).call() {
            Ok(_) | Err(ureq::Error::Status(404, _)) => Ok(()),
            Err(e) => Err(map_error(e)),
        }
    }

    fn put(&self, table: &str, rows: &[Row]) -> AppResult<()> {
        let body = serde_json::to_value(rows)?;
        self.agent
            .put(&self.url(table))
            .send_json(body)
            .map_err(map_error)?;
        Ok(())
    }
}
