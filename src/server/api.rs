use std::fmt;

use serde::Serialize;

use crate::config::GeneratorConfig;
use crate::constraints::Percent;
use crate::export::{self, ExportError, OutputFormat};
use crate::generator::{generate, Record, DEFAULT_ROWS, DEFAULT_SEED};

/// Largest dataset served over HTTP in one response.
pub const MAX_ROWS: usize = 100_000;

#[derive(Debug)]
pub enum ApiError {
    MissingParam(&'static str),
    InvalidParam { name: &'static str, value: String },
    Export(ExportError),
    Json(serde_json::Error),
}

impl ApiError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingParam(_) | Self::InvalidParam { .. })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingParam(name) => write!(f, "missing query parameter '{name}'"),
            Self::InvalidParam { name, value } => {
                write!(f, "invalid value '{value}' for query parameter '{name}'")
            }
            Self::Export(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "failed to serialize response: {err}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        Self::Export(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "acme-synth-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn config_payload(config: &GeneratorConfig) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(config)
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolveResponse<'a> {
    pub portfolio: &'a str,
    pub brand: &'a str,
    pub min_trend: Percent,
    pub max_trend: Percent,
    pub min_contribution: Percent,
    pub max_contribution: Percent,
}

/// `GET /api/resolve?portfolio=..&brand=..`. Unknown names resolve to lower tiers.
pub fn resolve_payload(config: &GeneratorConfig, path: &str) -> Result<String, ApiError> {
    let params = query_params(path);
    let portfolio = param(&params, "portfolio").ok_or(ApiError::MissingParam("portfolio"))?;
    let brand = param(&params, "brand").ok_or(ApiError::MissingParam("brand"))?;
    let resolved = config.resolve(portfolio, brand);
    Ok(serde_json::to_string_pretty(&ResolveResponse {
        portfolio,
        brand,
        min_trend: resolved.min_trend,
        max_trend: resolved.max_trend,
        min_contribution: resolved.min_contribution,
        max_contribution: resolved.max_contribution,
    })?)
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetResponse<'a> {
    pub rows: usize,
    pub seed: u64,
    pub generated_at: String,
    pub records: &'a [Record],
}

/// `GET /api/dataset?rows=N&seed=S&format=json|csv`. JSON wraps rows with run metadata;
/// CSV is the bare table.
pub fn dataset_payload(
    config: &GeneratorConfig,
    path: &str,
) -> Result<(String, OutputFormat), ApiError> {
    let params = query_params(path);
    let rows = parse_param(&params, "rows", DEFAULT_ROWS)?;
    if rows > MAX_ROWS {
        return Err(ApiError::InvalidParam {
            name: "rows",
            value: rows.to_string(),
        });
    }
    let seed = parse_param(&params, "seed", DEFAULT_SEED)?;
    let format = match param(&params, "format") {
        Some(raw) => raw.parse::<OutputFormat>().map_err(|_| ApiError::InvalidParam {
            name: "format",
            value: raw.to_string(),
        })?,
        None => OutputFormat::Json,
    };

    let records = generate(config, rows, seed);
    let body = match format {
        OutputFormat::Csv => export::to_csv_string(&records)?,
        OutputFormat::Json => serde_json::to_string_pretty(&DatasetResponse {
            rows,
            seed,
            generated_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            records: &records,
        })?,
    };
    Ok((body, format))
}

fn param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn parse_param<T: std::str::FromStr>(
    params: &[(String, String)],
    name: &'static str,
    default: T,
) -> Result<T, ApiError> {
    match param(params, name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|_| ApiError::InvalidParam {
            name,
            value: raw.to_string(),
        }),
    }
}

/// Decoded `key=value` pairs from the query string of `path`.
pub fn query_params(path: &str) -> Vec<(String, String)> {
    let query = path.split_once('?').map(|(_, q)| q).unwrap_or("");
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (percent_decode(key), percent_decode(value))
        })
        .collect()
}

/// Decode `%XX` escapes and `+` as space. Malformed escapes are kept literally.
fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(high), Some(low)) => {
                        out.push(high << 4 | low);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|digit| digit as u8)
}
