//! JSON request handling.
//!
//! A request names the four design genes (`d2Yl`, `y_TE`, `a_TE`, `aoa`) and
//! may override any other shape parameter. The handler is a plain function
//! over the payload text so it can sit behind whatever transport the caller
//! provides; the CLI feeds it a file or stdin.

use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::ParsecParams;
use crate::io::write_outline_csv;
use crate::parsec::{ParsecError, generate_airfoil};
use crate::plot::render_svg;

/// Artifact stem used when the request does not name one.
pub const DEFAULT_ARTIFACT_NAME: &str = "airfoil";

/// Request payload. Field names follow the wire format.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AirfoilRequest {
    #[serde(rename = "d2Yl")]
    pub d2yl: f64,
    #[serde(rename = "y_TE")]
    pub y_te: f64,
    #[serde(rename = "a_TE")]
    pub a_te: f64,
    pub aoa: f64,

    #[serde(rename = "r_LE", default)]
    pub r_le: Option<f64>,
    #[serde(default)]
    pub xu: Option<f64>,
    #[serde(default)]
    pub xl: Option<f64>,
    #[serde(default)]
    pub yu: Option<f64>,
    #[serde(rename = "d2Yu", default)]
    pub d2yu: Option<f64>,
    #[serde(default)]
    pub yl: Option<f64>,
    #[serde(rename = "del_Y_TE", default)]
    pub delta_y_te: Option<f64>,
    #[serde(rename = "b_TE", default)]
    pub b_te: Option<f64>,

    #[serde(default)]
    pub granularity: Option<usize>,
    #[serde(default)]
    pub name: Option<String>,
}

impl AirfoilRequest {
    /// Shape parameters: request values over the reference section.
    pub fn params(&self) -> ParsecParams {
        let base = ParsecParams::default();
        ParsecParams {
            r_le: self.r_le.unwrap_or(base.r_le),
            xu: self.xu.unwrap_or(base.xu),
            yu: self.yu.unwrap_or(base.yu),
            d2yu: self.d2yu.unwrap_or(base.d2yu),
            xl: self.xl.unwrap_or(base.xl),
            yl: self.yl.unwrap_or(base.yl),
            d2yl: self.d2yl,
            delta_y_te: self.delta_y_te.unwrap_or(base.delta_y_te),
            y_te: self.y_te,
            a_te: self.a_te,
            b_te: self.b_te.unwrap_or(base.b_te),
        }
    }

    /// Validated artifact stem.
    pub fn artifact_name(&self) -> Result<&str, RequestError> {
        let name = self.name.as_deref().unwrap_or(DEFAULT_ARTIFACT_NAME);
        let ok = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if ok {
            Ok(name)
        } else {
            Err(RequestError::InvalidName(name.to_string()))
        }
    }
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("malformed request: {0}")]
    Malformed(String),

    #[error("invalid artifact name '{0}': use letters, digits, '-' or '_'")]
    InvalidName(String),

    #[error(transparent)]
    Solve(#[from] ParsecError),

    #[error("failed to write artifacts: {0}")]
    Artifact(String),
}

impl RequestError {
    /// HTTP-style status for this failure.
    pub fn status(&self) -> u16 {
        match self {
            RequestError::Malformed(_) | RequestError::InvalidName(_) => 400,
            RequestError::Solve(_) => 422,
            RequestError::Artifact(_) => 500,
        }
    }
}

/// Status plus JSON body, ready to hand back to a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOutcome {
    pub status: u16,
    pub body: Value,
}

impl RequestOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Paths written for a successful request.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    pub svg: PathBuf,
    pub csv: PathBuf,
}

/// Parse the payload text.
pub fn parse_request(body: &str) -> Result<AirfoilRequest, RequestError> {
    serde_json::from_str(body).map_err(|e| RequestError::Malformed(e.to_string()))
}

/// Generate the section a request describes and write its SVG and CSV.
pub fn process_request(request: &AirfoilRequest, config: &AppConfig) -> Result<Artifacts, RequestError> {
    let name = request.artifact_name()?;
    let granularity = request.granularity.unwrap_or(config.granularity);
    let solution = generate_airfoil(&request.params(), granularity)?;

    std::fs::create_dir_all(&config.output_dir).map_err(|e| {
        RequestError::Artifact(format!("'{}': {e}", config.output_dir.display()))
    })?;
    let artifacts = Artifacts {
        svg: config.output_dir.join(format!("{name}.svg")),
        csv: config.output_dir.join(format!("{name}.csv")),
    };

    render_svg(&artifacts.svg, &solution.outline, request.aoa, config.chord_scale)
        .map_err(|e| RequestError::Artifact(e.to_string()))?;
    write_outline_csv(&artifacts.csv, &solution.outline, config.chord_scale, b',')
        .map_err(|e| RequestError::Artifact(e.to_string()))?;

    Ok(artifacts)
}

/// Parse and process one request body.
pub fn serve(body: &str, config: &AppConfig) -> Result<Artifacts, RequestError> {
    parse_request(body).and_then(|request| process_request(&request, config))
}

/// Status and JSON body for a served (or rejected) request.
pub fn into_outcome(result: &Result<Artifacts, RequestError>) -> RequestOutcome {
    match result {
        Ok(artifacts) => {
            info!(svg = %artifacts.svg.display(), csv = %artifacts.csv.display(), "request served");
            RequestOutcome {
                status: 200,
                body: json!({
                    "message": "Plot generated and saved successfully",
                    "svg": artifacts.svg.display().to_string(),
                    "csv": artifacts.csv.display().to_string(),
                }),
            }
        }
        Err(err) => {
            let status = err.status();
            warn!(status, error = %err, "request rejected");
            RequestOutcome {
                status,
                body: json!({ "error": err.to_string() }),
            }
        }
    }
}

/// Handle one request body end to end.
pub fn handle_request(body: &str, config: &AppConfig) -> RequestOutcome {
    into_outcome(&serve(body, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(tag: &str) -> AppConfig {
        AppConfig {
            output_dir: std::env::temp_dir().join(format!("parsec_req_{tag}_{}", std::process::id())),
            granularity: 51,
            ..AppConfig::default()
        }
    }

    #[test]
    fn optional_fields_fall_back_to_reference_section() {
        let req = parse_request(r#"{"d2Yl": 0.2, "y_TE": -0.01, "a_TE": -4.0, "aoa": 3.0}"#).unwrap();
        let p = req.params();
        assert_eq!(p.d2yl, 0.2);
        assert_eq!(p.y_te, -0.01);
        assert_eq!(p.a_te, -4.0);
        assert_eq!(p.r_le, 0.04);
        assert_eq!(p.xu, 0.3);
        assert_eq!(p.b_te, 10.0);
        assert_eq!(req.artifact_name().unwrap(), DEFAULT_ARTIFACT_NAME);
    }

    #[test]
    fn overrides_are_honoured() {
        let req = parse_request(
            r#"{"d2Yl": 0.2, "y_TE": 0, "a_TE": 0, "aoa": 0, "r_LE": 0.01, "xu": 0.4, "del_Y_TE": 0.002, "b_TE": 6}"#,
        )
        .unwrap();
        let p = req.params();
        assert_eq!(p.r_le, 0.01);
        assert_eq!(p.xu, 0.4);
        assert_eq!(p.delta_y_te, 0.002);
        assert_eq!(p.b_te, 6.0);
    }

    #[test]
    fn malformed_and_incomplete_payloads_are_400() {
        let config = temp_config("bad");
        assert_eq!(handle_request("{not json", &config).status, 400);
        let missing = handle_request(r#"{"d2Yl": 0.2, "y_TE": 0, "a_TE": 0}"#, &config);
        assert_eq!(missing.status, 400);
        assert!(missing.body["error"].as_str().unwrap().contains("aoa"));
    }

    #[test]
    fn bad_artifact_name_is_400() {
        let config = temp_config("name");
        let out = handle_request(
            r#"{"d2Yl": 0.2, "y_TE": 0, "a_TE": 0, "aoa": 0, "name": "../escape"}"#,
            &config,
        );
        assert_eq!(out.status, 400);
    }

    #[test]
    fn degenerate_geometry_is_422() {
        let config = temp_config("singular");
        let out = handle_request(r#"{"d2Yl": 0.2, "y_TE": 0, "a_TE": 0, "aoa": 0, "xu": 1.0}"#, &config);
        assert_eq!(out.status, 422);
        assert!(out.body["error"].as_str().unwrap().contains("singular"));
    }

    #[test]
    fn successful_request_writes_artifacts() {
        let config = temp_config("ok");
        let out = handle_request(
            r#"{"d2Yl": 0.45, "y_TE": 0, "a_TE": 10, "aoa": 4, "name": "wing_root"}"#,
            &config,
        );
        assert!(out.is_success(), "{:?}", out.body);
        assert_eq!(out.body["message"], "Plot generated and saved successfully");

        let csv = std::fs::read_to_string(config.output_dir.join("wing_root.csv")).unwrap();
        assert_eq!(csv.lines().count(), 2 * 51 - 1);
        assert!(config.output_dir.join("wing_root.svg").exists());
        let _ = std::fs::remove_dir_all(&config.output_dir);
    }
}
