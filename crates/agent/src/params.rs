//! Per-tool parameter parsing.
//!
//! The classifier leaves the parameter string opaque; the controller
//! parses it here against the named tool's expected shape before
//! execution. Latitude precedes longitude in every textual pair.

use stepline_core::activity::ToolName;
use stepline_core::error::ParameterError;
use stepline_core::tool::ToolParams;

/// Parse a raw parameter string into validated tool parameters.
pub fn parse_params(tool: ToolName, raw: Option<&str>) -> Result<ToolParams, ParameterError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty());

    match tool {
        ToolName::GetCoordinates => {
            let place = raw.ok_or_else(|| ParameterError::Missing {
                tool: tool.to_string(),
            })?;
            Ok(ToolParams::Place(strip_quotes(place).to_string()))
        }
        ToolName::GetWeather | ToolName::GetTime => {
            let pair = raw.ok_or_else(|| ParameterError::Missing {
                tool: tool.to_string(),
            })?;
            parse_coordinates(tool, pair)
        }
    }
}

/// Strip one layer of matching surrounding quotes, if present.
fn strip_quotes(s: &str) -> &str {
    let bytes = s.as_bytes();
    if s.len() >= 2 {
        let (first, last) = (bytes[0], bytes[s.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &s[1..s.len() - 1];
        }
    }
    s
}

fn parse_coordinates(tool: ToolName, raw: &str) -> Result<ToolParams, ParameterError> {
    let invalid = || ParameterError::InvalidCoordinates {
        tool: tool.to_string(),
        raw: raw.to_string(),
    };

    let mut parts = raw.splitn(2, ',');
    let lat = parts.next().ok_or_else(invalid)?;
    let lon = parts.next().ok_or_else(invalid)?;

    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;

    Ok(ToolParams::Coordinates { lat, lon })
}
