//! Built-in lookup tools for Stepline.
//!
//! Three tools cover the agent's closed capability set: resolve a place
//! name to coordinates, look up current weather at coordinates, and look
//! up local time at coordinates. Each wraps a public HTTP API with a
//! configurable base URL so tests can point at a local stub.

pub mod geocode;
pub mod time_of_day;
pub mod weather;

pub use geocode::GeocodeTool;
pub use time_of_day::TimeTool;
pub use weather::WeatherTool;

use stepline_config::ToolsConfig;
use stepline_core::tool::ToolRegistry;

/// Create a registry with all built-in tools pointed at the configured
/// API base URLs.
pub fn default_registry(config: &ToolsConfig) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(GeocodeTool::new(config.geocoding_url.clone())));
    registry.register(Box::new(WeatherTool::new(config.weather_url.clone())));
    registry.register(Box::new(TimeTool::new(config.time_url.clone())));
    registry
}
