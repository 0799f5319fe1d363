//! The three NWS forecast tools, served through one handler.

pub mod tool_router;

pub use tool_router::{ForecastRouter, ForecastSvc};
