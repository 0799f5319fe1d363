pub mod frame_log;
pub mod limits;
pub mod mcp_transport;
