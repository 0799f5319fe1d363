use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "mcp-nws")]
#[command(about = "US National Weather Service MCP Server")]
#[command(version)]
pub struct Cli {
    /// Address to listen on (host:port). If not set, run the MCP server over stdio.
    #[arg(long, value_name = "HOST:PORT")]
    pub address: Option<String>,
}
