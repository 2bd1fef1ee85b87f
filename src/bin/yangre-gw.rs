use anyhow::Result;
use yangre_gateway::http::server::serve;

#[tokio::main]
async fn main() -> Result<()> {
    serve().await
}
