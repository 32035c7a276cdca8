use anyhow::Result;
use webui_auth::presentation::http::openapi::{snapshot_path, write_openapi_snapshot};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    write_openapi_snapshot()?;
    println!("OpenAPI snapshot written to {}", snapshot_path());
    Ok(())
}
