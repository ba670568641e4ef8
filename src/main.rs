use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    hk_environment_mcp::infra::logging::init();
    hk_environment_mcp::cli::run().await
}
