use std::future::Future;
use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::model::{ServerCapabilities, ServerInfo};

use crate::clients::aqhi::AqhiFeedClient;
use crate::core::FeedSource;
use crate::infra::runtime::mcp_transport::ServerHandler;

pub const SERVER_NAME: &str = "HK OpenAI environment Server";

/// MCP handler exposing the AQHI tool over whichever feed source it holds.
#[derive(Clone)]
pub struct AqhiSvc {
    pub source: Arc<dyn FeedSource>,
}

impl AqhiSvc {
    pub fn new(source: Arc<dyn FeedSource>) -> Self {
        Self { source }
    }

    pub fn with_client(client: AqhiFeedClient) -> Self {
        Self::new(Arc::new(client))
    }
}

impl ServerHandler for AqhiSvc {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(format!(
                "{SERVER_NAME}: environmental data for Hong Kong. Call get_current_aqhi for per-station AQHI readings."
            )),
            ..Default::default()
        }
    }
}

#[rmcp::tool_router]
impl AqhiSvc {
    #[rmcp::tool(
        name = "get_current_aqhi",
        description = "Current Air Quality Health Index (AQHI) at individual general and roadside Air Quality Monitoring stations in Hong Kong. The AQHIs are reported on a scale of 1 to 10 and 10+ and are grouped into five AQHI health risk categories with health advice provided."
    )]
    async fn get_current_aqhi(&self) -> Result<rmcp::Json<serde_json::Value>, rmcp::ErrorData> {
        tracing::debug!("get_current_aqhi invoked");
        let result = super::get_current_aqhi(self.source.as_ref()).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, kind = e.kind(), "get_current_aqhi returning feed error");
        }
        // Feed failures travel as data in the result, not as JSON-RPC errors.
        Ok(rmcp::Json(super::to_tool_json(&result)))
    }
}

pub type AqhiRouter = ToolRouter<AqhiSvc>;

impl AqhiSvc {
    /// Public handle on the `#[tool_router]`-generated table, which is private.
    pub fn router() -> AqhiRouter {
        Self::tool_router()
    }
}

/// Attach the AQHI tool to a handler/router pair ready for a transport.
pub fn register(source: Arc<dyn FeedSource>) -> (AqhiSvc, AqhiRouter) {
    (AqhiSvc::new(source), AqhiSvc::router())
}
