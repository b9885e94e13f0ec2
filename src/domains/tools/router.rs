//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Each registered descriptor becomes a route whose handler dispatches
//! through [`ToolRegistry::invoke`], so validation and the result envelope
//! are identical across transports.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
};

use super::registry::{InvocationRequest, ToolDescriptor, ToolRegistry};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(registry: Arc<ToolRegistry>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry
        .descriptors()
        .iter()
        .fold(ToolRouter::new(), |router, descriptor| {
            router.with_route(create_route(registry.clone(), descriptor))
        })
}

/// Create a ToolRoute for one descriptor.
fn create_route<S>(registry: Arc<ToolRegistry>, descriptor: &ToolDescriptor) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    let name = descriptor.name().to_string();
    ToolRoute::new_dyn(descriptor.to_tool(), move |ctx: ToolCallContext<'_, S>| {
        let registry = registry.clone();
        let request = InvocationRequest::new(name.clone(), ctx.arguments.clone().unwrap_or_default());
        async move {
            let output = registry
                .invoke(&request)
                .await
                .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
            Ok(output.to_call_tool_result())
        }
        .boxed()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;

    struct TestServer {}

    fn test_registry() -> Arc<ToolRegistry> {
        Arc::new(ToolRegistry::from_config(Arc::new(Config::default())).unwrap())
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_registry());
        let tools = router.list_all();
        assert_eq!(tools.len(), 3);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"fetch_news"));
        assert!(names.contains(&"send_message"));
        assert!(names.contains(&"send_card"));
    }

    #[test]
    fn test_registry_matches_router() {
        // Ensure registry and router have the same tools
        let registry = test_registry();
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(registry.clone());
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
