//! BJU Tracker MCP Server Implementation
//!
//! Exposes the catalog, meal, and status operations as MCP tools over stdio.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::email::MailSender;
use crate::models::MealLine;
use crate::store::{Catalog, Ledger};
use crate::tools::status::{StatusTracker, USAGE_INSTRUCTIONS};
use crate::tools::{meals, products};

/// BJU Tracker MCP Service
#[derive(Clone)]
pub struct BjuService {
    catalog: Catalog,
    ledger: Ledger,
    mailer: Arc<Option<MailSender>>,
    status_tracker: Arc<Mutex<StatusTracker>>,
    tool_router: ToolRouter<BjuService>,
}

impl BjuService {
    pub fn new(
        catalog: Catalog,
        ledger: Ledger,
        mailer: Option<MailSender>,
        status_tracker: StatusTracker,
    ) -> Self {
        Self {
            catalog,
            ledger,
            mailer: Arc::new(mailer),
            status_tracker: Arc::new(Mutex::new(status_tracker)),
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddProductParams {
    /// Product name (stored trimmed and lowercased)
    pub name: String,
    /// Protein per 100 g of product
    pub protein: f64,
    /// Fat per 100 g of product
    pub fat: f64,
    /// Carbohydrate per 100 g of product
    pub carb: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MealLineParams {
    /// Product name as entered
    pub name: String,
    /// Weight in grams as entered
    pub weight: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogMealParams {
    /// Consumed products, one (name, weight-in-grams) pair per line
    pub lines: Vec<MealLineParams>,
    /// Recipient addresses; when set, the summary is emailed after saving
    pub email_to: Option<Vec<String>>,
    /// Subject for the emailed summary (optional)
    pub email_subject: Option<String>,
}

// ============================================================================
// Tools
// ============================================================================

#[tool_router]
impl BjuService {
    #[tool(description = "Get the current status of the BJU tracker including build info, data file sizes, and process information")]
    async fn bju_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get instructions for tracking products and logging meals. Call this when starting a session or when unsure how to use the tools.")]
    fn usage_instructions(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(USAGE_INSTRUCTIONS)]))
    }

    // --- Products ---

    #[tool(description = "Add a product to the catalog with its protein/fat/carb values per 100 g. Saving an existing name replaces its record.")]
    fn add_product(&self, Parameters(p): Parameters<AddProductParams>) -> Result<CallToolResult, McpError> {
        let result = products::add_product(&self.catalog, &p.name, p.protein, p.fat, p.carb)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List all catalog products with their per-100g values, sorted by name")]
    fn list_products(&self) -> Result<CallToolResult, McpError> {
        let result = products::list_products(&self.catalog)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Meals ---

    #[tool(description = "Log a meal from (product name, weight in grams) lines: computes summed BJU totals, appends to the history, and optionally emails the summary")]
    fn log_meal(&self, Parameters(p): Parameters<LogMealParams>) -> Result<CallToolResult, McpError> {
        let lines: Vec<MealLine> = p
            .lines
            .into_iter()
            .map(|l| MealLine::new(l.name, l.weight))
            .collect();
        let result = meals::log_meal(
            &self.catalog,
            &self.ledger,
            self.mailer.as_ref().as_ref(),
            lines,
            p.email_to,
            p.email_subject,
        )
        .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Show the full meal history as recorded")]
    fn meal_history(&self) -> Result<CallToolResult, McpError> {
        let result = meals::meal_history(&self.ledger)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for BjuService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "bju".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("BJU Tracker".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "BJU Tracker - food product catalog and meal history with protein/fat/carbohydrate totals. \
                 Call usage_instructions first. \
                 Products: add_product, list_products (values per 100 g, re-saving a name replaces it). \
                 Meals: log_meal (lines of name + weight in grams; all products must exist in the catalog), meal_history. \
                 log_meal can email the saved summary via email_to when SMTP is configured."
                    .into(),
            ),
        }
    }
}
