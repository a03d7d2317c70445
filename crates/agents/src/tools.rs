//! Database tools the agents may call, their JSON-schema definitions, and dispatch.

use std::sync::Arc;

use async_trait::async_trait;
use retail_agents_core::{
    DAMAGED_PACKAGE_NOT_FOUND, DEFECTIVE_PRODUCT_NOT_FOUND, ORDER_NOT_FOUND, ORDER_STATUS_PENDING,
    Purchase,
};
use retail_agents_llm::{FunctionCall, ToolDefinition};
use retail_agents_storage::{RetailStore, StorageError};
use serde::Deserialize;
use serde_json::json;

use crate::error::ToolCallError;

/// Names of the callable tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    RecommendProduct,
    BuyProduct,
    GetOrderStatus,
    GetTotalprice,
    FetchDamagedPackageUrl,
    FetchDefectProductUrl,
}

impl ToolKind {
    pub const ALL: &'static [Self] = &[
        Self::RecommendProduct,
        Self::BuyProduct,
        Self::GetOrderStatus,
        Self::GetTotalprice,
        Self::FetchDamagedPackageUrl,
        Self::FetchDefectProductUrl,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RecommendProduct => "recommend_product",
            Self::BuyProduct => "buy_product",
            Self::GetOrderStatus => "get_order_status",
            Self::GetTotalprice => "get_totalprice_from_db",
            Self::FetchDamagedPackageUrl => "fetch_damaged_package_url",
            Self::FetchDefectProductUrl => "fetch_defect_product_url",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// Function definition advertised to the model.
    #[must_use]
    pub fn definition(self) -> ToolDefinition {
        match self {
            Self::RecommendProduct => ToolDefinition::function(
                self.name(),
                "Retrieves product recommendations based on the user's preferences by running SQL query against the postgres database",
                json!({
                    "type": "object",
                    "properties": {
                        "sql": {"type": "string", "description": "The SQL query to run"}
                    },
                    "required": ["sql"]
                }),
            ),
            Self::BuyProduct => {
                let text = |description: &str| json!({"type": "string", "description": description});
                ToolDefinition::function(
                    self.name(),
                    "Saves customer and order details when a product is purchased",
                    json!({
                        "type": "object",
                        "properties": {
                            "firstname": text("First Name of the customer"),
                            "lastname": text("Last Name of the customer"),
                            "email": text("Email of the customer"),
                            "phonenumber": text("Phone Number of the customer"),
                            "shippingaddress": text("Shipping Address of the customer"),
                            "creditcardnumber": text("Credit Card Number of the customer"),
                            "productid": {"type": "integer", "description": "The ID of the product being purchased"},
                            "quantity": {"type": "integer", "description": "Quantity of the product"}
                        },
                        "required": [
                            "firstname", "lastname", "email", "phonenumber",
                            "shippingaddress", "creditcardnumber", "productid", "quantity"
                        ]
                    }),
                )
            },
            Self::GetOrderStatus => {
                order_id_tool(self, "Retrieves order status based on orderid", "retrieve status for")
            },
            Self::GetTotalprice => order_id_tool(
                self,
                "Retrieves totalprice for a particular orderid",
                "retrieve totalprice for",
            ),
            Self::FetchDamagedPackageUrl => order_id_tool(
                self,
                "Returns the image url of the damaged package reported for an orderid",
                "fetch the damaged package image for",
            ),
            Self::FetchDefectProductUrl => order_id_tool(
                self,
                "Returns the image url of the defective product reported for an orderid",
                "fetch the defective product image for",
            ),
        }
    }
}

fn order_id_tool(kind: ToolKind, description: &str, purpose: &str) -> ToolDefinition {
    ToolDefinition::function(
        kind.name(),
        description,
        json!({
            "type": "object",
            "properties": {
                "order_id": {
                    "type": "integer",
                    "description": format!("The ID of the order to {purpose}")
                }
            },
            "required": ["order_id"]
        }),
    )
}

/// A parsed tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tool {
    RecommendProduct { sql: String },
    BuyProduct(Purchase),
    GetOrderStatus { order_id: i32 },
    GetTotalprice { order_id: i32 },
    FetchDamagedPackageUrl { order_id: i32 },
    FetchDefectProductUrl { order_id: i32 },
}

#[derive(Deserialize)]
struct SqlArgs {
    sql: String,
}

#[derive(Deserialize)]
struct OrderIdArgs {
    order_id: i32,
}

impl Tool {
    /// Parses a model function call into a typed tool.
    pub fn parse(call: &FunctionCall) -> Result<Self, ToolCallError> {
        let kind = ToolKind::from_name(&call.name)
            .ok_or_else(|| ToolCallError::UnknownTool(call.name.clone()))?;
        let raw = if call.arguments.trim().is_empty() { "{}" } else { call.arguments.as_str() };
        let invalid = |e: serde_json::Error| ToolCallError::InvalidArguments {
            tool: call.name.clone(),
            reason: e.to_string(),
        };
        let order_id = || serde_json::from_str::<OrderIdArgs>(raw).map(|a| a.order_id).map_err(invalid);
        Ok(match kind {
            ToolKind::RecommendProduct => {
                Self::RecommendProduct { sql: serde_json::from_str::<SqlArgs>(raw).map_err(invalid)?.sql }
            },
            ToolKind::BuyProduct => Self::BuyProduct(serde_json::from_str(raw).map_err(invalid)?),
            ToolKind::GetOrderStatus => Self::GetOrderStatus { order_id: order_id()? },
            ToolKind::GetTotalprice => Self::GetTotalprice { order_id: order_id()? },
            ToolKind::FetchDamagedPackageUrl => Self::FetchDamagedPackageUrl { order_id: order_id()? },
            ToolKind::FetchDefectProductUrl => Self::FetchDefectProductUrl { order_id: order_id()? },
        })
    }

    #[must_use]
    pub const fn kind(&self) -> ToolKind {
        match self {
            Self::RecommendProduct { .. } => ToolKind::RecommendProduct,
            Self::BuyProduct(_) => ToolKind::BuyProduct,
            Self::GetOrderStatus { .. } => ToolKind::GetOrderStatus,
            Self::GetTotalprice { .. } => ToolKind::GetTotalprice,
            Self::FetchDamagedPackageUrl { .. } => ToolKind::FetchDamagedPackageUrl,
            Self::FetchDefectProductUrl { .. } => ToolKind::FetchDefectProductUrl,
        }
    }
}

/// Result of one tool call as shown to the model and the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    /// Images the result refers to; captioned when vision is enabled.
    pub image_urls: Vec<String>,
}

impl ToolOutput {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), image_urls: Vec::new() }
    }

    #[must_use]
    pub fn image(url: String) -> Self {
        Self { text: url.clone(), image_urls: vec![url] }
    }
}

/// Runs tools on behalf of agents.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, tool: &Tool) -> Result<ToolOutput, StorageError>;
}

/// Tool dispatch onto the retail database.
pub struct RetailTools<S> {
    store: Arc<S>,
}

impl<S> RetailTools<S> {
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: RetailStore + 'static> ToolExecutor for RetailTools<S> {
    async fn execute(&self, tool: &Tool) -> Result<ToolOutput, StorageError> {
        tracing::info!(tool = tool.kind().name(), "executing tool");
        let output = match tool {
            Tool::RecommendProduct { sql } => {
                let rows = self.store.recommend_product(sql).await?;
                ToolOutput::text(serde_json::to_string_pretty(&rows)?)
            },
            Tool::BuyProduct(purchase) => {
                let orderid = self.store.buy_product(purchase).await?;
                ToolOutput::text(json!({"orderid": orderid, "orderstatus": ORDER_STATUS_PENDING}).to_string())
            },
            Tool::GetOrderStatus { order_id } => match self.store.get_order_status(*order_id).await? {
                Some(status) => ToolOutput::text(serde_json::to_string(&status)?),
                None => ToolOutput::text(ORDER_NOT_FOUND),
            },
            Tool::GetTotalprice { order_id } => match self.store.get_totalprice(*order_id).await? {
                Some(total) => ToolOutput::text(total.to_string()),
                None => ToolOutput::text(ORDER_NOT_FOUND),
            },
            Tool::FetchDamagedPackageUrl { order_id } => {
                match self.store.fetch_damaged_package_url(*order_id).await? {
                    Some(url) => ToolOutput::image(url),
                    None => ToolOutput::text(DAMAGED_PACKAGE_NOT_FOUND),
                }
            },
            Tool::FetchDefectProductUrl { order_id } => {
                match self.store.fetch_defect_product_url(*order_id).await? {
                    Some(url) => ToolOutput::image(url),
                    None => ToolOutput::text(DEFECTIVE_PRODUCT_NOT_FOUND),
                }
            },
        };
        Ok(output)
    }
}

#[cfg(test)]
#[path = "tools_tests.rs"]
mod tests;
