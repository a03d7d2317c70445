//! Scripted fakes shared by the engine tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use retail_agents_core::{ChatMessage, Customer, OrderStatus, Purchase};
use retail_agents_llm::{AssistantMessage, ChatModel, ChatRequest, FunctionCall, LlmError, ToolCall};
use retail_agents_storage::{
    DefectStore, JsonRow, OrderStore, QueryStore, SchemaStore, StorageError,
};

use crate::group_chat::{HumanInput, MessageSink};

/// In-memory stand-in for the retail database.
#[derive(Default)]
pub struct MemoryStore {
    pub statuses: HashMap<i32, String>,
    pub totals: HashMap<i32, f64>,
    pub damaged: HashMap<i32, String>,
    pub defects: HashMap<i32, String>,
    pub products: Vec<JsonRow>,
    pub fail_orders: bool,
}

impl MemoryStore {
    pub fn with_order(mut self, order_id: i32, status: &str, total: f64) -> Self {
        self.statuses.insert(order_id, status.to_owned());
        self.totals.insert(order_id, total);
        self
    }
}

#[async_trait]
impl QueryStore for MemoryStore {
    async fn run_sql(&self, _sql: &str) -> Result<Vec<JsonRow>, StorageError> {
        Ok(self.products.clone())
    }

    async fn recommend_product(&self, sql: &str) -> Result<Vec<JsonRow>, StorageError> {
        self.run_sql(sql).await
    }

    async fn get_row(&self, _: &str, _: &str, _: i32) -> Result<Option<JsonRow>, StorageError> {
        Ok(None)
    }

    async fn get_all(&self, _table: &str) -> Result<Vec<JsonRow>, StorageError> {
        Ok(Vec::new())
    }

    async fn delete(&self, _: &str, _: &str, _: i32) -> Result<bool, StorageError> {
        Ok(false)
    }
}

#[async_trait]
impl SchemaStore for MemoryStore {
    async fn get_all_table_names(&self) -> Result<Vec<String>, StorageError> {
        Ok(vec!["products".to_owned()])
    }

    async fn get_table_definition(&self, table: &str) -> Result<String, StorageError> {
        Ok(format!("CREATE TABLE {table} (\nproductid integer\n);"))
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn buy_product(&self, purchase: &Purchase) -> Result<i32, StorageError> {
        if self.fail_orders {
            return Err(StorageError::NotFound {
                entity: "product",
                id: purchase.productid.to_string(),
            });
        }
        Ok(1001)
    }

    async fn save_customer(&self, _customer: &Customer) -> Result<(), StorageError> {
        Ok(())
    }

    async fn get_order_status(&self, order_id: i32) -> Result<Option<OrderStatus>, StorageError> {
        let orderdate = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(10, 30, 0))
            .unwrap_or_default();
        Ok(self
            .statuses
            .get(&order_id)
            .map(|status| OrderStatus { orderdate, orderstatus: status.clone() }))
    }

    async fn get_totalprice(&self, order_id: i32) -> Result<Option<f64>, StorageError> {
        Ok(self.totals.get(&order_id).copied())
    }
}

#[async_trait]
impl DefectStore for MemoryStore {
    async fn fetch_damaged_package_url(&self, order_id: i32) -> Result<Option<String>, StorageError> {
        Ok(self.damaged.get(&order_id).cloned())
    }

    async fn fetch_defect_product_url(&self, order_id: i32) -> Result<Option<String>, StorageError> {
        Ok(self.defects.get(&order_id).cloned())
    }
}

/// Model that replays canned replies and records every request.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<AssistantMessage>>,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<AssistantMessage>) -> Self {
        Self { replies: Mutex::new(replies.into()), requests: Mutex::default() }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    fn model(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<AssistantMessage, LlmError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front())
            .ok_or(LlmError::EmptyResponse)
    }
}

pub fn tool_call(id: &str, name: &str, arguments: &str) -> AssistantMessage {
    AssistantMessage {
        content: None,
        tool_calls: vec![ToolCall {
            id: id.to_owned(),
            kind: "function".to_owned(),
            function: FunctionCall { name: name.to_owned(), arguments: arguments.to_owned() },
        }],
    }
}

/// Human that answers from a fixed list, then says `exit`.
#[derive(Default)]
pub struct ScriptedHuman {
    answers: Mutex<VecDeque<String>>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedHuman {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|a| (*a).to_owned()).collect()),
            prompts: Mutex::default(),
        }
    }
}

#[async_trait]
impl HumanInput for ScriptedHuman {
    async fn get_human_input(&self, prompt: &str) -> String {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_owned());
        }
        self.answers
            .lock()
            .ok()
            .and_then(|mut answers| answers.pop_front())
            .unwrap_or_else(|| "exit".to_owned())
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub messages: Mutex<Vec<ChatMessage>>,
}

impl RecordingSink {
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl MessageSink for RecordingSink {
    fn publish(&self, message: ChatMessage) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message);
        }
    }
}
