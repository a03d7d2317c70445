//! Shared constants for retail-agents.

/// Seconds the human-input relay waits for a reply before ending the session.
pub const HUMAN_INPUT_TIMEOUT_SECS: u64 = 600;

/// Reply injected when the human does not answer in time; ends the conversation.
pub const EXIT_SENTINEL: &str = "exit";

/// Prompt pushed to the client whenever the conversation needs a human turn.
pub const HUMAN_INPUT_PROMPT: &str = "Please input your further direction, or type 'approved' to proceed, or type 'exit' to end the conversation";

/// Speaker name used for messages produced by the bridge itself.
pub const SYSTEM_SPEAKER: &str = "System";

/// Name of the agent that stands in for the human customer.
pub const USER_PROXY_NAME: &str = "User_Proxy";

/// Marker an assistant emits to end the conversation.
pub const TERMINATE_MARKER: &str = "TERMINATE";

/// Reply returned by the send-message endpoint.
pub const MESSAGE_RECEIVED: &str = "Message Received";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default OpenAI-compatible API base URL.
pub const DEFAULT_API_URL: &str = "https://api.openai.com";

/// Default HTTP port of the bridge.
pub const DEFAULT_HTTP_PORT: u16 = 5008;

pub const ORDER_NOT_FOUND: &str = "Order not found";
pub const DAMAGED_PACKAGE_NOT_FOUND: &str = "Damaged package not found";
pub const DEFECTIVE_PRODUCT_NOT_FOUND: &str = "Defective product not found";

/// Cap-ref label under which table definitions are injected into prompts.
pub const TABLE_DEFINITIONS_CAP_REF: &str = "TABLE_DEFINITIONS";

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 5;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;
