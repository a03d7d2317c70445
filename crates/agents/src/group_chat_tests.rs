use std::sync::Arc;

use retail_agents_core::HUMAN_INPUT_PROMPT;
use retail_agents_llm::{AssistantMessage, ContentPart, MessageContent, Role};

use super::*;
use crate::test_support::{MemoryStore, RecordingSink, ScriptedHuman, ScriptedModel, tool_call};
use crate::tools::RetailTools;

struct Harness {
    model: Arc<ScriptedModel>,
    human: Arc<ScriptedHuman>,
    sink: Arc<RecordingSink>,
    runtime: ChatRuntime,
}

fn harness(replies: Vec<AssistantMessage>, store: MemoryStore, answers: &[&str]) -> Harness {
    let model = Arc::new(ScriptedModel::new(replies));
    let human = Arc::new(ScriptedHuman::new(answers));
    let sink = Arc::new(RecordingSink::default());
    let runtime = ChatRuntime {
        model: model.clone(),
        tools: Arc::new(RetailTools::new(Arc::new(store))),
        human: human.clone(),
        sink: sink.clone(),
    };
    Harness { model, human, sink, runtime }
}

fn text(reply: &str) -> AssistantMessage {
    AssistantMessage::text(reply)
}

#[tokio::test]
async fn test_order_status_reaches_the_client() {
    let h = harness(
        vec![
            text("order_status_agent"),
            tool_call("call_1", "get_order_status", r#"{"order_id": 42}"#),
            text("Order 42 is shipped. TERMINATE"),
        ],
        MemoryStore::default().with_order(42, "shipped", 19.98),
        &[],
    );

    let outcome = GroupChat::new(Scenario::Retail)
        .run(&h.runtime, "Fulfill this request: order 42 status. ".to_owned())
        .await
        .unwrap();

    assert_eq!(outcome.reason, EndReason::Terminated);
    let relayed = h.sink.snapshot();
    assert_eq!(relayed.len(), 3);
    assert_eq!(relayed[0].user, USER_PROXY_NAME);
    assert_eq!(relayed[1].user, "get_order_status");
    assert!(relayed[1].message.contains("shipped"));
    assert_eq!(relayed[2].user, "order_status_agent");

    let requests = h.model.requests.lock().unwrap();
    assert_eq!(requests.len(), 3);
    let tool_names: Vec<_> = requests[1].tools.iter().map(|t| t.function.name.as_str()).collect();
    assert_eq!(tool_names, vec!["get_order_status"]);
    let last = requests[2].messages.last().unwrap();
    assert_eq!(last.role, Role::Tool);
    assert_eq!(last.tool_call_id.as_deref(), Some("call_1"));
    assert!(last.text().contains("shipped"));
}

#[tokio::test]
async fn test_human_exit_ends_the_chat() {
    let h = harness(
        vec![
            text("product_recommendation_agent"),
            text("Which size would you like?"),
            text("User_Proxy"),
        ],
        MemoryStore::default(),
        &["exit"],
    );

    let outcome =
        GroupChat::new(Scenario::Retail).run(&h.runtime, "red shirts".to_owned()).await.unwrap();

    assert_eq!(outcome.reason, EndReason::HumanExit);
    assert_eq!(*h.human.prompts.lock().unwrap(), vec![HUMAN_INPUT_PROMPT.to_owned()]);
    assert_eq!(outcome.transcript.len(), 2);
}

#[tokio::test]
async fn test_unparseable_selection_falls_back_to_round_robin() {
    let h = harness(vec![text("nobody in particular"), text("TERMINATE")], MemoryStore::default(), &[]);

    let outcome = GroupChat::new(Scenario::Retail).run(&h.runtime, "hi".to_owned()).await.unwrap();

    assert_eq!(outcome.transcript[1].speaker, Speaker::Agent(AgentRole::ProductRecommendation));
}

#[tokio::test]
async fn test_order_verification_hands_back_to_customer_once() {
    let h = harness(
        vec![
            text("Order ID: 42, Billed Price: 19.98"),
            text("Total price is 19.98"),
            text("The billed price matches the order."),
        ],
        MemoryStore::default(),
        &["looks right"],
    );

    let outcome = GroupChat::new(Scenario::OrderVerification)
        .run(&h.runtime, "Verify invoice for order 42".to_owned())
        .await
        .unwrap();

    assert_eq!(outcome.reason, EndReason::MaxRounds);
    assert_eq!(outcome.rounds, 5);
    let speakers: Vec<_> = outcome.transcript.iter().map(|t| t.speaker).collect();
    assert_eq!(
        speakers,
        vec![
            Speaker::UserProxy,
            Speaker::Agent(AgentRole::OcrExtraction),
            Speaker::Agent(AgentRole::DbRetrieval),
            Speaker::Agent(AgentRole::OrderVerification),
            Speaker::UserProxy,
        ]
    );
    assert_eq!(h.human.prompts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_round_robin_with_vision_stops_at_max_round() {
    let h = harness(
        vec![
            text("An invoice for order 42 billed at 19.98"),
            text("Order ID: 42, Billed Price: 19.98"),
            text("Total price is 19.98"),
        ],
        MemoryStore::default(),
        &[],
    );

    let outcome = GroupChat::new(Scenario::OrderVerification)
        .with_max_round(3)
        .run(&h.runtime, "Verify <img https://i.ibb.co/ocr.png>".to_owned())
        .await
        .unwrap();

    assert_eq!(outcome.reason, EndReason::MaxRounds);
    assert_eq!(outcome.rounds, 3);
    let speakers: Vec<_> = outcome.transcript.iter().map(|t| t.speaker).collect();
    assert_eq!(
        speakers,
        vec![
            Speaker::UserProxy,
            Speaker::Agent(AgentRole::OcrExtraction),
            Speaker::Agent(AgentRole::DbRetrieval),
        ]
    );

    let requests = h.model.requests.lock().unwrap();
    assert_eq!(requests.len(), 3);
    let ocr_sees_image = requests[1].messages.iter().any(|m| match &m.content {
        Some(MessageContent::Parts(parts)) => {
            parts.contains(&ContentPart::image("https://i.ibb.co/ocr.png"))
        },
        _ => false,
    });
    assert!(ocr_sees_image);
    assert!(requests[2].messages[1].text().contains("An invoice for order 42 billed at 19.98"));
    assert_eq!(requests[2].tools[0].function.name, "get_totalprice_from_db");
}

#[tokio::test]
async fn test_tool_outside_role_is_reported_back() {
    let h = harness(
        vec![tool_call("call_9", "get_totalprice_from_db", r#"{"order_id": 42}"#), text("TERMINATE")],
        MemoryStore::default().with_order(42, "shipped", 19.98),
        &[],
    );

    let outcome = GroupChat::new(Scenario::Retail)
        .with_roles(vec![AgentRole::OrderStatus])
        .run(&h.runtime, "order 42".to_owned())
        .await
        .unwrap();

    assert_eq!(outcome.reason, EndReason::Terminated);
    assert_eq!(h.sink.snapshot().len(), 2);
    let requests = h.model.requests.lock().unwrap();
    let rejection = requests[1].messages.last().unwrap();
    assert_eq!(rejection.role, Role::Tool);
    assert!(rejection.text().contains("not available to order_status_agent"));
}

#[tokio::test]
async fn test_storage_failure_ends_the_chat_with_an_error() {
    let args = r#"{"firstname":"A","lastname":"B","email":"c","phonenumber":"d",
        "shippingaddress":"e","creditcardnumber":"f","productid":99,"quantity":1}"#;
    let h = harness(
        vec![tool_call("call_1", "buy_product", args)],
        MemoryStore { fail_orders: true, ..MemoryStore::default() },
        &[],
    );

    let result = GroupChat::new(Scenario::Retail)
        .with_roles(vec![AgentRole::ProductRecommendation])
        .run(&h.runtime, "buy it".to_owned())
        .await;

    assert!(matches!(result, Err(AgentError::Storage(_))));
}

#[tokio::test]
async fn test_single_agent_alternates_and_empty_reply_passes() {
    let h = harness(
        vec![text("Which order?"), text("Order not found. TERMINATE")],
        MemoryStore::default(),
        &[""],
    );

    let outcome = GroupChat::new(Scenario::Retail)
        .with_roles(vec![AgentRole::OrderStatus])
        .run(&h.runtime, "order status".to_owned())
        .await
        .unwrap();

    assert_eq!(outcome.reason, EndReason::Terminated);
    assert_eq!(h.human.prompts.lock().unwrap().len(), 1);
    assert_eq!(h.sink.snapshot().len(), 3);
    assert_eq!(h.model.request_count(), 2);
}

#[test]
fn test_exit_replies() {
    for reply in ["exit", " Exit ", "no", "No thanks!", "thank you."] {
        assert!(is_exit_reply(reply), "{reply}");
    }
    for reply in ["approved", "nope, size L", ""] {
        assert!(!is_exit_reply(reply), "{reply}");
    }
}
