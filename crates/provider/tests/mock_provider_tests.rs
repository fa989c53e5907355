//! Mock Provider Tests
//!
//! Verifies the Provider trait can be mocked with mockall and consumed
//! through a generic bound.

use async_trait::async_trait;
use mockall::mock;
use marketeer_provider::{ChatParams, ChatResponse, Message, Provider, ProviderError, Role};

mock! {
    pub Provider {}

    #[async_trait]
    impl Provider for Provider {
        async fn chat(&self, params: ChatParams) -> Result<ChatResponse, ProviderError>;
        fn default_model(&self) -> String;
        fn is_configured(&self) -> bool;
    }
}

#[tokio::test]
async fn test_mock_provider_chat_returns_success() {
    let mut mock = MockProvider::new();
    mock.expect_chat()
        .times(1)
        .returning(|_| Ok(ChatResponse::text("Hello from mock!")));

    let response = mock.chat(ChatParams::default()).await.unwrap();
    assert_eq!(response.content, Some("Hello from mock!".to_string()));
}

#[tokio::test]
async fn test_mock_provider_chat_returns_error() {
    let mut mock = MockProvider::new();
    mock.expect_chat()
        .times(1)
        .returning(|_| Err(ProviderError::Api("Mock API error".to_string())));

    match mock.chat(ChatParams::default()).await {
        Err(ProviderError::Api(msg)) => assert_eq!(msg, "Mock API error"),
        _ => panic!("Expected Api error"),
    }
}

#[tokio::test]
async fn test_mock_provider_sees_conversation_order() {
    let mut mock = MockProvider::new();
    mock.expect_chat()
        .times(1)
        .withf(|params| {
            params.messages.len() == 2
                && params.messages[0].role == Role::System
                && params.messages[1].role == Role::User
                && params.model == "test-model"
        })
        .returning(|_| Ok(ChatResponse::text("ok")));

    let params = ChatParams {
        model: "test-model".to_string(),
        messages: vec![Message::system("sys"), Message::user("hi")],
        ..Default::default()
    };

    assert!(mock.chat(params).await.is_ok());
}

#[tokio::test]
async fn test_mock_provider_quota_and_auth_errors() {
    let mut mock = MockProvider::new();
    let mut calls = 0;
    mock.expect_chat().times(2).returning(move |_| {
        calls += 1;
        if calls == 1 {
            Err(ProviderError::RateLimited)
        } else {
            Err(ProviderError::Unauthorized("bad key".to_string()))
        }
    });

    assert!(matches!(
        mock.chat(ChatParams::default()).await,
        Err(ProviderError::RateLimited)
    ));
    assert!(matches!(
        mock.chat(ChatParams::default()).await,
        Err(ProviderError::Unauthorized(_))
    ));
}

#[test]
fn test_mock_provider_metadata() {
    let mut mock = MockProvider::new();
    mock.expect_default_model()
        .returning(|| "mock-model-v1".to_string());
    mock.expect_is_configured().returning(|| false);

    assert_eq!(mock.default_model(), "mock-model-v1");
    assert!(!mock.is_configured());
}

async fn ask<P: Provider>(provider: &P, question: &str) -> String {
    let params = ChatParams {
        messages: vec![Message::user(question)],
        ..Default::default()
    };
    provider
        .chat(params)
        .await
        .map(|r| r.content.unwrap_or_default())
        .unwrap_or_else(|e| format!("Error: {}", e))
}

#[tokio::test]
async fn test_mock_provider_in_generic_consumer() {
    let mut mock = MockProvider::new();
    mock.expect_chat()
        .returning(|p| Ok(ChatResponse::text(format!("echo: {}", p.messages[0].content))));

    assert_eq!(ask(&mock, "ping").await, "echo: ping");
}
