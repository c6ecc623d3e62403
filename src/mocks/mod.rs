pub mod mock_llm_client;
pub mod stub_server;
