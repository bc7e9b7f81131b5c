//! End-to-end tests of the newline-delimited JSON-RPC loop

#[cfg(test)]
mod tests {
    use crate::common::{create_test_services, MockBackend};
    use es_mcp::mcp::McpServer;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tokio::io::AsyncReadExt;

    /// Feed `input` to a fresh server and collect every response line
    async fn run_session(indices: &[&str], input: &str) -> Vec<Value> {
        run_raw_session(indices, input.as_bytes()).await
    }

    async fn run_raw_session(indices: &[&str], input: &[u8]) -> Vec<Value> {
        let backend = Arc::new(MockBackend::with_indices(indices));
        let server = McpServer::new(create_test_services(backend));

        let (writer, mut reader) = tokio::io::duplex(1 << 20);
        server
            .serve(input, writer, std::future::pending())
            .await
            .unwrap();

        let mut output = String::new();
        reader.read_to_string(&mut output).await.unwrap();
        output
            .lines()
            .map(|line| serde_json::from_str(line).expect("each line is one JSON message"))
            .collect()
    }

    fn by_id(responses: &[Value], id: i64) -> &Value {
        responses
            .iter()
            .find(|r| r["id"] == id)
            .unwrap_or_else(|| panic!("no response with id {id}"))
    }

    #[tokio::test]
    async fn test_initialize_then_list_tools() {
        let input = [
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": {"name": "test", "version": "1.0"}
            }}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
        ]
        .iter()
        .map(|m| format!("{m}\n"))
        .collect::<String>();

        let responses = run_session(&[], &input).await;

        // The notification gets no reply
        assert_eq!(responses.len(), 2);
        assert_eq!(by_id(&responses, 1)["result"]["protocolVersion"], "2024-11-05");
        let tools = by_id(&responses, 2)["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 4);
    }

    #[tokio::test]
    async fn test_every_request_answered_once() {
        let mut input = String::new();
        for id in 1..=20 {
            let message = json!({
                "jsonrpc": "2.0",
                "id": id,
                "method": "tools/call",
                "params": {"name": "list_indices", "arguments": {}}
            });
            input.push_str(&format!("{message}\n"));
        }

        let responses = run_session(&["orders"], &input).await;

        assert_eq!(responses.len(), 20);
        for id in 1..=20 {
            let response = by_id(&responses, id);
            assert_eq!(response["jsonrpc"], "2.0");
            assert_eq!(response["result"]["isError"], false);
        }
    }

    #[tokio::test]
    async fn test_malformed_line_yields_parse_error() {
        let input = "{not json\n{\"jsonrpc\":\"2.0\",\"id\":7,\"method\":\"ping\"}\n";

        let responses = run_session(&[], input).await;

        assert_eq!(responses.len(), 2);
        let parse_error = responses
            .iter()
            .find(|r| r["id"].is_null())
            .expect("parse error response");
        assert_eq!(parse_error["error"]["code"], -32700);
        assert_eq!(by_id(&responses, 7)["result"], json!({}));
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_stop_server() {
        let mut input = b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n".to_vec();
        input.extend_from_slice(b"\xff\xfe\n");
        input.extend_from_slice(b"{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\n");

        let responses = run_raw_session(&[], &input).await;

        assert_eq!(responses.len(), 3);
        assert_eq!(by_id(&responses, 1)["result"], json!({}));
        assert_eq!(by_id(&responses, 2)["result"], json!({}));
        let parse_error = responses
            .iter()
            .find(|r| r["id"].is_null())
            .expect("parse error response");
        assert_eq!(parse_error["error"]["code"], -32700);
    }

    #[tokio::test]
    async fn test_null_id_request_is_answered() {
        let input = "{\"jsonrpc\":\"2.0\",\"id\":null,\"method\":\"ping\"}\n";

        let responses = run_session(&[], input).await;

        assert_eq!(responses.len(), 1);
        assert!(responses[0]["id"].is_null());
        assert_eq!(responses[0]["result"], json!({}));
    }

    #[tokio::test]
    async fn test_crlf_line_endings_accepted() {
        let input = "{\"jsonrpc\":\"2.0\",\"id\":4,\"method\":\"ping\"}\r\n";

        let responses = run_session(&[], input).await;
        assert_eq!(by_id(&responses, 4)["result"], json!({}));
    }

    #[tokio::test]
    async fn test_wrong_jsonrpc_version_rejected() {
        let input = "{\"jsonrpc\":\"1.0\",\"id\":3,\"method\":\"ping\"}\n";

        let responses = run_session(&[], input).await;

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["id"], 3);
        assert_eq!(responses[0]["error"]["code"], -32600);
    }

    #[tokio::test]
    async fn test_blank_lines_ignored() {
        let input = "\n   \n{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n\n";

        let responses = run_session(&[], input).await;
        assert_eq!(responses.len(), 1);
    }

    #[tokio::test]
    async fn test_backend_error_reported_on_wire() {
        let input = format!(
            "{}\n",
            json!({
                "jsonrpc": "2.0",
                "id": "req-1",
                "method": "resources/read",
                "params": {"uri": "elasticsearch://localhost:9200/missing/schema"}
            })
        );

        let responses = run_session(&["orders"], &input).await;

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["id"], "req-1");
        assert_eq!(responses[0]["error"]["code"], -32000);
        let message = responses[0]["error"]["message"].as_str().unwrap();
        assert!(message.starts_with("Failed to read resource: "));
    }

    #[tokio::test]
    async fn test_shutdown_stops_reading() {
        let backend = Arc::new(MockBackend::new());
        let server = McpServer::new(create_test_services(backend));

        // Client half stays open, so only the shutdown future ends the loop
        let (_client, server_in) = tokio::io::duplex(1024);
        let (writer, mut reader) = tokio::io::duplex(1024);

        server
            .serve(tokio::io::BufReader::new(server_in), writer, async {})
            .await
            .unwrap();

        let mut output = String::new();
        reader.read_to_string(&mut output).await.unwrap();
        assert!(output.is_empty());
    }
}
