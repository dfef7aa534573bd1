#[cfg(test)]
mod timed_json_client {

    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    use migraine_tracker::config::ClientConfig;
    use migraine_tracker::http_client::reqwest_http_client::ReqwestHttpClient;
    use migraine_tracker::json_client::{ClientError, JsonRequest, TimedJsonClient};

    use wiremock::matchers::{header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(base_url: &str, timeout_ms: u64) -> TimedJsonClient {
        let config = ClientConfig::new(base_url, Duration::from_millis(timeout_ms)).unwrap();
        TimedJsonClient::new(Arc::new(ReqwestHttpClient::default()), config)
    }

    #[tokio::test]
    async fn should_time_out_when_the_server_is_slower_than_the_deadline() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sessions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_millis(1500)),
            )
            .mount(&mock_server)
            .await;

        let result = client(&mock_server.uri(), 1000)
            .send(JsonRequest::get("/sessions"))
            .await;

        assert_eq!(result.unwrap_err(), ClientError::Timeout);
    }

    #[tokio::test]
    async fn should_surface_the_server_error_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sessions/99"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server.uri(), 1000)
            .send(JsonRequest::get("/sessions/99"))
            .await;

        assert_eq!(
            result.unwrap_err(),
            ClientError::HttpError {
                status: 404,
                message: "not found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn should_synthesize_a_message_for_bodies_without_one() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("<html>down</html>"))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server.uri(), 1000)
            .send(JsonRequest::get("/sessions"))
            .await;

        assert_eq!(
            result.unwrap_err(),
            ClientError::HttpError {
                status: 503,
                message: "Error 503: Service Unavailable".to_string()
            }
        );
    }

    #[tokio::test]
    async fn should_reject_a_success_body_that_is_not_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not-json"))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server.uri(), 1000)
            .send(JsonRequest::get("/sessions"))
            .await;

        assert!(matches!(result.unwrap_err(), ClientError::DecodeFailure(_)));
    }

    #[tokio::test]
    async fn should_reject_an_empty_body_unless_the_status_is_no_content() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sessions"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&mock_server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/sessions/3"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let client = client(&mock_server.uri(), 1000);

        let listed = client.send(JsonRequest::get("/sessions")).await;
        assert!(matches!(listed.unwrap_err(), ClientError::DecodeFailure(_)));

        let deleted = client.send(JsonRequest::delete("/sessions/3")).await;
        assert_eq!(deleted.unwrap(), serde_json::Value::Null);
    }

    #[tokio::test]
    async fn should_return_the_created_payload() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/items"))
            .and(header("content-type", "application/json"))
            .and(header_exists("x-request-id"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 7, "name": "x"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let payload = client(&format!("{}/", mock_server.uri()), 1000)
            .send(JsonRequest::post("/items", json!({"name": "x"})))
            .await
            .unwrap();

        assert_eq!(payload, json!({"id": 7, "name": "x"}));
    }

    #[tokio::test]
    async fn should_report_an_unreachable_host_as_a_network_failure() {
        let result = client("http://unknown:1234", 5000)
            .send(JsonRequest::get("/health"))
            .await;

        assert!(matches!(result.unwrap_err(), ClientError::NetworkFailure(_)));
    }

    #[tokio::test]
    async fn should_close_the_connection_when_the_deadline_passes() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut buffer = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let read = socket.read(&mut buffer).await.unwrap();
                assert!(read > 0, "client closed before sending the request");
                request.extend_from_slice(&buffer[..read]);
            }

            // Never answer; wait for the client to hang up.
            tokio::time::timeout(Duration::from_secs(5), socket.read(&mut buffer)).await
        });

        let timed_client = client(&format!("http://{address}"), 200);
        let result = timed_client.send(JsonRequest::get("/slow")).await;
        assert_eq!(result.unwrap_err(), ClientError::Timeout);
        drop(timed_client);

        let after_deadline = server.await.unwrap();
        assert!(matches!(after_deadline, Ok(Ok(0)) | Ok(Err(_))));
    }
}
