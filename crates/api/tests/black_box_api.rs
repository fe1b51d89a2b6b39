use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = clearbill_api::app::build_app().await;
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn create_invoice(client: &reqwest::Client, base_url: &str) -> serde_json::Value {
    let res = client
        .post(format!("{}/api/invoices", base_url))
        .json(&json!({
            "customer_name": "Jane Doe",
            "customer_email": "jane@example.com",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_endpoint_is_up() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn invoice_lifecycle_end_to_end() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Create a draft invoice.
    let created = create_invoice(&client, &server.base_url).await;
    assert_eq!(created["message"], "Invoice successfully created");
    assert_eq!(created["data"]["status"], "draft");
    assert_eq!(created["data"]["total_price"], 0);
    let id = created["data"]["id"].as_str().unwrap().to_string();

    // Append a product line; the derived total follows.
    let res = client
        .post(format!("{}/api/invoices/{}/product-lines", server.base_url, id))
        .json(&json!({"name": "Widget", "quantity": 2, "unit_price": 500}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["data"]["total_price"], 1000);
    assert_eq!(body["data"]["product_lines"][0]["name"], "Widget");
    assert_eq!(body["data"]["product_lines"][0]["total_price"], 1000);

    // Send it.
    let res = client
        .post(format!("{}/api/invoices/{}/send", server.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Invoice has been sent successfully");
    assert_eq!(body["data"]["status"], "sending");

    // The external channel confirms delivery via the webhook.
    let res = client
        .get(format!(
            "{}/api/notification/hook/delivered/{}",
            server.base_url, id
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/api/invoices/{}", server.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "sent-to-client");

    // The invoice also shows up in the listing.
    let res = client
        .get(format!("{}/api/invoices", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_and_malformed_ids_read_as_not_found() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let unknown = Uuid::now_v7();
    for url in [
        format!("{}/api/invoices/{}", server.base_url, unknown),
        format!("{}/api/invoices/not-a-uuid", server.base_url),
    ] {
        let res = client.get(&url).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["message"], "Invoice not found.");
    }

    let res = client
        .post(format!("{}/api/invoices/{}/send", server.base_url, unknown))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .post(format!(
            "{}/api/invoices/{}/product-lines",
            server.base_url, unknown
        ))
        .json(&json!({"name": "Widget", "quantity": 2, "unit_price": 500}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn domain_guards_map_to_bad_request_with_catalog_messages() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_invoice(&client, &server.base_url).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    // Sending without lines.
    let res = client
        .post(format!("{}/api/invoices/{}/send", server.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Cannot send invoice: no product lines added.");

    // A line that fails its construction invariant.
    let res = client
        .post(format!("{}/api/invoices/{}/product-lines", server.base_url, id))
        .json(&json!({"name": "Widget", "quantity": 0, "unit_price": 500}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Product line error: quantity must be greater than zero"
    );

    // Double send.
    client
        .post(format!("{}/api/invoices/{}/product-lines", server.base_url, id))
        .json(&json!({"name": "Widget", "quantity": 2, "unit_price": 500}))
        .send()
        .await
        .unwrap();
    client
        .post(format!("{}/api/invoices/{}/send", server.base_url, id))
        .send()
        .await
        .unwrap();
    let res = client
        .post(format!("{}/api/invoices/{}/send", server.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Cannot send invoice: invoice must be in draft status."
    );
}

#[tokio::test]
async fn create_rejects_blank_fields() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/invoices", server.base_url))
        .json(&json!({"customer_name": "  ", "customer_email": "jane@example.com"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let res = client
        .post(format!("{}/api/invoices", server.base_url))
        .json(&json!({"customer_name": "Jane Doe", "customer_email": "not-an-email"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn notification_hook_acknowledges_known_and_unknown_actions() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let reference = Uuid::now_v7();
    for action in ["delivered", "dummy"] {
        let res = client
            .get(format!(
                "{}/api/notification/hook/{}/{}",
                server.base_url, action, reference
            ))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    // A non-UUID reference does not match the hook at all.
    let res = client
        .get(format!(
            "{}/api/notification/hook/delivered/12345",
            server.base_url
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delivery_confirmation_is_rejected_for_draft_invoices() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_invoice(&client, &server.base_url).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    // Confirmation before sending: acknowledged to the channel, but the
    // invoice stays in draft (the transition guard rejects it).
    let res = client
        .get(format!(
            "{}/api/notification/hook/delivered/{}",
            server.base_url, id
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/api/invoices/{}", server.base_url, id))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "draft");
}
