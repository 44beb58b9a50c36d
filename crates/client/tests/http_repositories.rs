use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use wareflow_auth::{Credentials, Session};
use wareflow_client::dto::{
    InventoryRecordDto, ListResponse, LoginResponse, PickUpdate, PickingOrderDto, ProcessItemDto,
    StatusUpdate, StockInDto, StockOutDto, UserProfileDto,
};
use wareflow_client::mock::{
    MockInventoryRepository, MockPickingRepository, MockStockOutRepository, fixtures,
};
use wareflow_client::repository::{
    AuthRepository, HttpAuthRepository, HttpInventoryRepository, HttpPickingRepository,
    HttpStockInRepository, HttpStockOutRepository, InventoryRepository, PickingRepository,
    StockInRepository, StockOutRepository,
};
use wareflow_client::{ClientConfig, ClientError, Container, HttpClient, Repositories};
use wareflow_core::{Page, PageRequest};
use wareflow_inventory::{
    InventoryFilter, InventoryLineId, InventoryRecord, InventoryRecordId, InventoryStatus,
    NewInventoryLine, NewInventoryRecord,
};
use wareflow_picking::{
    NewPickingOrder, NewPickingOrderLine, PickingOrderId, PickingOrderProcessItem, PickingPriority,
    PickingStatus,
};
use wareflow_stock_in::{StockIn, StockInId, StockInLineId, StockInStatus};
use wareflow_stock_out::{
    NewStockOut, NewStockOutLine, StockOut, StockOutFilter, StockOutId, StockOutStatus,
};

const TOKEN: &str = "stub-token";

/// What the stub saw of one request.
#[derive(Debug, Clone)]
struct Seen {
    method: &'static str,
    path: String,
    query: HashMap<String, String>,
    bearer: Option<String>,
    body: Option<Value>,
}

#[derive(Clone)]
struct Stub {
    seen: Arc<Mutex<Vec<Seen>>>,
    inventory: Arc<Mutex<Vec<InventoryRecord>>>,
    items: Arc<Mutex<Vec<PickingOrderProcessItem>>>,
    receipts: Arc<Mutex<Vec<StockIn>>>,
    shipments: Arc<Mutex<Vec<StockOut>>>,
}

impl Stub {
    fn new() -> Self {
        let items = fixtures::picking_orders(4)
            .into_iter()
            .flat_map(|(_, items)| items)
            .collect();
        Self {
            seen: Arc::default(),
            inventory: Arc::new(Mutex::new(fixtures::inventory_records(fixtures::INVENTORY_FIXTURES))),
            items: Arc::new(Mutex::new(items)),
            receipts: Arc::new(Mutex::new(fixtures::stock_ins(fixtures::STOCK_IN_FIXTURES))),
            shipments: Arc::new(Mutex::new(fixtures::stock_outs(fixtures::STOCK_OUT_FIXTURES))),
        }
    }

    fn record(&self, path: &str, headers: &HeaderMap, query: HashMap<String, String>) {
        let bearer = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::to_string);
        self.seen.lock().unwrap().push(Seen {
            method: "GET",
            path: path.to_string(),
            query,
            bearer,
            body: None,
        });
    }

    fn record_write(&self, method: &'static str, path: String, body: Option<Value>) {
        self.seen.lock().unwrap().push(Seen {
            method,
            path,
            query: HashMap::new(),
            bearer: None,
            body,
        });
    }

    fn last(&self) -> Seen {
        self.seen.lock().unwrap().last().cloned().unwrap()
    }
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": "stub", "message": message }))).into_response()
}

async fn list_inventory(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let page = PageRequest::new(
        query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1),
        query.get("page_size").and_then(|p| p.parse().ok()).unwrap_or(20),
    );
    stub.record("/api/inventory", &headers, query);
    let rows = stub.inventory.lock().unwrap().clone();
    let body: ListResponse<InventoryRecordDto> = ListResponse::from_page(&Page::paginate(&rows, page));
    Json(body).into_response()
}

async fn get_inventory(State(stub): State<Stub>, Path(id): Path<String>) -> Response {
    let rows = stub.inventory.lock().unwrap();
    match rows.iter().find(|r| r.id.to_string() == id) {
        Some(record) => Json(InventoryRecordDto::from(record)).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found." }))).into_response(),
    }
}

async fn patch_inventory_status(
    State(stub): State<Stub>,
    Path(id): Path<String>,
    Json(body): Json<StatusUpdate>,
) -> Response {
    let Ok(status) = body.status.parse::<InventoryStatus>() else {
        return error(StatusCode::BAD_REQUEST, "unknown status");
    };
    let mut rows = stub.inventory.lock().unwrap();
    let Some(record) = rows.iter_mut().find(|r| r.id.to_string() == id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match record.transition(status, chrono::Utc::now()) {
        Ok(()) => Json(InventoryRecordDto::from(&*record)).into_response(),
        Err(err) => error(StatusCode::CONFLICT, &err.to_string()),
    }
}

async fn list_picking_items(State(stub): State<Stub>, Path(id): Path<String>) -> Response {
    let items: Vec<ProcessItemDto> = stub
        .items
        .lock()
        .unwrap()
        .iter()
        .filter(|i| i.order_id.to_string() == id)
        .map(ProcessItemDto::from)
        .collect();
    Json(items).into_response()
}

async fn patch_picking_item(
    State(stub): State<Stub>,
    Path((_order, item)): Path<(String, String)>,
    Json(body): Json<PickUpdate>,
) -> Response {
    let mut items = stub.items.lock().unwrap();
    let Some(found) = items.iter_mut().find(|i| i.id.to_string() == item) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match found.record_pick(body.picked_quantity) {
        Ok(()) => Json(ProcessItemDto::from(&*found)).into_response(),
        Err(err) => error(StatusCode::UNPROCESSABLE_ENTITY, &err.to_string()),
    }
}

async fn list_stock_out() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "database is down").into_response()
}

async fn create_inventory(State(stub): State<Stub>, Json(body): Json<Value>) -> Response {
    stub.record_write("POST", "/api/inventory".into(), Some(body.clone()));
    let Ok(input) = serde_json::from_value::<NewInventoryRecord>(body) else {
        return error(StatusCode::BAD_REQUEST, "malformed inventory");
    };
    match MockInventoryRepository::with_records(Vec::new()).create(&input).await {
        Ok(record) => {
            let dto = InventoryRecordDto::from(&record);
            stub.inventory.lock().unwrap().push(record);
            (StatusCode::CREATED, Json(dto)).into_response()
        }
        Err(err) => error(StatusCode::BAD_REQUEST, &err.to_string()),
    }
}

async fn delete_inventory(State(stub): State<Stub>, Path(id): Path<String>) -> Response {
    stub.record_write("DELETE", format!("/api/inventory/{id}"), None);
    let mut rows = stub.inventory.lock().unwrap();
    let Some(at) = rows.iter().position(|r| r.id.to_string() == id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if !rows[at].is_deletable() {
        return error(StatusCode::CONFLICT, "only drafts can be deleted");
    }
    rows.remove(at);
    StatusCode::NO_CONTENT.into_response()
}

async fn patch_inventory_line(
    State(stub): State<Stub>,
    Path((id, line)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    stub.record_write("PATCH", format!("/api/inventory/{id}/lines/{line}"), Some(body.clone()));
    let Some(counted) = body.get("counted_quantity").and_then(Value::as_i64) else {
        return error(StatusCode::BAD_REQUEST, "counted_quantity is required");
    };
    let mut rows = stub.inventory.lock().unwrap();
    let found = rows.iter_mut().find(|r| r.id.to_string() == id);
    let (Some(record), Ok(line)) = (found, line.parse::<InventoryLineId>()) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match record.record_count(line, counted, chrono::Utc::now()) {
        Ok(()) => Json(InventoryRecordDto::from(&*record)).into_response(),
        Err(err) => error(StatusCode::CONFLICT, &err.to_string()),
    }
}

async fn create_picking_order(State(stub): State<Stub>, Json(body): Json<Value>) -> Response {
    stub.record_write("POST", "/api/picking-orders".into(), Some(body.clone()));
    let Ok(input) = serde_json::from_value::<NewPickingOrder>(body) else {
        return error(StatusCode::BAD_REQUEST, "malformed picking order");
    };
    match MockPickingRepository::with_orders(Vec::new()).create(&input).await {
        Ok(order) => (StatusCode::CREATED, Json(PickingOrderDto::from(&order))).into_response(),
        Err(err) => error(StatusCode::BAD_REQUEST, &err.to_string()),
    }
}

/// Unknown receipts come back with a status this client cannot read.
async fn get_stock_in(State(stub): State<Stub>, Path(id): Path<String>) -> Response {
    if let Some(receipt) = stub.receipts.lock().unwrap().iter().find(|r| r.id.to_string() == id) {
        return Json(StockInDto::from(receipt)).into_response();
    }
    Json(json!({
        "id": id,
        "reference_no": "GRN-000001",
        "supplier": "Globex",
        "warehouse": "WH1",
        "status": "exploded",
        "lines": [],
        "created_at": "2024-01-01T08:00:00Z",
        "updated_at": "2024-01-01T08:00:00Z",
    }))
    .into_response()
}

async fn patch_stock_in_line(
    State(stub): State<Stub>,
    Path((id, line)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    stub.record_write("PATCH", format!("/api/stock-in/{id}/lines/{line}"), Some(body.clone()));
    let Some(received) = body.get("received_quantity").and_then(Value::as_i64) else {
        return error(StatusCode::BAD_REQUEST, "received_quantity is required");
    };
    let mut rows = stub.receipts.lock().unwrap();
    let found = rows.iter_mut().find(|r| r.id.to_string() == id);
    let (Some(receipt), Ok(line)) = (found, line.parse::<StockInLineId>()) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match receipt.receive(line, received, chrono::Utc::now()) {
        Ok(()) => Json(StockInDto::from(&*receipt)).into_response(),
        Err(err) => error(StatusCode::UNPROCESSABLE_ENTITY, &err.to_string()),
    }
}

async fn create_stock_out(State(stub): State<Stub>, Json(body): Json<Value>) -> Response {
    stub.record_write("POST", "/api/stock-out".into(), Some(body.clone()));
    let Ok(input) = serde_json::from_value::<NewStockOut>(body) else {
        return error(StatusCode::BAD_REQUEST, "malformed shipment");
    };
    match MockStockOutRepository::with_shipments(Vec::new()).create(&input).await {
        Ok(shipment) => {
            let dto = StockOutDto::from(&shipment);
            stub.shipments.lock().unwrap().push(shipment);
            (StatusCode::CREATED, Json(dto)).into_response()
        }
        Err(err) => error(StatusCode::BAD_REQUEST, &err.to_string()),
    }
}

async fn get_stock_out(State(stub): State<Stub>, Path(id): Path<String>) -> Response {
    let rows = stub.shipments.lock().unwrap();
    match rows.iter().find(|s| s.id.to_string() == id) {
        Some(shipment) => Json(StockOutDto::from(shipment)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn patch_stock_out_status(
    State(stub): State<Stub>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    stub.record_write("PATCH", format!("/api/stock-out/{id}/status"), Some(body.clone()));
    let Some(Ok(status)) = body.get("status").and_then(Value::as_str).map(str::parse::<StockOutStatus>) else {
        return error(StatusCode::BAD_REQUEST, "unknown status");
    };
    let mut rows = stub.shipments.lock().unwrap();
    let Some(shipment) = rows.iter_mut().find(|s| s.id.to_string() == id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match shipment.transition(status, chrono::Utc::now()) {
        Ok(()) => Json(StockOutDto::from(&*shipment)).into_response(),
        Err(err) => error(StatusCode::CONFLICT, &err.to_string()),
    }
}

async fn delete_stock_out(State(stub): State<Stub>, Path(id): Path<String>) -> Response {
    stub.record_write("DELETE", format!("/api/stock-out/{id}"), None);
    let mut rows = stub.shipments.lock().unwrap();
    match rows.iter().position(|s| s.id.to_string() == id) {
        Some(at) if rows[at].is_deletable() => {
            rows.remove(at);
            StatusCode::NO_CONTENT.into_response()
        }
        Some(_) => error(StatusCode::CONFLICT, "only pending shipments can be deleted"),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn login(Json(credentials): Json<Credentials>) -> Response {
    if credentials.username != "demo" || credentials.password != "demo" {
        return error(StatusCode::UNAUTHORIZED, "invalid credentials");
    }
    Json(LoginResponse {
        access_token: TOKEN.to_string(),
        expires_in: 3600,
        user: UserProfileDto::from(&fixtures::demo_user()),
    })
    .into_response()
}

async fn logout() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn me(State(stub): State<Stub>, headers: HeaderMap) -> Response {
    stub.record("/api/auth/me", &headers, HashMap::new());
    if stub.last().bearer.as_deref() != Some(TOKEN) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(UserProfileDto::from(&fixtures::demo_user())).into_response()
}

struct TestServer {
    base_url: String,
    stub: Stub,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let stub = Stub::new();
        let app = Router::new()
            .route("/api/inventory", get(list_inventory).post(create_inventory))
            .route("/api/inventory/:id", get(get_inventory).delete(delete_inventory))
            .route("/api/inventory/:id/status", patch(patch_inventory_status))
            .route("/api/inventory/:id/lines/:line", patch(patch_inventory_line))
            .route("/api/picking-orders", post(create_picking_order))
            .route("/api/picking-orders/:id/items", get(list_picking_items))
            .route("/api/picking-orders/:id/items/:item", patch(patch_picking_item))
            .route("/api/stock-out", get(list_stock_out).post(create_stock_out))
            .route("/api/stock-out/:id", get(get_stock_out).delete(delete_stock_out))
            .route("/api/stock-out/:id/status", patch(patch_stock_out_status))
            .route("/api/stock-in/:id", get(get_stock_in))
            .route("/api/stock-in/:id/lines/:line", patch(patch_stock_in_line))
            .route("/api/auth/login", post(login))
            .route("/api/auth/logout", post(logout))
            .route("/api/auth/me", get(me))
            .with_state(stub.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            stub,
            handle,
        }
    }

    fn config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_api_base_url(self.base_url.as_str())
            .unwrap()
    }

    fn client(&self) -> Arc<HttpClient> {
        Arc::new(HttpClient::new(&self.config()).unwrap())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn inventory_fixture(status: InventoryStatus) -> InventoryRecord {
    fixtures::inventory_records(fixtures::INVENTORY_FIXTURES)
        .into_iter()
        .find(|r| r.status == status)
        .unwrap()
}

#[tokio::test]
async fn list_sends_page_and_non_blank_filters() {
    let server = TestServer::spawn().await;
    let repo = HttpInventoryRepository::new(server.client());

    let filter = InventoryFilter {
        status: Some(InventoryStatus::InProgress),
        warehouse: Some("WH2".into()),
        search: Some("  ".into()),
        ..Default::default()
    };
    let page = repo.list(&filter, PageRequest::new(2, 5)).await.unwrap();
    assert_eq!(page.count, fixtures::INVENTORY_FIXTURES as u64);
    assert_eq!(page.results.len(), 5);
    assert_eq!(page.page, 2);

    let seen = server.stub.last();
    assert_eq!(seen.path, "/api/inventory");
    assert_eq!(seen.query.get("page").map(String::as_str), Some("2"));
    assert_eq!(seen.query.get("page_size").map(String::as_str), Some("5"));
    assert_eq!(seen.query.get("status").map(String::as_str), Some("in_progress"));
    assert_eq!(seen.query.get("warehouse").map(String::as_str), Some("WH2"));
    assert!(!seen.query.contains_key("search"));
    assert_eq!(seen.bearer, None);
}

#[tokio::test]
async fn get_maps_missing_rows_to_not_found() {
    let server = TestServer::spawn().await;
    let repo = HttpInventoryRepository::new(server.client());

    let known = inventory_fixture(InventoryStatus::Draft);
    assert_eq!(repo.get(known.id).await.unwrap(), known);

    let err = repo.get(InventoryRecordId::generate()).await.unwrap_err();
    assert_eq!(err, ClientError::NotFound);
}

#[tokio::test]
async fn status_patch_surfaces_backend_conflicts() {
    let server = TestServer::spawn().await;
    let repo = HttpInventoryRepository::new(server.client());

    let draft = inventory_fixture(InventoryStatus::Draft);
    let started = repo
        .update_status(draft.id, InventoryStatus::InProgress)
        .await
        .unwrap();
    assert_eq!(started.status, InventoryStatus::InProgress);

    let done = inventory_fixture(InventoryStatus::Completed);
    let err = repo
        .update_status(done.id, InventoryStatus::Draft)
        .await
        .unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 409);
            assert!(message.contains("invalid status transition"), "{message}");
        }
        other => panic!("expected an api error, got {other:?}"),
    }
}

#[tokio::test]
async fn plain_text_failures_keep_their_body() {
    let server = TestServer::spawn().await;
    let repo = HttpStockOutRepository::new(server.client());

    let err = repo
        .list(&StockOutFilter::default(), PageRequest::default())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ClientError::Api {
            status: 500,
            message: "database is down".into(),
        }
    );
}

#[tokio::test]
async fn unknown_status_string_is_a_decode_error() {
    let server = TestServer::spawn().await;
    let repo = HttpStockInRepository::new(server.client());

    let err = repo.get(StockInId::generate()).await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn picks_are_sent_per_item() {
    let server = TestServer::spawn().await;
    let repo = HttpPickingRepository::new(server.client());

    let (order, items) = fixtures::picking_orders(4)
        .into_iter()
        .find(|(o, _)| o.status == PickingStatus::InProgress)
        .unwrap();
    assert_eq!(repo.items(order.id).await.unwrap(), items);

    let open = items.iter().find(|i| !i.is_picked()).unwrap();
    let updated = repo
        .record_pick(order.id, open.id, open.requested_quantity)
        .await
        .unwrap();
    assert!(updated.is_picked());

    let err = repo
        .record_pick(order.id, open.id, open.requested_quantity + 1)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 422, .. }));

    assert!(repo.items(PickingOrderId::generate()).await.unwrap().is_empty());
}

#[tokio::test]
async fn login_authorizes_later_calls_until_logout() {
    let server = TestServer::spawn().await;
    let client = server.client();
    let repo = HttpAuthRepository::new(client.clone());

    assert_eq!(repo.me().await.unwrap_err(), ClientError::Unauthorized);

    let wrong = repo.login(&Credentials::new("demo", "guess")).await.unwrap_err();
    assert_eq!(wrong, ClientError::Unauthorized);
    assert!(!client.has_token());

    let session: Session = repo.login(&Credentials::new("demo", "demo")).await.unwrap();
    assert_eq!(session.access_token, TOKEN);
    assert_eq!((session.expires_at - session.issued_at).num_seconds(), 3600);
    assert!(client.has_token());

    let profile = repo.me().await.unwrap();
    assert_eq!(profile, fixtures::demo_user());
    assert_eq!(server.stub.last().bearer.as_deref(), Some(TOKEN));

    repo.logout().await.unwrap();
    assert!(!client.has_token());
}

#[tokio::test]
async fn stores_work_over_http() {
    let server = TestServer::spawn().await;
    let config = server.config().with_page_size(4).unwrap();
    let container = Container::with_repositories(config, Repositories::http(server.client()));

    assert_eq!(container.inventory.load().await, Some(4));
    let state = container.inventory.list().snapshot();
    assert_eq!(state.count, fixtures::INVENTORY_FIXTURES as u64);
    assert_eq!(state.total_pages(), 3);

    container.inventory.list().next_page().await;
    assert_eq!(container.inventory.list().pagination().page, 2);
    assert_eq!(server.stub.last().query.get("page").map(String::as_str), Some("2"));

    assert_eq!(container.stock_out.load().await, None);
    let error = container.stock_out.list().snapshot().error.unwrap();
    assert!(error.contains("database is down"), "{error}");
}

fn stock_in_fixture(status: StockInStatus) -> StockIn {
    fixtures::stock_ins(fixtures::STOCK_IN_FIXTURES)
        .into_iter()
        .find(|r| r.status == status)
        .unwrap()
}

fn stock_out_fixture(status: StockOutStatus) -> StockOut {
    fixtures::stock_outs(fixtures::STOCK_OUT_FIXTURES)
        .into_iter()
        .find(|s| s.status == status)
        .unwrap()
}

#[tokio::test]
async fn create_posts_the_form_input() {
    let server = TestServer::spawn().await;
    let repo = HttpInventoryRepository::new(server.client());

    let created = repo
        .create(&NewInventoryRecord {
            warehouse: "WH3".into(),
            note: Some("spot check".into()),
            lines: vec![NewInventoryLine {
                product_code: "SKU-7".into(),
                product_name: "Hinge".into(),
                location_code: "C-03-2".into(),
                expected_quantity: 4,
            }],
        })
        .await
        .unwrap();
    assert_eq!(created.status, InventoryStatus::Draft);
    assert_eq!(created.lines[0].expected_quantity, 4);

    let seen = server.stub.last();
    assert_eq!((seen.method, seen.path.as_str()), ("POST", "/api/inventory"));
    let body = seen.body.unwrap();
    assert_eq!(body["warehouse"], "WH3");
    assert_eq!(body["lines"][0]["product_code"], "SKU-7");
    assert_eq!(body["lines"][0]["expected_quantity"], 4);

    assert_eq!(repo.get(created.id).await.unwrap(), created);
}

#[tokio::test]
async fn picking_orders_are_created_from_their_lines() {
    let server = TestServer::spawn().await;
    let repo = HttpPickingRepository::new(server.client());

    let order = repo
        .create(&NewPickingOrder {
            customer: "Contoso".into(),
            warehouse: "WH1".into(),
            priority: PickingPriority::High,
            due_at: None,
            lines: vec![NewPickingOrderLine {
                product_code: "SKU-1".into(),
                product_name: "Bolt".into(),
                quantity: 6,
            }],
        })
        .await
        .unwrap();
    assert_eq!(order.status, PickingStatus::Pending);
    assert_eq!(order.lines[0].quantity, 6);

    let seen = server.stub.last();
    assert_eq!((seen.method, seen.path.as_str()), ("POST", "/api/picking-orders"));
    let body = seen.body.unwrap();
    assert_eq!(body["customer"], "Contoso");
    assert_eq!(body["priority"], "high");
    assert_eq!(body["lines"][0]["quantity"], 6);
}

#[tokio::test]
async fn counts_are_patched_per_line() {
    let server = TestServer::spawn().await;
    let repo = HttpInventoryRepository::new(server.client());

    let counting = inventory_fixture(InventoryStatus::InProgress);
    let line = counting.lines[0].id;
    let updated = repo.record_count(counting.id, line, 7).await.unwrap();
    assert_eq!(updated.lines[0].counted_quantity, Some(7));

    let seen = server.stub.last();
    assert_eq!(seen.method, "PATCH");
    assert_eq!(seen.path, format!("/api/inventory/{}/lines/{line}", counting.id));
    assert_eq!(seen.body, Some(json!({ "counted_quantity": 7 })));

    let draft = inventory_fixture(InventoryStatus::Draft);
    let err = repo.record_count(draft.id, draft.lines[0].id, 1).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 409, .. }), "{err:?}");
}

#[tokio::test]
async fn delete_is_sent_and_conflicts_surface() {
    let server = TestServer::spawn().await;
    let repo = HttpInventoryRepository::new(server.client());

    let draft = inventory_fixture(InventoryStatus::Draft);
    repo.delete(draft.id).await.unwrap();
    let seen = server.stub.last();
    assert_eq!(seen.method, "DELETE");
    assert_eq!(seen.path, format!("/api/inventory/{}", draft.id));
    assert_eq!(repo.get(draft.id).await.unwrap_err(), ClientError::NotFound);

    let done = inventory_fixture(InventoryStatus::Completed);
    let err = repo.delete(done.id).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 409, .. }), "{err:?}");
    assert_eq!(repo.delete(InventoryRecordId::generate()).await.unwrap_err(), ClientError::NotFound);
}

#[tokio::test]
async fn receipts_are_patched_per_line() {
    let server = TestServer::spawn().await;
    let repo = HttpStockInRepository::new(server.client());

    let receiving = stock_in_fixture(StockInStatus::Receiving);
    assert_eq!(repo.get(receiving.id).await.unwrap(), receiving);

    let line = receiving.lines[0].id;
    let updated = repo.receive_line(receiving.id, line, 1).await.unwrap();
    assert_eq!(updated.lines[0].received_quantity, 1);

    let seen = server.stub.last();
    assert_eq!(seen.method, "PATCH");
    assert_eq!(seen.path, format!("/api/stock-in/{}/lines/{line}", receiving.id));
    assert_eq!(seen.body, Some(json!({ "received_quantity": 1 })));

    let too_many = receiving.lines[0].expected_quantity + 1;
    let err = repo.receive_line(receiving.id, line, too_many).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 422, .. }), "{err:?}");
}

#[tokio::test]
async fn shipments_round_trip_through_every_write() {
    let server = TestServer::spawn().await;
    let repo = HttpStockOutRepository::new(server.client());

    let pending = stock_out_fixture(StockOutStatus::Pending);
    assert_eq!(repo.get(pending.id).await.unwrap(), pending);
    assert_eq!(repo.get(StockOutId::generate()).await.unwrap_err(), ClientError::NotFound);

    let picking = repo.update_status(pending.id, StockOutStatus::Picking).await.unwrap();
    assert_eq!(picking.status, StockOutStatus::Picking);
    let seen = server.stub.last();
    assert_eq!(seen.method, "PATCH");
    assert_eq!(seen.path, format!("/api/stock-out/{}/status", pending.id));
    assert_eq!(seen.body, Some(json!({ "status": "picking" })));

    let created = repo
        .create(&NewStockOut {
            destination: "Tailspin".into(),
            warehouse: "WH2".into(),
            note: None,
            lines: vec![NewStockOutLine {
                product_code: "SKU-9".into(),
                product_name: "Crate".into(),
                location_code: "B-02-1".into(),
                quantity: 4,
            }],
        })
        .await
        .unwrap();
    let seen = server.stub.last();
    assert_eq!((seen.method, seen.path.as_str()), ("POST", "/api/stock-out"));
    let body = seen.body.unwrap();
    assert_eq!(body["destination"], "Tailspin");
    assert_eq!(body["lines"][0]["location_code"], "B-02-1");

    repo.delete(created.id).await.unwrap();
    let seen = server.stub.last();
    assert_eq!(seen.method, "DELETE");
    assert_eq!(seen.path, format!("/api/stock-out/{}", created.id));

    let err = repo.delete(picking.id).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 409, .. }), "{err:?}");
}
