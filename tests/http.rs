use axum::{
    extract::{Query, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Clone)]
struct SeenWrite {
    method: String,
    bearer: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct MockState {
    seen: Arc<StdMutex<Vec<SeenWrite>>>,
}

/// Stand-in for the remote collection API: a fixed `root` payload on the
/// read side, and a write side that records every request it gets.
struct MockUpstream {
    base_url: String,
    update_url: String,
    seen: Arc<StdMutex<Vec<SeenWrite>>>,
}

fn fixture_root() -> Value {
    json!([
        {
            "deviceId": "D1",
            "deviceName": "Kamion 7",
            "dateTime": "2024-05-01 08:00:00",
            "rfid_value": "-",
            "collectionId": 9001,
            "NazivObjekta": "Trg 1"
        },
        {
            "deviceId": "D1",
            "dateTime": "2024-05-01 09:00:00",
            "rfid_value": "AB12",
            "rfid_type": "card"
        },
        // Outside the selected day; the API over-fetches like this.
        {
            "deviceId": "D1",
            "dateTime": "2024-05-02 09:00:00",
            "rfid_value": "CD34"
        },
        {
            "deviceId": "D2",
            "deviceName": "Kamion 9",
            "date": "1.5.2024",
            "zaduzio": "Ana",
            "_id": "cfg-9"
        }
    ])
}

fn bearer_of(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

async fn mock_read(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    // Sentinel dates answer with the broken envelopes the real API has
    // been seen to produce.
    match params.get("dateFrom").map(String::as_str) {
        Some("2024-06-01") => Json(json!({})),
        Some("2024-06-02") => Json(json!({ "root": 5 })),
        Some("2024-06-03") => Json(json!([])),
        _ => Json(json!({ "root": fixture_root() })),
    }
}

async fn mock_create(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.seen.lock().unwrap().push(SeenWrite {
        method: "POST".into(),
        bearer: bearer_of(&headers),
        body,
    });
    Json(json!({ "_id": "mock-created-1" }))
}

async fn mock_update(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.seen.lock().unwrap().push(SeenWrite {
        method: "PUT".into(),
        bearer: bearer_of(&headers),
        body,
    });
    Json(json!({ "ok": true }))
}

static MOCK: Lazy<MockUpstream> = Lazy::new(|| {
    let port = pick_free_port();
    let seen = Arc::new(StdMutex::new(Vec::new()));
    let state = MockState { seen: Arc::clone(&seen) };

    // Own thread with its own runtime so the mock outlives any one test's
    // tokio runtime.
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("mock runtime");
        runtime.block_on(async move {
            let app = Router::new()
                .route("/evidencija", get(mock_read))
                .route("/update", post(mock_create).put(mock_update))
                .with_state(state);
            let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
                .await
                .expect("bind mock upstream");
            axum::serve(listener, app).await.expect("serve mock upstream");
        });
    });

    MockUpstream {
        base_url: format!("http://127.0.0.1:{port}/evidencija"),
        update_url: format!("http://127.0.0.1:{port}/update"),
        seen,
    }
});

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(base_url.to_string()).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    // Touching MOCK starts the upstream stand-in; make sure it listens
    // before the dashboard gets a chance to talk to it.
    wait_until_ready(&MOCK.base_url).await;

    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_pickup_dashboard"))
        .env("PORT", port.to_string())
        .env("API_TOKEN", "test-token")
        .env("UPSTREAM_BASE_URL", &MOCK.base_url)
        .env("UPSTREAM_UPDATE_URL", &MOCK.update_url)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn load_day(client: &Client, base_url: &str) -> Value {
    let response = client
        .get(format!("{base_url}/api/day?date=2024-05-01"))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

#[tokio::test]
async fn http_load_day_aggregates_devices() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let body = load_day(&client, &server.base_url).await;
    assert_eq!(body["date"], "2024-05-01");

    let devices = body["devices"].as_array().unwrap();
    assert_eq!(devices.len(), 2);

    let d1 = &devices[0];
    assert_eq!(d1["deviceId"], "D1");
    assert_eq!(d1["deviceName"], "Kamion 7");
    assert_eq!(d1["totalPickups"], 2);
    assert_eq!(d1["withRfid"], 1);
    assert_eq!(d1["withoutRfid"], 1);
    assert_eq!(d1["rfidPercentage"], 50);
    assert_eq!(d1["hasConfigForSelectedDate"], false);
    assert_eq!(d1["pickups"].as_array().unwrap().len(), 2);
    assert_eq!(d1["pickups"][0]["collectionId"], "9001");
    assert_eq!(d1["pickups"][0]["facilityName"], "Trg 1");

    let d2 = &devices[1];
    assert_eq!(d2["deviceId"], "D2");
    assert_eq!(d2["totalPickups"], 0);
    assert_eq!(d2["hasConfigForSelectedDate"], true);
    assert_eq!(d2["responsiblePerson"], "Ana");
    assert_eq!(d2["configRecordId"], "cfg-9");
}

#[tokio::test]
async fn http_rejects_malformed_date() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/day?date=01.05.2024", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn http_edit_creates_then_updates() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    load_day(&client, &server.base_url).await;
    MOCK.seen.lock().unwrap().clear();

    // D1 has no configuration record: the first save must be a create
    // dated to the selected day.
    let response = client
        .post(format!("{}/api/edit", server.base_url))
        .json(&json!({
            "deviceId": "D1",
            "responsiblePerson": "Marko",
            "napomena": "3. smjena"
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["responsiblePerson"], "Marko");
    assert_eq!(updated["configRecordId"], "mock-created-1");
    assert_eq!(updated["hasConfigForSelectedDate"], true);

    {
        let seen = MOCK.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, "POST");
        assert_eq!(seen[0].bearer.as_deref(), Some("test-token"));
        assert!(seen[0].body.get("_id").is_none());
        assert_eq!(seen[0].body["deviceName"], "Kamion 7");
        assert_eq!(seen[0].body["zadužio"], "Marko");
        assert_eq!(seen[0].body["napomena"], "3. smjena");
        assert_eq!(seen[0].body["date"], "01.05.2024");
    }

    // The returned id is kept: the second save is an update against it.
    let response = client
        .post(format!("{}/api/edit", server.base_url))
        .json(&json!({ "deviceId": "D1", "regOznaka": "ZG-123" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    {
        let seen = MOCK.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].method, "PUT");
        assert_eq!(seen[1].body["_id"], "mock-created-1");
        assert_eq!(seen[1].body["reg_oznaka"], "ZG-123");
        // The earlier edit survives into the next payload.
        assert_eq!(seen[1].body["zadužio"], "Marko");
    }

    // D2 was surfaced from an existing configuration record: its update
    // must carry that record's original date string verbatim.
    let response = client
        .post(format!("{}/api/edit", server.base_url))
        .json(&json!({ "deviceId": "D2", "napomena": "2. smjena" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    {
        let seen = MOCK.seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[2].method, "PUT");
        assert_eq!(seen[2].body["_id"], "cfg-9");
        assert_eq!(seen[2].body["date"], "1.5.2024");
    }

    // Unknown device is a 404, and nothing reaches the upstream.
    let response = client
        .post(format!("{}/api/edit", server.base_url))
        .json(&json!({ "deviceId": "NOPE", "napomena": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(MOCK.seen.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn http_treats_malformed_root_as_empty_day() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    // Missing root, root of the wrong type, and a top-level array all
    // load as an empty day rather than an error.
    for date in ["2024-06-01", "2024-06-02", "2024-06-03"] {
        let response = client
            .get(format!("{}/api/day?date={date}", server.base_url))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success(), "date {date}");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["date"], date);
        assert_eq!(body["devices"].as_array().unwrap().len(), 0, "date {date}");
    }
}

#[tokio::test]
async fn http_index_serves_the_shell() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client.get(&server.base_url).send().await.unwrap();
    assert!(response.status().is_success());
    let page = response.text().await.unwrap();
    assert!(page.contains("collection-date"));
    assert!(page.contains("/api/day"));
}
