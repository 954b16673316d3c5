//! Full client lifecycle against a live server on an ephemeral port.
//!
//! Every SDK operation goes over real HTTP through ureq, backed by a SQLite
//! store, so this also catches drift between the SDK and server schemas.

use std::sync::Arc;

use client_core::{ApiError, ClientApi, ClientPatch, HttpMethod, HttpResponse, NewClient};
use client_server::{ClientService, SqliteClientStore};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// 4xx/5xx come back as data rather than `Err` so the SDK does the status
/// interpretation.
fn execute(req: client_core::HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            agent.put(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            let store = SqliteClientStore::open_in_memory().unwrap();
            client_server::run(listener, ClientService::new(Arc::new(store))).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn crud_lifecycle() {
    let api = ClientApi::new(&format!("http://{}", start_server()));

    // list: empty
    let clients = api.parse_list_clients(execute(api.build_list_clients())).unwrap();
    assert!(clients.is_empty(), "expected empty list");

    // create
    let created = api
        .parse_create_client(execute(api.build_create_client(&NewClient::named("Maria")).unwrap()))
        .unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.name, "Maria");
    assert!(created.email.is_none());
    assert!(created.tax_id.is_none());

    // get
    let fetched = api.parse_get_client(execute(api.build_get_client(1))).unwrap();
    assert_eq!(fetched, created);

    // update email only
    let patch = ClientPatch {
        email: Some("m@x.com".to_string()),
        ..ClientPatch::default()
    };
    api.parse_update_client(execute(api.build_update_client(1, &patch).unwrap()))
        .unwrap();
    let fetched = api.parse_get_client(execute(api.build_get_client(1))).unwrap();
    assert_eq!(fetched.name, "Maria");
    assert_eq!(fetched.email.as_deref(), Some("m@x.com"));
    assert!(fetched.tax_id.is_none());

    // update tax id only; email survives
    let patch = ClientPatch {
        tax_id: Some("123".to_string()),
        ..ClientPatch::default()
    };
    api.parse_update_client(execute(api.build_update_client(1, &patch).unwrap()))
        .unwrap();
    let fetched = api.parse_get_client(execute(api.build_get_client(1))).unwrap();
    assert_eq!(fetched.email.as_deref(), Some("m@x.com"));
    assert_eq!(fetched.tax_id.as_deref(), Some("123"));

    // blank name is rejected
    let patch = ClientPatch {
        name: Some(" ".to_string()),
        ..ClientPatch::default()
    };
    let err = api
        .parse_update_client(execute(api.build_update_client(1, &patch).unwrap()))
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation { .. }));

    // delete
    api.parse_delete_client(execute(api.build_delete_client(1))).unwrap();

    // get after delete
    let err = api.parse_get_client(execute(api.build_get_client(1))).unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));

    // update and delete after delete
    let err = api
        .parse_update_client(execute(api.build_update_client(1, &ClientPatch::default()).unwrap()))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
    let err = api.parse_delete_client(execute(api.build_delete_client(1))).unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));

    // list: empty again
    let clients = api.parse_list_clients(execute(api.build_list_clients())).unwrap();
    assert!(clients.is_empty(), "expected empty list after delete");
}
