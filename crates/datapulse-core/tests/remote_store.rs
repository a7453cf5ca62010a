#![cfg(feature = "remote")]

use std::cell::RefCell;
use std::time::Duration;

use datapulse_core::config::StoreConfig;
use datapulse_core::ops::load_tasks;
use datapulse_core::remote::RemoteStore;
use datapulse_core::{
  Board,
  BoardAction,
  TaskDraft,
  TaskId,
  Theme
};
use tokio::io::{
  AsyncReadExt,
  AsyncWriteExt
};
use tokio::net::{
  TcpListener,
  TcpStream
};
use tokio::task::JoinHandle;

/// One-shot HTTP server answering a single
/// request with a canned response and
/// handing back the raw request text.
struct Stub {
  base:    String,
  request: JoinHandle<String>
}

impl Stub {
  async fn start(
    status: &'static str,
    body: &'static str
  ) -> Self {
    let listener =
      TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener
      .local_addr()
      .expect("stub address");

    let request = tokio::spawn(async move {
      let (mut socket, _) = listener
        .accept()
        .await
        .expect("accept client");
      let raw = read_request(&mut socket).await;

      let mut response =
        format!("HTTP/1.1 {status}\r\nconnection: close\r\n");
      if !status.starts_with("204") {
        response.push_str(&format!(
          "content-type: application/json\r\ncontent-length: {}\r\n",
          body.len()
        ));
      }
      response.push_str("\r\n");
      response.push_str(body);

      socket
        .write_all(response.as_bytes())
        .await
        .expect("write response");
      let _ = socket.shutdown().await;
      raw
    });

    Self {
      base: format!("http://{addr}"),
      request
    }
  }

  fn store(&self) -> RemoteStore {
    RemoteStore::new(&StoreConfig {
      url: self.base.clone(),
      key: "secret-key".to_string(),
      timeout: Duration::from_secs(5),
      ..StoreConfig::default()
    })
    .expect("build client")
  }

  async fn received(self) -> String {
    self.request.await.expect("stub task")
  }
}

async fn read_request(
  socket: &mut TcpStream
) -> String {
  let mut buf = Vec::new();
  let mut chunk = [0_u8; 1024];
  loop {
    let read = socket
      .read(&mut chunk)
      .await
      .expect("read request");
    if read == 0 {
      break;
    }
    buf.extend_from_slice(&chunk[..read]);

    let text = String::from_utf8_lossy(&buf);
    if let Some(head_end) = text.find("\r\n\r\n") {
      let length = text[..head_end]
        .lines()
        .find_map(|line| {
          let (name, value) = line.split_once(':')?;
          name.trim()
            .eq_ignore_ascii_case("content-length")
            .then(|| value.trim().parse::<usize>().ok())
            .flatten()
        })
        .unwrap_or(0);
      if buf.len() >= head_end + 4 + length {
        break;
      }
    }
  }
  String::from_utf8_lossy(&buf).into_owned()
}

fn draft(title: &str, query: &str) -> TaskDraft {
  TaskDraft::parse(title, query).expect("valid draft")
}

#[tokio::test]
async fn list_sends_credentials_and_oldest_first_order() {
  let stub = Stub::start(
    "200 OK",
    r#"[{"id":1,"title":"Sales","sqlQuery":"SELECT MAX(sale_date) FROM sales;","createdAt":"2026-10-01T08:00:00+00:00"},
        {"id":2,"title":"HR","sqlQuery":"SELECT MAX(last_modified) FROM employee_data;","createdAt":"2026-10-02T08:00:00+00:00"}]"#,
  )
  .await;

  let tasks = stub.store().list().await.expect("list succeeds");
  assert_eq!(tasks.len(), 2);
  assert_eq!(tasks[0].title, "Sales");
  assert_eq!(tasks[1].id, TaskId::new("2"));

  let request = stub.received().await;
  assert!(
    request.starts_with(
      "GET /rest/v1/data_tasks?select=*&order=createdAt.asc HTTP/1.1"
    ),
    "unexpected request line: {request}"
  );
  let lowered = request.to_ascii_lowercase();
  assert!(lowered.contains("apikey: secret-key"));
  assert!(lowered.contains("authorization: bearer secret-key"));
}

#[tokio::test]
async fn insert_asks_for_the_created_row() {
  let stub = Stub::start(
    "201 Created",
    r#"[{"id":5,"title":"Sales","sqlQuery":"SELECT MAX(x) FROM y;","createdAt":"2026-10-19T04:30:00.123456+00:00"}]"#,
  )
  .await;

  let created = stub
    .store()
    .insert(&draft("Sales", "SELECT MAX(x) FROM y;"))
    .await
    .expect("insert succeeds");
  assert_eq!(created.id, TaskId::new("5"));
  assert!(created.created_at.is_some());

  let request = stub.received().await;
  assert!(request.starts_with("POST /rest/v1/data_tasks HTTP/1.1"));
  assert!(
    request
      .to_ascii_lowercase()
      .contains("prefer: return=representation")
  );
  assert!(request.ends_with(
    r#"[{"title":"Sales","sqlQuery":"SELECT MAX(x) FROM y;"}]"#
  ));
}

#[tokio::test]
async fn update_patches_a_single_row() {
  let stub = Stub::start("204 No Content", "").await;

  stub
    .store()
    .update(&TaskId::new("5"), &draft("Sales2", "SELECT 1;"))
    .await
    .expect("update succeeds");

  let request = stub.received().await;
  assert!(request.starts_with("PATCH /rest/v1/data_tasks?id=eq.5 HTTP/1.1"));
  assert!(request.ends_with(r#"{"title":"Sales2","sqlQuery":"SELECT 1;"}"#));
}

#[tokio::test]
async fn delete_targets_the_id() {
  let stub = Stub::start("204 No Content", "").await;

  stub
    .store()
    .delete(&TaskId::new("0b6a3c1e"))
    .await
    .expect("delete succeeds");

  let request = stub.received().await;
  assert!(request.starts_with("DELETE /rest/v1/data_tasks?id=eq.0b6a3c1e HTTP/1.1"));
}

#[tokio::test]
async fn backend_message_becomes_the_store_error() {
  let stub = Stub::start(
    "409 Conflict",
    r#"{"code":"23505","message":"duplicate key value violates unique constraint \"data_tasks_pkey\"","details":null,"hint":null}"#,
  )
  .await;

  let err = stub
    .store()
    .insert(&draft("Sales", "SELECT 1;"))
    .await
    .expect_err("insert fails");
  assert_eq!(
    err.message(),
    "duplicate key value violates unique constraint \"data_tasks_pkey\""
  );
  stub.received().await;
}

#[tokio::test]
async fn unreachable_store_reports_transport_failure() {
  let listener = TcpListener::bind("127.0.0.1:0")
    .await
    .expect("bind");
  let addr = listener.local_addr().expect("addr");
  drop(listener);

  let store = RemoteStore::new(&StoreConfig {
    url: format!("http://{addr}"),
    key: "k".to_string(),
    timeout: Duration::from_secs(2),
    ..StoreConfig::default()
  })
  .expect("build client");

  let err = store.list().await.expect_err("nothing listens");
  assert!(err.message().starts_with("data store request failed"));
}

#[tokio::test]
async fn board_loads_through_the_remote_store() {
  let stub = Stub::start(
    "200 OK",
    r#"[{"id":"a1","title":"Finance","sqlQuery":"SELECT MAX(transaction_date) FROM finance_records;"}]"#,
  )
  .await;
  let store = stub.store();
  let board = RefCell::new(Board::new(Theme::Dark));

  load_tasks(Some(&store), |action: BoardAction| {
    board.borrow_mut().apply(action)
  })
  .await;

  let board = board.borrow();
  assert!(!board.is_loading());
  assert_eq!(board.tasks().len(), 1);
  assert_eq!(board.tasks()[0].last_updated, None);
  stub.received().await;
}
