// Tool loop over newline-delimited JSON:
//  - calls in one process share one token cache
//  - every call gets one reply line, bad lines get an error line
//  - the loop ends once input is closed and all calls are answered

#[cfg(test)]
mod test {

use serde_json::Value;

use crate::server::server::serve;
use crate::tests::common::{backend_config, build_gateway, spawn_backend, start_clock};
use crate::tools::MqTools;

fn reply_lines(output: &[u8]) -> Vec<Value> {
    std::str::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn reply_for(replies: &[Value], id: i64) -> &Value {
    replies
        .iter()
        .find(|reply| reply["id"] == id)
        .unwrap_or_else(|| panic!("no reply for id {id}: {replies:?}"))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn two_calls_share_one_login() {
    let (handle, addr, backend) = spawn_backend(vec![]).await;
    let tools = MqTools::new(build_gateway(backend_config(addr), start_clock()));

    let input = concat!(
        r#"{"id": 1, "tool": "dspmq"}"#,
        "\n",
        r#"{"id": 2, "tool": "list_queues", "qmgr_name": "QM1"}"#,
        "\n",
    );
    let mut output = Vec::new();
    serve(tools, input.as_bytes(), &mut output).await.unwrap();

    let replies = reply_lines(&output);
    assert_eq!(replies.len(), 2, "{replies:?}");
    assert_eq!(reply_for(&replies, 1)["tool"], "dspmq");
    assert_eq!(reply_for(&replies, 1)["result"], "200 /qmgr");
    assert_eq!(reply_for(&replies, 2)["tool"], "list_queues");
    assert_eq!(reply_for(&replies, 2)["result"], "200 /qmgr/QM1/queues");

    assert_eq!(backend.logins(), 1);
    assert_eq!(backend.calls(), 2);
    let seen: Vec<_> = backend.received().into_iter().map(|r| r.authorization).collect();
    assert!(seen.iter().all(|auth| auth.as_deref() == Some("Bearer tok-1")), "{seen:?}");

    handle.abort();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn bad_lines_are_answered_and_skipped() {
    let (handle, addr, backend) = spawn_backend(vec![]).await;
    let tools = MqTools::new(build_gateway(backend_config(addr), start_clock()));

    let input = concat!(
        "not json\n",
        "\n",
        r#"{"id": 1, "tool": "drop_everything"}"#,
        "\n",
        r#"{"id": 2, "tool": "get_qmgr_status", "qmgr_name": "QM1"}"#,
        "\n",
    );
    let mut output = Vec::new();
    serve(tools, input.as_bytes(), &mut output).await.unwrap();

    let replies = reply_lines(&output);
    assert_eq!(replies.len(), 3, "{replies:?}");
    let invalid: Vec<_> = replies
        .iter()
        .filter(|reply| reply["result"].as_str().unwrap().starts_with("Invalid tool call"))
        .collect();
    assert_eq!(invalid.len(), 2, "{replies:?}");
    assert!(invalid.iter().all(|reply| reply.get("tool").is_none()));

    assert_eq!(reply_for(&replies, 2)["result"], "200 /qmgr/QM1/status");
    assert_eq!(backend.calls(), 1);

    handle.abort();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn failed_call_replies_with_error_text() {
    let (handle, addr, backend) = spawn_backend(vec![axum::http::StatusCode::NOT_FOUND]).await;
    let tools = MqTools::new(build_gateway(backend_config(addr), start_clock()));

    let input = r#"{"id": "q", "tool": "get_queue_details", "qmgr_name": "QM1", "queue_name": "MISSING"}"#;
    let mut output = Vec::new();
    serve(tools, input.as_bytes(), &mut output).await.unwrap();

    let replies = reply_lines(&output);
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0]["id"], "q");
    let result = replies[0]["result"].as_str().unwrap();
    assert!(result.starts_with("Error getting queue details: "), "{result}");
    assert!(result.contains("404"), "{result}");
    assert_eq!(backend.calls(), 1);

    handle.abort();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn empty_input_ends_without_output() {
    let (handle, addr, backend) = spawn_backend(vec![]).await;
    let tools = MqTools::new(build_gateway(backend_config(addr), start_clock()));

    let mut output = Vec::new();
    serve(tools, &b""[..], &mut output).await.unwrap();

    assert!(output.is_empty());
    assert_eq!(backend.logins(), 0);

    handle.abort();
}

}
