//! Long-running tool loop over newline-delimited JSON.
//!
//! Every input line is one tool call, e.g.
//! `{"id": 7, "tool": "list_queues", "qmgr_name": "QM1"}`. Calls run
//! concurrently over one shared [`MqTools`], so they share one token cache.
//! Each finished call writes one reply line `{"id", "tool", "result"}`;
//! replies come back in completion order, `id` is echoed to pair them up.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::tools::{MqTools, ToolCall};

/// One input line.
#[derive(Debug, Deserialize)]
pub struct ToolRequest {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(flatten)]
    pub call: ToolCall,
}

/// One output line.
#[derive(Debug, Serialize, PartialEq)]
pub struct ToolReply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<&'static str>,
    pub result: String,
}

impl ToolReply {
    fn invalid(err: serde_json::Error) -> Self {
        Self {
            id: None,
            tool: None,
            result: format!("Invalid tool call: {}", err),
        }
    }
}

/// Serve tool calls from `reader` until it reaches EOF and every call
/// already started has been answered on `writer`.
pub async fn serve<R, W>(tools: MqTools, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut calls: JoinSet<ToolReply> = JoinSet::new();
    let mut input_open = true;

    info!("serving tool calls");
    loop {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    debug!("input closed, {} call(s) in flight", calls.len());
                    input_open = false;
                    continue;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<ToolRequest>(&line) {
                    Ok(request) => {
                        let tools = tools.clone();
                        calls.spawn(async move {
                            let result = tools.call(&request.call).await;
                            ToolReply {
                                id: request.id,
                                tool: Some(request.call.name()),
                                result,
                            }
                        });
                    }
                    Err(err) => {
                        warn!("rejecting input line: {}", err);
                        write_reply(&mut writer, &ToolReply::invalid(err)).await?;
                    }
                }
            }
            Some(joined) = calls.join_next() => {
                match joined {
                    Ok(reply) => write_reply(&mut writer, &reply).await?,
                    Err(err) => error!("tool task failed: {}", err),
                }
            }
            else => break,
        }
    }

    info!("tool loop finished");
    Ok(())
}

async fn write_reply<W: AsyncWrite + Unpin>(writer: &mut W, reply: &ToolReply) -> Result<()> {
    let mut line = serde_json::to_string(reply)?;
    line.push('\n');
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
