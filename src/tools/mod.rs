//! Passthrough administrative operations.
//!
//! Each operation is a fixed path template over [`AuthenticatedClient::request`].
//! Results are always text: the response body, or a descriptive error line.
//! A failing operation never takes the caller down.

use clap::Subcommand;
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::client::{AuthenticatedClient, RequestOptions};
use crate::error::GatewayError;

/// One named tool invocation with its arguments.
///
/// On the wire the tool name sits next to its arguments:
/// `{"tool": "list_queues", "qmgr_name": "QM1"}`.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ToolCall {
    /// List available queue managers and their status
    Dspmq,
    /// Get the status of a specific queue manager
    GetQmgrStatus { qmgr_name: String },
    /// List all queues for a specific queue manager
    ListQueues { qmgr_name: String },
    /// Get details of a specific queue
    GetQueueDetails { qmgr_name: String, queue_name: String },
    /// Get attributes of a specific queue
    GetQueueAttributes { qmgr_name: String, queue_name: String },
    /// List all channels for a specific queue manager
    ListChannels { qmgr_name: String },
    /// Get details of a specific channel
    GetChannelDetails { qmgr_name: String, channel_name: String },
    /// Run an MQSC command against a specific queue manager
    Runmqsc { qmgr_name: String, mqsc_command: String },
}

impl ToolCall {
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::Dspmq => "dspmq",
            ToolCall::GetQmgrStatus { .. } => "get_qmgr_status",
            ToolCall::ListQueues { .. } => "list_queues",
            ToolCall::GetQueueDetails { .. } => "get_queue_details",
            ToolCall::GetQueueAttributes { .. } => "get_queue_attributes",
            ToolCall::ListChannels { .. } => "list_channels",
            ToolCall::GetChannelDetails { .. } => "get_channel_details",
            ToolCall::Runmqsc { .. } => "runmqsc",
        }
    }

    /// Prefix of the text returned when the call fails.
    fn failure_prefix(&self) -> &'static str {
        match self {
            ToolCall::Dspmq => "Error listing queue managers",
            ToolCall::GetQmgrStatus { .. } => "Error getting queue manager status",
            ToolCall::ListQueues { .. } => "Error listing queues",
            ToolCall::GetQueueDetails { .. } => "Error getting queue details",
            ToolCall::GetQueueAttributes { .. } => "Error getting queue attributes",
            ToolCall::ListChannels { .. } => "Error listing channels",
            ToolCall::GetChannelDetails { .. } => "Error getting channel details",
            ToolCall::Runmqsc { .. } => "Error running MQSC command",
        }
    }

    /// Method, path and options sent to the backend.
    pub fn to_request(&self) -> (Method, String, RequestOptions) {
        match self {
            ToolCall::Dspmq => (Method::GET, "/qmgr".to_owned(), RequestOptions::default()),
            ToolCall::GetQmgrStatus { qmgr_name } => (
                Method::GET,
                format!("/qmgr/{}/status", qmgr_name),
                RequestOptions::default(),
            ),
            ToolCall::ListQueues { qmgr_name } => (
                Method::GET,
                format!("/qmgr/{}/queues", qmgr_name),
                RequestOptions::default(),
            ),
            ToolCall::GetQueueDetails { qmgr_name, queue_name } => (
                Method::GET,
                format!("/qmgr/{}/queues/{}", qmgr_name, queue_name),
                RequestOptions::default(),
            ),
            ToolCall::GetQueueAttributes { qmgr_name, queue_name } => (
                Method::GET,
                format!("/qmgr/{}/queues/{}/attributes", qmgr_name, queue_name),
                RequestOptions::default(),
            ),
            ToolCall::ListChannels { qmgr_name } => (
                Method::GET,
                format!("/qmgr/{}/channels", qmgr_name),
                RequestOptions::default(),
            ),
            ToolCall::GetChannelDetails { qmgr_name, channel_name } => (
                Method::GET,
                format!("/qmgr/{}/channels/{}", qmgr_name, channel_name),
                RequestOptions::default(),
            ),
            ToolCall::Runmqsc { qmgr_name, mqsc_command } => (
                Method::POST,
                format!("/qmgr/{}/mqsc", qmgr_name),
                RequestOptions::json(json!({ "command": mqsc_command })),
            ),
        }
    }
}

/// Tool surface over a shared [`AuthenticatedClient`].
#[derive(Debug, Clone)]
pub struct MqTools {
    client: AuthenticatedClient,
}

impl MqTools {
    pub fn new(client: AuthenticatedClient) -> Self {
        Self { client }
    }

    /// Execute one call; errors come back as text.
    pub async fn call(&self, call: &ToolCall) -> String {
        info!(tool = call.name(), "executing tool: {:?}", call);
        match self.try_call(call).await {
            Ok(body) => body,
            Err(err) => {
                error!(tool = call.name(), error = %err, "tool failed");
                format!("{}: {}", call.failure_prefix(), err)
            }
        }
    }

    pub async fn try_call(&self, call: &ToolCall) -> Result<String, GatewayError> {
        let (method, path, options) = call.to_request();
        self.client.request(method, &path, options).await
    }

    pub async fn dspmq(&self) -> String {
        self.call(&ToolCall::Dspmq).await
    }

    pub async fn get_qmgr_status(&self, qmgr_name: &str) -> String {
        self.call(&ToolCall::GetQmgrStatus { qmgr_name: qmgr_name.to_owned() }).await
    }

    pub async fn list_queues(&self, qmgr_name: &str) -> String {
        self.call(&ToolCall::ListQueues { qmgr_name: qmgr_name.to_owned() }).await
    }

    pub async fn get_queue_details(&self, qmgr_name: &str, queue_name: &str) -> String {
        self.call(&ToolCall::GetQueueDetails {
            qmgr_name: qmgr_name.to_owned(),
            queue_name: queue_name.to_owned(),
        })
        .await
    }

    pub async fn get_queue_attributes(&self, qmgr_name: &str, queue_name: &str) -> String {
        self.call(&ToolCall::GetQueueAttributes {
            qmgr_name: qmgr_name.to_owned(),
            queue_name: queue_name.to_owned(),
        })
        .await
    }

    pub async fn list_channels(&self, qmgr_name: &str) -> String {
        self.call(&ToolCall::ListChannels { qmgr_name: qmgr_name.to_owned() }).await
    }

    pub async fn get_channel_details(&self, qmgr_name: &str, channel_name: &str) -> String {
        self.call(&ToolCall::GetChannelDetails {
            qmgr_name: qmgr_name.to_owned(),
            channel_name: channel_name.to_owned(),
        })
        .await
    }

    pub async fn runmqsc(&self, qmgr_name: &str, mqsc_command: &str) -> String {
        self.call(&ToolCall::Runmqsc {
            qmgr_name: qmgr_name.to_owned(),
            mqsc_command: mqsc_command.to_owned(),
        })
        .await
    }
}
