#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use vipayment::core::kernel::{decode_body, HttpTransport, TransportResponse};
use vipayment::prelude::*;

/// One POST seen by the transport
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn form(&self) -> FormBody {
        decode_body(&self.body)
    }
}

#[derive(Debug, Clone)]
pub enum Reply {
    Respond(TransportResponse),
    Fail(String),
}

/// In-process transport that records requests and answers per URL suffix
#[derive(Debug, Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<RecordedRequest>>,
    replies: Mutex<HashMap<String, (Reply, Duration)>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, path: &str, body: &str) {
        self.reply_after(path, body, Duration::ZERO);
    }

    pub fn reply_after(&self, path: &str, body: &str, delay: Duration) {
        self.replies.lock().unwrap().insert(
            path.to_string(),
            (Reply::Respond(TransportResponse::ok(body)), delay),
        );
    }

    pub fn reply_status(&self, path: &str, status: u16, body: &str) {
        self.replies.lock().unwrap().insert(
            path.to_string(),
            (
                Reply::Respond(TransportResponse {
                    status,
                    body: body.to_string(),
                }),
                Duration::ZERO,
            ),
        );
    }

    pub fn fail(&self, path: &str, message: &str) {
        self.replies
            .lock()
            .unwrap()
            .insert(path.to_string(), (Reply::Fail(message.to_string()), Duration::ZERO));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Most `post_form` calls that were running at the same time
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn post_form(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: String,
    ) -> Result<TransportResponse, PaymentError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            body,
        });

        let reply = {
            let replies = self.replies.lock().unwrap();
            replies
                .iter()
                .find(|(path, _)| url.ends_with(path.as_str()))
                .map(|(_, reply)| reply.clone())
        };

        match reply {
            Some((reply, delay)) => {
                if !delay.is_zero() {
                    let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    self.peak_in_flight.fetch_max(running, Ordering::SeqCst);
                    tokio::time::sleep(delay).await;
                    self.in_flight.fetch_sub(1, Ordering::SeqCst);
                }
                match reply {
                    Reply::Respond(response) => Ok(response),
                    Reply::Fail(message) => Err(PaymentError::TransportError(message)),
                }
            }
            None => Ok(TransportResponse::ok(r#"{"result":true,"data":null}"#)),
        }
    }
}

pub const BASE_URL: &str = "https://vip.test/api/";

/// Client with `apiId="123"`, `apiKey="abc"` wired to a recording transport
pub fn test_client(
    transport: Arc<RecordingTransport>,
) -> (VipaymentClient, mpsc::UnboundedReceiver<HostEvent>) {
    let (host, events) = ChannelHost::new();
    let client = VipaymentBuilder::new()
        .with_base_url(BASE_URL.to_string())
        .with_credentials("123".to_string(), "abc".to_string())
        .with_transport(transport)
        .with_host(Arc::new(host))
        .build()
        .expect("client should build inside a runtime");
    (client, events)
}
