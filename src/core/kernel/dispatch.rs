use crate::core::credentials::Credentials;
use crate::core::errors::PaymentError;
use crate::core::kernel::codec::encode_body;
use crate::core::kernel::rest::{HttpTransport, FIXED_HEADERS};
use crate::core::kernel::signer::Signer;
use crate::core::router::CallbackRouter;
use crate::core::types::{CallState, FormBody, RequestOptions};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::runtime::Handle;
use tokio::sync::{oneshot, Semaphore};
use tracing::{debug, info_span, instrument, trace, Instrument};

/// Handle to a dispatched call.
///
/// Resolves exactly once with the decoded response or the error that was
/// raised through the host. Dropping it does not cancel the request.
#[derive(Debug)]
pub struct PendingCall {
    call_id: u64,
    receiver: oneshot::Receiver<Result<Value, PaymentError>>,
}

impl PendingCall {
    pub const fn call_id(&self) -> u64 {
        self.call_id
    }
}

impl Future for PendingCall {
    type Output = Result<Value, PaymentError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.get_mut().receiver)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(PaymentError::Cancelled)))
    }
}

/// Fully signed request, ready for the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub url: String,
    pub body: FormBody,
    pub continuation: String,
}

/// Signs requests, sends them on the runtime and routes the outcome
#[derive(Debug)]
pub struct Dispatcher {
    base_url: String,
    credentials: Credentials,
    signer: Arc<dyn Signer>,
    transport: Arc<dyn HttpTransport>,
    router: CallbackRouter,
    runtime: Handle,
    limiter: Option<Arc<Semaphore>>,
    next_call: AtomicU64,
}

impl Dispatcher {
    pub fn new(
        base_url: String,
        credentials: Credentials,
        signer: Arc<dyn Signer>,
        transport: Arc<dyn HttpTransport>,
        router: CallbackRouter,
        runtime: Handle,
        max_in_flight: Option<usize>,
    ) -> Self {
        Self {
            base_url,
            credentials,
            signer,
            transport,
            router,
            runtime,
            limiter: max_in_flight.map(|limit| Arc::new(Semaphore::new(limit.max(1)))),
            next_call: AtomicU64::new(1),
        }
    }

    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub const fn router(&self) -> &CallbackRouter {
        &self.router
    }

    /// Merge fresh authentication fields with the caller's body.
    ///
    /// `key` and `sign` lead the body; caller fields are applied on top and
    /// may replace them only deliberately.
    pub fn sign_request(&self, options: &RequestOptions) -> Result<SignedRequest, PaymentError> {
        if options.continuation.trim().is_empty() {
            return Err(PaymentError::InvalidRequest(
                "continuation name must not be empty".to_string(),
            ));
        }
        let path = options
            .path
            .as_deref()
            .ok_or_else(|| PaymentError::InvalidRequest("request path is not set".to_string()))?;

        let mut body = self.signer.auth_fields(&self.credentials.snapshot());
        body.merge(&options.body);

        Ok(SignedRequest {
            url: format!("{}{}", self.base_url, path.trim_start_matches('/')),
            body,
            continuation: options.continuation.clone(),
        })
    }

    /// Fire the request and return immediately.
    ///
    /// Never fails synchronously: malformed options are reported through
    /// the error channel like any other failure.
    #[instrument(skip(self, options), fields(path = ?options.path, continuation = %options.continuation))]
    pub fn dispatch(&self, options: RequestOptions) -> PendingCall {
        let signed = self.sign_request(&options);
        self.spawn_call(signed)
    }

    /// Deliver `error` through the error channel as a completed call
    pub fn reject(&self, error: PaymentError) -> PendingCall {
        self.spawn_call(Err(error))
    }

    fn spawn_call(&self, signed: Result<SignedRequest, PaymentError>) -> PendingCall {
        let call_id = self.next_call.fetch_add(1, Ordering::Relaxed);
        trace!(call_id, state = %CallState::Created);
        if signed.is_ok() {
            trace!(call_id, state = %CallState::Signed);
        }

        let (sender, receiver) = oneshot::channel();
        let delivery = Delivery {
            router: self.router.clone(),
            sender: Some(sender),
        };
        let transport = Arc::clone(&self.transport);
        let limiter = self.limiter.clone();
        let span = info_span!("vipayment_call", call_id);

        // A runtime that has shut down drops the task unpolled; `delivery`
        // then reports the call as cancelled from its destructor.
        self.runtime.spawn(
            async move {
                let _permit = match limiter {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };

                let outcome = match signed {
                    Ok(request) => send(transport.as_ref(), &delivery.router, request).await,
                    Err(err) => Err(err),
                };
                delivery.complete(outcome);
            }
            .instrument(span),
        );

        PendingCall { call_id, receiver }
    }
}

/// Routes the outcome of one call to the host and the `PendingCall`.
///
/// Dropped without `complete` (task cancelled, runtime shut down), it
/// delivers `PaymentError::Cancelled` instead.
struct Delivery {
    router: CallbackRouter,
    sender: Option<oneshot::Sender<Result<Value, PaymentError>>>,
}

impl Delivery {
    fn complete(mut self, outcome: Result<Value, PaymentError>) {
        match &outcome {
            Ok(_) => debug!(state = %CallState::Delivered),
            Err(err) => {
                self.router.on_error(err);
                debug!(state = %CallState::Failed);
            }
        }
        self.finish(outcome);
    }

    fn finish(&mut self, outcome: Result<Value, PaymentError>) {
        if let Some(sender) = self.sender.take() {
            if sender.send(outcome).is_err() {
                trace!("pending call dropped before completion");
            }
        }
    }
}

impl Drop for Delivery {
    fn drop(&mut self) {
        if self.sender.is_some() {
            let err = PaymentError::Cancelled;
            self.router.on_error(&err);
            self.finish(Err(err));
        }
    }
}

async fn send(
    transport: &dyn HttpTransport,
    router: &CallbackRouter,
    request: SignedRequest,
) -> Result<Value, PaymentError> {
    let encoded = encode_body(&request.body);
    trace!(state = %CallState::Sent, url = %request.url);

    let response = transport
        .post_form(&request.url, &FIXED_HEADERS, encoded)
        .await?;

    if !response.is_success() {
        return Err(PaymentError::ApiError {
            status: response.status,
            message: response.body,
        });
    }

    router.on_success(&request.continuation, &response.body)
}
