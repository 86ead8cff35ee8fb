//! Request kernel - signing, encoding, transport and dispatch
//!
//! Every outgoing request passes through the same four stages:
//!
//! 1. **Signer**: `key` and `sign` (MD5 of `api_id + api_key`) are derived
//!    from the credentials read from the store for this request.
//! 2. **Codec**: the merged body is form-encoded in insertion order.
//! 3. **Transport**: a single POST with the fixed header set. The default
//!    transport is reqwest; hosts may inject their own.
//! 4. **Dispatch**: the call runs on the Tokio runtime and its outcome is
//!    delivered exactly once, to the returned [`PendingCall`] and to the
//!    host through the [`CallbackRouter`](crate::core::router::CallbackRouter).
//!
//! ```rust,no_run
//! use vipayment::core::types::RequestOptions;
//! use vipayment::prelude::*;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = VipaymentBuilder::new()
//!     .with_credentials("123".to_string(), "abc".to_string())
//!     .build()?;
//!
//! let services = client
//!     .prepaid
//!     .get_services(RequestOptions::new("services"))
//!     .await?;
//! println!("{services}");
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod dispatch;
pub mod rest;
pub mod signer;

pub use codec::{decode_body, encode_body, COMPONENT_ENCODE_SET, FORM_CONTENT_TYPE};
pub use dispatch::{Dispatcher, PendingCall, SignedRequest};
pub use rest::{HttpTransport, ReqwestTransport, TransportConfig, TransportResponse, FIXED_HEADERS};
pub use signer::{sign, Md5Signer, Signer, UNSET_CREDENTIAL};
