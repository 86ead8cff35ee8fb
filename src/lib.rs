//! Declarative, signed client for the VIP Reseller top-up and payment API.
//!
//! Each resource group (profile, prepaid, postpaid, social media, game
//! features) is a section namespace generated from a small operation table.
//! Calling an operation returns immediately with a [`PendingCall`]; the
//! outcome is also routed to the host command surface under the caller's
//! continuation name.

pub mod client;
pub mod core;
pub mod sections;

pub use crate::client::{VipaymentBuilder, VipaymentClient};
pub use crate::core::config::ClientConfig;
pub use crate::core::errors::PaymentError;
pub use crate::core::kernel::PendingCall;
pub use crate::core::types::{FormBody, RequestOptions};

pub mod prelude {
    pub use crate::client::{VipaymentBuilder, VipaymentClient};
    pub use crate::core::errors::PaymentError;
    pub use crate::core::router::{ChannelHost, HostEvent};
    pub use crate::core::types::{FormBody, RequestOptions};
    pub use crate::sections::{Game, GenshinServer, SectionOperations};
}
