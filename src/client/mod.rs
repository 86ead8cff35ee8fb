use crate::core::credentials::Credentials;
use crate::core::kernel::{Dispatcher, PendingCall};
use crate::core::types::RequestOptions;
use crate::sections::{GameFeature, Postpaid, Prepaid, Profile, SocialMedia};
use std::sync::Arc;

pub mod builder;

pub use builder::VipaymentBuilder;

/// Client that composes all section namespaces over one dispatcher
#[derive(Debug, Clone)]
pub struct VipaymentClient {
    pub profile: Profile,
    pub prepaid: Prepaid,
    pub postpaid: Postpaid,
    pub social_media: SocialMedia,
    pub game_feature: GameFeature,
    dispatcher: Arc<Dispatcher>,
}

impl VipaymentClient {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            profile: Profile::new(Arc::clone(&dispatcher)),
            prepaid: Prepaid::new(Arc::clone(&dispatcher)),
            postpaid: Postpaid::new(Arc::clone(&dispatcher)),
            social_media: SocialMedia::new(Arc::clone(&dispatcher)),
            game_feature: GameFeature::new(Arc::clone(&dispatcher)),
            dispatcher,
        }
    }

    pub fn builder() -> VipaymentBuilder {
        VipaymentBuilder::new()
    }

    fn credentials(&self) -> &Credentials {
        self.dispatcher.credentials()
    }

    pub fn get_api_id(&self) -> Option<String> {
        self.credentials().api_id()
    }

    pub fn get_api_key(&self) -> Option<String> {
        self.credentials().api_key()
    }

    pub fn set_api_id(&self, api_id: &str) {
        self.credentials().set_api_id(api_id);
    }

    pub fn set_api_key(&self, api_key: &str) {
        self.credentials().set_api_key(api_key);
    }

    /// Dispatch `options` as given; `path` must already be set
    pub fn api_call(&self, options: RequestOptions) -> PendingCall {
        self.dispatcher.dispatch(options)
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}
