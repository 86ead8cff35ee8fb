use crate::core::kernel::{Dispatcher, PendingCall};
use crate::core::types::RequestOptions;
use crate::sections::{
    Operation, OperationDescriptor, Section, SectionBuilder, SectionKind, SectionOperations,
};
use std::sync::Arc;

/// Account profile. Adds an untyped `getProfile` to the base table.
pub fn section() -> Section {
    SectionBuilder::new(SectionKind::Profile.path())
        .with_override(Operation::GetProfile, OperationDescriptor::untyped())
        .build()
}

#[derive(Debug, Clone)]
pub struct Profile {
    section: Section,
    dispatcher: Arc<Dispatcher>,
}

impl Profile {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            section: section(),
            dispatcher,
        }
    }

    /// Fetch balance and account details
    pub fn get_profile(&self, options: RequestOptions) -> PendingCall {
        self.invoke(Operation::GetProfile, options)
    }

    pub fn fetch_profile(&self, options: RequestOptions) -> PendingCall {
        self.get_profile(options)
    }
}

impl SectionOperations for Profile {
    fn section(&self) -> &Section {
        &self.section
    }

    fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}
