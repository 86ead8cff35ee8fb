use crate::core::kernel::Dispatcher;
use crate::sections::{Section, SectionBuilder, SectionKind, SectionOperations};
use std::sync::Arc;

/// Social-media boosts (followers, likes, views)
pub fn section() -> Section {
    SectionBuilder::new(SectionKind::SocialMedia.path()).build()
}

#[derive(Debug, Clone)]
pub struct SocialMedia {
    section: Section,
    dispatcher: Arc<Dispatcher>,
}

impl SocialMedia {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            section: section(),
            dispatcher,
        }
    }
}

impl SectionOperations for SocialMedia {
    fn section(&self) -> &Section {
        &self.section
    }

    fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}
