use crate::core::kernel::Dispatcher;
use crate::sections::{Section, SectionBuilder, SectionKind, SectionOperations};
use std::sync::Arc;

/// Prepaid products (pulsa, data, e-money, game top-ups)
pub fn section() -> Section {
    SectionBuilder::new(SectionKind::Prepaid.path()).build()
}

#[derive(Debug, Clone)]
pub struct Prepaid {
    section: Section,
    dispatcher: Arc<Dispatcher>,
}

impl Prepaid {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            section: section(),
            dispatcher,
        }
    }
}

impl SectionOperations for Prepaid {
    fn section(&self) -> &Section {
        &self.section
    }

    fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}
