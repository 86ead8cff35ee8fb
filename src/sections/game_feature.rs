use crate::core::kernel::{Dispatcher, PendingCall};
use crate::core::types::{OperationType, RequestOptions};
use crate::sections::games::{Game, GenshinServer};
use crate::sections::{
    Operation, OperationDescriptor, Section, SectionBuilder, SectionKind, SectionOperations,
};
use std::sync::Arc;

/// Game features. Adds `fetchNickname` (`get-nickname`).
pub fn section() -> Section {
    SectionBuilder::new(SectionKind::GameFeature.path())
        .with_override(
            Operation::FetchNickname,
            OperationDescriptor::typed(OperationType::GetNickname),
        )
        .build()
}

#[derive(Debug, Clone)]
pub struct GameFeature {
    section: Section,
    dispatcher: Arc<Dispatcher>,
}

impl GameFeature {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            section: section(),
            dispatcher,
        }
    }

    /// Resolve the in-game nickname for a player id
    pub fn fetch_nickname(&self, options: RequestOptions) -> PendingCall {
        self.invoke(Operation::FetchNickname, options)
    }

    /// Supported games
    pub fn games(&self) -> &'static [Game] {
        &Game::ALL
    }
}

impl SectionOperations for GameFeature {
    fn section(&self) -> &Section {
        &self.section
    }

    fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

/// Options for a nickname lookup
///
/// `zone` carries the Mobile Legends zone id or the Genshin server.
pub fn nickname_request(
    continuation: impl Into<String>,
    game: Game,
    user_id: &str,
    zone: Option<&str>,
) -> RequestOptions {
    let options = RequestOptions::new(continuation)
        .with_field("code", game.slug())
        .with_field("target", user_id);
    match zone {
        Some(zone) => options.with_field("additional_target", zone),
        None => options,
    }
}

/// Nickname lookup for Genshin Impact on a given server
pub fn genshin_nickname_request(
    continuation: impl Into<String>,
    user_id: &str,
    server: GenshinServer,
) -> RequestOptions {
    nickname_request(continuation, Game::GenshinImpact, user_id, Some(server.code()))
}
