//! Section factory.
//!
//! A [`Section`] binds a resource path to a table of operations. Every
//! section starts from the same base table (`create_order` → `order`,
//! `get_status` → `status`, `get_services` → `services`) and may replace or
//! add operations while it is being built. Once built it never changes.
//!
//! Calling an operation stamps the section path and the operation type into
//! the request and hands it to the [`Dispatcher`]. The factory itself does no
//! I/O.

use crate::core::errors::PaymentError;
use crate::core::kernel::{Dispatcher, PendingCall};
use crate::core::types::{FormBody, OperationType, RequestOptions, TYPE_FIELD};
use std::collections::BTreeMap;
use std::fmt;

pub mod game_feature;
pub mod games;
pub mod postpaid;
pub mod prepaid;
pub mod profile;
pub mod social_media;

pub use game_feature::GameFeature;
pub use games::{Game, GenshinServer};
pub use postpaid::Postpaid;
pub use prepaid::Prepaid;
pub use profile::Profile;
pub use social_media::SocialMedia;

/// Named operation a section can expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operation {
    CreateOrder,
    GetStatus,
    GetServices,
    GetProfile,
    CheckPostpaid,
    FetchNickname,
}

impl Operation {
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreateOrder => "createOrder",
            Self::GetStatus => "getStatus",
            Self::GetServices => "getServices",
            Self::GetProfile => "getProfile",
            Self::CheckPostpaid => "checkPostpaid",
            Self::FetchNickname => "fetchNickname",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What an operation stamps into the request body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub operation_type: Option<OperationType>,
}

impl OperationDescriptor {
    pub const fn typed(operation_type: OperationType) -> Self {
        Self {
            operation_type: Some(operation_type),
        }
    }

    /// Leaves the caller's body untouched
    pub const fn untyped() -> Self {
        Self {
            operation_type: None,
        }
    }
}

/// Operations every section is generated with
pub const BASE_TABLE: [(Operation, OperationType); 3] = [
    (Operation::CreateOrder, OperationType::Order),
    (Operation::GetStatus, OperationType::Status),
    (Operation::GetServices, OperationType::Services),
];

/// Resource groups exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Profile,
    Prepaid,
    Postpaid,
    SocialMedia,
    GameFeature,
}

impl SectionKind {
    pub const ALL: [Self; 5] = [
        Self::Profile,
        Self::Prepaid,
        Self::Postpaid,
        Self::SocialMedia,
        Self::GameFeature,
    ];

    pub const fn path(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Prepaid => "prepaid",
            Self::Postpaid => "postpaid",
            Self::SocialMedia => "social-media",
            Self::GameFeature => "game-feature",
        }
    }

    /// Build the standard section for this resource group
    pub fn section(self) -> Section {
        match self {
            Self::Profile => profile::section(),
            Self::Prepaid => prepaid::section(),
            Self::Postpaid => postpaid::section(),
            Self::SocialMedia => social_media::section(),
            Self::GameFeature => game_feature::section(),
        }
    }
}

/// Immutable operation namespace bound to one resource path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    path: String,
    operations: BTreeMap<Operation, OperationDescriptor>,
}

impl Section {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn descriptor(&self, operation: Operation) -> Option<OperationDescriptor> {
        self.operations.get(&operation).copied()
    }

    pub fn operations(&self) -> impl Iterator<Item = (Operation, OperationDescriptor)> + '_ {
        self.operations.iter().map(|(op, desc)| (*op, *desc))
    }

    /// Stamp `options` for `operation`.
    ///
    /// The path is overwritten with the section path. A typed operation puts
    /// `type` ahead of the caller fields and writes it again after them, so
    /// a caller-supplied `type` never survives.
    pub fn prepare(
        &self,
        operation: Operation,
        mut options: RequestOptions,
    ) -> Result<RequestOptions, PaymentError> {
        let descriptor =
            self.descriptor(operation)
                .ok_or_else(|| PaymentError::UnsupportedOperation {
                    path: self.path.clone(),
                    operation: operation.name().to_string(),
                })?;

        options.path = Some(self.path.clone());
        if let Some(operation_type) = descriptor.operation_type {
            let mut body = FormBody::new().with(TYPE_FIELD, operation_type);
            body.merge(&options.body);
            body.insert(TYPE_FIELD, operation_type);
            options.body = body;
        }
        Ok(options)
    }

    /// Stamp and dispatch. Failures, including an unregistered operation,
    /// arrive through the returned call and the host error channel.
    pub fn invoke(
        &self,
        dispatcher: &Dispatcher,
        operation: Operation,
        options: RequestOptions,
    ) -> PendingCall {
        match self.prepare(operation, options) {
            Ok(prepared) => dispatcher.dispatch(prepared),
            Err(err) => dispatcher.reject(err),
        }
    }
}

/// Builder for [`Section`]
#[derive(Debug, Clone)]
pub struct SectionBuilder {
    path: String,
    operations: BTreeMap<Operation, OperationDescriptor>,
}

impl SectionBuilder {
    /// Start a section seeded with [`BASE_TABLE`]
    pub fn new(path: impl Into<String>) -> Self {
        Self::empty(path).with_table(&BASE_TABLE)
    }

    /// Start a section with no operations
    pub fn empty(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            operations: BTreeMap::new(),
        }
    }

    pub fn with_table(mut self, table: &[(Operation, OperationType)]) -> Self {
        for (operation, operation_type) in table {
            self.operations
                .insert(*operation, OperationDescriptor::typed(*operation_type));
        }
        self
    }

    /// Replace or add a single operation
    pub fn with_override(mut self, operation: Operation, descriptor: OperationDescriptor) -> Self {
        self.operations.insert(operation, descriptor);
        self
    }

    pub fn build(self) -> Section {
        Section {
            path: self.path,
            operations: self.operations,
        }
    }
}

/// Generate a section from `table`, then apply `overrides` on top
pub fn build_section(
    path: &str,
    table: &[(Operation, OperationType)],
    overrides: &[(Operation, OperationDescriptor)],
) -> Section {
    overrides
        .iter()
        .fold(
            SectionBuilder::empty(path).with_table(table),
            |builder, (operation, descriptor)| builder.with_override(*operation, *descriptor),
        )
        .build()
}

/// Base operations shared by every section namespace
pub trait SectionOperations {
    fn section(&self) -> &Section;

    fn dispatcher(&self) -> &Dispatcher;

    fn invoke(&self, operation: Operation, options: RequestOptions) -> PendingCall {
        self.section().invoke(self.dispatcher(), operation, options)
    }

    fn create_order(&self, options: RequestOptions) -> PendingCall {
        self.invoke(Operation::CreateOrder, options)
    }

    fn get_status(&self, options: RequestOptions) -> PendingCall {
        self.invoke(Operation::GetStatus, options)
    }

    fn get_services(&self, options: RequestOptions) -> PendingCall {
        self.invoke(Operation::GetServices, options)
    }
}
