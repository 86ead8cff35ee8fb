use crate::core::kernel::{Dispatcher, PendingCall};
use crate::core::types::{OperationType, RequestOptions};
use crate::sections::{
    Operation, OperationDescriptor, Section, SectionBuilder, SectionKind, SectionOperations,
};
use std::sync::Arc;

/// Postpaid bills. `createOrder` pays a bill (`pay-pasca`) and
/// `checkPostpaid` queries one (`inq-pasca`).
pub fn section() -> Section {
    SectionBuilder::new(SectionKind::Postpaid.path())
        .with_override(
            Operation::CheckPostpaid,
            OperationDescriptor::typed(OperationType::InqPasca),
        )
        .with_override(
            Operation::CreateOrder,
            OperationDescriptor::typed(OperationType::PayPasca),
        )
        .build()
}

#[derive(Debug, Clone)]
pub struct Postpaid {
    section: Section,
    dispatcher: Arc<Dispatcher>,
}

impl Postpaid {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            section: section(),
            dispatcher,
        }
    }

    /// Look up the outstanding bill for a customer number
    pub fn check_postpaid(&self, options: RequestOptions) -> PendingCall {
        self.invoke(Operation::CheckPostpaid, options)
    }

    pub fn check_bill(&self, options: RequestOptions) -> PendingCall {
        self.check_postpaid(options)
    }

    /// Same operation as `create_order`
    pub fn pay_bill(&self, options: RequestOptions) -> PendingCall {
        self.create_order(options)
    }
}

impl SectionOperations for Postpaid {
    fn section(&self) -> &Section {
        &self.section
    }

    fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_order_is_bill_payment() {
        let prepared = section()
            .prepare(
                Operation::CreateOrder,
                RequestOptions::new("paid").with_field("type", "order"),
            )
            .unwrap();
        assert_eq!(prepared.body.get("type"), Some("pay-pasca"));
    }

    #[test]
    fn test_check_postpaid_type() {
        let prepared = section()
            .prepare(
                Operation::CheckPostpaid,
                RequestOptions::new("bill").with_field("data_no", "530000000001"),
            )
            .unwrap();
        assert_eq!(prepared.path.as_deref(), Some("postpaid"));
        assert_eq!(prepared.body.get("type"), Some("inq-pasca"));
        assert_eq!(prepared.body.get("data_no"), Some("530000000001"));
    }

    #[test]
    fn test_status_and_services_untouched() {
        let section = section();
        assert_eq!(
            section.descriptor(Operation::GetStatus),
            Some(OperationDescriptor::typed(OperationType::Status))
        );
        assert_eq!(
            section.descriptor(Operation::GetServices),
            Some(OperationDescriptor::typed(OperationType::Services))
        );
    }
}
