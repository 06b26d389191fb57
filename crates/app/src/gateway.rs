//! Gateway contracts toward the remote catalog/order service.
//!
//! The core only sees these traits; wire format, base URLs and request
//! plumbing live with the host. [`InMemoryGateway`] backs tests and the demo
//! binary.

use std::cell::{Cell, RefCell};

use chrono::Utc;
use thiserror::Error;

use storefront_core::OrderId;
use storefront_shop::catalog::CatalogSnapshot;
use storefront_shop::order::{OrderResult, OrderStatus, OrderSubmission};

/// A transport-level failure. Surfaced as `catalog:error` / `order:error`
/// events; never crashes the core and never clears the order draft.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("request rejected: {0}")]
    Rejected(String),
}

/// One-shot read of the product catalog.
pub trait CatalogSource {
    fn fetch_catalog(&self) -> Result<CatalogSnapshot, TransportError>;
}

/// Single request/response exchange submitting a completed order.
///
/// Implementations must return either an error or a result whose status is
/// the cancelled variant on failure; a submission never silently vanishes.
pub trait OrderTransport {
    fn submit_order(&self, submission: &OrderSubmission) -> Result<OrderResult, TransportError>;
}

const SAMPLE_CATALOG: &str = r#"{
    "total": 4,
    "items": [
        {
            "id": "854cef69-976d-4c2a-a18c-2aa45046c390",
            "title": "бэм-пылесос",
            "description": "Чтобы пылесосить магазин.",
            "image": "/5_Dots.svg",
            "category": "софт-скил",
            "price": 100
        },
        {
            "id": "c101ab44-ed99-4a54-990d-47aa2bb4e7d9",
            "title": "HEX-леденец",
            "description": "Лизните легенду.",
            "image": "/Shell.svg",
            "category": "другое",
            "price": 200
        },
        {
            "id": "b06cde61-912f-4663-9751-09956c0eed67",
            "title": "Мамка-таймер",
            "description": "Будет стоять над душой.",
            "image": "/Asterisk_2.svg",
            "category": "другое",
            "price": null
        },
        {
            "id": "1c521d84-c48d-48fa-8cfb-9d911fa515fd",
            "title": "+1 час в сутках",
            "description": "Дополнительное время.",
            "image": "/Pill.svg",
            "category": "дополнительное",
            "price": 750
        }
    ]
}"#;

/// Canned gateway for tests and the demo binary.
///
/// Failures can be scripted one call at a time; submissions are recorded so
/// callers can assert on what actually went over the wire.
#[derive(Debug)]
pub struct InMemoryGateway {
    catalog: CatalogSnapshot,
    fail_next_catalog: Cell<bool>,
    fail_next_submission: Cell<bool>,
    submitted: RefCell<Vec<OrderSubmission>>,
}

impl InMemoryGateway {
    pub fn new(catalog: CatalogSnapshot) -> Self {
        Self {
            catalog,
            fail_next_catalog: Cell::new(false),
            fail_next_submission: Cell::new(false),
            submitted: RefCell::new(Vec::new()),
        }
    }

    /// Gateway pre-loaded with a small fixture catalog.
    pub fn with_sample_catalog() -> serde_json::Result<Self> {
        Ok(Self::new(serde_json::from_str(SAMPLE_CATALOG)?))
    }

    /// Make the next `fetch_catalog` call fail.
    pub fn fail_next_catalog_fetch(&self) {
        self.fail_next_catalog.set(true);
    }

    /// Make the next `submit_order` call fail.
    pub fn fail_next_submission(&self) {
        self.fail_next_submission.set(true);
    }

    /// Everything submitted so far, oldest first.
    pub fn submissions(&self) -> Vec<OrderSubmission> {
        self.submitted.borrow().clone()
    }
}

impl CatalogSource for InMemoryGateway {
    fn fetch_catalog(&self) -> Result<CatalogSnapshot, TransportError> {
        if self.fail_next_catalog.take() {
            return Err(TransportError::Unavailable(
                "catalog service is unreachable".into(),
            ));
        }
        Ok(self.catalog.clone())
    }
}

impl OrderTransport for InMemoryGateway {
    fn submit_order(&self, submission: &OrderSubmission) -> Result<OrderResult, TransportError> {
        if self.fail_next_submission.take() {
            return Err(TransportError::Unavailable(
                "order service is unreachable".into(),
            ));
        }
        self.submitted.borrow_mut().push(submission.clone());
        Ok(OrderResult {
            id: OrderId::new(),
            total: submission.total,
            status: OrderStatus::Created,
            created_at: Utc::now(),
            items: submission.items.clone(),
        })
    }
}
