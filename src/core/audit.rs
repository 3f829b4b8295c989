//! Audit trail of fuel requests.
//!
//! Events are recorded after a request reaches its terminal outcome, never
//! while a pump is reserved.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::{DispenseError, FailureKind, FuelType, SaleOutcome};
use crate::util::clock::now_ms;

/// Terminal outcome of an audited request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum DispenseAction {
    /// Request fulfilled.
    Sold {
        /// Pump that served the request.
        pump_index: usize,
        /// Unit price charged.
        unit_price: f64,
        /// Amount paid.
        total_paid: f64,
    },
    /// Request failed.
    Cancelled {
        /// Failure category.
        kind: FailureKind,
        /// Error message.
        reason: String,
    },
}

/// Audit event structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispenseEvent {
    /// Event identifier.
    pub event_id: String,
    /// Requested fuel type.
    pub fuel_type: FuelType,
    /// Requested liters.
    pub liters: f64,
    /// Customer's price ceiling.
    pub max_price_per_liter: f64,
    /// What happened.
    pub action: DispenseAction,
    /// Timestamp milliseconds.
    pub created_at_ms: u128,
}

/// Audit sink abstraction.
pub trait AuditSink: Send {
    /// Record an audit event.
    fn record(&mut self, event: DispenseEvent);
}

/// In-memory audit sink for testing and dev.
pub struct InMemoryAuditSink {
    events: VecDeque<DispenseEvent>,
    max_events: usize,
}

impl InMemoryAuditSink {
    /// Create a new in-memory sink with a bounded buffer.
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events.
    pub fn events(&self) -> Vec<DispenseEvent> {
        self.events.iter().cloned().collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&mut self, event: DispenseEvent) {
        if self.max_events == 0 {
            return;
        }
        if self.events.len() >= self.max_events {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

/// Build an audit event for a finished request.
pub fn build_dispense_event(
    fuel_type: FuelType,
    liters: f64,
    max_price_per_liter: f64,
    result: &Result<SaleOutcome, DispenseError>,
) -> DispenseEvent {
    let action = match result {
        Ok(outcome) => DispenseAction::Sold {
            pump_index: outcome.pump_index,
            unit_price: outcome.unit_price,
            total_paid: outcome.total_paid,
        },
        Err(err) => DispenseAction::Cancelled {
            kind: err.kind(),
            reason: err.to_string(),
        },
    };
    DispenseEvent {
        event_id: uuid::Uuid::new_v4().to_string(),
        fuel_type,
        liters,
        max_price_per_liter,
        action,
        created_at_ms: now_ms(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sold() -> Result<SaleOutcome, DispenseError> {
        Ok(SaleOutcome {
            pump_index: 2,
            fuel_type: FuelType::Super,
            liters: 10.0,
            unit_price: 2.0,
            total_paid: 20.0,
        })
    }

    #[test]
    fn test_sink_drops_oldest() {
        let mut sink = InMemoryAuditSink::new(2);
        for liters in [1.0, 2.0, 3.0] {
            sink.record(build_dispense_event(FuelType::Super, liters, 2.0, &sold()));
        }
        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].liters, 2.0);
        assert_eq!(events[1].liters, 3.0);
    }

    #[test]
    fn test_event_ids_unique() {
        let a = build_dispense_event(FuelType::Super, 1.0, 2.0, &sold());
        let b = build_dispense_event(FuelType::Super, 1.0, 2.0, &sold());
        assert_ne!(a.event_id, b.event_id);
        assert!(a.created_at_ms > 0);
    }

    #[test]
    fn test_cancelled_event_carries_kind() {
        let err = Err(DispenseError::OutOfStock {
            fuel_type: FuelType::Diesel,
            requested: 5.0,
        });
        let event = build_dispense_event(FuelType::Diesel, 5.0, 3.0, &err);
        match event.action {
            DispenseAction::Cancelled { kind, .. } => assert_eq!(kind, FailureKind::OutOfStock),
            DispenseAction::Sold { .. } => panic!("expected cancellation"),
        }
    }
}
