//! Checkout state machine.
//!
//! `Idle -> Validating -> AwaitingResponse -> {Succeeded, Failed}`, with
//! `Validating -> Failed` for precondition errors. Each checkout runs a fresh
//! machine; finished machines are never reset.

use smallvec::SmallVec;
use tracing::debug;

use crate::checkout::controller::{CheckoutError, PaymentReceipt};

/// Where a checkout attempt is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutPhase {
    /// Nothing submitted yet.
    Idle,
    /// Checking the cart and payment method.
    Validating,
    /// Waiting on the payment gateway.
    AwaitingResponse,
    /// Payment accepted.
    Succeeded,
    /// Validation, transport or the processor said no.
    Failed,
}

impl CheckoutPhase {
    fn can_advance_to(self, next: CheckoutPhase) -> bool {
        matches!(
            (self, next),
            (CheckoutPhase::Idle, CheckoutPhase::Validating)
                | (
                    CheckoutPhase::Validating,
                    CheckoutPhase::AwaitingResponse | CheckoutPhase::Failed
                )
                | (
                    CheckoutPhase::AwaitingResponse,
                    CheckoutPhase::Succeeded | CheckoutPhase::Failed
                )
        )
    }
}

type History = SmallVec<[CheckoutPhase; 4]>;

/// A running checkout.
#[derive(Debug)]
pub(crate) struct CheckoutAttempt {
    history: History,
}

impl CheckoutAttempt {
    pub(crate) fn new() -> Self {
        let mut history = History::new();
        history.push(CheckoutPhase::Idle);

        Self { history }
    }

    pub(crate) fn phase(&self) -> CheckoutPhase {
        self.history.last().copied().unwrap_or(CheckoutPhase::Idle)
    }

    pub(crate) fn advance(&mut self, next: CheckoutPhase) {
        debug_assert!(
            self.phase().can_advance_to(next),
            "illegal checkout transition {:?} -> {next:?}",
            self.phase()
        );

        debug!(from = ?self.phase(), to = ?next, "checkout transition");

        self.history.push(next);
    }

    pub(crate) fn finish(mut self, result: Result<PaymentReceipt, CheckoutError>) -> CheckoutOutcome {
        self.advance(if result.is_ok() {
            CheckoutPhase::Succeeded
        } else {
            CheckoutPhase::Failed
        });

        CheckoutOutcome {
            history: self.history,
            result,
        }
    }
}

/// A finished checkout: the phases it went through and its result.
#[derive(Debug)]
pub struct CheckoutOutcome {
    history: History,
    result: Result<PaymentReceipt, CheckoutError>,
}

impl CheckoutOutcome {
    /// Every phase visited, starting at [`CheckoutPhase::Idle`].
    pub fn history(&self) -> &[CheckoutPhase] {
        &self.history
    }

    /// The terminal phase.
    pub fn phase(&self) -> CheckoutPhase {
        if self.result.is_ok() {
            CheckoutPhase::Succeeded
        } else {
            CheckoutPhase::Failed
        }
    }

    /// The receipt or error the attempt ended with.
    pub fn result(&self) -> Result<&PaymentReceipt, &CheckoutError> {
        self.result.as_ref()
    }

    /// Consumes the outcome, keeping only its result.
    pub fn into_result(self) -> Result<PaymentReceipt, CheckoutError> {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_transitions() {
        assert!(CheckoutPhase::Idle.can_advance_to(CheckoutPhase::Validating));
        assert!(CheckoutPhase::Validating.can_advance_to(CheckoutPhase::Failed));
        assert!(CheckoutPhase::Validating.can_advance_to(CheckoutPhase::AwaitingResponse));
        assert!(CheckoutPhase::AwaitingResponse.can_advance_to(CheckoutPhase::Succeeded));
        assert!(CheckoutPhase::AwaitingResponse.can_advance_to(CheckoutPhase::Failed));
    }

    #[test]
    fn terminal_phases_do_not_reset() {
        for terminal in [CheckoutPhase::Succeeded, CheckoutPhase::Failed] {
            assert!(!terminal.can_advance_to(CheckoutPhase::Idle));
            assert!(!terminal.can_advance_to(CheckoutPhase::Validating));
        }
    }

    #[test]
    fn validation_cannot_skip_to_success() {
        assert!(!CheckoutPhase::Validating.can_advance_to(CheckoutPhase::Succeeded));
        assert!(!CheckoutPhase::Idle.can_advance_to(CheckoutPhase::AwaitingResponse));
    }

    #[test]
    fn finish_records_failed_phase() {
        let mut attempt = CheckoutAttempt::new();
        attempt.advance(CheckoutPhase::Validating);

        let outcome = attempt.finish(Err(CheckoutError::EmptyCart));

        assert_eq!(
            outcome.history(),
            &[CheckoutPhase::Idle, CheckoutPhase::Validating, CheckoutPhase::Failed]
        );
        assert_eq!(outcome.phase(), CheckoutPhase::Failed);
    }
}
