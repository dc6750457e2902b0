use crate::domain::models::booking::{BookingStatus, SessionStep};

/// Exhaustive transition table for the booking status machine.
/// COMPLETED and CANCELLED are terminal; a self-transition is always a
/// permitted no-op.
pub fn status_transition_allowed(from: BookingStatus, to: BookingStatus) -> bool {
    use BookingStatus as B;
    if from == to {
        return true;
    }
    matches!(
        (from, to),
        (B::Pending, B::Accepted)
            | (B::Pending, B::Cancelled)
            | (B::Accepted, B::Completed)
            | (B::Accepted, B::Cancelled)
    )
}

/// Exhaustive transition table for the in-session workflow machine.
/// DONE is terminal and the table has no self-edges.
pub fn step_transition_allowed(from: SessionStep, to: SessionStep) -> bool {
    use SessionStep as S;
    matches!(
        (from, to),
        (S::None, S::Consultation)
            | (S::Consultation, S::ConsultationPendingClient)
            | (S::Consultation, S::BeforePhotos)
            | (S::ConsultationPendingClient, S::BeforePhotos)
            | (S::ConsultationPendingClient, S::Consultation)
            | (S::BeforePhotos, S::ServiceInProgress)
            | (S::BeforePhotos, S::Consultation)
            | (S::ServiceInProgress, S::FinishReview)
            | (S::FinishReview, S::AfterPhotos)
            | (S::AfterPhotos, S::Done)
            | (S::AfterPhotos, S::FinishReview)
    )
}

/// Steps past the consultation phase are only reachable once the client
/// has approved the proposed services and price.
pub fn step_requires_approval(step: SessionStep) -> bool {
    use SessionStep as S;
    matches!(
        step,
        S::BeforePhotos | S::ServiceInProgress | S::FinishReview | S::AfterPhotos | S::Done
    )
}
