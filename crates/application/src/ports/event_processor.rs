use tollgate_domain::ValidEvent;

/// Downstream consumer of accepted events.
///
/// Called synchronously on the hot path; implementations must not block.
pub trait EventProcessor: Send + Sync {
    fn process(&self, event: &ValidEvent<'_>);
}
