use super::{LNavFilterData, NavFilter};

#[cfg(feature = "log")]
use log::debug;

/// [NavFilterMgr] chains [NavFilter]s: what a filter forwards
/// is the input of the next one.
///
/// Rejections of every filter are cleared at the start of each
/// [NavFilterMgr::validate] and [NavFilterMgr::finalize] call, so they
/// only describe the latest call. Take them with
/// [NavFilterMgr::take_rejected] after each call.
#[derive(Default)]
pub struct NavFilterMgr {
    filters: Vec<Box<dyn NavFilter>>,
}

impl std::fmt::Debug for NavFilterMgr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_list()
            .entries(self.filters.iter().map(|filter| filter.name()))
            .finish()
    }
}

impl NavFilterMgr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter to the chain
    pub fn add_filter<F: NavFilter + 'static>(&mut self, filter: F) {
        self.filters.push(Box::new(filter));
    }

    /// Appends a filter to the chain
    pub fn with_filter<F: NavFilter + 'static>(mut self, filter: F) -> Self {
        self.add_filter(filter);
        self
    }

    /// Filter names, in chain order
    pub fn filters(&self) -> impl Iterator<Item = &str> + '_ {
        self.filters.iter().map(|filter| filter.name())
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Feeds one candidate through the chain, returns what came out of the
    /// last filter. The chain stops as soon as a filter forwards nothing.
    pub fn validate(&mut self, candidate: LNavFilterData) -> Vec<LNavFilterData> {
        self.validate_batch(vec![candidate])
    }

    /// [NavFilterMgr::validate] for a batch of candidates
    pub fn validate_batch(&mut self, candidates: Vec<LNavFilterData>) -> Vec<LNavFilterData> {
        self.clear_rejected();
        self.run(0, candidates)
    }

    /// Flushes every filter, once the last candidate was submitted.
    /// What a filter flushes goes through the rest of the chain.
    pub fn finalize(&mut self) -> Vec<LNavFilterData> {
        self.clear_rejected();
        let mut output = Vec::new();
        for i in 0..self.filters.len() {
            let flushed = self.filters[i].finalize();
            #[cfg(feature = "log")]
            debug!(
                "{}: {} flushed candidates",
                self.filters[i].name(),
                flushed.len()
            );
            output.extend(self.run(i + 1, flushed));
        }
        output
    }

    /// Rejected candidates of the latest call, with the filter that rejected them
    pub fn rejected(&self) -> impl Iterator<Item = (&str, &LNavFilterData)> + '_ {
        self.filters.iter().flat_map(|filter| {
            let name = filter.name();
            filter.rejected().iter().map(move |rejected| (name, rejected))
        })
    }

    /// Hands rejected candidates back to the caller, in chain order
    pub fn take_rejected(&mut self) -> Vec<LNavFilterData> {
        self.filters
            .iter_mut()
            .flat_map(|filter| filter.take_rejected())
            .collect()
    }

    fn clear_rejected(&mut self) {
        for filter in self.filters.iter_mut() {
            filter.clear_rejected();
        }
    }

    /// Runs candidates through filters `first..`
    fn run(&mut self, first: usize, mut candidates: Vec<LNavFilterData>) -> Vec<LNavFilterData> {
        for filter in self.filters.iter_mut().skip(first) {
            if candidates.is_empty() {
                break;
            }
            candidates = filter.validate(candidates);
        }
        candidates
    }
}
