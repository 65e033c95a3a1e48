/// Progress events emitted by the batch workflows.
///
/// One site is processed fully before the next, so events arrive strictly in
/// `BatchStart`, (`SiteStart`, `SiteFinish`)*, `BatchFinish` order.
#[derive(Debug, Clone)]
pub enum Progress {
    BatchStart { total_sites: u64 },
    SiteStart { site: usize },
    SiteFinish,
    BatchFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards progress events to an optional callback supplied by the embedder.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_is_a_no_op() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::BatchStart { total_sites: 3 });
    }

    #[test]
    fn events_reach_the_callback_in_order() {
        let seen: Mutex<Vec<String>> = Mutex::new(Vec::new());
        {
            let reporter = ProgressReporter::with_callback(Box::new(|event| {
                seen.lock().unwrap().push(format!("{event:?}"));
            }));
            reporter.report(Progress::BatchStart { total_sites: 1 });
            reporter.report(Progress::SiteStart { site: 0 });
            reporter.report(Progress::SiteFinish);
            reporter.report(Progress::BatchFinish);
        }
        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 4);
        assert!(seen[0].starts_with("BatchStart"));
        assert!(seen[3].starts_with("BatchFinish"));
    }
}
