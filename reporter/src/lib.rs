//! Client side of the view counter.
//!
//! A page that displays a project holds a [`ReportView`] and calls
//! [`ReportView::show`] whenever the displayed slug may have changed.
//! A report is only sent when the slug actually changes. Replacing the
//! slug or tearing the view down aborts a report that is still in
//! flight, so nothing is sent on behalf of a page that is gone.

mod error;
mod transport;

pub use error::{ReportError, ReportResult};
pub use transport::{HttpTransport, ReportTransport};

use std::sync::Arc;

use shared::Slug;
use tokio::task::JoinHandle;
use tracing::Instrument;

struct Shown {
    slug: Slug,
    report: JoinHandle<()>,
}

pub struct ReportView<T: ReportTransport> {
    transport: Arc<T>,
    shown: Option<Shown>,
}

impl<T: ReportTransport> ReportView<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            shown: None,
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn show(&mut self, slug: &Slug) {
        if self.shown().is_some_and(|shown| shown == slug) {
            return;
        }

        self.cancel();

        let transport = Arc::clone(&self.transport);
        let reported = slug.clone();

        let report = tokio::spawn(
            async move {
                if let Err(e) = transport.report(&reported).await {
                    tracing::warn!("report view of {reported} failed: {e}");
                }
            }
            .in_current_span(),
        );

        self.shown = Some(Shown {
            slug: slug.clone(),
            report,
        });
    }

    pub fn shown(&self) -> Option<&Slug> {
        self.shown.as_ref().map(|shown| &shown.slug)
    }

    pub fn unmount(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(shown) = self.shown.take() {
            shown.report.abort();
        }
    }
}

impl<T: ReportTransport> Drop for ReportView<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
