//! HTML rendering for the events site: list page, detail pages, and static export.

use std::sync::Arc;

use catalog::Catalog;
use shared::domain::{EventRecord, EventStatus};

mod detail;
pub mod export;
pub mod html;
mod layout;
mod list;
pub mod video;

pub use detail::RegistrationView;
pub use export::{export_site, ExportError, ExportReport, STYLESHEET};
pub use layout::SiteSettings;
pub use video::{VideoModal, VideoPlayer};

use layout::{document, footer, header, page_title, PageMeta};

/// Seconds the registration confirmation stays up before returning to the event page.
pub const CONFIRMATION_REFRESH_SECS: u64 = registration::CONFIRMATION_DELAY.as_secs();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Found,
    NotFound,
}

#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub status: PageStatus,
    pub html: String,
}

#[derive(Clone)]
pub struct Site {
    catalog: Arc<Catalog>,
    settings: SiteSettings,
}

impl Site {
    pub fn new(catalog: Arc<Catalog>, settings: SiteSettings) -> Self {
        Self { catalog, settings }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    pub fn render_index(&self) -> String {
        let upcoming = self.catalog.list_by_status(EventStatus::Upcoming);
        let ongoing = self.catalog.list_by_status(EventStatus::Ongoing);
        let completed = self.catalog.list_by_status(EventStatus::Completed);

        let mut body = header(&self.settings, false);
        body.push_str(&list::hero(&self.settings.brand));
        body.push_str(&list::event_groups(&upcoming, &ongoing, &completed));
        body.push_str(&footer(&self.settings));

        document(
            &self.settings,
            PageMeta {
                title: self.settings.brand.clone(),
                description: None,
                refresh: None,
            },
            &body,
        )
    }

    pub fn render_event(&self, event_id: &str) -> RenderedPage {
        self.render_event_with_registration(event_id, None)
    }

    /// Detail page with the registration dialog pre-filled, e.g. after a failed submission.
    pub fn render_event_with_registration(
        &self,
        event_id: &str,
        registration: Option<RegistrationView<'_>>,
    ) -> RenderedPage {
        match self.catalog.find_by_id(event_id) {
            Some(event) => RenderedPage {
                status: PageStatus::Found,
                html: self.render_record(event, registration),
            },
            None => RenderedPage {
                status: PageStatus::NotFound,
                html: self.render_not_found(),
            },
        }
    }

    pub fn render_not_found(&self) -> String {
        let mut body = header(&self.settings, false);
        body.push_str(&detail::not_found_body());
        document(
            &self.settings,
            PageMeta {
                title: page_title(&self.settings, "Event Not Found"),
                description: None,
                refresh: None,
            },
            &body,
        )
    }

    pub fn render_confirmation(&self, event: &EventRecord) -> String {
        let mut body = header(&self.settings, true);
        body.push_str(&detail::confirmation_body(event));
        body.push_str(&footer(&self.settings));
        document(
            &self.settings,
            PageMeta {
                title: page_title(&self.settings, &format!("Registered: {}", event.title)),
                description: None,
                refresh: Some((CONFIRMATION_REFRESH_SECS, event.detail_path())),
            },
            &body,
        )
    }

    fn render_record(
        &self,
        event: &EventRecord,
        registration: Option<RegistrationView<'_>>,
    ) -> String {
        let mut body = header(&self.settings, true);
        body.push_str(&detail::event_body(event, &self.settings, registration));
        body.push_str(&footer(&self.settings));
        document(
            &self.settings,
            PageMeta {
                title: page_title(&self.settings, &event.title),
                description: Some(&event.description),
                refresh: None,
            },
            &body,
        )
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/export_tests.rs"]
mod export_tests;
