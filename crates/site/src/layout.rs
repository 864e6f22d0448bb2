use chrono::Datelike;

use crate::html::escape;

#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub brand: String,
    pub organization: String,
    pub portal_name: String,
    pub main_site_url: String,
    pub facebook_url: String,
    pub logo_path: String,
    pub stylesheet_path: String,
    /// Prefix for registration form actions; empty means same origin.
    pub registration_base: String,
    /// Fixed footer year; the current year is used when unset.
    pub copyright_year: Option<i32>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            brand: "QTM Events".into(),
            organization: "Queensland Tamil Mandram".into(),
            portal_name: "Events Portal".into(),
            main_site_url: "https://qtm.org.au".into(),
            facebook_url: "https://www.facebook.com/QLDTamilMandram".into(),
            logo_path: "/qtmlogo.png".into(),
            stylesheet_path: "/site.css".into(),
            registration_base: String::new(),
            copyright_year: None,
        }
    }
}

impl SiteSettings {
    pub fn registration_action(&self, event_id: &str) -> String {
        format!(
            "{}/{}/register",
            self.registration_base.trim_end_matches('/'),
            event_id
        )
    }

    fn year(&self) -> i32 {
        self.copyright_year
            .unwrap_or_else(|| chrono::Utc::now().year())
    }
}

pub(crate) struct PageMeta<'a> {
    pub title: String,
    pub description: Option<&'a str>,
    pub refresh: Option<(u64, String)>,
}

pub(crate) fn document(settings: &SiteSettings, meta: PageMeta<'_>, body: &str) -> String {
    let description = meta
        .description
        .map(|d| format!("<meta name=\"description\" content=\"{}\">\n", escape(d)))
        .unwrap_or_default();
    let refresh = meta
        .refresh
        .map(|(seconds, target)| {
            format!(
                "<meta http-equiv=\"refresh\" content=\"{seconds};url={}\">\n",
                escape(&target)
            )
        })
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n{description}{refresh}\
         <link rel=\"stylesheet\" href=\"{css}\">\n</head>\n<body>\n<main>\n{body}</main>\n</body>\n</html>\n",
        title = escape(&meta.title),
        css = escape(&settings.stylesheet_path),
    )
}

pub(crate) fn page_title(settings: &SiteSettings, title: &str) -> String {
    format!("{title} | {}", settings.brand)
}

pub(crate) fn header(settings: &SiteSettings, back_link: bool) -> String {
    let back = if back_link {
        "<a class=\"nav-link\" href=\"/\">&larr; All Events</a>\n"
    } else {
        ""
    };
    format!(
        "<header class=\"site-header\">\n<a class=\"brand\" href=\"/\">\
         <img src=\"{logo}\" alt=\"{org} logo\" width=\"50\" height=\"50\">\
         <span class=\"brand-name\">{brand}</span>\
         <span class=\"brand-org\">{org}</span></a>\n\
         <nav>\n{back}<a class=\"nav-link\" href=\"{main}\">Main Site</a>\n</nav>\n</header>\n",
        logo = escape(&settings.logo_path),
        brand = escape(&settings.brand),
        org = escape(&settings.organization),
        main = escape(&settings.main_site_url),
    )
}

pub(crate) fn footer(settings: &SiteSettings) -> String {
    format!(
        "<footer class=\"site-footer\">\n<div class=\"footer-brand\">\
         <img src=\"{logo}\" alt=\"{org} logo\" width=\"40\" height=\"40\">\
         <span>{org}</span><span class=\"portal\">{portal}</span></div>\n\
         <div class=\"footer-meta\"><p>&copy; {year} {org}. All rights reserved.</p>\
         <a href=\"{main}\">Visit Main Website</a></div>\n</footer>\n",
        logo = escape(&settings.logo_path),
        org = escape(&settings.organization),
        portal = escape(&settings.portal_name),
        year = settings.year(),
        main = escape(&settings.main_site_url),
    )
}
