use registration::RegistrationForm;
use shared::{
    domain::{EventRecord, SponsorTier},
    protocol::AttendeeCount,
};

use crate::{
    html::{escape, panel},
    layout::SiteSettings,
    list::status_badge,
    video::VideoModal,
};

const REGISTRATION_DIALOG_ID: &str = "registration-dialog";
const VIDEO_DIALOG_ID: &str = "video-dialog";

/// Registration dialog contents to show on a detail page.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationView<'a> {
    pub form: &'a RegistrationForm,
    pub error: Option<&'a str>,
    pub open: bool,
}

pub(crate) fn event_body(
    event: &EventRecord,
    settings: &SiteSettings,
    registration: Option<RegistrationView<'_>>,
) -> String {
    let mut main = String::new();
    main.push_str(&panel(
        "about",
        "About This Event",
        &format!("<div class=\"prose\">{}</div>\n", escape(event.about_text())),
    ));
    main.push_str(&highlights(event));
    main.push_str(&schedule(event));
    main.push_str(&video_section(event));
    main.push_str(&sponsors(event));
    main.push_str(&gallery(event));

    let empty_form = RegistrationForm::default();
    let registration = registration.unwrap_or(RegistrationView {
        form: &empty_form,
        error: None,
        open: false,
    });

    let mut body = hero(event);
    body.push_str(&format!(
        "<div class=\"detail-grid\">\n<div class=\"detail-main\">\n{main}</div>\n{}</div>\n",
        sidebar(event, settings)
    ));
    if event.offers_registration() && event.registration_link.is_none() {
        body.push_str(&registration_dialog(event, settings, registration));
    }
    if let Some(video_url) = &event.video_url {
        body.push_str(&VideoModal::new(video_url.as_str()).to_html());
    }
    body
}

fn hero(event: &EventRecord) -> String {
    let featured = if event.featured {
        "<span class=\"badge featured\">Featured</span>"
    } else {
        ""
    };
    let tamil_title = event
        .tamil_title
        .as_deref()
        .map(|t| format!("<p class=\"tamil-title\">{}</p>\n", escape(t)))
        .unwrap_or_default();
    format!(
        "<section class=\"detail-hero\" style=\"background-image: url('{image}')\">\n\
         <div class=\"badges\">{status}{featured}</div>\n<h1>{title}</h1>\n\
         <p class=\"subtitle\">{subtitle}</p>\n{tamil_title}</section>\n",
        image = escape(&event.image),
        status = status_badge(event.status),
        title = escape(&event.title),
        subtitle = escape(&event.subtitle),
    )
}

fn highlights(event: &EventRecord) -> String {
    let Some(items) = event.highlights.as_ref().filter(|h| !h.is_empty()) else {
        return String::new();
    };
    let list: String = items
        .iter()
        .map(|item| format!("<li>{}</li>\n", escape(item)))
        .collect();
    panel(
        "highlights",
        "Event Highlights",
        &format!("<ul class=\"highlight-list\">\n{list}</ul>\n"),
    )
}

fn schedule(event: &EventRecord) -> String {
    let Some(items) = event.schedule.as_ref().filter(|s| !s.is_empty()) else {
        return String::new();
    };
    let rows: String = items
        .iter()
        .map(|item| {
            format!(
                "<li><span class=\"slot-time\">{}</span><span class=\"slot-activity\">{}</span></li>\n",
                escape(&item.time),
                escape(&item.activity)
            )
        })
        .collect();
    panel(
        "schedule",
        "Event Schedule",
        &format!("<ol class=\"schedule-list\">\n{rows}</ol>\n"),
    )
}

fn video_section(event: &EventRecord) -> String {
    if event.video_url.is_none() {
        return String::new();
    }
    panel(
        "video",
        "Event Video",
        &format!(
            "<button type=\"button\" class=\"play-button\" \
             onclick=\"document.getElementById('{VIDEO_DIALOG_ID}').showModal()\">&#9654; Play Video</button>\n"
        ),
    )
}

fn sponsor_tile(tier: SponsorTier, sponsor: &shared::domain::Sponsor) -> String {
    let logo = sponsor
        .logo
        .as_deref()
        .map(|src| {
            format!(
                "<img src=\"{}\" alt=\"{} logo\">",
                escape(src),
                escape(&sponsor.name)
            )
        })
        .unwrap_or_default();
    let name = match &sponsor.website {
        Some(site) => format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            escape(site),
            escape(&sponsor.name)
        ),
        None => escape(&sponsor.name),
    };
    format!(
        "<div class=\"sponsor tier-{}\">{logo}<span class=\"sponsor-name\">{name}</span></div>\n",
        tier.as_str()
    )
}

fn sponsors(event: &EventRecord) -> String {
    let grouped = event.sponsors_by_tier();
    if grouped.is_empty() {
        return String::new();
    }
    let tiers: String = grouped
        .into_iter()
        .map(|(tier, members)| {
            let tiles: String = members
                .into_iter()
                .map(|sponsor| sponsor_tile(tier, sponsor))
                .collect();
            format!(
                "<div class=\"sponsor-tier\" data-tier=\"{}\">\n<h3>{}</h3>\n<div class=\"sponsor-grid\">\n{tiles}</div>\n</div>\n",
                tier.as_str(),
                tier.heading()
            )
        })
        .collect();
    panel("sponsors", "Our Sponsors", &tiers)
}

fn gallery(event: &EventRecord) -> String {
    let Some(images) = event.gallery.as_ref().filter(|g| !g.is_empty()) else {
        return String::new();
    };
    let tiles: String = images
        .iter()
        .enumerate()
        .map(|(index, src)| {
            format!(
                "<img src=\"{}\" alt=\"Gallery {}\" loading=\"lazy\">\n",
                escape(src),
                index + 1
            )
        })
        .collect();
    panel(
        "gallery",
        "Gallery",
        &format!("<div class=\"gallery-grid\">\n{tiles}</div>\n"),
    )
}

fn sidebar_fact(class: &str, label: &str, value: &str, extra: &str) -> String {
    format!(
        "<div class=\"fact {class}\"><p class=\"label\">{label}</p><p class=\"value\">{}</p>{extra}</div>\n",
        escape(value)
    )
}

fn registration_action(event: &EventRecord) -> String {
    if !event.offers_registration() {
        return String::new();
    }
    match &event.registration_link {
        Some(link) => format!(
            "<a class=\"button register\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Register Now</a>\n",
            escape(link)
        ),
        None => format!(
            "<button type=\"button\" class=\"button register\" \
             onclick=\"document.getElementById('{REGISTRATION_DIALOG_ID}').showModal()\">Register Now</button>\n"
        ),
    }
}

fn sidebar(event: &EventRecord, settings: &SiteSettings) -> String {
    let mut side = String::from("<aside class=\"detail-sidebar\">\n");
    side.push_str(&sidebar_fact("date", "Date", &event.date, ""));
    side.push_str(&sidebar_fact("time", "Time", &event.time_range(), ""));
    let address = event
        .address
        .as_deref()
        .map(|a| format!("<p class=\"address\">{}</p>", escape(a)))
        .unwrap_or_default();
    side.push_str(&sidebar_fact("venue", "Venue", event.display_venue(), &address));
    if let Some(price) = &event.ticket_price {
        side.push_str(&sidebar_fact("price", "Entry", price, ""));
    }
    side.push_str(&registration_action(event));

    side.push_str("<div class=\"contact\">\n<h3>Contact Organizer</h3>\n");
    if let Some(organizer) = &event.organizer {
        side.push_str(&format!("<p class=\"organizer\">{}</p>\n", escape(organizer)));
    }
    if let Some(email) = &event.contact_email {
        side.push_str(&format!(
            "<a class=\"contact-email\" href=\"mailto:{0}\">{0}</a>\n",
            escape(email)
        ));
    }
    if let Some(phone) = &event.contact_phone {
        side.push_str(&format!(
            "<a class=\"contact-phone\" href=\"tel:{}\">{}</a>\n",
            escape(&phone.replace(' ', "")),
            escape(phone)
        ));
    }
    side.push_str(&format!(
        "<a class=\"contact-facebook\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Facebook Page</a>\n",
        escape(&settings.facebook_url)
    ));
    side.push_str("</div>\n</aside>\n");
    side
}

fn attendee_options(selected: AttendeeCount) -> String {
    AttendeeCount::ALL
        .into_iter()
        .map(|count| {
            format!(
                "<option value=\"{}\"{}>{}</option>\n",
                count.as_str(),
                if count == selected { " selected" } else { "" },
                count.label()
            )
        })
        .collect()
}

fn registration_dialog(
    event: &EventRecord,
    settings: &SiteSettings,
    view: RegistrationView<'_>,
) -> String {
    let form = view.form;
    let error = view
        .error
        .map(|message| format!("<p class=\"form-error\" role=\"alert\">{}</p>\n", escape(message)))
        .unwrap_or_default();
    format!(
        "<dialog id=\"{REGISTRATION_DIALOG_ID}\" class=\"modal registration-modal\"{open}>\n\
         <form method=\"dialog\"><button class=\"modal-close\" aria-label=\"Close\">&times;</button></form>\n\
         <h3>Register for Event</h3>\n<p>Register for: <strong>{title}</strong></p>\n\
         <form class=\"registration-form\" method=\"post\" action=\"{action}\">\n\
         <label>Full Name *<input name=\"name\" required value=\"{name}\" placeholder=\"Your name\"></label>\n\
         <label>Email *<input type=\"email\" name=\"email\" required value=\"{email}\" placeholder=\"your@email.com\"></label>\n\
         <label>Phone *<input type=\"tel\" name=\"phone\" required value=\"{phone}\" placeholder=\"Your phone number\"></label>\n\
         <label>Number of Attendees<select name=\"attendees\">\n{options}</select></label>\n\
         <label>Special Requirements<textarea name=\"requirements\" rows=\"3\" \
         placeholder=\"Any dietary requirements or accessibility needs...\">{requirements}</textarea></label>\n\
         {error}<button type=\"submit\" class=\"button\">Submit Registration</button>\n</form>\n</dialog>\n",
        open = if view.open { " open" } else { "" },
        title = escape(&event.title),
        action = escape(&settings.registration_action(event.id.as_str())),
        name = escape(&form.name),
        email = escape(&form.email),
        phone = escape(&form.phone),
        options = attendee_options(form.attendees),
        requirements = escape(&form.requirements),
    )
}

pub(crate) fn not_found_body() -> String {
    "<section class=\"not-found\">\n<h1>Event Not Found</h1>\n\
     <p>The event you&#39;re looking for doesn&#39;t exist.</p>\n\
     <a class=\"button\" href=\"/\">View All Events</a>\n</section>\n"
        .to_string()
}

pub(crate) fn confirmation_body(event: &EventRecord) -> String {
    format!(
        "<section class=\"confirmation\">\n<h1>Thank You!</h1>\n\
         <p>Your registration for <strong>{}</strong> has been submitted successfully. \
         We will contact you soon!</p>\n<a class=\"button\" href=\"{}\">Back to event</a>\n</section>\n",
        escape(&event.title),
        escape(&event.detail_path())
    )
}
