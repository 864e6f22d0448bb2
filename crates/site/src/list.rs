use shared::domain::{EventRecord, EventStatus};

use crate::html::escape;

pub(crate) const NO_UPCOMING_MESSAGE: &str = "No upcoming events at the moment. Check back soon!";

pub(crate) fn hero(brand: &str) -> String {
    format!(
        "<section class=\"hero\">\n<h1>{}</h1>\n<p>Join us in celebrating Tamil culture through our \
         community events, festivals, and cultural programs.</p>\n</section>\n",
        escape(brand)
    )
}

pub(crate) fn status_badge(status: EventStatus) -> String {
    format!(
        "<span class=\"badge status-{}\">{}</span>",
        status.as_str(),
        status.label()
    )
}

pub(crate) fn event_card(event: &EventRecord) -> String {
    let mut card = String::new();
    let featured_class = if event.featured { " featured" } else { "" };
    card.push_str(&format!(
        "<article class=\"event-card{featured_class}\" id=\"card-{}\">\n",
        escape(event.id.as_str())
    ));
    if event.featured {
        card.push_str("<div class=\"ribbon\">&#9733; Featured Event</div>\n");
    }
    card.push_str(&format!(
        "<img class=\"card-image\" src=\"{}\" alt=\"{}\">\n<div class=\"card-body\">\n<div class=\"badges\">{}",
        escape(&event.image),
        escape(&event.title),
        status_badge(event.status)
    ));
    if event.registration_open {
        card.push_str("<span class=\"badge registration-open\">Registration Open</span>");
    }
    card.push_str("</div>\n");

    card.push_str(&format!("<h3>{}</h3>\n", escape(&event.title)));
    if let Some(tamil_title) = &event.tamil_title {
        card.push_str(&format!("<p class=\"tamil-title\">{}</p>\n", escape(tamil_title)));
    }
    card.push_str(&format!(
        "<ul class=\"facts\">\n<li class=\"date\">{}</li>\n<li class=\"time\">{}</li>\n<li class=\"venue\">{}</li>\n</ul>\n",
        escape(&event.date),
        escape(&event.time_range()),
        escape(event.display_venue())
    ));
    card.push_str(&format!(
        "<p class=\"summary\">{}</p>\n",
        escape(&event.description)
    ));
    if let Some(price) = &event.ticket_price {
        card.push_str(&format!("<p class=\"price\">{}</p>\n", escape(price)));
    }
    card.push_str(&format!(
        "<a class=\"button\" href=\"{}\">View Details &rarr;</a>\n</div>\n</article>\n",
        escape(&event.detail_path())
    ));
    card
}

fn card_grid(events: &[&EventRecord]) -> String {
    let cards: String = events.iter().map(|event| event_card(event)).collect();
    format!("<div class=\"card-grid\">\n{cards}</div>\n")
}

fn group_section(class: &str, heading: &str, blurb: &str, events: &[&EventRecord]) -> String {
    format!(
        "<section class=\"event-group {class}\">\n<h2>{heading}</h2>\n<p class=\"blurb\">{blurb}</p>\n{}</section>\n",
        card_grid(events)
    )
}

/// Upcoming is always present; the other groups only when they have events.
pub(crate) fn event_groups(
    upcoming: &[&EventRecord],
    ongoing: &[&EventRecord],
    completed: &[&EventRecord],
) -> String {
    let mut out = String::new();

    if upcoming.is_empty() {
        out.push_str(&format!(
            "<section class=\"event-group upcoming\">\n<h2>Upcoming Events</h2>\n\
             <p class=\"empty\">{NO_UPCOMING_MESSAGE}</p>\n</section>\n"
        ));
    } else {
        out.push_str(&group_section(
            "upcoming",
            "Upcoming Events",
            "Don&#39;t miss these exciting upcoming events!",
            upcoming,
        ));
    }

    if !ongoing.is_empty() {
        out.push_str(&group_section(
            "ongoing",
            "Happening Now",
            "These events are underway right now.",
            ongoing,
        ));
    }

    if !completed.is_empty() {
        out.push_str(&group_section(
            "completed",
            "Past Events",
            "A look back at our previous celebrations.",
            completed,
        ));
    }

    out
}
