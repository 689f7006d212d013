use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

/// Renders a workout description to HTML.
///
/// Raw HTML in the sheet is shown as text rather than passed through, and
/// link or image targets outside http, https and mailto are emptied.
pub fn to_html(source: &str) -> String {
    let parser = Parser::new_ext(source, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES)
        .map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => Event::Start(Tag::Link {
                link_type,
                dest_url: safe_destination(dest_url),
                title,
                id,
            }),
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) => Event::Start(Tag::Image {
                link_type,
                dest_url: safe_destination(dest_url),
                title,
                id,
            }),
            event => event,
        });

    let mut output = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Keeps relative targets and allowed schemes, blanks everything else.
fn safe_destination(dest: CowStr<'_>) -> CowStr<'_> {
    let scheme = dest
        .split(['/', '?', '#'])
        .next()
        .and_then(|head| head.split_once(':'))
        .map(|(scheme, _)| {
            scheme
                .chars()
                .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
                .collect::<String>()
                .to_ascii_lowercase()
        });

    match scheme {
        Some(scheme) if !ALLOWED_SCHEMES.contains(&scheme.as_str()) => CowStr::Borrowed(""),
        _ => dest,
    }
}
