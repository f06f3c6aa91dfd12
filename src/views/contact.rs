use super::{esc, Page};
use crate::contact::{ContactForm, FormStatus, STATUS_DISPLAY_DURATION};
use crate::site::{FieldKind, FormField, SiteConfig};

/// Removes the status banner after its display duration and shows the
/// loading label while a submission is in flight.
const FORM_SCRIPT: &str = r#"<script>
    document.querySelectorAll("[data-dismiss-after]").forEach((el) => {
        setTimeout(() => el.remove(), Number(el.dataset.dismissAfter));
    });
    const form = document.querySelector("form.contact-form");
    if (form) {
        form.addEventListener("submit", () => {
            const button = form.querySelector("button[type=submit]");
            button.disabled = true;
            button.textContent = button.dataset.loadingText;
        });
    }
</script>"#;

fn render_field(field: &FormField, value: &str) -> String {
    let required = if field.required { " required" } else { "" };
    let control = match field.kind {
        FieldKind::Textarea => format!(
            "<textarea id=\"{name}\" name=\"{name}\" rows=\"6\" placeholder=\"{placeholder}\"{required}>{value}</textarea>",
            name = esc(&field.name),
            placeholder = esc(&field.placeholder),
            value = esc(value),
        ),
        FieldKind::Text | FieldKind::Email => format!(
            "<input id=\"{name}\" name=\"{name}\" type=\"{kind}\" value=\"{value}\" placeholder=\"{placeholder}\"{required}>",
            name = esc(&field.name),
            kind = if field.kind == FieldKind::Email { "email" } else { "text" },
            value = esc(value),
            placeholder = esc(&field.placeholder),
        ),
    };
    format!(
        "<div class=\"field\"><label for=\"{}\">{}</label>{control}</div>",
        esc(&field.name),
        esc(&field.label)
    )
}

fn render_status(site: &SiteConfig, status: FormStatus) -> String {
    let (class, message) = match status {
        FormStatus::Idle => return String::new(),
        FormStatus::Success => ("success", &site.contact.form.success_message),
        FormStatus::Error => ("error", &site.contact.form.error_message),
    };
    format!(
        "<div class=\"status {class}\" role=\"status\" data-dismiss-after=\"{}\">{}</div>",
        STATUS_DISPLAY_DURATION.as_millis(),
        esc(message)
    )
}

pub fn render_contact(site: &SiteConfig, form: &ContactForm, status: FormStatus) -> Page {
    let schema = &site.contact.form;
    let fields: String = schema
        .fields
        .iter()
        .map(|field| render_field(field, form.value(&field.name)))
        .collect();
    let info: String = site
        .contact
        .info
        .iter()
        .map(|item| {
            format!(
                "<li><span class=\"icon\">{}</span><strong>{}</strong> {}</li>",
                esc(&item.icon),
                esc(&item.label),
                esc(&item.value)
            )
        })
        .collect();

    let body = format!(
        r#"<section class="page contact">
    <header class="page-header">
        <h1>{title}</h1>
        <p>{description}</p>
    </header>
    {status}
    <form class="contact-form" method="post" action="/contact">
        {fields}
        <button type="submit" data-loading-text="Sending...">{submit}</button>
    </form>
    <ul class="contact-info">{info}</ul>
</section>
{script}"#,
        title = esc(&site.contact.title),
        description = esc(&site.contact.description),
        status = render_status(site, status),
        submit = esc(&schema.submit_text),
        script = FORM_SCRIPT,
    );

    Page {
        title: site.page_title("Contact"),
        description: site.contact.description.clone(),
        path: "/contact".to_string(),
        head: String::new(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::*;
    use crate::contact::tests::filled_form;
    use crate::views::shell::tests::site;

    fn input_value(html: &str, name: &str) -> Option<String> {
        let doc = Html::parse_fragment(html);
        let sel = Selector::parse(&format!("input[name={name}]")).unwrap();
        doc.select(&sel)
            .next()
            .and_then(|el| el.value().attr("value").map(str::to_string))
    }

    #[test]
    fn idle_form_has_no_banner() {
        let page = render_contact(&site(), &ContactForm::default(), FormStatus::Idle);
        let doc = Html::parse_fragment(&page.body);
        let banner = Selector::parse(".status, [data-dismiss-after]").unwrap();
        assert_eq!(doc.select(&banner).count(), 0);
        assert_eq!(input_value(&page.body, "name").as_deref(), Some(""));
    }

    #[test]
    fn every_schema_field_is_required() {
        let page = render_contact(&site(), &ContactForm::default(), FormStatus::Idle);
        let doc = Html::parse_fragment(&page.body);
        let required = Selector::parse("form [required]").unwrap();
        assert_eq!(doc.select(&required).count(), 4);
    }

    #[test]
    fn error_keeps_values_and_shows_message() {
        let site = site();
        let page = render_contact(&site, &filled_form(), FormStatus::Error);
        let doc = Html::parse_fragment(&page.body);
        let banner = Selector::parse("div.status.error[data-dismiss-after=\"5000\"]").unwrap();
        assert_eq!(doc.select(&banner).count(), 1);
        assert_eq!(input_value(&page.body, "email").as_deref(), Some("test@example.com"));
        assert!(page.body.contains(">Just saying hi</textarea>"));
    }

    #[test]
    fn success_shows_configured_message() {
        let site = site();
        let page = render_contact(&site, &ContactForm::default(), FormStatus::Success);
        assert!(page.body.contains("status success"));
        assert!(page.body.contains(&esc(&site.contact.form.success_message)));
    }
}
