use crate::{
    controller::FormInput,
    domain::{Field, FieldErrors},
    notifications::Notice,
};

use std::fmt::Write;

use htmlescape::encode_minimal;

pub fn form_view(values: &FormInput, errors: &FieldErrors, notices: &[Notice]) -> String {
    let name = input_field(
        Field::Name,
        "Full Name",
        "text",
        "Enter your full name",
        &values.name,
        errors,
        None,
    );
    let email = input_field(
        Field::Email,
        "Email Address",
        "email",
        "your.email@example.com",
        &values.email,
        errors,
        None,
    );
    let topic = input_field(
        Field::Topic,
        "News Topic",
        "text",
        "e.g., Technology, Sports, Politics",
        &values.topic,
        errors,
        Some("Choose any topic you're interested in following"),
    );

    let form_class = if errors.is_empty() {
        ""
    } else {
        r#" class="invalid""#
    };

    let card = format!(
        r#"<section class="card">
        <h2>Stay Informed</h2>
        <p>Get personalized news updates delivered to your inbox every 30 minutes</p>
        <div class="highlight">
            <p><strong>Real-time Updates</strong></p>
            <p>Fresh news every 30 minutes</p>
        </div>
        <form name="subscribe"{form_class} action="/subscriptions" method="post"
            onsubmit="var b = this.querySelector('button'); b.disabled = true; b.textContent = 'Subscribing...';">
            {name}
            {email}
            {topic}
            <button type="submit">Subscribe to News Updates</button>
        </form>
        <p class="fine-print">By subscribing, you agree to receive news updates. Unsubscribe anytime.</p>
    </section>"#
    );

    layout(&card, notices)
}

pub fn subscribed_view(notices: &[Notice]) -> String {
    let card = r#"<section class="card subscribed">
        <h3>You're all set!</h3>
        <p>Welcome to your personalized news experience. You'll receive updates every 30 minutes.</p>
        <p><a href="/">Subscribe to another topic</a></p>
    </section>"#;

    layout(card, notices)
}

fn input_field(
    field: Field,
    label: &str,
    input_type: &str,
    placeholder: &str,
    value: &str,
    errors: &FieldErrors,
    description: Option<&str>,
) -> String {
    let name = field.as_str();
    let value = encode_minimal(value);
    let mut html = format!(
        r#"<label for="{name}">{label}</label>
            <input id="{name}" type="{input_type}" name="{name}" placeholder="{placeholder}" value="{value}">"#
    );
    if let Some(description) = description {
        write!(html, r#"<p class="description">{}</p>"#, description).unwrap();
    }
    if let Some(message) = errors.get(field) {
        write!(
            html,
            r#"<p class="field-error" id="{}-error">{}</p>"#,
            name,
            encode_minimal(message)
        )
        .unwrap();
    }
    html
}

fn layout(content: &str, notices: &[Notice]) -> String {
    let mut toasts = String::new();
    for notice in notices {
        let class = if notice.is_destructive() {
            "toast destructive"
        } else {
            "toast"
        };
        writeln!(
            toasts,
            r#"<div class="{}" role="status"><p><strong>{}</strong></p><p>{}</p></div>"#,
            class,
            notice.title(),
            notice.description()
        )
        .unwrap();
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta http-equiv="content-type" content="text/html; charset=utf-8">
    <title>Newsdesk - personalized news every 30 minutes</title>
</head>
<body>
    <header>
        <h1>Your news, your topics</h1>
        <p>Pick a topic and we'll keep you posted.</p>
    </header>
    {toasts}
    {content}
</body>
</html>"#
    )
}
