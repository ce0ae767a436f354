//! Contact email rendering.
//!
//! Every submitted value is HTML-escaped before it lands in the markup.

use crate::models::ValidSubmission;

const STYLE: &str = r#"
        body { font-family: Arial, sans-serif; line-height: 1.6; color: #333333; background-color: #f4f4f4; margin: 0; padding: 0; }
        .container { width: 100%; max-width: 600px; margin: 0 auto; background-color: #ffffff; padding: 20px; border-radius: 8px; box-shadow: 0 0 10px rgba(0, 0, 0, 0.1); border: 1px solid #dddddd; }
        h3 { color: #3f51b5; border-bottom: 1px solid #eeeeee; padding-bottom: 10px; margin-top: 20px; }
        p { margin-bottom: 10px; }
        strong { color: #555555; }
        .footer { margin-top: 30px; padding-top: 15px; border-top: 1px solid #eeeeee; font-size: 0.9em; color: #888888; text-align: center; }
        a { color: #3f51b5; text-decoration: none; }
"#;

pub fn subject(name: Option<&str>) -> String {
    format!(
        "New Contact Message from {} - Portfolio Site",
        name.unwrap_or("Anonymous")
    )
}

fn escape(value: &str) -> String {
    ammonia::clean_text(value)
}

/// Escape each line separately so line breaks survive as `<br>`.
fn escape_multiline(value: &str) -> String {
    value.lines().map(escape).collect::<Vec<_>>().join("<br>\n")
}

pub fn html(submission: &ValidSubmission, year: i32, site_owner: Option<&str>) -> String {
    let name = submission
        .name
        .as_deref()
        .map(escape)
        .unwrap_or_else(|| "Not provided".to_string());
    let email = escape(&submission.email);
    let message = escape_multiline(&submission.message);
    let copyright = match site_owner {
        Some(owner) => format!("&copy; {} {}. All rights reserved.", year, escape(owner)),
        None => format!("&copy; {}", year),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <style>{STYLE}</style>
</head>
<body>
    <div class="container">
        <h3>New Contact Message from Your Portfolio</h3>

        <p><strong>Name:</strong> {name}</p>
        <p><strong>Email:</strong> <a href="mailto:{email}">{email}</a></p>

        <h3>Message:</h3>
        <p>{message}</p>

        <div class="footer">
            <p>This message was sent from your portfolio contact form.</p>
            <p>{copyright}</p>
        </div>
    </div>
</body>
</html>
"#
    )
}

pub fn plain_text(submission: &ValidSubmission) -> String {
    format!(
        "New Contact Message from Your Portfolio\n\nName: {}\nEmail: {}\n\nMessage:\n{}\n",
        submission.name.as_deref().unwrap_or("Not provided"),
        submission.email,
        submission.message
    )
}
