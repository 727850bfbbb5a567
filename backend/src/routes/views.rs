//! Minimal HTML rendering for the portal pages
//!
//! The portal serves small server-rendered forms, so pages are assembled
//! inline rather than through a template engine. All interpolated values go
//! through `escape`.

use axum::response::Html;
use member_portal_shared::types::FlashMessage;

/// Escape text for interpolation into HTML
fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>",
        escape(title),
        body,
    ))
}

fn flash_block(flash: &[FlashMessage]) -> String {
    flash
        .iter()
        .map(|message| {
            format!(
                "<p class=\"flash flash-{}\">{}</p>\n",
                escape(&message.category),
                escape(&message.text)
            )
        })
        .collect()
}

fn error_list(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|error| format!("<li>{}</li>", escape(error)))
        .collect();
    format!("<ul class=\"errors\">{items}</ul>\n")
}

pub fn login_page(flash: &[FlashMessage]) -> Html<String> {
    let body = format!(
        "{flash}<h1>Login</h1>\n\
         <form method=\"post\" action=\"/login\">\n\
         <label>Email <input type=\"email\" name=\"email\"></label>\n\
         <label>Password <input type=\"password\" name=\"password\"></label>\n\
         <button type=\"submit\">Login</button>\n\
         </form>\n\
         <p><a href=\"/register\">Register</a></p>",
        flash = flash_block(flash),
    );
    layout("Login", &body)
}

/// Registration form; submitted name and email are echoed back on failure,
/// passwords never are.
pub fn register_page(
    errors: &[String],
    name: &str,
    email: &str,
    flash: &[FlashMessage],
) -> Html<String> {
    let body = format!(
        "{flash}{errors}<h1>Register</h1>\n\
         <form method=\"post\" action=\"/register\">\n\
         <label>Name <input type=\"text\" name=\"name\" value=\"{name}\"></label>\n\
         <label>Email <input type=\"email\" name=\"email\" value=\"{email}\"></label>\n\
         <label>Password <input type=\"password\" name=\"password\"></label>\n\
         <label>Confirm Password <input type=\"password\" name=\"password2\"></label>\n\
         <button type=\"submit\">Register</button>\n\
         </form>\n\
         <p><a href=\"/login\">Login</a></p>",
        flash = flash_block(flash),
        errors = error_list(errors),
        name = escape(name),
        email = escape(email),
    );
    layout("Register", &body)
}

pub fn dashboard_page(name: &str, email: &str, flash: &[FlashMessage]) -> Html<String> {
    let body = format!(
        "{flash}<h1>Dashboard</h1>\n\
         <p>Welcome, {name} ({email})</p>\n\
         <p><a href=\"/logout\">Logout</a></p>",
        flash = flash_block(flash),
        name = escape(name),
        email = escape(email),
    );
    layout("Dashboard", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_neutralizes_markup() {
        assert_eq!(
            escape("<script>\"a\" & 'b'</script>"),
            "&lt;script&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_register_page_escapes_submitted_values() {
        let page = register_page(&[], "<Bob>", "bob@example.com", &[]);
        assert!(page.0.contains("&lt;Bob&gt;"));
        assert!(!page.0.contains("<Bob>"));
    }

    #[test]
    fn test_register_page_lists_errors() {
        let errors = vec!["Name is required".to_string(), "Passwords do not match".to_string()];
        let page = register_page(&errors, "", "", &[]);
        assert!(page.0.contains("<li>Name is required</li>"));
        assert!(page.0.contains("<li>Passwords do not match</li>"));
    }

    #[test]
    fn test_flash_is_rendered_with_category_class() {
        let flash = vec![FlashMessage::new("error", "Please log in first")];
        let page = login_page(&flash);
        assert!(page.0.contains("flash-error"));
        assert!(page.0.contains("Please log in first"));
    }
}
