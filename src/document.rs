//! Standalone HTML page around rendered widget markup.

use plaudit_render::markup::escape;

/// Minimal styles so a rendered page is readable without the widget CSS.
const BASE_STYLE: &str = "body{font-family:system-ui,sans-serif;margin:2rem;}\
.plaudit-card{border:1px solid #ddd;border-radius:8px;padding:1rem;margin:.5rem;}\
.plaudit-track{display:flex;}\
.plaudit-stars{color:#f5b301;}";

/// Wraps container markup in an HTML document.
#[must_use]
pub fn html_page(title: &str, containers: &[String]) -> String {
    let mut page = format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{BASE_STYLE}</style>\n</head>\n<body>\n",
        escape(title)
    );
    for container in containers {
        page.push_str(container);
        page.push('\n');
    }
    page.push_str("</body>\n</html>\n");
    page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_escaped() {
        let page = html_page("<Cafe>", &["<div id=\"r\"></div>".to_string()]);
        assert!(page.contains("<title>&lt;Cafe&gt;</title>"));
        assert!(page.contains("<div id=\"r\"></div>\n</body>"));
    }
}
