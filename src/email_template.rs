//! Recruitment letter sent to every new lead.

pub const PREVIEW_TEXT: &str = "Your Solaris Recruitment Letter";
pub const LOGO_URL: &str = "https://hacksolaris.com/email/logo.png";
pub const SIGNATURE_URL: &str = "https://hacksolaris.com/email/signature.png";

const LETTER_PARAGRAPHS: [&str; 6] = [
    "Dear Earth,",
    "The year is 2035, and humanity's lunar ambitions face their greatest test. \
     At Tranquility Base, our pioneers face intense radiation, corrosive dust, \
     and the mental toll of isolation.",
    "But we are not defeated. We are inspired.",
    "To the high school students of the tri state area: we require your brilliance. \
     As the next generation of aerospace engineers, your innovative ideas could be \
     the key to our survival and expansion on the moon.",
    "This is your moment to make history. Remember, each of your breakthroughs \
     brings us closer to becoming a truly spacefaring civilization. The challenges \
     are great, but so is our determination.",
    "The future of space exploration is in your hands. Show us what humanity can \
     achieve when we reach for the stars together.",
];

const MOTTO: &str = "Ad astra per aspera - to the stars through difficulties.";
const SIGNER_NAME: &str = "Mohit Srinivasan";
const SIGNER_TITLE: &str = "Mission Director";
const SIGNER_ORG: &str = "Solaris Mission Control";

/// Renders the HTML body for `recipient`.
///
/// The letter itself is fixed; the recipient only appears in the footer.
pub fn render_recruitment_letter(recipient: &str) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str(
        "<!DOCTYPE html>\n<html>\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>Mission Control Letter</title>\n</head>\n",
    );
    html.push_str(
        "<body style=\"margin: 0; padding: 0; background-color: #ffffff; \
         font-family: Arial, sans-serif; line-height: 1.6; color: #333;\">\n",
    );
    // Hidden preheader shown by mail clients next to the subject
    html.push_str(&format!(
        "<div style=\"display: none; max-height: 0; overflow: hidden;\">{}</div>\n",
        PREVIEW_TEXT
    ));
    html.push_str("<div style=\"padding: 40px; max-width: 600px; margin: 0 auto;\">\n");
    html.push_str(&format!(
        "<div style=\"text-align: center; margin-bottom: 30px;\">\
         <img src=\"{}\" alt=\"Solaris Logo\" width=\"200\" style=\"height: auto;\"></div>\n",
        LOGO_URL
    ));

    html.push_str("<div style=\"padding: 20px 0;\">\n");
    for paragraph in LETTER_PARAGRAPHS {
        html.push_str(&format!(
            "<p style=\"margin-bottom: 20px;\">{}</p>\n",
            escape_html(paragraph)
        ));
    }
    html.push_str(&format!(
        "<p style=\"margin-bottom: 30px; font-style: italic;\">{}</p>\n",
        MOTTO
    ));
    html.push_str("<p style=\"margin-bottom: 20px;\">With hope and anticipation,</p>\n");

    html.push_str("<div style=\"margin-top: 40px;\">\n");
    html.push_str(&format!(
        "<p style=\"margin: 0; font-weight: bold;\">{}</p>\n",
        SIGNER_NAME
    ));
    html.push_str(&format!(
        "<img src=\"{}\" alt=\"Signature\" width=\"200\" style=\"height: auto;\">\n",
        SIGNATURE_URL
    ));
    html.push_str(&format!(
        "<p style=\"margin: 0; color: #666;\">{}</p>\n\
         <p style=\"margin: 0; color: #666;\">{}</p>\n",
        SIGNER_TITLE, SIGNER_ORG
    ));
    html.push_str("</div>\n</div>\n");

    html.push_str(&format!(
        "<p style=\"margin-top: 40px; font-size: 12px; color: #999;\">\
         This letter was sent to {} because it was entered at hacksolaris.com.</p>\n",
        escape_html(recipient)
    ));
    html.push_str("</div>\n</body>\n</html>\n");

    html
}

fn escape_html(input: &str) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_contains_fixed_content() {
        let html = render_recruitment_letter("cadet@example.com");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(PREVIEW_TEXT));
        assert!(html.contains(LOGO_URL));
        assert!(html.contains("Tranquility Base"));
        assert!(html.contains("Ad astra per aspera"));
        assert!(html.contains("Mission Director"));
        assert!(html.contains("cadet@example.com"));
    }

    #[test]
    fn test_only_recipient_varies() {
        let a = render_recruitment_letter("a@example.com");
        let b = render_recruitment_letter("b@example.com");
        assert_ne!(a, b);
        assert_eq!(a.replace("a@example.com", "X"), b.replace("b@example.com", "X"));
    }

    #[test]
    fn test_recipient_is_escaped() {
        let html = render_recruitment_letter("o'neil<script>@example.com");
        assert!(html.contains("o&#39;neil&lt;script&gt;@example.com"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_apostrophes_in_letter_are_escaped() {
        let html = render_recruitment_letter("a@example.com");
        assert!(html.contains("humanity&#39;s lunar ambitions"));
    }
}
