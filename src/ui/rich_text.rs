//! Article bodies arrive as pre-rendered HTML from the backend.
//!
//! [`TrustedHtml`] marks that boundary: the content is displayed as-is by
//! `--raw`, or flattened to plain text lines for the terminal. Flattening only
//! maps block-level tags to line breaks and decodes common entities; script
//! and style contents are dropped and nothing is executed or fetched.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct TrustedHtml<'a>(&'a str);

/// Tags that end a line of text.
const BLOCK_TAGS: &[&str] = &[
    "br", "p", "div", "li", "ul", "ol", "tr", "h1", "h2", "h3", "h4", "h5", "h6", "table",
    "blockquote", "pre",
];

/// Tags whose contents are never shown.
const SKIPPED_TAGS: &[&str] = &["script", "style"];

impl<'a> TrustedHtml<'a> {
    pub fn new(html: &'a str) -> Self {
        Self(html)
    }

    pub fn raw(&self) -> &'a str {
        self.0
    }

    /// Plain-text rendering, one entry per non-empty line, whitespace
    /// collapsed.
    pub fn to_plain_lines(&self) -> Vec<String> {
        let mut text = String::with_capacity(self.0.len());
        let mut rest = self.0;
        let mut skipping: Option<&str> = None;

        while let Some(open) = rest.find('<') {
            if skipping.is_none() {
                text.push_str(&rest[..open]);
            }
            let Some(close) = rest[open..].find('>') else {
                // Unterminated tag: keep the remainder as text.
                if skipping.is_none() {
                    text.push_str(&rest[open..]);
                }
                rest = "";
                break;
            };
            let tag = &rest[open + 1..open + close];
            rest = &rest[open + close + 1..];

            let (closing, name) = tag_name(tag);
            if let Some(skipped) = skipping {
                if closing && name == skipped {
                    skipping = None;
                }
                continue;
            }
            if let Some(skipped) = SKIPPED_TAGS.iter().find(|t| **t == name) {
                if !closing && !tag.ends_with('/') {
                    skipping = Some(*skipped);
                }
                continue;
            }
            if BLOCK_TAGS.contains(&name.as_str()) {
                text.push('\n');
                if name == "li" && !closing {
                    text.push_str("• ");
                }
            }
        }
        if skipping.is_none() {
            text.push_str(rest);
        }

        text.lines()
            .map(|line| collapse_spaces(&decode_entities(line)))
            .filter(|line| !line.is_empty())
            .collect()
    }
}

impl fmt::Display for TrustedHtml<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain_lines().join("\n"))
    }
}

/// `("/p", ..)` → `(true, "p")`; attributes and self-closing slashes dropped.
fn tag_name(tag: &str) -> (bool, String) {
    let tag = tag.trim();
    let (closing, body) = match tag.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, tag),
    };
    let name = body
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    (closing, name)
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').filter(|&end| end <= 10).and_then(|end| {
            let entity = &rest[1..end];
            decode_entity(entity).map(|c| (c, end + 1))
        });
        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" | "#39" => Some('\''),
        "nbsp" => Some(' '),
        "aacute" => Some('á'),
        "eacute" => Some('é'),
        "iacute" => Some('í'),
        "oacute" => Some('ó'),
        "uacute" => Some('ú'),
        "ntilde" => Some('ñ'),
        "Ntilde" => Some('Ñ'),
        "uuml" => Some('ü'),
        "iquest" => Some('¿'),
        "iexcl" => Some('¡'),
        _ => {
            let num = entity.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

fn collapse_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_become_lines() {
        let html = "<p>Ingrese a <b>Configuración</b>.</p><p>Pulse <i>Guardar</i>.</p>";
        assert_eq!(
            TrustedHtml::new(html).to_plain_lines(),
            vec!["Ingrese a Configuración.", "Pulse Guardar."]
        );
    }

    #[test]
    fn test_list_items_get_bullets_and_br_breaks() {
        let html = "Pasos:<ul><li>Uno</li><li>Dos</li></ul>Fin<br/>Listo";
        assert_eq!(
            TrustedHtml::new(html).to_plain_lines(),
            vec!["Pasos:", "• Uno", "• Dos", "Fin", "Listo"]
        );
    }

    #[test]
    fn test_entities_decoded() {
        let html = "&iquest;Olvid&oacute; su contrase&ntilde;a? a &amp; b &lt;3 &#233; &#x41; &bogus;";
        assert_eq!(
            TrustedHtml::new(html).to_plain_lines(),
            vec!["¿Olvidó su contraseña? a & b <3 é A &bogus;"]
        );
    }

    #[test]
    fn test_script_and_style_dropped() {
        let html = "<style>p { color: red }</style><p>Visible</p><script>alert(1)</script>";
        assert_eq!(TrustedHtml::new(html).to_plain_lines(), vec!["Visible"]);
    }

    #[test]
    fn test_empty_lines_dropped() {
        let html = "<p>A</p><br><br><br><p>  B  </p>";
        assert_eq!(TrustedHtml::new(html).to_plain_lines(), vec!["A", "B"]);
    }

    #[test]
    fn test_unterminated_tag_kept_as_text() {
        assert_eq!(TrustedHtml::new("a < b").to_plain_lines(), vec!["a < b"]);
        assert_eq!(TrustedHtml::new("plain").raw(), "plain");
    }
}
