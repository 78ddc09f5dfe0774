//! HTML rendering for the prediction form page.

use crate::prediction::{Banner, FormInput, PredictionRequest};

/// Form page template (embedded at compile time)
const FORM_HTML: &str = include_str!("../../static/form.html");

/// Values shown in the four inputs plus the optional banner below them.
#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    /// PERMX, PERMY, PERMZ, PORO as displayed.
    pub values: [String; 4],
    pub banner: Option<Banner>,
}

impl FormView {
    /// Fresh page: every field at 0.00, no banner.
    pub fn idle() -> Self {
        Self::from_request(&PredictionRequest::default(), None)
    }

    /// Echo numeric values back with two decimals.
    pub fn from_request(request: &PredictionRequest, banner: Option<Banner>) -> Self {
        Self {
            values: [
                format!("{:.2}", request.permeability_x),
                format!("{:.2}", request.permeability_y),
                format!("{:.2}", request.permeability_z),
                format!("{:.2}", request.porosity),
            ],
            banner,
        }
    }

    /// Echo raw field text when it could not be parsed; blank fields show 0.00.
    pub fn from_raw(input: &FormInput, banner: Option<Banner>) -> Self {
        let show = |raw: &str| {
            let raw = raw.trim();
            if raw.is_empty() {
                "0.00".to_string()
            } else {
                raw.to_string()
            }
        };
        Self {
            values: [
                show(&input.permx),
                show(&input.permy),
                show(&input.permz),
                show(&input.poro),
            ],
            banner,
        }
    }

    /// Fill the template in a single left-to-right pass, so text that lands
    /// in the output is never scanned for placeholders again.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(FORM_HTML.len() + 256);
        let mut rest = FORM_HTML;
        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                rest = &rest[start..];
                break;
            };
            match self.placeholder(&after[..end]) {
                Some(value) => out.push_str(&value),
                None => out.push_str(&rest[start..start + 2 + end + 2]),
            }
            rest = &after[end + 2..];
        }
        out.push_str(rest);
        out
    }

    fn placeholder(&self, name: &str) -> Option<String> {
        let [permx, permy, permz, poro] = &self.values;
        match name {
            "permx" => Some(escape_html(permx)),
            "permy" => Some(escape_html(permy)),
            "permz" => Some(escape_html(permz)),
            "poro" => Some(escape_html(poro)),
            "banner" => Some(self.banner.as_ref().map(render_banner).unwrap_or_default()),
            _ => None,
        }
    }
}

fn render_banner(banner: &Banner) -> String {
    match banner {
        Banner::Success(msg) => format!(
            "  <div class=\"banner success\" role=\"status\">{}</div>",
            escape_html(msg)
        ),
        Banner::Error(msg) => format!(
            "  <div class=\"banner error\" role=\"alert\">{}</div>",
            escape_html(msg)
        ),
        Banner::Info(lines) => {
            let body: Vec<String> = lines
                .iter()
                .map(|l| format!("    <p>{}</p>", escape_html(l)))
                .collect();
            format!("  <div class=\"banner info\">\n{}\n  </div>", body.join("\n"))
        }
    }
}

/// Minimal escaping for text and attribute positions.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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
    fn test_idle_page_has_defaults_and_no_banner() {
        let html = FormView::idle().render();
        assert_eq!(html.matches("value=\"0.00\"").count(), 4);
        assert!(!html.contains("class=\"banner"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_labels_and_actions_present() {
        let html = FormView::idle().render();
        for label in [
            "Permeability in X direction (PERMX)",
            "Permeability in Y direction (PERMY)",
            "Permeability in Z direction (PERMZ)",
            "Porosity (PORO)",
            "Predict Transmissibility",
            "About",
        ] {
            assert!(html.contains(label), "missing {label}");
        }
    }

    #[test]
    fn test_values_echo_two_decimals() {
        let view = FormView::from_request(&PredictionRequest::new(15.0, 20.126, 5.0, 0.25), None);
        assert_eq!(view.values, ["15.00", "20.13", "5.00", "0.25"].map(String::from));
    }

    #[test]
    fn test_raw_values_are_escaped() {
        let input = FormInput {
            permx: "\"><script>".to_string(),
            ..FormInput::default()
        };
        let html = FormView::from_raw(&input, Some(Banner::Error("x < y".into()))).render();
        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;\""));
        assert!(html.contains("x &lt; y"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_info_banner_renders_each_line() {
        let banner = Banner::Info(vec!["one".into(), "two".into()]);
        let html = FormView::from_request(&PredictionRequest::default(), Some(banner)).render();
        assert!(html.contains("<p>one</p>"));
        assert!(html.contains("<p>two</p>"));
    }

    #[test]
    fn test_placeholder_text_in_values_is_not_expanded() {
        let input = FormInput {
            permx: "{{banner}}".to_string(),
            permy: "{{poro}}".to_string(),
            ..FormInput::default()
        };
        let banner = Banner::Error("Permeability in X direction (PERMX) must be a number.".into());
        let html = FormView::from_raw(&input, Some(banner)).render();
        assert_eq!(html.matches("class=\"banner error\"").count(), 1);
        assert!(html.contains("value=\"{{banner}}\""));
        assert!(html.contains("value=\"{{poro}}\""));
    }
}
