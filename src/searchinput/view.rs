//! Rendering of the field and its dropdown.

use unicode_width::UnicodeWidthStr;

use super::model::Model;
use crate::suggestion::Suggestion;

const CLEAR_MARK: &str = "×";
const SELECTED_MARKER: &str = "› ";
const MARKER_PAD: &str = "  ";

impl Model {
    /// View renders the field and, when visible, one dropdown row per suggestion.
    pub fn view(&self) -> String {
        let mut lines = vec![self.field_view()];

        if self.dropdown_visible() {
            let selected = self.selected_index();
            for (i, suggestion) in self.suggestions().iter().enumerate() {
                lines.push(self.item_view(suggestion, selected == Some(i)));
            }
        }

        lines.join("\n")
    }

    fn field_view(&self) -> String {
        let mut v = String::new();
        let text_width;

        if self.value.is_empty() {
            text_width = self.placeholder.width() + usize::from(self.field_focus);
            if self.field_focus {
                let mut chars = self.placeholder.chars();
                let first = chars.next().map(String::from).unwrap_or_else(|| " ".into());
                v.push_str(&self.cursor_style.render(&first));
                v.push_str(&self.placeholder_style.render(chars.as_str()));
            } else {
                v.push_str(&self.placeholder_style.render(&self.placeholder));
            }
        } else {
            let before: String = self.value[..self.pos].iter().collect();
            v.push_str(&self.text_style.render(&before));

            if self.field_focus {
                let under: String = self.value.get(self.pos).map_or(" ".into(), |c| c.to_string());
                v.push_str(&self.cursor_style.render(&under));
                if self.pos + 1 < self.value.len() {
                    let after: String = self.value[self.pos + 1..].iter().collect();
                    v.push_str(&self.text_style.render(&after));
                }
            } else if self.pos < self.value.len() {
                let after: String = self.value[self.pos..].iter().collect();
                v.push_str(&self.text_style.render(&after));
            }

            let value_width = self.value().width();
            text_width = if self.field_focus && self.pos == self.value.len() {
                value_width + 1
            } else {
                value_width
            };
        }

        if self.width > text_width {
            v.push_str(&self.text_style.render(&" ".repeat(self.width - text_width)));
        }

        let affordance = if self.is_loading() {
            self.spinner.view()
        } else if !self.value.is_empty() {
            self.placeholder_style.render(CLEAR_MARK)
        } else {
            String::new()
        };

        let mut out = self.prompt_style.render(&self.prompt);
        out.push_str(&v);
        if !affordance.is_empty() {
            out.push(' ');
            out.push_str(&affordance);
        }
        out
    }

    fn item_view(&self, suggestion: &Suggestion, selected: bool) -> String {
        let mut row = String::new();
        if let Some(icon) = suggestion.icon.as_deref() {
            row.push_str(icon);
            row.push(' ');
        }
        row.push_str(&suggestion.display_text);

        if selected {
            format!(
                "{}{} {}",
                SELECTED_MARKER,
                self.selected_item_style.render(&row),
                self.kind_style.render(&capitalize(&suggestion.kind))
            )
        } else {
            format!(
                "{}{} {}",
                MARKER_PAD,
                self.item_style.render(&row),
                self.kind_style.render(&capitalize(&suggestion.kind))
            )
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::capitalize;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("location"), "Location");
        assert_eq!(capitalize("é"), "É");
        assert_eq!(capitalize(""), "");
    }
}
