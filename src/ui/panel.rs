use super::style;

/// Collapsible container: a header with title, status and collapse glyph,
/// followed by child content that is shown only while expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub title: String,
    pub status: String,
    pub collapsed: bool,
}

impl Panel {
    pub fn new(title: impl Into<String>, status: impl Into<String>, collapsed: bool) -> Self {
        Self {
            title: title.into(),
            status: status.into(),
            collapsed,
        }
    }

    pub fn glyph(&self) -> &'static str {
        if self.collapsed { "▼" } else { "▲" }
    }

    pub fn header_line(&self) -> String {
        format!(
            "{} {} {}",
            style::header(&self.title),
            style::dim(format!("({})", self.status)),
            self.glyph()
        )
    }

    /// Header plus indented `children`; children are dropped when collapsed.
    pub fn render<S: AsRef<str>>(&self, children: &[S]) -> String {
        let mut out = self.header_line();
        if self.collapsed {
            return out;
        }
        for child in children {
            for line in child.as_ref().lines() {
                out.push_str("\n  ");
                out.push_str(line);
            }
        }
        out
    }
}
