use std::path::{Path, PathBuf};

use anyhow::Context as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// `.csv`, rendered by the table-reader plugin at build time.
    Table,
    /// `.txt`, inlined into a code block.
    Text,
}

impl PageKind {
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        match path.as_ref().extension().and_then(|x| x.to_str()) {
            Some("csv") => Some(Self::Table),
            Some("txt") => Some(Self::Text),
            _ => None,
        }
    }
}

/// One generated Markdown page and the source file it describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub kind: PageKind,
    pub file_name: String,
    /// Absolute path of the source file.
    pub source_path: PathBuf,
}

impl Page {
    /// `None` when the file is not something we publish.
    pub fn new(source_path: impl Into<PathBuf>) -> anyhow::Result<Option<Self>> {
        let source_path = source_path.into();

        let Some(kind) = PageKind::from_path(&source_path) else {
            return Ok(None);
        };

        let file_name = source_path
            .file_name()
            .and_then(|x| x.to_str())
            .with_context(|| format!("file name isn't valid: {}", source_path.display()))?
            .to_string();

        Ok(Some(Self {
            kind,
            file_name,
            source_path,
        }))
    }

    /// `report.csv` -> `report.csv.md`, so `a.csv` and `a.txt` never collide.
    pub fn page_file_name(&self) -> String {
        format!("{}.md", self.file_name)
    }

    pub fn render(&self) -> anyhow::Result<String> {
        match self.kind {
            PageKind::Table => self.render_table(),
            PageKind::Text => self.render_text(),
        }
    }

    fn render_table(&self) -> anyhow::Result<String> {
        let path = posix_path(&self.source_path)?;
        Ok(format!(
            "# 📊 {}\n\n{{{{ read_csv('{}') }}}}",
            self.file_name,
            escape_single_quoted(&path)
        ))
    }

    fn render_text(&self) -> anyhow::Result<String> {
        let bytes = std::fs::read(&self.source_path)
            .with_context(|| format!("failed to read: {}", self.source_path.display()))?;
        let text = String::from_utf8_lossy(&bytes);
        let fence = code_fence(&text);

        Ok(format!(
            "# 📄 {}\n\n{fence}text\n{text}\n{fence}",
            self.file_name
        ))
    }
}

fn posix_path(path: &Path) -> anyhow::Result<String> {
    let path = path
        .to_str()
        .with_context(|| format!("path isn't valid utf-8: {}", path.display()))?;

    if cfg!(windows) {
        Ok(path.replace('\\', "/"))
    } else {
        Ok(path.to_string())
    }
}

/// Escape for a Jinja single-quoted string literal.
fn escape_single_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '\'') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// At least three backticks, and longer than any backtick run in `text`.
fn code_fence(text: &str) -> String {
    let longest = text
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or_default();
    "`".repeat(longest.max(2) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_extension() {
        assert_eq!(PageKind::from_path("a/b.csv"), Some(PageKind::Table));
        assert_eq!(PageKind::from_path("b.txt"), Some(PageKind::Text));
        assert_eq!(PageKind::from_path("b.md"), None);
        assert_eq!(PageKind::from_path("b.CSV"), None);
        assert_eq!(PageKind::from_path("csv"), None);
    }

    #[test]
    fn page_file_name_appends_md() {
        let page = Page::new("/data/report.csv").unwrap().unwrap();
        assert_eq!(page.page_file_name(), "report.csv.md");

        assert!(Page::new("/data/image.png").unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn table_page_references_absolute_path() {
        let page = Page::new("/data/reports/q1.csv").unwrap().unwrap();
        assert_eq!(
            page.render().unwrap(),
            "# 📊 q1.csv\n\n{{ read_csv('/data/reports/q1.csv') }}"
        );
    }

    #[cfg(unix)]
    #[test]
    fn table_page_escapes_quotes_in_path() {
        let page = Page::new("/data/it's/q1.csv").unwrap().unwrap();
        assert_eq!(
            page.render().unwrap(),
            "# 📊 q1.csv\n\n{{ read_csv('/data/it\\'s/q1.csv') }}"
        );
    }

    #[test]
    fn text_page_is_verbatim() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let page = Page::new(&path).unwrap().unwrap();
        assert_eq!(
            page.render().unwrap(),
            "# 📄 notes.txt\n\n```text\nhello\n```"
        );
    }

    #[test]
    fn text_page_replaces_invalid_utf8() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("bad.txt");
        std::fs::write(&path, b"ok \xff\xfe end").unwrap();

        let page = Page::new(&path).unwrap().unwrap();
        let rendered = page.render().unwrap();
        assert!(rendered.contains("ok \u{FFFD}\u{FFFD} end"));
    }

    #[test]
    fn text_page_missing_file_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("gone.txt");

        let page = Page::new(&path).unwrap().unwrap();
        let err = page.render().unwrap_err().to_string();
        assert!(err.contains("gone.txt"));
    }

    #[test]
    fn fence_outgrows_backticks_in_content() {
        assert_eq!(code_fence("plain"), "```");
        assert_eq!(code_fence("a `b` c"), "```");
        assert_eq!(code_fence("```rust\nfn main() {}\n```"), "````");
        assert_eq!(code_fence("`````"), "``````");
    }
}
