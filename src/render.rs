//! Markdown rendering of the final citation list.
//!
//! The document starts with a front-matter block followed by one
//! `### <year>` section per year in input order:
//!
//! ```text
//! ---
//! title: "Publications"
//! ---
//!
//! This page was auto-generated using data from Google Scholar.
//!
//! ### 2020
//!
//! Smith, J. (2020). X. *Nature*, **10**(2), 1-5. [DOI](https://doi.org/10.1/xyz)
//!
//! ```

use crate::Publication;
use crate::utils::DOI_HOST;

const DEFAULT_TITLE: &str = "Publications";
const DEFAULT_NOTE: &str = "This page was auto-generated using data from Google Scholar.";

/// Configuration for the document header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Page title written into the front matter
    pub title: String,
    /// Paragraph written below the front matter, omitted when empty
    pub note: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            note: DEFAULT_NOTE.to_string(),
        }
    }
}

impl RenderConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page title.
    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    /// Sets the note paragraph.
    pub fn set_note(&mut self, note: &str) -> &mut Self {
        self.note = note.to_string();
        self
    }
}

/// Renders sorted publications as a Markdown document.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Front matter and note, ending with a blank line.
    pub fn header(&self) -> String {
        let mut header = format!("---\ntitle: \"{}\"\n---\n\n", self.config.title);
        if !self.config.note.is_empty() {
            header.push_str(&self.config.note);
            header.push_str("\n\n");
        }
        header
    }

    /// Renders the whole document.
    ///
    /// Publications with neither a title nor a venue are skipped.
    pub fn render(&self, publications: &[Publication]) -> String {
        let mut document = self.header();
        let mut current_year: Option<&str> = None;

        for publication in publications.iter().filter(|p| !p.is_blank()) {
            let year = publication.display_year();
            if current_year != Some(year) {
                if current_year.is_some() {
                    document.push('\n');
                }
                document.push_str(&format!("### {year}\n\n"));
                current_year = Some(year);
            }
            document.push_str(&render_citation(publication));
        }

        document
    }
}

/// Renders one publication, including its trailing blank line.
pub fn render_citation(publication: &Publication) -> String {
    let mut citation = format!(
        "{} ({}). {}.",
        publication.display_authors(),
        publication.display_year(),
        publication.display_title()
    );

    if let Some(venue) = &publication.venue {
        citation.push_str(&format!(" *{venue}*"));
        if let Some(volume) = &publication.volume {
            citation.push_str(&format!(", **{volume}**"));
            if let Some(issue) = &publication.issue {
                citation.push_str(&format!("({issue})"));
            }
        }
        if let Some(pages) = &publication.pages {
            citation.push_str(&format!(", {pages}"));
        }
    }
    citation.push('.');

    let links = render_links(publication);
    if !links.is_empty() {
        citation.push(' ');
        citation.push_str(&links.join(" "));
    }

    citation.push_str("\n\n");
    citation
}

fn render_links(publication: &Publication) -> Vec<String> {
    let mut links = Vec::new();
    if let Some(identifier) = &publication.identifier {
        links.push(format!("[DOI](https://doi.org/{identifier})"));
    }
    if let Some(link) = &publication.link
        && !link.contains(DOI_HOST)
    {
        links.push(format!("[OA]({link})"));
    }
    links
}
