use super::{
    project, project_many, MarkdownRenderer, Renderer, TemplateData, TemplateVars,
    CHANGELOG_TEMPLATE, RELEASE_NOTES_TEMPLATE,
};
use crate::domain::SectionTable;
use crate::error::{Result, SvError};
use crate::release_note::ReleaseNote;

/// Renders release notes and changelogs through a [`Renderer`]
pub struct OutputFormatter<R: Renderer = MarkdownRenderer> {
    renderer: R,
    table: SectionTable,
}

impl OutputFormatter<MarkdownRenderer> {
    /// Formatter backed by the built-in Markdown renderer
    pub fn markdown(table: SectionTable) -> Self {
        OutputFormatter {
            renderer: MarkdownRenderer::new(),
            table,
        }
    }
}

impl<R: Renderer> OutputFormatter<R> {
    /// Wrap a renderer, failing if it does not serve both templates.
    pub fn new(renderer: R, table: SectionTable) -> Result<Self> {
        let available = renderer.templates();
        for required in [RELEASE_NOTES_TEMPLATE, CHANGELOG_TEMPLATE] {
            if !available.contains(&required) {
                return Err(SvError::template_not_found(required));
            }
        }
        Ok(OutputFormatter { renderer, table })
    }

    pub fn template_vars(&self, note: &ReleaseNote) -> TemplateVars {
        project(note, &self.table)
    }

    pub fn format_release_note(&self, note: &ReleaseNote) -> Result<String> {
        let vars = self.template_vars(note);
        self.renderer
            .render(RELEASE_NOTES_TEMPLATE, TemplateData::ReleaseNote(&vars))
    }

    pub fn format_changelog(&self, notes: &[ReleaseNote]) -> Result<String> {
        let releases = project_many(notes, &self.table);
        self.renderer
            .render(CHANGELOG_TEMPLATE, TemplateData::Changelog(&releases))
    }
}
