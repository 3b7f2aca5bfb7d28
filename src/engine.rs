use crate::cursor::PageCursor;
use crate::document::Document;
use crate::error::LayoutError;
use crate::geometry::PageGeometry;
use crate::instruction::LayoutResult;
use crate::measure::TextMeasurer;
use crate::render::BlockRenderer;

/// Paginates documents into multi-page draw programs.
///
/// The engine is stateless across calls: each [PaginationEngine::paginate]
/// invocation creates and exclusively owns its own cursor, so one engine
/// may serve many sequential runs, and independent engines (or one engine
/// behind a shared reference, since measuring is read-only) may paginate
/// different documents in parallel.
pub struct PaginationEngine<M: TextMeasurer> {
    measurer: M,
}

impl<M: TextMeasurer> PaginationEngine<M> {
    pub fn new(measurer: M) -> PaginationEngine<M> {
        PaginationEngine { measurer }
    }

    /// Lay the document's blocks onto pages of the given geometry, in their
    /// fixed construction order, and return the finished draw program.
    ///
    /// Fails atomically: an invalid geometry, an unmeasurable font/size, or
    /// a figure without usable dimensions aborts the run and no partial
    /// program is returned. No trailing blank page is started after the
    /// final block; a break belongs to the block that needs it.
    pub fn paginate(
        &self,
        document: &Document,
        geometry: &PageGeometry,
    ) -> Result<LayoutResult, LayoutError> {
        geometry.validate()?;

        log::debug!(
            "paginating \"{}\": {} blocks",
            document.title(),
            document.blocks().len()
        );

        let renderer = BlockRenderer::new(&self.measurer, geometry);
        let mut cursor = PageCursor::new(geometry);
        let mut instructions = Vec::new();

        for block in document.blocks() {
            renderer.render(block, &mut cursor, &mut instructions)?;
        }

        let result = LayoutResult::new(instructions);
        log::debug!(
            "paginated \"{}\" onto {} page(s), {} instruction(s)",
            document.title(),
            result.page_count(),
            result.instructions().len()
        );
        Ok(result)
    }
}
