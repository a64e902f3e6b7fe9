//! The editing session: the skin being painted, the active paint color and
//! the import/export commands.

use std::{
    future::Future,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use log::{debug, info};

use crate::{
    atlas::{self, AtlasImage},
    color::Color,
    config::EditorConfig,
    error::{AtlasError, EditorError},
    face::Face,
    model,
    skin::SkinState,
    texture::{CubeRenderer, CubeTextures},
};

/// Value of the pending-import slot while no import is in flight.
const NO_IMPORT: u64 = 0;

/// Proof that an import was started. Hand it back to `Editor::finish_import`
/// together with the decoded atlas.
///
/// Dropping a ticket that was never handed back releases the import, so an
/// abandoned or cancelled import never blocks the next one.
#[derive(Debug)]
#[must_use]
pub struct ImportTicket {
    pending: Arc<AtomicU64>,
    sequence: u64,
}

impl ImportTicket {
    /// Clears the pending slot if it still belongs to this ticket.
    fn release(&self) -> bool {
        self.pending
            .compare_exchange(self.sequence, NO_IMPORT, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl Drop for ImportTicket {
    fn drop(&mut self) {
        if self.release() {
            debug!("dropped import {}", self.sequence);
        }
    }
}

pub struct Editor {
    config: EditorConfig,
    skin: SkinState,
    active_color: Color,

    import_sequence: u64,
    pending_import: Arc<AtomicU64>,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            skin: SkinState::filled(config.default_color),
            active_color: config.initial_color,
            config,

            import_sequence: NO_IMPORT,
            pending_import: Arc::new(AtomicU64::new(NO_IMPORT)),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn skin(&self) -> &SkinState {
        &self.skin
    }

    /// Copies the current skin, e.g. for handing to a render thread.
    pub fn snapshot(&self) -> SkinState {
        self.skin.clone()
    }

    pub fn palette(&self) -> &[Color] {
        &self.config.palette
    }

    pub fn active_color(&self) -> Color {
        self.active_color
    }

    pub fn pick_color(&mut self, color: Color) {
        debug!("picked color {}", color);
        self.active_color = color;
    }

    /// Paints one pixel with the active color.
    pub fn paint_pixel(&mut self, face: Face, x: i32, y: i32) -> Result<(), EditorError> {
        self.skin.set_pixel(face, x, y, self.active_color)?;
        Ok(())
    }

    pub fn is_importing(&self) -> bool {
        self.pending_import.load(Ordering::Acquire) != NO_IMPORT
    }

    /// Marks an import as in flight. Only one import may be pending at a time.
    pub fn begin_import(&mut self) -> Result<ImportTicket, EditorError> {
        if self.is_importing() {
            return Err(EditorError::ImportInProgress);
        }

        self.import_sequence += 1;
        self.pending_import.store(self.import_sequence, Ordering::Release);
        Ok(ImportTicket {
            pending: Arc::clone(&self.pending_import),
            sequence: self.import_sequence,
        })
    }

    fn take_pending(&mut self, ticket: &ImportTicket) -> Result<(), EditorError> {
        if !Arc::ptr_eq(&ticket.pending, &self.pending_import) || !ticket.release() {
            return Err(EditorError::StaleImport);
        }
        Ok(())
    }

    /// Completes the import started with `ticket`. The skin is only replaced
    /// when `decoded` is a usable atlas; any error leaves it as it was.
    pub fn finish_import(
        &mut self,
        ticket: ImportTicket,
        decoded: Result<AtlasImage, AtlasError>,
    ) -> Result<(), EditorError> {
        self.take_pending(&ticket)?;

        let skin = atlas::decode(&decoded?)?;
        self.skin.replace(skin.into_faces())?;
        info!("imported skin");
        Ok(())
    }

    /// Gives up on a pending import without touching the skin.
    pub fn abandon_import(&mut self, ticket: ImportTicket) -> Result<(), EditorError> {
        self.take_pending(&ticket)?;
        debug!("abandoned import {}", ticket.sequence);
        Ok(())
    }

    /// Replaces the skin with the head of the skin image in `bytes`.
    pub fn import_skin(&mut self, bytes: &[u8]) -> Result<(), EditorError> {
        let ticket = self.begin_import()?;
        self.finish_import(ticket, atlas::decode_png(bytes))
    }

    /// Like `import_skin`, but the image is decoded by `decoding`, which may
    /// suspend. The editor is borrowed for the whole import; dropping the
    /// returned future before it completes cancels the import.
    pub async fn import_skin_with<F>(&mut self, decoding: F) -> Result<(), EditorError>
    where
        F: Future<Output = Result<AtlasImage, AtlasError>>,
    {
        let ticket = self.begin_import()?;
        let decoded = decoding.await;
        self.finish_import(ticket, decoded)
    }

    pub fn export_atlas(&self) -> AtlasImage {
        atlas::encode(&self.skin)
    }

    /// Encodes the skin as a 64x32 PNG.
    pub fn export_skin(&self) -> Result<Vec<u8>, EditorError> {
        let bytes = atlas::encode_png(&self.export_atlas())?;
        info!("exported skin, {} bytes", bytes.len());
        Ok(bytes)
    }

    pub fn textures(&self) -> CubeTextures {
        CubeTextures::from_skin(&self.skin)
    }

    /// Sends the current face textures to `renderer`.
    pub fn refresh_preview<R: CubeRenderer>(&self, renderer: &mut R) {
        renderer.upload(&self.textures());
    }

    /// Encodes the head as a binary glTF model.
    pub fn export_model(&self) -> Result<Vec<u8>, EditorError> {
        let bytes = model::export_glb(&self.textures(), &self.config.model_options())?;
        info!("exported model, {} bytes", bytes.len());
        Ok(bytes)
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
